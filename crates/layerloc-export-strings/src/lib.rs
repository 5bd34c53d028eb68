use layerloc_core::fsutil::write_atomic;
use layerloc_core::text::escape_newlines;
use layerloc_core::{Result, StringCatalog};
use std::path::Path;

fn escape_strings(s: &str) -> String {
    escape_newlines(s).replace('"', "\\\"")
}

/// One `"KEY" = "TEXT";` line per entry, each newline-terminated.
pub fn render_strings(catalog: &StringCatalog) -> String {
    let mut out = String::new();
    for (key, value) in catalog.iter() {
        out.push('"');
        out.push_str(&escape_strings(key));
        out.push_str("\" = \"");
        out.push_str(&escape_strings(value));
        out.push_str("\";\n");
    }
    out
}

pub fn write_strings(path: &Path, catalog: &StringCatalog) -> Result<()> {
    write_atomic(path, render_strings(catalog).as_bytes())?;
    Ok(())
}
