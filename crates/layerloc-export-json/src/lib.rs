use layerloc_core::fsutil::write_atomic;
use layerloc_core::{Result, StringCatalog};
use std::path::Path;

/// Directive block spliced in place of the opening brace of the export.
/// Downstream tooling looks for the `smartling` key at the top level, next to
/// the string keys.
pub const DIRECTIVES_HEADER: &str = r#"{
  "smartling": {
    "translate_paths": {
      "path": "/*",
      "key": "{*}",
      "string_format_paths": "html: *"
    }
  },"#;

/// Pretty-printed `{key: text}` in catalog order, prefixed with the
/// directive block.
pub fn render_json(catalog: &StringCatalog) -> Result<String> {
    if catalog.is_empty() {
        let header = DIRECTIVES_HEADER.trim_end_matches(',');
        return Ok(format!("{header}\n}}"));
    }

    let body = serde_json::to_string_pretty(catalog)?;
    let rest = body
        .strip_prefix('{')
        .ok_or_else(|| color_eyre::eyre::eyre!("serialized catalog is not an object"))?;
    Ok(format!("{DIRECTIVES_HEADER}{rest}"))
}

pub fn write_json(path: &Path, catalog: &StringCatalog) -> Result<()> {
    let json = render_json(catalog)?;
    write_atomic(path, json.as_bytes())?;
    Ok(())
}
