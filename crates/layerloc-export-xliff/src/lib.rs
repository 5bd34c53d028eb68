use layerloc_core::fsutil::write_atomic;
use layerloc_core::text::escape_newlines;
use layerloc_core::{Result, StringCatalog};
use quick_xml::escape::{escape, partial_escape};
use std::path::Path;

const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<xliff version=\"1.2\" xmlns=\"urn:oasis:names:tc:xliff:document:1.2\" \
xsi:schemaLocation=\"urn:oasis:names:tc:xliff:document:1.2 xliff-core-1.2-strict.xsd\">\n\
<file original=\"smartling_offline_cat_data.xliff\" source-language=\"en-US\" target-language=\" \" datatype=\"plaintext\">\n\
<header>\n\
</header>\n\
<body>\n\n";

const FOOTER: &str = "</body>\n</file>\n</xliff>";

/// XLIFF 1.2 document with one empty-target `trans-unit` per entry.
///
/// Line breaks in the text are written as the literal characters `\n`, which
/// is what the translation tool expects in plaintext units; markup characters
/// are entity-escaped.
pub fn render_xliff(catalog: &StringCatalog) -> String {
    let mut body = String::new();
    for (key, value) in catalog.iter() {
        let text = escape_newlines(value);
        body.push_str(&format!(
            "<trans-unit resname=\"{}\">\n<source>{}</source>\n<target></target>\n</trans-unit>\n\n",
            escape(key),
            partial_escape(text.as_str()),
        ));
    }
    format!("{HEADER}{body}{FOOTER}")
}

pub fn write_xliff(path: &Path, catalog: &StringCatalog) -> Result<()> {
    write_atomic(path, render_xliff(catalog).as_bytes())?;
    Ok(())
}
