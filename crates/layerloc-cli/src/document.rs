use color_eyre::eyre::{Result, WrapErr};
use layerloc_core::fsutil::write_atomic;
use layerloc_core::Document;
use std::path::Path;

pub fn load_document(path: &Path) -> Result<Document> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("cannot read document {}", path.display()))?;
    let doc: Document = serde_json::from_str(&text)
        .wrap_err_with(|| format!("invalid document {}", path.display()))?;
    tracing::debug!(event = "document_loaded", path = %path.display(), pages = doc.pages.len());
    Ok(doc)
}

pub fn save_document(path: &Path, doc: &Document) -> Result<()> {
    let mut json = serde_json::to_string_pretty(doc)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())?;
    tracing::debug!(event = "document_saved", path = %path.display(), pages = doc.pages.len());
    Ok(())
}
