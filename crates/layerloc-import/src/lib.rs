//! Readers for translated files. Both formats produce a [`TranslationSet`]
//! whose iteration order follows the file.

use layerloc_core::{LayerLocError, TranslationSet};
use std::path::Path;

mod json;
mod xliff;

pub use json::parse_translations;
pub use xliff::parse_xliff;

/// Extensions accepted by [`read_translations`].
pub const IMPORT_EXTENSIONS: &[&str] = &["json", "xlf", "xliff"];

/// Read a translated file, picking the parser from the extension.
pub fn read_translations(path: &Path) -> Result<TranslationSet, LayerLocError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let bytes = std::fs::read(path).map_err(|e| {
        LayerLocError::InvalidTranslations(format!("cannot read {}: {e}", path.display()))
    })?;

    let set = match ext.as_str() {
        "json" => parse_translations(&bytes)?,
        "xlf" | "xliff" => {
            let text = String::from_utf8_lossy(&bytes);
            parse_xliff(&text)?
        }
        other => return Err(LayerLocError::UnsupportedFormat(other.to_string())),
    };
    tracing::debug!(event = "translations_loaded", path = %path.display(), keys = set.len());
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("fr.json");
        std::fs::write(&json, r#"{"A-0": [{"source": "Hello", "target": "Bonjour"}]}"#).unwrap();
        let xlf = dir.path().join("fr.XLF");
        std::fs::write(
            &xlf,
            r#"<xliff><file><body><trans-unit resname="A-0"><source>Hello</source><target>Salut</target></trans-unit></body></file></xliff>"#,
        )
        .unwrap();

        let a = read_translations(&json).unwrap();
        let b = read_translations(&xlf).unwrap();
        assert_eq!(a.group("A-0").unwrap()[0].translated(), Some("Bonjour"));
        assert_eq!(b.group("A-0").unwrap()[0].translated(), Some("Salut"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fr.po");
        std::fs::write(&path, "msgid \"\"").unwrap();
        assert!(matches!(
            read_translations(&path),
            Err(LayerLocError::UnsupportedFormat(ext)) if ext == "po"
        ));
    }
}
