use crate::host::FileDialogs;
use crate::vendor::{Download, EventParams, VendorOutcome, VendorService};
use crate::Result;
use layerloc_core::{Document, LayerLocError, TranslationSet};
use layerloc_domain::{ImportSummary, SCHEMA_VERSION};
use layerloc_import::IMPORT_EXTENSIONS;
use std::path::Path;

pub const TRANSLATED_PAGE_SUFFIX: &str = " [Translated]";

/// Copy the current page as `<name><suffix>`, detach its symbols and apply
/// `translations` to its text layers. The original page is left untouched.
pub fn translate_into_copy(
    doc: &mut Document,
    translations: &TranslationSet,
    suffix: &str,
    source: String,
) -> Result<ImportSummary> {
    doc.duplicate_current_page(suffix)
        .ok_or(LayerLocError::NoCurrentPage)?;
    let detached = doc.detach_symbols();

    let page = doc
        .current_page_mut()
        .ok_or(LayerLocError::NoCurrentPage)?;
    let name = page.name.clone();
    let layers = page.text_layers_mut();
    let total = layers.len();
    let translated = layerloc_translate::apply(layers, translations);

    tracing::info!(
        event = "page_translated",
        page = %name,
        source = %source,
        detached = detached,
        layers = total,
        translated = translated
    );
    Ok(ImportSummary {
        schema_version: SCHEMA_VERSION,
        source,
        page: name,
        detached_symbols: detached,
        layers: total,
        translated,
    })
}

/// Vendor JSON is decoded by the vendor; XLIFF is read locally.
async fn load_translations(vendor: &dyn VendorService, path: &Path) -> Result<TranslationSet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ext == "json" {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            LayerLocError::InvalidTranslations(format!("cannot read {}: {e}", path.display()))
        })?;
        return vendor.parse_xliff_data(&bytes).await;
    }
    Ok(layerloc_import::read_translations(path)?)
}

/// Ask for a translated file and apply it to a `[Translated]` copy of the
/// current page. A dismissed dialog yields `Ok(None)` with the document
/// unchanged.
pub async fn import_strings(
    doc: &mut Document,
    dialogs: &mut dyn FileDialogs,
    vendor: &dyn VendorService,
    page_suffix: &str,
) -> Result<Option<ImportSummary>> {
    let Some(path) = dialogs.open_path(IMPORT_EXTENSIONS) else {
        tracing::info!(event = "import_cancelled");
        return Ok(None);
    };
    let translations = load_translations(vendor, &path).await?;
    let summary = translate_into_copy(doc, &translations, page_suffix, path.display().to_string())?;
    vendor.track_event("String import", &EventParams::new());
    Ok(Some(summary))
}

/// Fetch translations for one locale from the vendor and apply them to a
/// `[<locale>]` copy of the current page.
pub async fn download_strings(
    doc: &mut Document,
    vendor: &dyn VendorService,
) -> Result<Option<ImportSummary>> {
    let Download {
        translations,
        locale,
    } = match vendor.download_strings().await? {
        VendorOutcome::Completed(d) => d,
        VendorOutcome::Declined => {
            tracing::info!(event = "download_declined");
            return Ok(None);
        }
    };
    let summary = translate_into_copy(
        doc,
        &translations,
        &format!(" [{locale}]"),
        format!("vendor:{locale}"),
    )?;
    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::FixedDialogs;
    use crate::vendor::testing::RecordingVendor;
    use layerloc_core::{
        Frame, GroupLayer, Layer, Page, SymbolInstance, SymbolMaster, TextLayer, TranslationUnit,
    };

    fn text(id: &str, s: &str) -> Layer {
        Layer::Text(TextLayer {
            id: id.into(),
            name: id.into(),
            text: s.into(),
            frame: Frame::new(0.0, 0.0, 10.0, 10.0),
            font_size: 10.0,
        })
    }

    fn sample() -> Document {
        Document {
            pages: vec![Page {
                id: "p1".into(),
                name: "Home".into(),
                layers: vec![
                    text("t1", "Hello"),
                    Layer::Group(GroupLayer {
                        id: "g1".into(),
                        name: "Card".into(),
                        frame: Frame::new(5.0, 5.0, 50.0, 50.0),
                        children: vec![text("t2", "Bye")],
                    }),
                    Layer::Symbol(SymbolInstance {
                        id: "s1".into(),
                        name: "Button".into(),
                        frame: Frame::new(0.0, 60.0, 40.0, 20.0),
                        master_id: "m1".into(),
                    }),
                ],
            }],
            symbols: vec![SymbolMaster {
                id: "m1".into(),
                name: "Button".into(),
                children: vec![text("mt", "OK")],
            }],
            current_page: 0,
        }
    }

    fn german() -> TranslationSet {
        let mut set = TranslationSet::new();
        set.push("Home-0", TranslationUnit::new("Hello", Some("Hallo")));
        set.push("Card-0", TranslationUnit::new("Bye", Some("")));
        set.push("mt", TranslationUnit::new("OK", Some("Gut")));
        set
    }

    fn texts(doc: &Document) -> Vec<String> {
        doc.current_page()
            .unwrap()
            .text_layers()
            .into_iter()
            .map(|t| t.text.clone())
            .collect()
    }

    #[test]
    fn copy_is_translated_and_original_kept() {
        let mut doc = sample();
        let summary =
            translate_into_copy(&mut doc, &german(), TRANSLATED_PAGE_SUFFIX, "f.json".into())
                .unwrap();

        assert_eq!(summary.page, "Home [Translated]");
        assert_eq!(summary.detached_symbols, 1);
        assert_eq!(summary.layers, 3);
        assert_eq!(summary.translated, 2);
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.current_page, 1);
        // empty target leaves "Bye" alone; detached symbol text is now reachable
        assert_eq!(texts(&doc), ["Bye", "Gut", "Hallo"]);

        doc.current_page = 0;
        assert_eq!(texts(&doc), ["Bye", "Hello"]);
    }

    #[test]
    fn translated_layer_is_resized() {
        let mut doc = sample();
        translate_into_copy(&mut doc, &german(), TRANSLATED_PAGE_SUFFIX, "x".into()).unwrap();
        let page = doc.current_page().unwrap();
        let hallo = page
            .text_layers()
            .into_iter()
            .find(|t| t.text == "Hallo")
            .unwrap();
        assert!((hallo.frame.width - 5.0 * 10.0 * 0.6).abs() < 1e-9);
    }

    #[tokio::test]
    async fn import_reads_vendor_json() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("de.json");
        std::fs::write(
            &file,
            r#"{"smartling": {"x": 1}, "Home-0": {"source": "Hello", "target": "Hallo"}}"#,
        )
        .unwrap();

        let mut doc = sample();
        let mut dialogs = FixedDialogs::opening(&file);
        let vendor = RecordingVendor::default();
        let summary = import_strings(&mut doc, &mut dialogs, &vendor, TRANSLATED_PAGE_SUFFIX)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.translated, 1);
        assert_eq!(vendor.events.lock().unwrap()[0].0, "String import");
    }

    #[tokio::test]
    async fn import_reads_xliff() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("de.xlf");
        std::fs::write(
            &file,
            r#"<?xml version="1.0"?><xliff version="1.2"><file><body>
<trans-unit id="Home-0"><source>Hello</source><target>Hallo</target></trans-unit>
</body></file></xliff>"#,
        )
        .unwrap();

        let mut doc = sample();
        let mut dialogs = FixedDialogs::opening(&file);
        let vendor = RecordingVendor::default();
        let summary = import_strings(&mut doc, &mut dialogs, &vendor, " [de]")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.page, "Home [de]");
        assert_eq!(summary.translated, 1);
    }

    #[tokio::test]
    async fn cancelled_import_leaves_document_alone() {
        let mut doc = sample();
        let before = doc.clone();
        let mut dialogs = FixedDialogs::default();
        let vendor = RecordingVendor::default();
        let out = import_strings(&mut doc, &mut dialogs, &vendor, TRANSLATED_PAGE_SUFFIX)
            .await
            .unwrap();
        assert!(out.is_none());
        assert_eq!(doc, before);
    }

    #[tokio::test]
    async fn invalid_file_leaves_document_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        std::fs::write(&file, "[1, 2]").unwrap();

        let mut doc = sample();
        let before = doc.clone();
        let mut dialogs = FixedDialogs::opening(&file);
        let vendor = RecordingVendor::default();
        assert!(
            import_strings(&mut doc, &mut dialogs, &vendor, TRANSLATED_PAGE_SUFFIX)
                .await
                .is_err()
        );
        assert_eq!(doc, before);
    }

    #[tokio::test]
    async fn download_names_page_after_locale() {
        let mut doc = sample();
        let vendor = RecordingVendor {
            download: Some(Download {
                translations: german(),
                locale: "de-DE".into(),
            }),
            ..Default::default()
        };
        let summary = download_strings(&mut doc, &vendor).await.unwrap().unwrap();
        assert_eq!(summary.page, "Home [de-DE]");
        assert_eq!(summary.source, "vendor:de-DE");
    }

    #[tokio::test]
    async fn declined_download_is_a_no_op() {
        let mut doc = sample();
        let vendor = RecordingVendor::default();
        assert!(download_strings(&mut doc, &vendor).await.unwrap().is_none());
        assert_eq!(doc.pages.len(), 1);
    }
}
