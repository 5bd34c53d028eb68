use crate::host::FileDialogs;
use crate::vendor::{EventParams, VendorService};
use crate::{current_page, Result};
use layerloc_core::{Document, LayerLocError, StringCatalog, NO_STRINGS_ALERT};
use layerloc_domain::{ExportSummary, SCHEMA_VERSION};
use layerloc_extract::StringCatalogBuilder;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Xliff,
    Strings,
}

impl ExportFormat {
    /// In the order the save dialog offers them.
    pub const ALL: &'static [ExportFormat] =
        &[ExportFormat::Json, ExportFormat::Xliff, ExportFormat::Strings];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Xliff => "xlf",
            ExportFormat::Strings => "strings",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "xlf" | "xliff" => Some(ExportFormat::Xliff),
            "strings" => Some(ExportFormat::Strings),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Deduplicated catalog of the current page, plus the number of keys the
/// dedupe dropped.
pub fn page_catalog(doc: &Document) -> Result<(StringCatalog, usize)> {
    let page = current_page(doc)?;
    let (catalog, dropped) = StringCatalogBuilder::new(&doc.symbols).build_for_export(page);
    tracing::debug!(event = "catalog_ready", page = %page.name, keys = catalog.len(), dropped = dropped);
    Ok((catalog, dropped))
}

pub fn write_catalog(format: ExportFormat, path: &Path, catalog: &StringCatalog) -> Result<()> {
    match format {
        ExportFormat::Json => layerloc_export_json::write_json(path, catalog)?,
        ExportFormat::Xliff => layerloc_export_xliff::write_xliff(path, catalog)?,
        ExportFormat::Strings => layerloc_export_strings::write_strings(path, catalog)?,
    }
    tracing::info!(event = "catalog_written", path = %path.display(), format = format.extension(), keys = catalog.len());
    Ok(())
}

/// Build the current page's catalog and save it where the user picks.
///
/// An empty page raises the "no strings" alert and fails with
/// [`LayerLocError::EmptyInput`] before any dialog opens. A dismissed dialog
/// yields `Ok(None)`.
pub fn extract_strings(
    doc: &Document,
    dialogs: &mut dyn FileDialogs,
    vendor: &dyn VendorService,
) -> Result<Option<ExportSummary>> {
    let (catalog, dropped) = page_catalog(doc)?;
    if catalog.is_empty() {
        vendor.show_alert(NO_STRINGS_ALERT, None);
        return Err(LayerLocError::EmptyInput.into());
    }

    let Some(path) = dialogs.save_path(ExportFormat::ALL) else {
        tracing::info!(event = "export_cancelled");
        return Ok(None);
    };
    let format = ExportFormat::from_path(&path).ok_or_else(|| {
        LayerLocError::UnsupportedFormat(
            path.extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )
    })?;

    write_catalog(format, &path, &catalog)?;

    let mut params = EventParams::new();
    params.insert("Format".into(), format.extension().into());
    vendor.track_event("String export", &params);

    Ok(Some(ExportSummary {
        schema_version: SCHEMA_VERSION,
        path: path.display().to_string(),
        format: format.extension().to_string(),
        keys: catalog.len(),
        duplicates_dropped: dropped,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::FixedDialogs;
    use crate::vendor::testing::RecordingVendor;
    use layerloc_core::{Frame, Layer, Page, TextLayer};

    fn text(id: &str, s: &str) -> Layer {
        Layer::Text(TextLayer {
            id: id.into(),
            name: id.into(),
            text: s.into(),
            frame: Frame::new(0.0, 0.0, 10.0, 10.0),
            font_size: 14.0,
        })
    }

    fn doc(layers: Vec<Layer>) -> Document {
        Document {
            pages: vec![Page {
                id: "p1".into(),
                name: "Home".into(),
                layers,
            }],
            symbols: vec![],
            current_page: 0,
        }
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ExportFormat::from_extension("XLF"), Some(ExportFormat::Xliff));
        assert_eq!(ExportFormat::from_extension("xliff"), Some(ExportFormat::Xliff));
        assert_eq!(
            ExportFormat::from_path(Path::new("a/b.strings")),
            Some(ExportFormat::Strings)
        );
        assert_eq!(ExportFormat::from_path(Path::new("a/b.po")), None);
    }

    #[test]
    fn export_writes_deduplicated_json_and_tracks_event() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");
        let d = doc(vec![text("a", "Hello"), text("b", "Hello"), text("c", "Bye")]);
        let mut dialogs = FixedDialogs::saving(&out);
        let vendor = RecordingVendor::default();

        let summary = extract_strings(&d, &mut dialogs, &vendor).unwrap().unwrap();
        assert_eq!(summary.keys, 2);
        assert_eq!(summary.duplicates_dropped, 1);
        assert_eq!(summary.format, "json");
        assert_eq!(dialogs.offered, ExportFormat::ALL);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["Home-0"], "Hello");
        assert_eq!(written["Home-2"], "Bye");
        assert!(written.get("Home-1").is_none());

        let events = vendor.events.lock().unwrap();
        assert_eq!(events[0].0, "String export");
        assert_eq!(events[0].1["Format"], "json");
    }

    #[test]
    fn empty_page_alerts_before_dialog() {
        let d = doc(vec![]);
        let mut dialogs = FixedDialogs::default();
        let vendor = RecordingVendor::default();

        let err = extract_strings(&d, &mut dialogs, &vendor).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LayerLocError>(),
            Some(LayerLocError::EmptyInput)
        ));
        assert_eq!(vendor.alerts.lock().unwrap().as_slice(), [NO_STRINGS_ALERT]);
        assert!(dialogs.offered.is_empty());
    }

    #[test]
    fn cancelled_dialog_writes_nothing() {
        let d = doc(vec![text("a", "Hello")]);
        let mut dialogs = FixedDialogs::default();
        let vendor = RecordingVendor::default();
        assert!(extract_strings(&d, &mut dialogs, &vendor).unwrap().is_none());
        assert!(vendor.events.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let d = doc(vec![text("a", "Hello")]);
        let mut dialogs = FixedDialogs::saving(&dir.path().join("out.po"));
        let vendor = RecordingVendor::default();
        let err = extract_strings(&d, &mut dialogs, &vendor).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LayerLocError>(),
            Some(LayerLocError::UnsupportedFormat(ext)) if ext == "po"
        ));
        assert!(!dir.path().join("out.po").exists());
    }
}
