//! High-level orchestration layer over lower-level crates.
//! Each flow mirrors one user action: it talks to the host through
//! [`FileDialogs`]/[`PageRenderer`] and to the translation service through
//! [`VendorService`], and mutates the document only after the one vendor
//! request it depends on has completed.

pub mod export;
pub mod host;
pub mod import;
pub mod pseudo;
pub mod render;
pub mod upload;
pub mod vendor;

pub use layerloc_core::{Document, LayerLocError, Result, StringCatalog, TranslationSet};

pub use export::{extract_strings, page_catalog, write_catalog, ExportFormat};
pub use host::{FileDialogs, PageRenderer};
pub use import::{download_strings, import_strings, translate_into_copy, TRANSLATED_PAGE_SUFFIX};
pub use pseudo::pseudo_localize;
pub use render::SvgPageRenderer;
pub use upload::{capture_context, context_strings, logout, upload_strings};
pub use vendor::offline::OfflineVendor;
pub use vendor::{Download, EventParams, PseudoRequest, VendorOutcome, VendorService};

/// Borrow the current page or fail with [`LayerLocError::NoCurrentPage`].
pub(crate) fn current_page(doc: &Document) -> Result<&layerloc_core::Page> {
    Ok(doc.current_page().ok_or(LayerLocError::NoCurrentPage)?)
}
