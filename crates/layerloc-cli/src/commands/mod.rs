pub mod download;
pub mod extract;
pub mod import;
pub mod logout;
pub mod pseudo;
pub mod schema;
pub mod upload;

use crate::Ctx;
use layerloc_services::{ExportFormat, OfflineVendor};
use std::path::PathBuf;

const DEFAULT_VENDOR_ROOT: &str = ".layerloc/vendor";
const DEFAULT_LOCALE: &str = "en";

/// Offline vendor rooted at the flag, the configured root, or the default.
pub(crate) fn vendor(ctx: &Ctx, root: Option<PathBuf>, locale: Option<String>) -> OfflineVendor {
    let vendor_cfg = ctx.cfg.vendor.clone().unwrap_or_default();
    let root = root
        .or_else(|| vendor_cfg.root.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_VENDOR_ROOT));
    let locale = locale
        .or(vendor_cfg.locale)
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    tracing::debug!(event = "vendor_selected", root = %root.display(), locale = %locale);
    OfflineVendor::new(root, locale)
}

pub(crate) fn default_format(ctx: &Ctx) -> ExportFormat {
    let configured = ctx
        .cfg
        .export
        .as_ref()
        .and_then(|e| e.default_format.as_deref());
    match configured.map(|f| (f, ExportFormat::from_extension(f))) {
        Some((_, Some(format))) => format,
        Some((other, None)) => {
            tracing::warn!(event = "config_unknown_format", format = other);
            ExportFormat::Json
        }
        None => ExportFormat::Json,
    }
}
