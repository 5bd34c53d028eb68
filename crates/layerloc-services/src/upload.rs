use crate::host::PageRenderer;
use crate::vendor::{VendorOutcome, VendorService};
use crate::{current_page, Result};
use layerloc_core::{Document, LayerLocError, NO_STRINGS_ALERT};
use layerloc_domain::{ContextString, Coordinates, UploadSummary, SCHEMA_VERSION};
use std::path::Path;

/// Save the current page's catalog as `strings-<millis>.json` under
/// `temp_dir` and hand it to the vendor. Once the vendor accepts it, a page
/// image with string positions is sent as context; a failed context upload
/// is logged and reported in the summary, not raised.
pub async fn upload_strings(
    doc: &Document,
    vendor: &dyn VendorService,
    renderer: &dyn PageRenderer,
    temp_dir: &Path,
) -> Result<Option<UploadSummary>> {
    let (catalog, _) = crate::export::page_catalog(doc)?;
    if catalog.is_empty() {
        vendor.show_alert(NO_STRINGS_ALERT, None);
        return Err(LayerLocError::EmptyInput.into());
    }

    let strings_file = format!("strings-{}.json", chrono::Utc::now().timestamp_millis());
    let path = temp_dir.join(&strings_file);
    layerloc_export_json::write_json(&path, &catalog)?;

    let project_id = match vendor.upload_strings_from_file(&path).await? {
        VendorOutcome::Completed(id) => id,
        VendorOutcome::Declined => {
            tracing::info!(event = "upload_declined", file = %path.display());
            return Ok(None);
        }
    };
    tracing::info!(event = "strings_uploaded", project = %project_id, file = %strings_file, keys = catalog.len());

    let context_uploaded =
        match capture_context(doc, vendor, renderer, &project_id, &strings_file, temp_dir).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(event = "context_upload_failed", project = %project_id, error = %e);
                false
            }
        };

    Ok(Some(UploadSummary {
        schema_version: SCHEMA_VERSION,
        project_id,
        strings_file,
        keys: catalog.len(),
        context_uploaded,
    }))
}

/// Positions of every text layer relative to the page's content bounds, in
/// translation order.
pub fn context_strings(page: &layerloc_core::Page) -> Vec<ContextString> {
    let bounds = page.content_bounds().unwrap_or_default();
    page.positioned_text_layers()
        .into_iter()
        .map(|(layer, frame)| ContextString {
            text: layer.text.clone(),
            coordinates: Coordinates {
                left: frame.x - bounds.x,
                top: frame.y - bounds.y,
                width: frame.width,
                height: frame.height,
            },
        })
        .collect()
}

/// Render the current page and upload it with the string positions.
pub async fn capture_context(
    doc: &Document,
    vendor: &dyn VendorService,
    renderer: &dyn PageRenderer,
    project_id: &str,
    strings_file: &str,
    temp_dir: &Path,
) -> Result<()> {
    let page = current_page(doc)?;
    let image = renderer.export_page_image(page, temp_dir)?;
    let strings = context_strings(page);
    tracing::debug!(event = "context_captured", image = %image.display(), strings = strings.len());
    vendor
        .upload_context_image(&image, project_id, strings_file, &strings)
        .await
}

pub async fn logout(vendor: &dyn VendorService) -> Result<()> {
    vendor.log_out().await?;
    tracing::info!(event = "logged_out");
    Ok(())
}
