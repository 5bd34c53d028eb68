use crate::vendor::{PseudoRequest, VendorOutcome, VendorService};
use crate::Result;
use layerloc_core::{Document, LayerLocError};
use layerloc_domain::{PseudoSummary, SCHEMA_VERSION};

/// Ask the vendor for pseudo-localization settings, then rewrite the text of
/// the current page (or of a `[<ratio>% pseudo localized]` copy of it).
/// Symbols on the target page are detached first so their text is reachable.
pub async fn pseudo_localize(
    doc: &mut Document,
    vendor: &dyn VendorService,
) -> Result<Option<PseudoSummary>> {
    let PseudoRequest { ratio, duplicate } = match vendor.pseudo_localize().await? {
        VendorOutcome::Completed(req) => req,
        VendorOutcome::Declined => {
            tracing::info!(event = "pseudo_declined");
            return Ok(None);
        }
    };

    if !layerloc_translate::is_valid_ratio(ratio) {
        return Err(LayerLocError::InvalidRatio(ratio).into());
    }

    if duplicate {
        doc.duplicate_current_page(&format!(" [{ratio}% pseudo localized]"))
            .ok_or(LayerLocError::NoCurrentPage)?;
    }
    doc.detach_symbols();

    let page = doc
        .current_page_mut()
        .ok_or(LayerLocError::NoCurrentPage)?;
    let name = page.name.clone();
    let layers = page.text_layers_mut();
    let total = layers.len();
    let changed = layerloc_translate::pseudo_localize_layers(layers, ratio);

    tracing::info!(event = "page_pseudo_localized", page = %name, ratio = ratio, layers = total, changed = changed);
    Ok(Some(PseudoSummary {
        schema_version: SCHEMA_VERSION,
        page: name,
        ratio,
        duplicated: duplicate,
        layers: total,
        changed,
    }))
}
