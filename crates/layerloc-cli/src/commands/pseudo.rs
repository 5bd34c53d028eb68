use crate::document::{load_document, save_document};
use crate::{ui, ui_ok, Ctx};
use layerloc_services::PseudoRequest;
use std::path::PathBuf;

pub fn run_pseudo(
    ctx: &Ctx,
    doc: PathBuf,
    ratio: Option<f64>,
    duplicate: bool,
    save: Option<PathBuf>,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "pseudo_args", doc = ?doc, ratio = ?ratio, duplicate = duplicate);
    let mut document = load_document(&doc)?;
    let pseudo_cfg = ctx.cfg.pseudo.clone().unwrap_or_default();
    // no ratio anywhere means the prompt was dismissed
    let request = ratio.or(pseudo_cfg.ratio).map(|ratio| PseudoRequest {
        ratio,
        duplicate: duplicate || pseudo_cfg.duplicate.unwrap_or(false),
    });
    let vendor = super::vendor(ctx, None, None).with_pseudo(request);

    let Some(summary) = ctx.block_on(layerloc_services::pseudo_localize(&mut document, &vendor))?
    else {
        ui::aborted(ctx, "pseudo-localization");
        return Ok(());
    };
    let target = save.unwrap_or(doc);
    save_document(&target, &document)?;
    ui::emit(ctx, &summary, || {
        ui_ok!(
            "Pseudo-localized {} of {} text layers on page \"{}\" at {}%",
            ui::count(ctx, summary.changed),
            ui::count(ctx, summary.layers),
            summary.page,
            summary.ratio
        );
        ui_ok!("Document saved to {}", ui::path(ctx, &target.display().to_string()));
    })
}
