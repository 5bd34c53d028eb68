use crate::document::{load_document, save_document};
use crate::{ui, Ctx};
use std::path::PathBuf;

pub fn run_download(
    ctx: &Ctx,
    doc: PathBuf,
    vendor_root: Option<PathBuf>,
    locale: Option<String>,
    save: Option<PathBuf>,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "download_args", doc = ?doc, vendor_root = ?vendor_root, locale = ?locale);
    let mut document = load_document(&doc)?;
    let vendor = super::vendor(ctx, vendor_root, locale);

    let Some(summary) = ctx.block_on(layerloc_services::download_strings(&mut document, &vendor))?
    else {
        ui::aborted(ctx, "download");
        return Ok(());
    };
    let target = save.unwrap_or(doc);
    save_document(&target, &document)?;
    ui::emit(ctx, &summary, || super::import::report(ctx, &summary, &target))
}
