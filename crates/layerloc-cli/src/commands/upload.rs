use crate::document::load_document;
use crate::{ui, ui_ok, Ctx};
use layerloc_services::SvgPageRenderer;
use std::path::PathBuf;

pub fn run_upload(
    ctx: &Ctx,
    doc: PathBuf,
    vendor_root: Option<PathBuf>,
    temp_dir: Option<PathBuf>,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "upload_args", doc = ?doc, vendor_root = ?vendor_root, temp_dir = ?temp_dir);
    let document = load_document(&doc)?;
    let vendor = super::vendor(ctx, vendor_root, None);
    let temp_dir = temp_dir
        .or_else(|| ctx.cfg.temp_dir.clone().map(PathBuf::from))
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&temp_dir)?;

    let Some(summary) = ctx.block_on(layerloc_services::upload_strings(
        &document,
        &vendor,
        &SvgPageRenderer,
        &temp_dir,
    ))?
    else {
        ui::aborted(ctx, "upload");
        return Ok(());
    };
    ui::emit(ctx, &summary, || {
        ui_ok!(
            "Uploaded {} strings as {} to project {}",
            ui::count(ctx, summary.keys),
            summary.strings_file,
            summary.project_id
        );
        if !summary.context_uploaded {
            ui_ok!("Context image was not uploaded, see the log for details");
        }
    })
}
