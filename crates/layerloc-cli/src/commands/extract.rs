use crate::dialogs::ArgDialogs;
use crate::document::load_document;
use crate::{ui, ui_ok, Ctx};
use std::path::PathBuf;

pub fn run_extract(ctx: &Ctx, doc: PathBuf, out: Option<PathBuf>) -> color_eyre::Result<()> {
    tracing::debug!(event = "extract_args", doc = ?doc, out = ?out);
    let document = load_document(&doc)?;
    let mut dialogs = ArgDialogs {
        save: out,
        open: None,
        default_format: super::default_format(ctx),
    };
    let vendor = super::vendor(ctx, None, None);

    let Some(summary) = layerloc_services::extract_strings(&document, &mut dialogs, &vendor)?
    else {
        ui::aborted(ctx, "export");
        return Ok(());
    };
    ui::emit(ctx, &summary, || {
        ui_ok!(
            "Saved {} strings to {}",
            ui::count(ctx, summary.keys),
            ui::path(ctx, &summary.path)
        );
        if summary.duplicates_dropped > 0 {
            ui_ok!(
                "Skipped {} duplicate texts",
                ui::count(ctx, summary.duplicates_dropped)
            );
        }
    })
}
