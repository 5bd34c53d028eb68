use crate::dialogs::ArgDialogs;
use crate::document::{load_document, save_document};
use crate::{ui, ui_ok, Ctx};
use layerloc_services::TRANSLATED_PAGE_SUFFIX;
use std::path::PathBuf;

pub fn run_import(
    ctx: &Ctx,
    doc: PathBuf,
    file: Option<PathBuf>,
    suffix: Option<String>,
    save: Option<PathBuf>,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "import_args", doc = ?doc, file = ?file, suffix = ?suffix, save = ?save);
    let mut document = load_document(&doc)?;
    let mut dialogs = ArgDialogs {
        save: None,
        open: file,
        default_format: super::default_format(ctx),
    };
    let vendor = super::vendor(ctx, None, None);
    let suffix = suffix
        .or_else(|| ctx.cfg.import.as_ref().and_then(|i| i.page_suffix.clone()))
        .unwrap_or_else(|| TRANSLATED_PAGE_SUFFIX.to_string());

    let Some(summary) = ctx.block_on(layerloc_services::import_strings(
        &mut document,
        &mut dialogs,
        &vendor,
        &suffix,
    ))?
    else {
        ui::aborted(ctx, "import");
        return Ok(());
    };
    let target = save.unwrap_or(doc);
    save_document(&target, &document)?;
    ui::emit(ctx, &summary, || report(ctx, &summary, &target))
}

pub(crate) fn report(ctx: &Ctx, summary: &layerloc_domain::ImportSummary, target: &std::path::Path) {
    ui_ok!(
        "Translated {} of {} text layers on page \"{}\"",
        ui::count(ctx, summary.translated),
        ui::count(ctx, summary.layers),
        summary.page
    );
    ui_ok!("Document saved to {}", ui::path(ctx, &target.display().to_string()));
}
