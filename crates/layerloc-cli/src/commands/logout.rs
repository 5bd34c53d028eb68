use crate::{ui_ok, Ctx, OutputFormat};
use std::path::PathBuf;

pub fn run_logout(ctx: &Ctx, vendor_root: Option<PathBuf>) -> color_eyre::Result<()> {
    let vendor = super::vendor(ctx, vendor_root, None);
    ctx.block_on(layerloc_services::logout(&vendor))?;
    if ctx.format == OutputFormat::Text {
        ui_ok!("Logged out");
    }
    Ok(())
}
