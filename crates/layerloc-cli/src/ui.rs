// Console output helpers. Logs go to stderr through tracing; these write
// the user-facing result lines.

use crate::{Ctx, OutputFormat};
use owo_colors::OwoColorize;
use serde::Serialize;

#[macro_export]
macro_rules! ui_ok {
    ($($arg:tt)*) => {{
        println!("✔ {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! ui_info {
    ($($arg:tt)*) => {{
        eprintln!("ℹ {}", format!($($arg)*));
    }};
}

/// Print `summary` as pretty JSON, or run `text` for the human form.
pub fn emit<T: Serialize>(ctx: &Ctx, summary: &T, text: impl FnOnce()) -> color_eyre::Result<()> {
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => text(),
    }
    Ok(())
}

/// A count, highlighted when colors are on.
pub fn count(ctx: &Ctx, n: usize) -> String {
    if ctx.use_color {
        n.green().to_string()
    } else {
        n.to_string()
    }
}

pub fn path(ctx: &Ctx, p: &str) -> String {
    if ctx.use_color {
        p.blue().to_string()
    } else {
        p.to_string()
    }
}

/// Message for flows the user backed out of.
pub fn aborted(ctx: &Ctx, what: &str) {
    if ctx.format == OutputFormat::Text {
        ui_info!("{what} cancelled, nothing changed");
    }
}
