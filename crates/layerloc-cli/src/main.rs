use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod dialogs;
mod document;
mod ui;

#[derive(Parser)]
#[command(name = "layerloc", version, about = "Localization toolkit for design documents")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Only log warnings and errors to the console
    #[arg(long, global = true)]
    quiet: bool,

    /// Summary output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export the current page's strings to .json, .xlf or .strings
    Extract {
        #[arg(long)]
        doc: PathBuf,
        /// Destination; without an extension the configured default format is appended
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Upload the current page's strings and a context image to the vendor
    Upload {
        #[arg(long)]
        doc: PathBuf,
        #[arg(long)]
        vendor_root: Option<PathBuf>,
        #[arg(long)]
        temp_dir: Option<PathBuf>,
    },

    /// Apply a translated file to a copy of the current page
    Import {
        #[arg(long)]
        doc: PathBuf,
        /// Translated .json or .xlf file
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(long)]
        suffix: Option<String>,
        /// Write the updated document here instead of back to --doc
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Download translations for a locale and apply them to a copy of the current page
    Download {
        #[arg(long)]
        doc: PathBuf,
        #[arg(long)]
        vendor_root: Option<PathBuf>,
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Pseudo-localize the current page
    Pseudo {
        #[arg(long)]
        doc: PathBuf,
        /// Length ratio in percent, e.g. 130
        #[arg(long)]
        ratio: Option<f64>,
        /// Work on a copy of the page
        #[arg(long)]
        duplicate: bool,
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Forget vendor credentials
    Logout {
        #[arg(long)]
        vendor_root: Option<PathBuf>,
    },

    /// Dump JSON schemas of the command summaries
    Schema {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

/// Settings shared by every command.
pub struct Ctx {
    pub use_color: bool,
    pub format: OutputFormat,
    pub cfg: layerloc_config::LayerLocConfig,
    rt: tokio::runtime::Runtime,
}

impl Ctx {
    pub fn block_on<F: std::future::Future>(&self, fut: F) -> F::Output {
        self.rt.block_on(fut)
    }
}

trait Runnable {
    fn run(self, ctx: &Ctx) -> Result<()>;
}

impl Runnable for Commands {
    fn run(self, ctx: &Ctx) -> Result<()> {
        info!(event = "command_start", cmd = ?self);

        let result = match self {
            Commands::Extract { doc, out } => commands::extract::run_extract(ctx, doc, out),
            Commands::Upload {
                doc,
                vendor_root,
                temp_dir,
            } => commands::upload::run_upload(ctx, doc, vendor_root, temp_dir),
            Commands::Import {
                doc,
                file,
                suffix,
                save,
            } => commands::import::run_import(ctx, doc, file, suffix, save),
            Commands::Download {
                doc,
                vendor_root,
                locale,
                save,
            } => commands::download::run_download(ctx, doc, vendor_root, locale, save),
            Commands::Pseudo {
                doc,
                ratio,
                duplicate,
                save,
            } => commands::pseudo::run_pseudo(ctx, doc, ratio, duplicate, save),
            Commands::Logout { vendor_root } => commands::logout::run_logout(ctx, vendor_root),
            Commands::Schema { out_dir } => commands::schema::run_schema(ctx, out_dir),
        };

        debug!(event = "command_done", ok = result.is_ok());
        result
    }
}

fn init_tracing(quiet: bool) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = rolling::daily("logs", "layerloc.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if quiet { "warn" } else { "info" };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _guard = init_tracing(cli.quiet);

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    let ctx = Ctx {
        use_color,
        format: cli.format,
        cfg: layerloc_config::load_config(),
        rt: tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?,
    };

    cli.cmd.run(&ctx)
}
