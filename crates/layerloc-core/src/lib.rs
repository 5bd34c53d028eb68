use std::path::PathBuf;

use thiserror::Error;

pub mod catalog;
pub mod fsutil;
pub mod model;
pub mod text;

pub use catalog::{StringCatalog, TranslationSet, TranslationUnit};
pub use model::{
    Document, Frame, GroupLayer, Layer, Page, SymbolInstance, SymbolMaster, TextLayer, TextTarget,
};

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Alert shown by the host when a page yields no strings.
pub const NO_STRINGS_ALERT: &str = "No strings found on this page";

/// Upper bound of the pseudo-localization length ratio, in percent.
pub const MAX_PSEUDO_RATIO: f64 = 1000.0;

/// Top-level key of the translation-path directives in JSON exports.
pub const DIRECTIVES_KEY: &str = "smartling";

#[derive(Debug, Error)]
pub enum LayerLocError {
    #[error("{}", NO_STRINGS_ALERT)]
    EmptyInput,
    #[error("document has no current page")]
    NoCurrentPage,
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid translations: {0}")]
    InvalidTranslations(String),
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("vendor request failed: {0}")]
    Vendor(String),
    #[error("pseudo-localization ratio must be above 0 and at most {max}%, got {0}", max = MAX_PSEUDO_RATIO)]
    InvalidRatio(f64),
}
