use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "layerloc.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayerLocConfig {
    /// Where uploads stage their strings file and page image.
    pub temp_dir: Option<String>,
    pub export: Option<ExportCfg>,
    pub import: Option<ImportCfg>,
    pub pseudo: Option<PseudoCfg>,
    pub vendor: Option<VendorCfg>,
    pub schema: Option<SchemaCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportCfg {
    /// `json`, `xlf` or `strings`; used when the output path has no extension.
    pub default_format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportCfg {
    /// Appended to the name of the page duplicated for a file import.
    pub page_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PseudoCfg {
    /// Length ratio in percent.
    pub ratio: Option<f64>,
    pub duplicate: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorCfg {
    /// Root of the offline vendor exchange directory.
    pub root: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaCfg {
    pub out_dir: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Search order: `./layerloc.toml`, then `$CONFIG_DIR/layerloc/layerloc.toml`.
/// Earlier files win field by field. Unreadable or invalid files are skipped
/// with a warning.
pub fn load_config() -> LayerLocConfig {
    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(CONFIG_FILE_NAME));
    }
    if let Some(base) = dirs::config_dir() {
        candidates.push(base.join("layerloc").join(CONFIG_FILE_NAME));
    }
    load_config_from(&candidates)
}

pub fn load_config_from(paths: &[PathBuf]) -> LayerLocConfig {
    let mut merged = LayerLocConfig::default();
    for path in paths {
        let Ok(text) = std::fs::read_to_string(path) else {
            continue;
        };
        match parse_config(path, &text) {
            Ok(cfg) => {
                tracing::debug!(event = "config_loaded", path = %path.display());
                merged = merge(merged, cfg);
            }
            Err(e) => tracing::warn!(event = "config_invalid", error = %e),
        }
    }
    merged
}

pub fn parse_config(path: &Path, text: &str) -> Result<LayerLocConfig, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn merge(mut a: LayerLocConfig, b: LayerLocConfig) -> LayerLocConfig {
    if a.temp_dir.is_none() {
        a.temp_dir = b.temp_dir;
    }
    a.export = merge_opt(a.export, b.export, merge_export);
    a.import = merge_opt(a.import, b.import, merge_import);
    a.pseudo = merge_opt(a.pseudo, b.pseudo, merge_pseudo);
    a.vendor = merge_opt(a.vendor, b.vendor, merge_vendor);
    a.schema = merge_opt(a.schema, b.schema, merge_schema);
    a
}

fn merge_opt<T>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_export(mut a: ExportCfg, b: ExportCfg) -> ExportCfg {
    if a.default_format.is_none() {
        a.default_format = b.default_format;
    }
    a
}

fn merge_import(mut a: ImportCfg, b: ImportCfg) -> ImportCfg {
    if a.page_suffix.is_none() {
        a.page_suffix = b.page_suffix;
    }
    a
}

fn merge_pseudo(mut a: PseudoCfg, b: PseudoCfg) -> PseudoCfg {
    if a.ratio.is_none() {
        a.ratio = b.ratio;
    }
    if a.duplicate.is_none() {
        a.duplicate = b.duplicate;
    }
    a
}

fn merge_vendor(mut a: VendorCfg, b: VendorCfg) -> VendorCfg {
    if a.root.is_none() {
        a.root = b.root;
    }
    if a.locale.is_none() {
        a.locale = b.locale;
    }
    a
}

fn merge_schema(mut a: SchemaCfg, b: SchemaCfg) -> SchemaCfg {
    if a.out_dir.is_none() {
        a.out_dir = b.out_dir;
    }
    a
}
