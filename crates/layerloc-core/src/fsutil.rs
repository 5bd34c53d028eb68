use std::io::Write;
use std::path::Path;

use crate::LayerLocError;

/// Write `bytes` to `path` through a temp file in the same directory,
/// so readers never observe a half-written export.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), LayerLocError> {
    let fail = |source: std::io::Error| LayerLocError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(fail)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(fail)?;
    tmp.write_all(bytes).map_err(fail)?;
    tmp.flush().map_err(fail)?;
    tmp.persist(path).map_err(|e| fail(e.error))?;
    tracing::debug!(event = "file_written", path = %path.display(), bytes = bytes.len());
    Ok(())
}
