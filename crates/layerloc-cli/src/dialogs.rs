use layerloc_services::{ExportFormat, FileDialogs};
use std::path::PathBuf;

/// Answers the host's file dialogs with paths given on the command line.
/// A missing path behaves like a dismissed dialog.
pub struct ArgDialogs {
    pub save: Option<PathBuf>,
    pub open: Option<PathBuf>,
    pub default_format: ExportFormat,
}

impl FileDialogs for ArgDialogs {
    fn save_path(&mut self, formats: &[ExportFormat]) -> Option<PathBuf> {
        let path = self.save.take()?;
        if path.extension().is_some() {
            return Some(path);
        }
        let format = if formats.contains(&self.default_format) {
            self.default_format
        } else {
            *formats.first()?
        };
        Some(path.with_extension(format.extension()))
    }

    fn open_path(&mut self, extensions: &[&str]) -> Option<PathBuf> {
        let path = self.open.take()?;
        tracing::debug!(event = "open_dialog", path = %path.display(), accepted = ?extensions);
        Some(path)
    }
}
