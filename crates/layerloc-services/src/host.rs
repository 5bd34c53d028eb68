use crate::export::ExportFormat;
use crate::Result;
use layerloc_core::Page;
use std::path::{Path, PathBuf};

/// Modal file pickers of the host application. `None` means the user
/// dismissed the dialog, which aborts the flow without an error.
pub trait FileDialogs {
    /// Destination for an export, with one of `formats` as extension.
    fn save_path(&mut self, formats: &[ExportFormat]) -> Option<PathBuf>;
    /// A file to import, restricted to `extensions`.
    fn open_path(&mut self, extensions: &[&str]) -> Option<PathBuf>;
}

/// Renders a page to an image file for translator context.
pub trait PageRenderer {
    fn export_page_image(&self, page: &Page, dir: &Path) -> Result<PathBuf>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Dialogs that answer with preset paths.
    #[derive(Default)]
    pub struct FixedDialogs {
        pub save: Option<PathBuf>,
        pub open: Option<PathBuf>,
        pub offered: Vec<ExportFormat>,
    }

    impl FixedDialogs {
        pub fn saving(path: &Path) -> Self {
            Self {
                save: Some(path.to_path_buf()),
                ..Self::default()
            }
        }

        pub fn opening(path: &Path) -> Self {
            Self {
                open: Some(path.to_path_buf()),
                ..Self::default()
            }
        }
    }

    impl FileDialogs for FixedDialogs {
        fn save_path(&mut self, formats: &[ExportFormat]) -> Option<PathBuf> {
            self.offered = formats.to_vec();
            self.save.clone()
        }

        fn open_path(&mut self, _extensions: &[&str]) -> Option<PathBuf> {
            self.open.clone()
        }
    }
}
