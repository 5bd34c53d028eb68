use crate::host::PageRenderer;
use crate::upload::context_strings;
use crate::Result;
use layerloc_core::fsutil::write_atomic;
use layerloc_core::Page;
use quick_xml::escape::escape;
use std::path::{Path, PathBuf};

/// Draws the page's text layers as an SVG wireframe: one outlined box and
/// one label per string, in the same coordinate space as the uploaded
/// context positions.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgPageRenderer;

impl SvgPageRenderer {
    pub fn render(&self, page: &Page) -> String {
        let bounds = page.content_bounds().unwrap_or_default();
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
            bounds.width, bounds.height
        );
        for s in context_strings(page) {
            let c = s.coordinates;
            svg.push_str(&format!(
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"#888\"/>\n",
                c.left, c.top, c.width, c.height
            ));
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{}\" dominant-baseline=\"hanging\">{}</text>\n",
                c.left,
                c.top,
                escape(s.text.as_str())
            ));
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl PageRenderer for SvgPageRenderer {
    fn export_page_image(&self, page: &Page, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("page-{}.svg", sanitize(&page.id)));
        write_atomic(&path, self.render(page).as_bytes())?;
        tracing::debug!(event = "page_rendered", page = %page.name, path = %path.display());
        Ok(path)
    }
}

fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
