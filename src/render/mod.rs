mod errors;
mod html;
mod site;

pub use errors::RenderError;
pub use html::{escape_html, HtmlRenderer};
pub use site::{render_site, RenderedPage, INDEX_FILE};

use crate::record::MatchRecord;

/// Turns a decoded record into a display artifact. No side effects.
pub trait Renderer {
    fn render_record(&self, record: &MatchRecord) -> String;

    /// Extension of the files this renderer produces
    fn extension(&self) -> &'static str {
        "html"
    }
}
