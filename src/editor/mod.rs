mod base_href;
mod html_file;

pub use base_href::{BaseHrefEdit, apply_base_href};
pub use html_file::{EditError, HtmlFile};
