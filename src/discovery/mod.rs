//! Lazy depth-first discovery of the HTML files under a root directory.

mod html_files;

#[cfg(all(test, target_os = "linux"))]
pub(crate) use html_files::unlistable_subdirectory;
pub use html_files::{DirectoryAccessError, HtmlFiles};
