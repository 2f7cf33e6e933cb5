use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory scanned for HTML files
    pub root: PathBuf,
    /// Href written into every `<base>` tag
    pub href: String,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            root: cli.folder(),
            href: cli.new_href_path().to_string(),
        }
    }
}
