use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::cli::UsageError;
use crate::discovery::{DirectoryAccessError, HtmlFiles};
use crate::editor::{BaseHrefEdit, EditError, HtmlFile};

pub struct Application;

impl Application {
    /// Walks the configured root and rewrites each HTML file before asking for the next one.
    ///
    /// The first failure ends the run; files not reached yet stay untouched.
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<RunSummary, ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let mut summary = RunSummary::default();
        for path in HtmlFiles::walk(&app_config.root).context(DiscoverySnafu)? {
            let file = HtmlFile::new(path.context(DiscoverySnafu)?);
            let edit = file
                .set_base_href(&app_config.href)
                .await
                .context(EditSnafu)?;

            println!("{} <base> in: {}", edit, file.path().display());
            summary.record(&edit);
        }

        info!(
            "Processed {} HTML files ({} updated, {} inserted)",
            summary.total(),
            summary.updated,
            summary.inserted
        );
        Ok(summary)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub updated: usize,
    pub inserted: usize,
}

impl RunSummary {
    fn record(&mut self, edit: &BaseHrefEdit) {
        match edit {
            BaseHrefEdit::Updated(_) => self.updated += 1,
            BaseHrefEdit::Inserted(_) => self.inserted += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.updated + self.inserted
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Invalid command line"), context(false))]
    UsageError { source: UsageError },
    #[snafu(display("Critical failure encountered while scanning for HTML files"))]
    DiscoveryError { source: DirectoryAccessError },
    #[snafu(display("Critical failure encountered while editing an HTML file"))]
    EditError { source: EditError },
}
