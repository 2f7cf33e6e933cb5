use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use snafu::Snafu;

use crate::application::data::LogLevel;

/// Options go before the two positional values. Once `<FOLDER>` is seen,
/// everything after it is taken as a value, flag-like or not.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Edits the <base> href of every HTML file under a folder")]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Folder to scan recursively for .html files, then the value written
    /// into each <base href="...">
    #[clap(
        required = true,
        num_args = 2,
        value_names = ["FOLDER", "NEW_HREF_PATH"],
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    positionals: Vec<String>,
}

impl Cli {
    /// Resolves the process arguments. Help and version requests exit right away.
    pub fn resolve() -> Result<Self, UsageError> {
        Self::resolve_from(std::env::args_os())
    }

    pub fn resolve_from<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|source| match source.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => source.exit(),
            _ => UsageError { source },
        })
    }

    pub fn folder(&self) -> PathBuf {
        PathBuf::from(&self.positionals[0])
    }

    pub fn new_href_path(&self) -> &str {
        &self.positionals[1]
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Two arguments expected: <folder> <new-href-path>"))]
pub struct UsageError {
    source: clap::Error,
}
