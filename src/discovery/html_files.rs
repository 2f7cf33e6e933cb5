use std::path::{Path, PathBuf};

use snafu::Snafu;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const HTML_EXTENSION: &str = ".html";

/// Depth-first, pre-order walk yielding every regular file whose name ends in
/// `.html` (any letter case).
///
/// A subdirectory is fully drained before the rest of its parent, and entries
/// come in whatever order the filesystem lists them. Symlinks below the root
/// are not followed and never yielded.
///
/// The walk can only be consumed once and stops for good after the first error.
#[derive(Debug)]
pub struct HtmlFiles {
    entries: walkdir::IntoIter,
    failed: bool,
}

impl HtmlFiles {
    /// Starts a walk at `root`. Fails if the root is missing or not a directory.
    pub fn walk(root: impl AsRef<Path>) -> Result<Self, DirectoryAccessError> {
        let root = root.as_ref();
        let mut entries = WalkDir::new(root).follow_links(false).into_iter();

        // The first entry is the root itself.
        match entries.next() {
            Some(Ok(entry)) if entry.file_type().is_dir() => {
                debug!("Walking {}", entry.path().display());
            }
            Some(Err(source)) => {
                return Err(DirectoryAccessError::ReadDirError {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Some(Ok(_)) | None => return NotADirectorySnafu { path: root }.fail(),
        }

        Ok(Self {
            entries,
            failed: false,
        })
    }
}

impl Iterator for HtmlFiles {
    type Item = Result<PathBuf, DirectoryAccessError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            match self.entries.next()? {
                Ok(entry) if is_html_file(&entry) => return Some(Ok(entry.into_path())),
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        debug!("Descending into {}", entry.path().display());
                    }
                }
                Err(source) => {
                    self.failed = true;
                    let path = source.path().map(Path::to_path_buf).unwrap_or_default();
                    return Some(Err(DirectoryAccessError::ReadDirError { path, source }));
                }
            }
        }
    }
}

fn is_html_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && is_html_name(entry.file_name().to_string_lossy().as_ref())
}

fn is_html_name(name: &str) -> bool {
    name.to_lowercase().ends_with(HTML_EXTENSION)
}

#[derive(Debug, Snafu)]
pub enum DirectoryAccessError {
    #[snafu(display("Failed to read directory: {}", path.display()))]
    ReadDirError {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[snafu(display("Not a directory: {}", path.display()))]
    NotADirectoryError { path: PathBuf },
}

/// Builds a directory below `root` whose full path is too long to open,
/// so listing it fails while its parents list fine. Returns that directory.
#[cfg(all(test, target_os = "linux"))]
pub(crate) fn unlistable_subdirectory(root: &Path) -> PathBuf {
    use std::fs;

    const PATH_MAX: usize = 4096;
    let segment = |tag: char, index: usize| format!("{tag}{index:02}{}", "x".repeat(247));

    let mut outer = root.to_path_buf();
    for index in 0..12 {
        outer.push(segment('a', index));
    }
    fs::create_dir_all(&outer).expect("Failed to create outer chain");

    let mut inner = root.join("b");
    for index in 0..8 {
        inner.push(segment('b', index));
    }
    fs::create_dir_all(&inner).expect("Failed to create inner chain");

    // Only the two ends of a rename have to fit in PATH_MAX.
    let mut path = outer.join("b");
    fs::rename(root.join("b"), &path).expect("Failed to nest inner chain");

    for index in 0..8 {
        path.push(segment('b', index));
        if path.as_os_str().len() >= PATH_MAX {
            return path;
        }
    }
    panic!("Nested chain never exceeded PATH_MAX");
}
