use std::path::{Path, PathBuf};

use compio::fs;
use snafu::{OptionExt, ResultExt, Snafu};
use tracing::debug;

use super::{BaseHrefEdit, apply_base_href};

/// An HTML file on disk whose `<base>` element gets rewritten in place.
#[derive(Debug, Clone)]
pub struct HtmlFile {
    path: PathBuf,
}

impl HtmlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file, points its `<base>` at `href` and writes it back.
    ///
    /// The write is skipped when the content did not change.
    pub async fn set_base_href(&self, href: &str) -> Result<BaseHrefEdit, EditError> {
        let content = self.read().await?;

        let edit = apply_base_href(&content, href).context(MissingHeadSnafu {
            path: self.path.clone(),
        })?;

        if edit.content() == content {
            debug!("{} already points at {}", self.path.display(), href);
        } else {
            self.write(edit.content()).await?;
        }

        Ok(edit)
    }

    async fn read(&self) -> Result<String, EditError> {
        debug!("Reading {}", self.path.display());
        let bytes = fs::read(&self.path).await.context(ReadSnafu {
            path: self.path.clone(),
        })?;
        String::from_utf8(bytes).context(InvalidUtf8Snafu {
            path: self.path.clone(),
        })
    }

    async fn write(&self, content: &str) -> Result<(), EditError> {
        debug!("Writing {} bytes to {}", content.len(), self.path.display());
        let result = fs::write(&self.path, content.as_bytes().to_vec()).await;
        result.0.context(WriteSnafu {
            path: self.path.clone(),
        })
    }
}

#[derive(Debug, Snafu)]
pub enum EditError {
    #[snafu(display("Failed to read HTML file: {}", path.display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("HTML file is not valid UTF-8: {}", path.display()))]
    InvalidUtf8Error {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("No <head> found in {}.", path.display()))]
    MissingHeadError { path: PathBuf },
    #[snafu(display("Failed to write HTML file: {}", path.display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std_fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    fn read_back(path: &Path) -> String {
        std_fs::read_to_string(path).expect("Failed to read back file")
    }

    #[compio::test]
    async fn existing_base_is_replaced_on_disk() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = fixture(
            &temp_dir,
            "index.html",
            "<html><head lang=\"en\"><base href=\"/old\"></head></html>",
        );

        let edit = HtmlFile::new(&path).set_base_href("/new/").await;

        assert!(matches!(edit, Ok(BaseHrefEdit::Updated(_))));
        assert_eq!(
            read_back(&path),
            "<html><head lang=\"en\"><base href=\"/new/\"></head></html>"
        );
    }

    #[compio::test]
    async fn base_is_inserted_before_head_on_disk() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = fixture(
            &temp_dir,
            "page.html",
            "<html>\n<head class=\"x\">\n<title>A</title>\n</head>\n</html>\n",
        );

        let edit = HtmlFile::new(&path).set_base_href("/new/").await;

        assert!(matches!(edit, Ok(BaseHrefEdit::Inserted(_))));
        assert_eq!(
            read_back(&path),
            "<html>\n<base href=\"/new/\">\n<head class=\"x\">\n<title>A</title>\n</head>\n</html>\n"
        );
    }

    #[compio::test]
    async fn missing_head_leaves_file_untouched() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let original = "<html><head><title>A</title></head></html>";
        let path = fixture(&temp_dir, "bare.html", original);

        let result = HtmlFile::new(&path).set_base_href("/new/").await;

        match result {
            Err(EditError::MissingHeadError { path: reported }) => assert_eq!(reported, path),
            other => panic!("Expected MissingHeadError, got {other:?}"),
        }
        assert_eq!(read_back(&path), original);
    }

    #[compio::test]
    async fn missing_file_is_a_read_error() {
        let result = HtmlFile::new("/this/path/does/not/exist.html")
            .set_base_href("/new/")
            .await;

        assert!(matches!(result, Err(EditError::ReadError { .. })));
    }

    #[compio::test]
    async fn non_utf8_file_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("latin1.html");
        std_fs::write(&path, b"<head lang=\"fr\">caf\xe9</head>").expect("Failed to write fixture");

        let result = HtmlFile::new(&path).set_base_href("/new/").await;

        assert!(matches!(result, Err(EditError::InvalidUtf8Error { .. })));
    }

    #[compio::test]
    async fn repeated_edit_keeps_content_stable() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = fixture(&temp_dir, "index.html", "<head id=\"h\"></head>");
        let file = HtmlFile::new(&path);

        file.set_base_href("/site/").await.expect("first edit");
        let after_first = read_back(&path);
        let second = file.set_base_href("/site/").await.expect("second edit");

        assert!(matches!(second, BaseHrefEdit::Updated(_)));
        assert_eq!(read_back(&path), after_first);
    }

    #[test]
    fn missing_head_error_names_the_file() {
        let error = EditError::MissingHeadError {
            path: PathBuf::from("site/index.html"),
        };

        assert_eq!(error.to_string(), "No <head> found in site/index.html.");
    }
}
