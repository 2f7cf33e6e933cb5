use std::fmt;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

// Both patterns need a space after the tag name: bare `<base>` and `<head>` do not match.
// Tag names fold ASCII case only.
static BASE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?-u:base) [^>]*>").expect("base tag pattern is valid"));
static HEAD_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?-u:head) [^>]*>").expect("head tag pattern is valid"));

/// Result of pointing a document's `<base>` element at a new href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseHrefEdit {
    /// The first `<base ...>` tag was replaced.
    Updated(String),
    /// A `<base>` line was inserted before the first `<head ...>` tag.
    Inserted(String),
}

impl BaseHrefEdit {
    pub fn content(&self) -> &str {
        match self {
            BaseHrefEdit::Updated(content) | BaseHrefEdit::Inserted(content) => content,
        }
    }
}

impl fmt::Display for BaseHrefEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseHrefEdit::Updated(_) => f.write_str("Updated"),
            BaseHrefEdit::Inserted(_) => f.write_str("Inserted"),
        }
    }
}

/// Rewrites the first `<base ...>` tag of `content` to `<base href="{href}">`,
/// or inserts that tag and a newline in front of the first `<head ...>` tag.
///
/// Returns `None` when neither tag is present. The href is written literally.
pub fn apply_base_href(content: &str, href: &str) -> Option<BaseHrefEdit> {
    let base_tag = format!(r#"<base href="{href}">"#);

    if BASE_TAG.is_match(content) {
        let updated = BASE_TAG.replace(content, NoExpand(&base_tag));
        return Some(BaseHrefEdit::Updated(updated.into_owned()));
    }

    let head = HEAD_TAG.find(content)?;
    let mut inserted = String::with_capacity(content.len() + base_tag.len() + 1);
    inserted.push_str(&content[..head.start()]);
    inserted.push_str(&base_tag);
    inserted.push('\n');
    inserted.push_str(&content[head.start()..]);
    Some(BaseHrefEdit::Inserted(inserted))
}
