use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Frontmatter metadata attached to a markdown source file.
///
/// All fields are optional in the source; ordering keys absent from the
/// frontmatter sort after every explicitly ordered document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub order: Option<i64>,
    pub category: Option<String>,
    #[serde(alias = "category_id")]
    pub category_id: Option<i64>,
    #[serde(alias = "post_id")]
    pub post_id: Option<i64>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub lang: Option<String>,
}

/// Ordering keys missing from frontmatter sort after every explicit key.
pub const UNORDERED: i64 = 999;

impl DocMeta {
    #[must_use]
    pub fn category_rank(&self) -> i64 {
        self.category_id.unwrap_or(UNORDERED)
    }

    #[must_use]
    pub fn order_rank(&self) -> i64 {
        self.order.unwrap_or(UNORDERED)
    }

    #[must_use]
    pub fn post_rank(&self) -> i64 {
        self.post_id.unwrap_or(UNORDERED)
    }
}

/// One loaded markdown document. Immutable within a load cycle; the whole
/// corpus is recomputed on reload.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub slug: String,
    pub meta: DocMeta,
    pub content: String,
    pub html: String,
    pub path: String,
    pub excerpt: String,
    pub etag: String,
    pub modified: Option<DateTime<Utc>>,
}

impl Document {
    /// Display title, falling back to the slug for untitled documents.
    #[must_use]
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(&self.slug)
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.meta.tags.as_deref().unwrap_or_default()
    }
}

/// Derive the URL-safe slug from a docs-relative path: extension stripped,
/// path separators collapsed to `-`.
#[must_use]
pub fn slug_from_path(relative: &Path) -> String {
    let unix = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let stem = unix
        .strip_suffix(".markdown")
        .or_else(|| unix.strip_suffix(".md"))
        .unwrap_or(&unix);
    stem.replace('/', "-")
}

/// Plain-text preview: first 200 chars of the body with markdown markers
/// (`#`, `*`, `` ` ``, `$`) stripped, trimmed, ellipsis appended.
#[must_use]
pub fn excerpt_from(content: &str) -> String {
    let head: String = content
        .chars()
        .take(200)
        .filter(|c| !matches!(c, '#' | '*' | '`' | '$'))
        .collect();
    let mut out = head.trim().to_string();
    out.push_str("...");
    out
}
