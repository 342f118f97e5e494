use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::assistant::ChatMessage;
use folio_core::config::{GiscusConfig, HomepageConfig};
use folio_core::document::{DocMeta, Document};
use folio_core::tags::TagCount;
use folio_core::toc::TocEntry;

#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub title: String,
    pub homepage: HomepageConfig,
    pub giscus: Option<GiscusConfig>,
    pub assistant_enabled: bool,
}

/// Corpus listing entry: everything a list view needs, without body/html.
#[derive(Debug, Serialize)]
pub struct DocListing {
    pub slug: String,
    pub title: String,
    pub meta: DocMeta,
    pub excerpt: String,
}

impl DocListing {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            slug: doc.slug.clone(),
            title: doc.title().to_string(),
            meta: doc.meta.clone(),
            excerpt: doc.excerpt.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocsResponse {
    pub documents: Vec<DocListing>,
}

#[derive(Debug, Serialize)]
pub struct DocRef {
    pub slug: String,
    pub title: String,
}

impl DocRef {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            slug: doc.slug.clone(),
            title: doc.title().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub slug: String,
    pub title: String,
    pub meta: DocMeta,
    pub content: String,
    pub html: String,
    pub toc: Vec<TocEntry>,
    pub etag: String,
    pub modified: Option<DateTime<Utc>>,
    pub previous: Option<DocRef>,
    pub next: Option<DocRef>,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<TagCount>,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub tag: String,
    pub strategy: Option<&'static str>,
    pub documents: Vec<DocListing>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub score: u32,
    pub snippet: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub slug: String,
    pub question: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub slug: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub documents: usize,
    pub tags: usize,
}
