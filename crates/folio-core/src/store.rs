use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::document::{Document, excerpt_from, slug_from_path};
use crate::error::{FolioError, Result};
use crate::frontmatter;
use crate::render::render_markdown_html;

/// Category bucket for documents without one.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Immutable snapshot of the loaded corpus. `reload` recomputes the whole
/// document set from disk; nothing mutates incrementally.
#[derive(Debug)]
pub struct DocStore {
    docs_dir: PathBuf,
    exclude: GlobSet,
    documents: Vec<Document>,
}

impl DocStore {
    /// Load the corpus described by `config`. A missing docs directory is
    /// an empty corpus, not an error.
    pub fn open(config: &SiteConfig) -> Result<Self> {
        let exclude = build_exclude_set(&config.exclude)?;
        let mut store = Self {
            docs_dir: config.docs_dir.clone(),
            exclude,
            documents: Vec::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Recompute the document set from disk.
    pub fn reload(&mut self) -> Result<()> {
        self.documents = load_documents(&self.docs_dir, &self.exclude)?;
        Ok(())
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.slug == slug)
    }

    /// Previous/next documents within the same category as `slug`, ordered
    /// by post id. Unknown slugs yield `(None, None)`.
    #[must_use]
    pub fn adjacent(&self, slug: &str) -> (Option<&Document>, Option<&Document>) {
        let Some(current) = self.get(slug) else {
            return (None, None);
        };

        let mut same_category: Vec<&Document> = self
            .documents
            .iter()
            .filter(|doc| doc.meta.category == current.meta.category)
            .collect();
        same_category.sort_by_key(|doc| doc.meta.post_rank());

        let Some(index) = same_category.iter().position(|doc| doc.slug == slug) else {
            return (None, None);
        };
        let previous = index.checked_sub(1).map(|i| same_category[i]);
        let next = same_category.get(index + 1).copied();
        (previous, next)
    }

    /// Documents grouped by category, each bucket sorted by order then post
    /// id. Uncategorized documents land in [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn by_category(&self) -> BTreeMap<String, Vec<&Document>> {
        let mut categories: BTreeMap<String, Vec<&Document>> = BTreeMap::new();
        for doc in &self.documents {
            let key = doc
                .meta
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
            categories.entry(key).or_default().push(doc);
        }
        for bucket in categories.values_mut() {
            bucket.sort_by_key(|doc| (doc.meta.order_rank(), doc.meta.post_rank()));
        }
        categories
    }
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            continue;
        }
        let glob = Glob::new(trimmed).map_err(|err| {
            FolioError::Config(format!("invalid exclude glob '{trimmed}': {err}"))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|err| FolioError::Config(format!("invalid exclude globs: {err}")))
}

fn load_documents(docs_dir: &Path, exclude: &GlobSet) -> Result<Vec<Document>> {
    if !docs_dir.exists() {
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();
    let walker = WalkDir::new(docs_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.path() == docs_dir || !is_hidden_name(entry.file_name().to_string_lossy().as_ref())
        });

    for entry in walker {
        let entry = entry.map_err(|err| FolioError::Validation(err.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_markdown_file(path) {
            continue;
        }
        let Ok(relative) = path.strip_prefix(docs_dir) else {
            continue;
        };
        if exclude.is_match(unix_path(relative)) {
            continue;
        }

        match load_document(path, relative) {
            Ok(document) => documents.push(document),
            Err(err) => {
                eprintln!("skipping {}: {err}", relative.display());
            }
        }
    }

    documents.sort_by_key(|doc| {
        (
            doc.meta.category_rank(),
            doc.meta.order_rank(),
            doc.meta.post_rank(),
        )
    });
    Ok(documents)
}

fn load_document(path: &Path, relative: &Path) -> Result<Document> {
    let raw = std::fs::read_to_string(path)?;
    let slug = slug_from_path(relative);
    let etag = blake3::hash(raw.as_bytes()).to_hex().to_string();
    let modified = file_modified(path);

    let (meta, body) = match frontmatter::parse(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            // Unparseable frontmatter degrades to default metadata rather
            // than dropping the content.
            eprintln!("invalid frontmatter in {}: {err}", relative.display());
            (crate::document::DocMeta::default(), raw.as_str())
        }
    };

    let html = render_markdown_html(body);
    let excerpt = excerpt_from(body);

    Ok(Document {
        slug,
        meta,
        content: body.to_string(),
        html,
        path: unix_path(relative),
        excerpt,
        etag,
        modified,
    })
}

fn file_modified(path: &Path) -> Option<DateTime<Utc>> {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(DateTime::<Utc>::from)
        .ok()
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|x| x.to_str())
        .map(|x| matches!(x.to_ascii_lowercase().as_str(), "md" | "markdown"))
        .unwrap_or(false)
}

fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

fn unix_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
