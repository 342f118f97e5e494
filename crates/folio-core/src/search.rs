use serde::Serialize;

use crate::document::Document;

/// Hits returned per query, after score-descending sort.
const MAX_RESULTS: usize = 20;

/// Snippet window around the first content match, in bytes before/after.
const SNIPPET_BEFORE: usize = 50;
const SNIPPET_AFTER: usize = 100;

const TITLE_WEIGHT: u32 = 10;
const DESCRIPTION_WEIGHT: u32 = 5;
const TAG_WEIGHT: u32 = 3;
const CONTENT_WEIGHT: u32 = 1;

#[derive(Debug, Serialize)]
pub struct SearchHit<'a> {
    #[serde(flatten)]
    pub document: &'a Document,
    pub score: u32,
    pub snippet: String,
}

/// Score the corpus against a whitespace-separated term query.
///
/// Weights per term: title 10, description 5, any tag 3, content 1 (content
/// matches also capture a snippet around the match). Zero-score documents
/// are dropped, results sort by score descending (ties keep corpus order)
/// and cap at twenty.
#[must_use]
pub fn search_docs<'a>(docs: &'a [Document], query: &str) -> Vec<SearchHit<'a>> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let terms: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(ToString::to_string)
        .collect();

    let mut hits: Vec<SearchHit<'a>> = docs
        .iter()
        .filter_map(|doc| score_document(doc, &terms))
        .collect();
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(MAX_RESULTS);
    hits
}

fn score_document<'a>(doc: &'a Document, terms: &[String]) -> Option<SearchHit<'a>> {
    let title = doc.title().to_lowercase();
    let description = doc
        .meta
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let tags: Vec<String> = doc.tags().iter().map(|t| t.to_lowercase()).collect();
    let (content_lower, origin) = lowered_with_origin(&doc.content);

    let mut score = 0u32;
    let mut snippet = String::new();

    for term in terms {
        if title.contains(term.as_str()) {
            score += TITLE_WEIGHT;
        }
        if !description.is_empty() && description.contains(term.as_str()) {
            score += DESCRIPTION_WEIGHT;
        }
        if tags.iter().any(|t| t.contains(term.as_str())) {
            score += TAG_WEIGHT;
        }
        if let Some(pos) = content_lower.find(term.as_str()) {
            score += CONTENT_WEIGHT;
            snippet = snippet_around(&doc.content, origin[pos]);
        }
    }

    (score > 0).then_some(SearchHit {
        document: doc,
        score,
        snippet,
    })
}

/// Lowercase `text` and record, for every byte of the lowered string, the
/// originating byte offset in `text`. Lowercasing can change byte lengths,
/// so match positions cannot be reused directly.
fn lowered_with_origin(text: &str) -> (String, Vec<usize>) {
    let mut lowered = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        for lc in ch.to_lowercase() {
            let before = lowered.len();
            lowered.push(lc);
            origin.extend(std::iter::repeat_n(idx, lowered.len() - before));
        }
    }
    (lowered, origin)
}

fn snippet_around(content: &str, pos: usize) -> String {
    let mut start = pos.saturating_sub(SNIPPET_BEFORE);
    while start > 0 && !content.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (pos + SNIPPET_AFTER).min(content.len());
    while end < content.len() && !content.is_char_boundary(end) {
        end += 1;
    }
    content[start..end].to_string()
}
