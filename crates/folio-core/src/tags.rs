use std::collections::BTreeSet;

use serde::Serialize;

use crate::document::Document;

/// Maximum number of similar-tag suggestions returned for a failed query.
const MAX_SUGGESTIONS: usize = 5;

/// Maximum edit distance at which a vocabulary tag still counts as similar.
const SUGGESTION_DISTANCE: usize = 2;

/// How a tag query was satisfied. Strategies escalate strictly: a looser
/// one is tried only when the stricter one matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl MatchStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case-insensitive",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// Result of resolving a tag query against the corpus. `strategy` is `None`
/// when every strategy came back empty.
#[derive(Debug)]
pub struct TagMatch<'a> {
    pub documents: Vec<&'a Document>,
    pub strategy: Option<MatchStrategy>,
}

/// Classic dynamic-programming Levenshtein distance over characters.
/// O(n*m) time and space; intended for short tag strings only.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut table = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            table[i][j] = if b[i - 1] == a[j - 1] {
                table[i - 1][j - 1]
            } else {
                1 + table[i - 1][j - 1]
                    .min(table[i][j - 1])
                    .min(table[i - 1][j])
            };
        }
    }

    table[b.len()][a.len()]
}

/// Documents whose tag list contains `tag` byte-for-byte, in corpus order.
#[must_use]
pub fn docs_by_tag<'a>(docs: &'a [Document], tag: &str) -> Vec<&'a Document> {
    docs.iter()
        .filter(|doc| doc.tags().iter().any(|t| t == tag))
        .collect()
}

/// Case-insensitive variant of [`docs_by_tag`].
#[must_use]
pub fn docs_by_tag_case_insensitive<'a>(docs: &'a [Document], tag: &str) -> Vec<&'a Document> {
    let lower = tag.to_lowercase();
    docs.iter()
        .filter(|doc| doc.tags().iter().any(|t| t.to_lowercase() == lower))
        .collect()
}

/// Fuzzy variant: a document matches when, lowercased, either its tag
/// contains the query or the query contains the tag.
#[must_use]
pub fn docs_by_tag_fuzzy<'a>(docs: &'a [Document], tag: &str) -> Vec<&'a Document> {
    let lower = tag.to_lowercase();
    docs.iter()
        .filter(|doc| {
            doc.tags().iter().any(|t| {
                let t = t.to_lowercase();
                t.contains(&lower) || lower.contains(&t)
            })
        })
        .collect()
}

/// Resolve a tag query, escalating exact -> case-insensitive -> fuzzy.
/// Each looser strategy runs only when the stricter one found nothing.
#[must_use]
pub fn resolve_tag<'a>(docs: &'a [Document], tag: &str) -> TagMatch<'a> {
    let documents = docs_by_tag(docs, tag);
    if !documents.is_empty() {
        return TagMatch {
            documents,
            strategy: Some(MatchStrategy::Exact),
        };
    }

    let documents = docs_by_tag_case_insensitive(docs, tag);
    if !documents.is_empty() {
        return TagMatch {
            documents,
            strategy: Some(MatchStrategy::CaseInsensitive),
        };
    }

    let documents = docs_by_tag_fuzzy(docs, tag);
    if !documents.is_empty() {
        return TagMatch {
            documents,
            strategy: Some(MatchStrategy::Fuzzy),
        };
    }

    TagMatch {
        documents: Vec::new(),
        strategy: None,
    }
}

/// The derived tag vocabulary: union of all documents' trimmed non-empty
/// tags, deduplicated and sorted lexicographically.
#[must_use]
pub fn all_tags(docs: &[Document]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for doc in docs {
        for tag in doc.tags() {
            let clean = tag.trim();
            if !clean.is_empty() {
                set.insert(clean.to_string());
            }
        }
    }
    set.into_iter().collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Vocabulary with per-tag document counts, in vocabulary order.
#[must_use]
pub fn tag_counts(docs: &[Document]) -> Vec<TagCount> {
    all_tags(docs)
        .into_iter()
        .map(|tag| {
            let count = docs
                .iter()
                .filter(|doc| doc.tags().iter().any(|t| t.trim() == tag))
                .count();
            TagCount { tag, count }
        })
        .collect()
}

/// Suggest up to five vocabulary tags close to a failed query: containment
/// in either direction, or edit distance <= 2, all case-insensitive.
///
/// Suggestions keep vocabulary (sorted) order rather than distance order;
/// callers rely on that ordering staying stable.
#[must_use]
pub fn similar_tags(vocabulary: &[String], query: &str) -> Vec<String> {
    let lower_query = query.to_lowercase();
    vocabulary
        .iter()
        .filter(|tag| {
            let lower_tag = tag.to_lowercase();
            lower_tag.contains(&lower_query)
                || lower_query.contains(&lower_tag)
                || levenshtein(&lower_tag, &lower_query) <= SUGGESTION_DISTANCE
        })
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}
