use std::fs;
use std::path::Path;

use folio_core::config::SiteConfig;
use folio_core::store::DocStore;
use folio_core::tags::{MatchStrategy, all_tags, resolve_tag, similar_tags};
use folio_core::toc::extract_toc;
use folio_core::{search, tags};

fn seed(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, contents).expect("write doc");
}

fn fixture_store() -> (tempfile::TempDir, DocStore) {
    let temp = tempfile::tempdir().expect("tempdir");
    seed(
        temp.path(),
        "getting-started.md",
        "---\ntitle: Getting Started\ndescription: First steps\ntags: [JavaScript, web]\ncategory: guide\ncategoryId: 1\norder: 1\npostId: 1\n---\n# Getting Started\n\n## Install\n\nRun the installer.\n\n## Configure\n\nEdit `folio.toml`.\n",
    );
    seed(
        temp.path(),
        "guide/advanced.md",
        "---\ntitle: Advanced Topics\ntags: [JavaScript, react]\ncategory: guide\ncategoryId: 1\norder: 2\npostId: 2\n---\nDeep dive into advanced react patterns.\n",
    );
    seed(
        temp.path(),
        "reference/api.md",
        "---\ntitle: API Reference\ntags: [redux, vue]\ncategory: reference\ncategoryId: 2\npostId: 1\n---\nEvery endpoint, documented.\n",
    );

    let config = SiteConfig {
        docs_dir: temp.path().to_path_buf(),
        ..SiteConfig::default()
    };
    let store = DocStore::open(&config).expect("open store");
    (temp, store)
}

#[test]
fn corpus_loads_sorted_with_rendered_html_and_etags() {
    let (_temp, store) = fixture_store();

    let slugs: Vec<&str> = store.documents().iter().map(|d| d.slug.as_str()).collect();
    assert_eq!(slugs, ["getting-started", "guide-advanced", "reference-api"]);

    let doc = store.get("getting-started").expect("doc");
    assert!(doc.html.contains("<h2 id=\"install\">"));
    assert!(!doc.etag.is_empty());
    assert!(doc.excerpt.ends_with("..."));
    assert_eq!(doc.path, "getting-started.md");
}

#[test]
fn toc_matches_rendered_heading_anchors() {
    let (_temp, store) = fixture_store();
    let doc = store.get("getting-started").expect("doc");

    let toc = extract_toc(&doc.content);
    assert_eq!(toc.len(), 3);
    for entry in &toc {
        assert!(
            doc.html.contains(&format!("id=\"{}\"", entry.id)),
            "anchor {} missing from rendered html",
            entry.id
        );
    }
}

#[test]
fn tag_vocabulary_is_derived_from_the_corpus() {
    let (_temp, store) = fixture_store();
    assert_eq!(
        all_tags(store.documents()),
        ["JavaScript", "react", "redux", "vue", "web"]
    );
}

#[test]
fn tag_resolution_escalates_and_suggests_on_miss() {
    let (_temp, store) = fixture_store();
    let docs = store.documents();

    let exact = resolve_tag(docs, "JavaScript");
    assert_eq!(exact.strategy, Some(MatchStrategy::Exact));
    assert_eq!(exact.documents.len(), 2);

    let ci = resolve_tag(docs, "javascript");
    assert_eq!(ci.strategy, Some(MatchStrategy::CaseInsensitive));
    assert_eq!(ci.documents.len(), 2);

    let fuzzy = resolve_tag(docs, "java");
    assert_eq!(fuzzy.strategy, Some(MatchStrategy::Fuzzy));

    let miss = resolve_tag(docs, "reac");
    assert!(miss.documents.is_empty() || miss.strategy == Some(MatchStrategy::Fuzzy));

    let suggestions = similar_tags(&all_tags(docs), "reacct");
    assert!(suggestions.contains(&"react".to_string()));
    assert!(!suggestions.contains(&"vue".to_string()));
}

#[test]
fn tag_counts_cover_every_vocabulary_entry() {
    let (_temp, store) = fixture_store();
    let counts = tags::tag_counts(store.documents());
    assert_eq!(counts.len(), 5);
    let js = counts.iter().find(|c| c.tag == "JavaScript").expect("js");
    assert_eq!(js.count, 2);
}

#[test]
fn search_ranks_title_matches_first() {
    let (_temp, store) = fixture_store();
    let hits = search::search_docs(store.documents(), "advanced");
    assert!(!hits.is_empty());
    assert_eq!(hits[0].document.slug, "guide-advanced");
    assert!(hits[0].score >= 10);
}

#[test]
fn adjacent_navigation_stays_within_category() {
    let (_temp, store) = fixture_store();

    let (previous, next) = store.adjacent("getting-started");
    assert!(previous.is_none());
    assert_eq!(next.map(|d| d.slug.as_str()), Some("guide-advanced"));

    let (previous, next) = store.adjacent("reference-api");
    assert!(previous.is_none());
    assert!(next.is_none());
}

#[test]
fn reload_recomputes_the_whole_snapshot() {
    let (temp, mut store) = fixture_store();
    assert_eq!(store.len(), 3);

    seed(
        temp.path(),
        "new.md",
        "---\ntitle: New\ntags: [fresh]\n---\nnew content\n",
    );
    store.reload().expect("reload");
    assert_eq!(store.len(), 4);
    assert!(all_tags(store.documents()).contains(&"fresh".to_string()));
}
