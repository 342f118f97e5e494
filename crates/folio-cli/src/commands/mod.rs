use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::json;

use folio_core::{DocStore, SiteConfig, search, tags, toc};

use crate::cli::Commands;

pub(crate) fn run(root: &Path, config: Option<&Path>, command: Commands) -> Result<()> {
    let site = SiteConfig::load(root, config).context("failed to load site configuration")?;

    if let Commands::Web(args) = &command {
        return folio_web::serve_site(site, &args.host, args.port);
    }

    let store = DocStore::open(&site)
        .with_context(|| format!("failed to load docs from {}", site.docs_dir.display()))?;

    match command {
        Commands::List => {
            let listing: Vec<_> = store
                .documents()
                .iter()
                .map(|doc| {
                    json!({
                        "slug": doc.slug,
                        "title": doc.title(),
                        "category": doc.meta.category,
                        "tags": doc.tags(),
                    })
                })
                .collect();
            print_json(&listing)?;
        }
        Commands::Show(args) => {
            let doc = store
                .get(&args.slug)
                .with_context(|| format!("no document with slug '{}'", args.slug))?;
            if args.html {
                println!("{}", doc.html);
            } else {
                print_json(doc)?;
            }
        }
        Commands::Toc(args) => {
            let doc = store
                .get(&args.slug)
                .with_context(|| format!("no document with slug '{}'", args.slug))?;
            print_json(&toc::extract_toc(&doc.content))?;
        }
        Commands::Tags => {
            print_json(&tags::tag_counts(store.documents()))?;
        }
        Commands::Tag(args) => {
            let matched = tags::resolve_tag(store.documents(), &args.tag);
            let suggestions = if matched.documents.is_empty() {
                tags::similar_tags(&tags::all_tags(store.documents()), &args.tag)
            } else {
                Vec::new()
            };
            print_json(&json!({
                "tag": args.tag,
                "strategy": matched.strategy.map(tags::MatchStrategy::as_str),
                "documents": matched
                    .documents
                    .iter()
                    .map(|doc| json!({ "slug": doc.slug, "title": doc.title() }))
                    .collect::<Vec<_>>(),
                "suggestions": suggestions,
            }))?;
        }
        Commands::Search(args) => {
            let hits: Vec<_> = search::search_docs(store.documents(), &args.query)
                .into_iter()
                .take(args.limit)
                .map(|hit| {
                    json!({
                        "slug": hit.document.slug,
                        "title": hit.document.title(),
                        "score": hit.score,
                        "snippet": hit.snippet,
                    })
                })
                .collect();
            print_json(&hits)?;
        }
        Commands::Categories => {
            let categories: BTreeMap<_, Vec<_>> = store
                .by_category()
                .into_iter()
                .map(|(category, docs)| {
                    let slugs: Vec<_> = docs.iter().map(|doc| doc.slug.clone()).collect();
                    (category, slugs)
                })
                .collect();
            print_json(&categories)?;
        }
        Commands::Check => {
            let problems = check_corpus(&store);
            print_json(&json!({
                "documents": store.len(),
                "problems": problems,
            }))?;
            if !problems.is_empty() {
                bail!("corpus check found {} problem(s)", problems.len());
            }
        }
        Commands::Web(_) => unreachable!("web is dispatched before the corpus loads"),
    }

    Ok(())
}

fn check_corpus(store: &DocStore) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in store.documents() {
        *seen.entry(doc.slug.as_str()).or_default() += 1;
    }
    for (slug, count) in seen {
        if count > 1 {
            problems.push(format!("duplicate slug '{slug}' ({count} documents)"));
        }
    }
    for doc in store.documents() {
        if doc.meta.title.is_none() {
            problems.push(format!("document '{}' has no title", doc.slug));
        }
        if doc.tags().iter().any(|tag| tag.trim().is_empty()) {
            problems.push(format!("document '{}' has an empty tag", doc.slug));
        }
    }
    problems
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use folio_core::{DocStore, SiteConfig};

    use super::check_corpus;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, DocStore) {
        let temp = tempfile::tempdir().expect("tempdir");
        let docs = temp.path().join("docs");
        for (rel, body) in files {
            let path = docs.join(rel);
            fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            fs::write(path, body).expect("seed doc");
        }
        let site = SiteConfig {
            docs_dir: docs,
            ..SiteConfig::default()
        };
        let store = DocStore::open(&site).expect("open store");
        (temp, store)
    }

    #[test]
    fn check_accepts_clean_corpus() {
        let (_temp, store) = store_with(&[
            ("a.md", "---\ntitle: A\n---\nbody\n"),
            ("b.md", "---\ntitle: B\n---\nbody\n"),
        ]);
        assert!(check_corpus(&store).is_empty());
    }

    #[test]
    fn check_flags_untitled_documents() {
        let (_temp, store) = store_with(&[("a.md", "no frontmatter here\n")]);
        let problems = check_corpus(&store);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("has no title"));
    }

    #[test]
    fn check_flags_colliding_slugs() {
        // `guide/intro.md` and `guide-intro.md` flatten to the same slug.
        let (_temp, store) = store_with(&[
            ("guide/intro.md", "---\ntitle: Nested\n---\nbody\n"),
            ("guide-intro.md", "---\ntitle: Flat\n---\nbody\n"),
        ]);
        let problems = check_corpus(&store);
        assert!(
            problems
                .iter()
                .any(|p| p.contains("duplicate slug 'guide-intro'")),
            "expected duplicate report in {problems:?}"
        );
    }

    #[test]
    fn check_flags_empty_tags() {
        let (_temp, store) = store_with(&[(
            "a.md",
            "---\ntitle: A\ntags:\n  - rust\n  - \"\"\n---\nbody\n",
        )]);
        let problems = check_corpus(&store);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("empty tag"));
    }

    #[test]
    fn missing_docs_dir_is_an_empty_corpus() {
        let temp = tempfile::tempdir().expect("tempdir");
        let site = SiteConfig {
            docs_dir: PathBuf::from(temp.path().join("nope")),
            ..SiteConfig::default()
        };
        let store = DocStore::open(&site).expect("open store");
        assert!(store.is_empty());
        assert!(check_corpus(&store).is_empty());
    }
}
