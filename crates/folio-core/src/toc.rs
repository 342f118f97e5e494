use serde::Serialize;

/// One table-of-contents entry extracted from an ATX heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// Scan markdown source for ATX headings (`#` through `######` followed by
/// whitespace) and produce ordered TOC entries. The renderer assigns the
/// same ids to emitted headings so anchors line up.
#[must_use]
pub fn extract_toc(content: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    for line in content.lines() {
        let hashes = line.bytes().take_while(|b| *b == b'#').count();
        if hashes == 0 || hashes > 6 {
            continue;
        }
        let rest = &line[hashes..];
        if !rest.starts_with(' ') && !rest.starts_with('\t') {
            continue;
        }
        let text = rest.trim();
        if text.is_empty() {
            continue;
        }
        entries.push(TocEntry {
            id: heading_id(text),
            text: text.to_string(),
            level: hashes as u8,
        });
    }
    entries
}

/// Anchor id for a heading: lowercased, punctuation dropped (alphanumerics,
/// underscore, and hyphen survive), whitespace runs collapsed to `-`,
/// leading/trailing hyphens trimmed.
#[must_use]
pub fn heading_id(text: &str) -> String {
    let filtered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    filtered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_headings_with_levels_in_order() {
        let toc = extract_toc("# One\n\ntext\n\n## Two\n\n### Three deep\n");
        assert_eq!(toc.len(), 3);
        assert_eq!(toc[0], TocEntry { id: "one".into(), text: "One".into(), level: 1 });
        assert_eq!(toc[1].level, 2);
        assert_eq!(toc[2].id, "three-deep");
    }

    #[test]
    fn ignores_non_heading_hash_lines() {
        assert!(extract_toc("#not a heading\n####### seven\n#\n").is_empty());
    }

    #[test]
    fn heading_id_drops_punctuation_and_collapses_whitespace() {
        assert_eq!(heading_id("Hello,   World!"), "hello-world");
        assert_eq!(heading_id("What's new?"), "whats-new");
        assert_eq!(heading_id("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn heading_id_keeps_cjk_text() {
        assert_eq!(heading_id("快速 开始"), "快速-开始");
    }

    #[test]
    fn heading_id_trims_stray_hyphens() {
        assert_eq!(heading_id("--edge--"), "edge");
    }

    #[test]
    fn empty_content_yields_empty_toc() {
        assert!(extract_toc("").is_empty());
    }
}
