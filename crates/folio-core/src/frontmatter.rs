use crate::document::DocMeta;
use crate::error::Result;

/// Split an optional leading YAML frontmatter block (delimited by `---`
/// lines) from the markdown body. Returns `(yaml, body)`.
pub(crate) fn split(raw: &str) -> (Option<&str>, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(rest) = text.strip_prefix("---") else {
        return (None, text);
    };
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return (None, text);
    };

    let mut offset = 0usize;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    // Unterminated frontmatter fence: treat the whole file as body.
    (None, text)
}

/// Parse frontmatter into metadata, returning the body alongside it.
pub(crate) fn parse(raw: &str) -> Result<(DocMeta, &str)> {
    let (yaml, body) = split(raw);
    let meta = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => serde_norway::from_str(yaml)?,
        _ => DocMeta::default(),
    };
    Ok((meta, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frontmatter_fields() {
        let raw = "---\ntitle: Intro\ntags: [rust, web]\ncategoryId: 2\npostId: 7\n---\n# Intro\n";
        let (meta, body) = parse(raw).expect("parse");
        assert_eq!(meta.title.as_deref(), Some("Intro"));
        assert_eq!(meta.tags.as_deref(), Some(&["rust".to_string(), "web".to_string()][..]));
        assert_eq!(meta.category_id, Some(2));
        assert_eq!(meta.post_id, Some(7));
        assert_eq!(body, "# Intro\n");
    }

    #[test]
    fn accepts_snake_case_ordering_keys() {
        let raw = "---\ncategory_id: 1\npost_id: 3\n---\nbody";
        let (meta, _) = parse(raw).expect("parse");
        assert_eq!(meta.category_id, Some(1));
        assert_eq!(meta.post_id, Some(3));
    }

    #[test]
    fn missing_frontmatter_yields_defaults() {
        let (meta, body) = parse("# Bare\n\ncontent").expect("parse");
        assert!(meta.title.is_none());
        assert_eq!(body, "# Bare\n\ncontent");
    }

    #[test]
    fn unterminated_fence_is_treated_as_body() {
        let raw = "---\ntitle: Broken\nno closing fence";
        let (meta, body) = parse(raw).expect("parse");
        assert!(meta.title.is_none());
        assert_eq!(body, raw);
    }

    #[test]
    fn strips_utf8_bom_before_fence_detection() {
        let raw = "\u{feff}---\ntitle: Bom\n---\nbody";
        let (meta, body) = parse(raw).expect("parse");
        assert_eq!(meta.title.as_deref(), Some("Bom"));
        assert_eq!(body, "body");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let raw = "---\ntitle: [unclosed\n---\nbody";
        assert!(parse(raw).is_err());
    }
}
