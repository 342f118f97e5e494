use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::toc::heading_id;

/// Render markdown to HTML with tables, strikethrough, tasklists, footnotes,
/// and math enabled. Headings get anchor ids matching [`crate::toc`], link
/// and image destinations are sanitized, and raw HTML is neutralized to text.
#[must_use]
pub fn render_markdown_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_MATH);

    let mut events: Vec<Event<'_>> = Parser::new_ext(content, options)
        .map(|event| match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: sanitize_link_destination(dest_url),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Image {
                link_type,
                dest_url: sanitize_image_source(dest_url),
                title,
                id,
            }),
            Event::Html(raw) | Event::InlineHtml(raw) => {
                Event::Text(CowStr::from(raw.into_string()))
            }
            other => other,
        })
        .collect();

    assign_heading_ids(&mut events);

    let mut output = String::new();
    html::push_html(&mut output, events.into_iter());
    output
}

/// Give each heading an id derived from its inline text so in-page anchors
/// match the extracted table of contents.
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut open: Option<(usize, String)> = None;
    let mut pending: Vec<(usize, String)> = Vec::new();

    for (idx, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading { id: None, .. }) => {
                open = Some((idx, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = open.as_mut() {
                    buf.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((start, buf)) = open.take() {
                    pending.push((start, heading_id(buf.trim())));
                }
            }
            _ => {}
        }
    }

    for (idx, anchor) in pending {
        if anchor.is_empty() {
            continue;
        }
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[idx] {
            *id = Some(CowStr::from(anchor));
        }
    }
}

fn sanitize_link_destination(dest_url: CowStr<'_>) -> CowStr<'static> {
    let value = dest_url.into_string();
    if is_safe_destination(&value, true) {
        CowStr::from(value)
    } else {
        CowStr::from("#")
    }
}

fn sanitize_image_source(dest_url: CowStr<'_>) -> CowStr<'static> {
    let value = dest_url.into_string();
    if is_safe_destination(&value, false) {
        CowStr::from(value)
    } else {
        CowStr::from("")
    }
}

fn is_safe_destination(value: &str, allow_mailto: bool) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("//") {
        return false;
    }
    if lower.starts_with('#')
        || lower.starts_with('/')
        || lower.starts_with("./")
        || lower.starts_with("../")
    {
        return true;
    }
    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || (allow_mailto && lower.starts_with("mailto:"))
    {
        return true;
    }

    !lower.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = render_markdown_html("# Title\n\nA *paragraph*.");
        assert!(html.contains("<h1"));
        assert!(html.contains("<em>paragraph</em>"));
    }

    #[test]
    fn headings_carry_toc_anchor_ids() {
        let html = render_markdown_html("## Getting Started\n");
        assert!(html.contains("<h2 id=\"getting-started\">"));
    }

    #[test]
    fn heading_id_includes_inline_code_text() {
        let html = render_markdown_html("## Using `DocStore`\n");
        assert!(html.contains("id=\"using-docstore\""));
    }

    #[test]
    fn fenced_code_keeps_language_class() {
        let html = render_markdown_html("```rust\nfn main() {}\n```\n");
        assert!(html.contains("<code class=\"language-rust\">"));
    }

    #[test]
    fn math_is_emitted_for_client_side_katex() {
        let html = render_markdown_html("inline $E = mc^2$ math");
        assert!(html.contains("math"));
        assert!(html.contains("E = mc^2"));
    }

    #[test]
    fn raw_html_is_neutralized_to_text() {
        let html = render_markdown_html("before <script>alert(1)</script> after");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn javascript_links_are_stripped() {
        let html = render_markdown_html("[x](javascript:alert(1))");
        assert!(html.contains("href=\"#\""));
    }

    #[test]
    fn protocol_relative_images_are_dropped() {
        let html = render_markdown_html("![x](//evil.example/i.png)");
        assert!(html.contains("src=\"\""));
    }

    #[test]
    fn relative_and_https_destinations_survive() {
        let html = render_markdown_html("[a](./other.md) [b](https://example.com)");
        assert!(html.contains("href=\"./other.md\""));
        assert!(html.contains("href=\"https://example.com\""));
    }
}
