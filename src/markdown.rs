//! Post Markdown Renderer
//!
//! Renders community post bodies with pulldown-cmark. User content is
//! untrusted:
//! - raw HTML blocks and inline tags are shown as literal text
//! - links and images only keep `http`, `https`, `mailto` or relative targets
//! - images get a width constraint and lazy loading

use pulldown_cmark::{html::push_html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};

/// Parse markdown into sanitized HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Parse markdown for inline use (strips outer <p> tags)
pub fn parse_markdown_inline(text: &str) -> String {
    let html = parse_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

/// Plain-text preview for list rows: markup dropped, whitespace collapsed
pub fn plain_preview(text: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for event in Parser::new_ext(text, get_options()) {
        match event {
            Event::Text(t) | Event::Code(t) | Event::Html(t) | Event::InlineHtml(t) => {
                out.push_str(&t);
                out.push(' ');
            }
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            _ => {}
        }
    }
    let collapsed = out.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

// State for the event transformer
enum State {
    Normal,
    /// Inside an image: alt text events are folded into the `alt` attribute
    InImage { url: String, alt: String, depth: usize },
}

/// Transform parser events: escape raw HTML, vet URLs, render images
fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                // --- Raw HTML is displayed, never interpreted ---
                Event::Html(html) | Event::InlineHtml(html) => events.push(Event::Text(html)),

                // --- Links ---
                Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                    let dest_url = if is_safe_url(&dest_url) { dest_url } else { CowStr::from("#") };
                    let link_type = if link_type == LinkType::Email { link_type } else { LinkType::Inline };
                    events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
                }

                // --- Images ---
                Event::Start(Tag::Image { dest_url, .. }) => {
                    state = State::InImage { url: dest_url.to_string(), alt: String::new(), depth: 0 };
                }

                other => events.push(other),
            },

            State::InImage { ref url, ref mut alt, ref mut depth } => match event {
                Event::Text(t) | Event::Code(t) => alt.push_str(&t),
                Event::Start(_) => *depth += 1,
                Event::End(TagEnd::Image) if *depth == 0 => {
                    if is_safe_url(url) {
                        let html = format!(
                            r#"<img src="{}" alt="{}" loading="lazy" style="max-width: 100%; border-radius: 4px;" />"#,
                            escape_html(url),
                            escape_html(alt)
                        );
                        events.push(Event::Html(CowStr::from(html)));
                    } else if !alt.is_empty() {
                        events.push(Event::Text(CowStr::from(alt.clone())));
                    }
                    state = State::Normal;
                }
                Event::End(_) => *depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }

    events
}

/// Web and mail links, or relative paths within the site
fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    match lower.split_once(':') {
        Some((scheme, _)) if !scheme.contains('/') && !scheme.contains('?') && !scheme.contains('#') => {
            matches!(scheme, "http" | "https" | "mailto")
        }
        _ => true,
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = parse_markdown("# 공지\n\n**중요** 안내");
        assert!(html.contains("<h1>공지</h1>"));
        assert!(html.contains("<strong>중요</strong>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let block = parse_markdown("<div onclick=\"x()\">block</div>");
        assert!(!block.contains("<div"));
    }

    #[test]
    fn test_unsafe_link_neutralized() {
        let html = parse_markdown("[click](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"#\""));

        let ok = parse_markdown("[site](https://example.com/a)");
        assert!(ok.contains("href=\"https://example.com/a\""));

        let relative = parse_markdown("[post](/community/3)");
        assert!(relative.contains("href=\"/community/3\""));
    }

    #[test]
    fn test_images() {
        let html = parse_markdown("![급식 *사진*](https://cdn.example.com/a.png)");
        assert!(html.contains(r#"src="https://cdn.example.com/a.png""#));
        assert!(html.contains(r#"alt="급식 사진""#));

        let bad = parse_markdown("![x](javascript:alert(1))");
        assert!(!bad.contains("<img"));
    }

    #[test]
    fn test_inline_and_preview() {
        assert_eq!(parse_markdown_inline("*a*"), "<em>a</em>");
        assert_eq!(plain_preview("# 제목\n\n본문 **굵게**", 100), "제목 본문 굵게");
        assert_eq!(plain_preview("가나다라마", 3), "가나다…");
    }
}
