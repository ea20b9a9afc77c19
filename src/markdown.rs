//! Markdown Rendering
//!
//! Ticket descriptions and handover notes are Markdown typed by operators.
//! Raw HTML in the source is escaped, and links or images with a script-like
//! scheme are rendered as plain text.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Render `text` to HTML safe for `inner_html`
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Render for one-line use (strips outer <p> tags)
pub fn render_markdown_inline(text: &str) -> String {
    let html = render_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

enum State {
    Normal,
    /// Inside a rejected link or image; its inner text is kept
    Dropped { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

                Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                    if is_safe_url(&dest_url) {
                        events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
                    } else {
                        state = State::Dropped { depth: 0 };
                    }
                }

                Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
                    if is_safe_url(&dest_url) {
                        events.push(Event::Start(Tag::Image { link_type, dest_url, title, id }));
                    } else {
                        state = State::Dropped { depth: 0 };
                    }
                }

                other => events.push(other),
            },

            State::Dropped { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(TagEnd::Link) | Event::End(TagEnd::Image) if *depth == 0 => {
                    state = State::Normal;
                }
                Event::End(_) => *depth = depth.saturating_sub(1),
                Event::Text(t) | Event::Code(t) => events.push(Event::Text(t)),
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                _ => {}
            },
        }
    }

    events
}

/// Relative links and the usual web schemes only
fn is_safe_url(url: &CowStr<'_>) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    match lower.split_once(':') {
        Some((scheme, _)) if !scheme.contains('/') => matches!(scheme, "http" | "https" | "mailto" | "tel"),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_markdown("**Router** rebooted\n\n- checked ONT\n- replaced patch cord");
        assert!(html.contains("<strong>Router</strong>"));
        assert!(html.contains("<li>checked ONT</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("Customer says <script>alert(1)</script> hi");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let html = render_markdown("<div onclick=\"x()\">block</div>");
        assert!(!html.contains("<div"));
    }

    #[test]
    fn test_script_links_become_text() {
        let html = render_markdown("[click](javascript:alert(1)) now");
        assert!(!html.contains("href"));
        assert!(html.contains("click"));

        let html = render_markdown("[portal](https://status.example.in)");
        assert!(html.contains("href=\"https://status.example.in\""));
    }

    #[test]
    fn test_relative_link_kept() {
        let html = render_markdown("see [ticket](/tickets/T1)");
        assert!(html.contains("href=\"/tickets/T1\""));
    }

    #[test]
    fn test_inline_strips_paragraph() {
        assert_eq!(render_markdown_inline("*fiber cut*"), "<em>fiber cut</em>");
    }
}
