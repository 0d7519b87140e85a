//! Text → HTML projections of a note: the rendered document and the
//! syntax-highlighted source. Both are pure and recomputed on every change.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::util::LinesWithEndings;

use super::code_highlight;

/// URL schemes that must never reach an `href` or `src`.
const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Both HTML views of a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Sanitized document HTML.
    pub html: String,
    /// Escaped source with `<span class="...">` highlighting markup.
    pub highlighted: String,
}

/// Parser extensions shared by the HTML and terminal renderers.
pub fn parser_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

pub fn render(text: &str) -> Rendered {
    Rendered {
        html: render_html(text),
        highlighted: highlight_html(text),
    }
}

/// Renders markdown to HTML. Embedded raw HTML is escaped and script-capable
/// link targets are replaced with `#`, so the result is safe to inject.
pub fn render_html(text: &str) -> String {
    let parser = Parser::new_ext(text, parser_options()).map(sanitize_event);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
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
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    // Browsers ignore embedded whitespace/control chars when reading a scheme.
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    if BLOCKED_SCHEMES.iter().any(|s| normalized.starts_with(s)) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Highlights the markdown source itself. Class names follow syntect's
/// spaced scope style (e.g. `markup heading markdown`).
pub fn highlight_html(text: &str) -> String {
    let ss = code_highlight::syntax_set();
    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        code_highlight::markdown_syntax(ss),
        ss,
        ClassStyle::Spaced,
    );
    for line in LinesWithEndings::from(text) {
        if generator.parse_html_for_line_which_includes_newline(line).is_err() {
            return escape_html(text);
        }
    }
    generator.finalize()
}

/// Minimal HTML text escaping for contexts pulldown-cmark doesn't cover.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
