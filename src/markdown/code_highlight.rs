use std::sync::OnceLock;

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::theme;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

const SYNTAX_THEME: &str = "base16-ocean.dark";

/// Returns a shared reference to the default SyntaxSet, initializing if needed.
pub fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

/// Returns a shared reference to the default ThemeSet, initializing if needed.
pub fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Spawns a background thread to warm up syntect statics.
/// Call early in main() so loading overlaps with terminal setup.
pub fn ensure_loaded() {
    std::thread::spawn(|| {
        syntax_set();
        theme_set();
    });
}

/// Non-blocking check: returns references only if both statics are already initialized.
pub fn try_get() -> Option<(&'static SyntaxSet, &'static ThemeSet)> {
    Some((SYNTAX_SET.get()?, THEME_SET.get()?))
}

fn syntax_theme(ts: &ThemeSet) -> &Theme {
    &ts.themes[SYNTAX_THEME]
}

/// The grammar used for note sources.
pub fn markdown_syntax(ss: &SyntaxSet) -> &SyntaxReference {
    ss.find_syntax_by_extension("md")
        .unwrap_or_else(|| ss.find_syntax_plain_text())
}

/// Map common language aliases to tokens that syntect's default set recognizes.
fn resolve_lang(lang: &str) -> &str {
    match lang {
        "typescript" | "ts" | "tsx" | "jsx" => "javascript",
        "sh" | "zsh" | "fish" => "bash",
        "yml" => "yaml",
        "jsonc" => "json",
        "cxx" | "cc" | "hpp" => "cpp",
        _ => lang,
    }
}

fn syntax_for_lang<'a>(ss: &'a SyntaxSet, lang: &str) -> &'a SyntaxReference {
    if lang.is_empty() {
        return ss.find_syntax_plain_text();
    }
    ss.find_syntax_by_token(lang)
        .or_else(|| ss.find_syntax_by_token(resolve_lang(lang)))
        .unwrap_or_else(|| ss.find_syntax_plain_text())
}

/// Highlights a fenced code block for the preview pane, framed with a
/// box-drawing border labelled with the language.
pub fn highlight_code(code: &str, lang: &str, width: usize) -> Vec<Line<'static>> {
    let ss = syntax_set();
    let mut highlighter = HighlightLines::new(syntax_for_lang(ss, lang), syntax_theme(theme_set()));
    let border_style = Style::default().fg(theme::BORDER).bg(theme::CODE_BG);
    let bg_style = Style::default().bg(theme::CODE_BG);
    let fallback_style = Style::default().fg(theme::CODE).bg(theme::CODE_BG);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let inner_w = width.saturating_sub(2);
    let label = if lang.is_empty() { String::new() } else { format!(" {} ", lang) };
    let fill = inner_w.saturating_sub(1 + label.chars().count());
    lines.push(Line::from(Span::styled(
        format!("┌─{}{}┐", label, "─".repeat(fill)),
        border_style,
    )));

    for line in LinesWithEndings::from(code) {
        let mut spans: Vec<Span<'static>> = vec![Span::styled("  ", bg_style)];
        let mut col = 2usize;
        match highlighter.highlight_line(line, ss) {
            Ok(regions) => {
                for (style, content) in regions {
                    let text = content.trim_end_matches('\n');
                    if text.is_empty() {
                        continue;
                    }
                    col += text.chars().count();
                    spans.push(Span::styled(
                        text.to_string(),
                        Style::default().fg(rgb(style.foreground)).bg(theme::CODE_BG),
                    ));
                }
            }
            Err(_) => {
                let text = line.trim_end_matches('\n').to_string();
                col += text.chars().count();
                spans.push(Span::styled(text, fallback_style));
            }
        }
        if col < width {
            spans.push(Span::styled(" ".repeat(width - col), bg_style));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        format!("└{}┘", "─".repeat(inner_w)),
        border_style,
    )));
    lines
}

/// One coloured run of the editor overlay. `None` keeps the terminal's
/// own foreground (used for plain prose so the overlay stays readable).
pub type OverlaySpan = (Option<Color>, String);

/// Highlights the whole editor buffer with the Markdown grammar, one entry
/// per buffer line. Returns `None` while syntect is still loading.
pub fn highlight_source_lines(lines: &[String]) -> Option<Vec<Vec<OverlaySpan>>> {
    let (ss, ts) = try_get()?;
    let theme = syntax_theme(ts);
    let plain_fg = theme.settings.foreground;
    let mut highlighter = HighlightLines::new(markdown_syntax(ss), theme);

    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let with_nl = format!("{}\n", line);
        let spans = match highlighter.highlight_line(&with_nl, ss) {
            Ok(regions) => regions
                .into_iter()
                .filter_map(|(style, content)| {
                    let text = content.trim_end_matches('\n');
                    if text.is_empty() {
                        return None;
                    }
                    let fg = if Some(style.foreground) == plain_fg {
                        None
                    } else {
                        Some(rgb(style.foreground))
                    };
                    Some((fg, text.to_string()))
                })
                .collect(),
            Err(_) => vec![(None, line.clone())],
        };
        out.push(spans);
    }
    Some(out)
}

fn rgb(c: syntect::highlighting::Color) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}
