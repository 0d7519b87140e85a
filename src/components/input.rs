use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::theme;

/// Spans for a one-line input. With `show_cursor`, the character under the
/// cursor (or a trailing space) is drawn reversed.
pub fn spans<'a>(text: &str, cursor: usize, show_cursor: bool, style: Style) -> Vec<Span<'a>> {
    if !show_cursor {
        return vec![Span::styled(text.to_string(), style)];
    }

    let cursor = cursor.min(text.len());
    let mut spans = Vec::new();

    let before = &text[..cursor];
    if !before.is_empty() {
        spans.push(Span::styled(before.to_string(), style));
    }

    let (under, after) = match text[cursor..].chars().next() {
        Some(ch) => (ch.to_string(), &text[cursor + ch.len_utf8()..]),
        None => (" ".to_string(), ""),
    };
    spans.push(Span::styled(
        under,
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
    ));

    if !after.is_empty() {
        spans.push(Span::styled(after.to_string(), style));
    }
    spans
}

/// Muted hint shown in an empty, unfocused input.
pub fn placeholder<'a>(hint: &str) -> Vec<Span<'a>> {
    vec![Span::styled(hint.to_string(), theme::muted_style())]
}
