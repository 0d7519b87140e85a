use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

use crate::theme;

/// Builds an editor widget holding `text`. Splitting on `'\n'` (not
/// `lines()`) keeps a trailing newline as a final empty row, so joining the
/// rows back with `'\n'` reproduces the text exactly.
pub fn textarea_from<'a>(text: &str) -> TextArea<'a> {
    let lines: Vec<String> = text.split('\n').map(String::from).collect();
    let mut textarea = TextArea::new(lines);
    configure_textarea(&mut textarea);
    textarea
}

pub fn configure_textarea(textarea: &mut TextArea) {
    textarea.set_cursor_line_style(theme::cursor_line_style());
    textarea.set_line_number_style(theme::line_number_style());
    textarea.set_style(theme::editor_style());
    textarea.set_cursor_style(
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
    );
    textarea.set_selection_style(Style::default().bg(theme::SELECTION));

    // Tab = 2 spaces
    textarea.set_tab_length(2);
    textarea.set_hard_tab_indent(false);
}

/// Width of tui-textarea's line number gutter: leading space, digits,
/// trailing space.
pub fn gutter_width(total_lines: usize) -> u16 {
    total_lines.max(1).to_string().len() as u16 + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_newline_survives_round_trip() {
        let text = "# Title\n\nbody\n";
        let textarea = textarea_from(text);
        assert_eq!(textarea.lines().join("\n"), text);
    }

    #[test]
    fn empty_text_is_one_empty_row() {
        let textarea = textarea_from("");
        assert_eq!(textarea.lines(), [String::new()]);
    }

    #[test]
    fn gutter_grows_with_digits() {
        assert_eq!(gutter_width(9), 3);
        assert_eq!(gutter_width(10), 4);
        assert_eq!(gutter_width(0), 3);
    }
}
