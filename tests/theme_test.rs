use ratatui::style::{Color, Modifier};

// Theme color verification tests.
// These ensure the ANSI color constants match the terminal-inherited theme.

#[test]
fn test_base_colors() {
    assert_eq!(mdnotes::theme::FG, Color::Reset);
    assert_eq!(mdnotes::theme::BORDER, Color::DarkGray);
    assert_eq!(mdnotes::theme::MUTED, Color::DarkGray);
}

#[test]
fn test_ui_colors() {
    assert_eq!(mdnotes::theme::BAR_BG, Color::Reset);
    assert_eq!(mdnotes::theme::LINE_NUMBER, Color::DarkGray);
    assert_eq!(mdnotes::theme::SELECTION, Color::Blue);
    assert_eq!(mdnotes::theme::FOCUS, Color::Blue);
}

#[test]
fn test_markdown_syntax_colors() {
    assert_eq!(mdnotes::theme::BOLD, Color::Yellow);
    assert_eq!(mdnotes::theme::ITALIC, Color::Cyan);
    assert_eq!(mdnotes::theme::LINK, Color::Cyan);
    assert_eq!(mdnotes::theme::CODE, Color::Red);
    assert_eq!(mdnotes::theme::QUOTE, Color::Green);
}

#[test]
fn test_alert_colors() {
    assert_eq!(mdnotes::theme::SUCCESS, Color::Green);
    assert_eq!(mdnotes::theme::WARNING, Color::Yellow);
    assert_eq!(mdnotes::theme::ERROR, Color::Red);
}

#[test]
fn test_pane_border_follows_focus() {
    assert_eq!(mdnotes::theme::pane_border_style(true).fg, Some(Color::Blue));
    assert_eq!(mdnotes::theme::pane_border_style(false).fg, Some(Color::DarkGray));
}

#[test]
fn test_link_style_is_underlined() {
    let style = mdnotes::theme::link_style();
    assert_eq!(style.fg, Some(mdnotes::theme::LINK));
    assert!(style.add_modifier.contains(Modifier::UNDERLINED));
}

#[test]
fn test_misc_colors() {
    assert_eq!(mdnotes::theme::WHITE, Color::White);
    assert_eq!(mdnotes::theme::TILDE, Color::DarkGray);
}
