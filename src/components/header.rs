use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::components::input;
use crate::theme;

/// Shown in place of a file name when nothing is selected.
pub const NO_FILE_TITLE: &str = "Open File To Edit";

/// What the header bar displays.
pub struct HeaderInfo<'a> {
    /// Selected note, if any.
    pub file: Option<&'a str>,
    pub unsaved: bool,
    /// Rename field contents and cursor, while renaming.
    pub rename: Option<(&'a str, usize)>,
}

pub fn render(frame: &mut Frame, area: Rect, info: HeaderInfo) {
    let left_spans = match info.rename {
        Some((buf, cursor)) => render_rename_input(buf, cursor),
        None => render_title(info.file),
    };

    let badge = info.file.map(|_| save_badge(info.unsaved));
    let badge_width = badge.as_ref().map_or(0, |b| b.width() as u16);

    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(badge_width)])
        .split(area);

    // Fill background
    let bg = Paragraph::new("").style(theme::header_style());
    frame.render_widget(bg, area);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);
    if let Some(badge) = badge {
        frame.render_widget(Paragraph::new(Line::from(badge)), chunks[1]);
    }
}

fn render_title<'a>(file: Option<&str>) -> Vec<Span<'a>> {
    match file {
        Some(name) => vec![Span::styled(
            format!("  {}", name),
            theme::header_style().add_modifier(Modifier::BOLD),
        )],
        None => vec![Span::styled(
            format!("  {}", NO_FILE_TITLE),
            theme::muted_style(),
        )],
    }
}

fn render_rename_input<'a>(buf: &str, cursor: usize) -> Vec<Span<'a>> {
    let mut spans = vec![Span::styled("  Rename: ", theme::muted_style())];
    spans.extend(input::spans(
        buf,
        cursor,
        true,
        Style::default().fg(theme::WHITE).bg(theme::BAR_BG),
    ));
    spans
}

fn save_badge<'a>(unsaved: bool) -> Span<'a> {
    let (label, color) = if unsaved {
        (" Unsaved ", theme::WARNING)
    } else {
        (" Saved ", theme::SUCCESS)
    };
    Span::styled(
        label,
        Style::default()
            .fg(color)
            .bg(theme::BAR_BG)
            .add_modifier(Modifier::BOLD),
    )
}
