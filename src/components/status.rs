use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;
use crate::workspace::{Alert, AlertKind};

/// Key hints shown when no alert is active.
pub const HINTS: &str = "F1: help | Tab: focus | Ctrl+S: save | Ctrl+Q: quit";

pub struct StatusInfo<'a> {
    pub alert: Option<&'a Alert>,
    /// 1-based cursor position, present while a note is open.
    pub cursor: Option<(usize, usize)>,
    pub word_count: usize,
}

pub fn render(frame: &mut Frame, area: Rect, info: StatusInfo) {
    // Fill the entire status bar background
    let bg = Paragraph::new("").style(theme::status_style());
    frame.render_widget(bg, area);

    let chunks = Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)]).split(area);

    // Left: alert banner or key hints
    let left = match info.alert {
        Some(alert) => Span::styled(format!("  {}", alert.message), alert_style(alert.kind)),
        None => Span::styled(format!("  {}", HINTS), theme::muted_style()),
    };
    frame.render_widget(Paragraph::new(Line::from(left)), chunks[0]);

    // Right: cursor position + word count
    if let Some((line, col)) = info.cursor {
        let right = Paragraph::new(Line::from(Span::styled(
            format!("Ln {}, Col {} | {} words  ", line, col, info.word_count),
            theme::status_style(),
        )))
        .alignment(Alignment::Right);
        frame.render_widget(right, chunks[1]);
    }
}

pub fn alert_style(kind: AlertKind) -> Style {
    let fg = match kind {
        AlertKind::Success => theme::SUCCESS,
        AlertKind::Error => theme::ERROR,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}
