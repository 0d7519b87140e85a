//! File list column: search box on top, notes in the middle, new-file box
//! at the bottom.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::components::input;
use crate::theme;

/// Fixed width of the sidebar column.
pub const SIDEBAR_WIDTH: u16 = 28;

/// Screen regions of the sidebar, kept by the app for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarAreas {
    pub search: Rect,
    pub list: Rect,
    pub new_file: Rect,
}

impl SidebarAreas {
    pub fn split(area: Rect) -> Self {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Search
            Constraint::Min(3),    // Files
            Constraint::Length(3), // New file
        ])
        .split(area);
        Self {
            search: chunks[0],
            list: chunks[1],
            new_file: chunks[2],
        }
    }

    /// Rows of the file list inside its border.
    pub fn list_inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.list)
    }
}

/// A one-line input as the sidebar draws it.
pub struct InputView<'a> {
    pub text: &'a str,
    pub cursor: usize,
    pub focused: bool,
}

pub struct SidebarInfo<'a> {
    pub search: InputView<'a>,
    pub new_file: InputView<'a>,
    /// Names that pass the search filter, in listing order.
    pub files: &'a [&'a str],
    /// The note currently open in the editor.
    pub selected: Option<&'a str>,
    pub list_focused: bool,
}

pub fn render(frame: &mut Frame, areas: SidebarAreas, info: SidebarInfo, list_state: &mut ListState) {
    render_input(frame, areas.search, "Search", "type to filter", &info.search);
    render_list(frame, areas.list, &info, list_state);
    render_input(frame, areas.new_file, "New File", "name + Enter", &info.new_file);
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, hint: &str, view: &InputView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(theme::pane_border_style(view.focused));

    let spans = if view.text.is_empty() && !view.focused {
        input::placeholder(hint)
    } else {
        input::spans(view.text, view.cursor, view.focused, theme::editor_style())
    };
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_list(frame: &mut Frame, area: Rect, info: &SidebarInfo, list_state: &mut ListState) {
    let title = format!(" Files ({}) ", info.files.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme::pane_border_style(info.list_focused));

    if info.files.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(" no notes", theme::muted_style())))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = info
        .files
        .iter()
        .map(|name| {
            let open = info.selected == Some(*name);
            let (marker, style) = if open {
                ("\u{25B8} ", Style::default().fg(theme::HEADING).add_modifier(Modifier::BOLD))
            } else {
                ("  ", theme::editor_style())
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(name.to_string(), style),
            ]))
        })
        .collect();

    let highlight = if info.list_focused {
        Style::default().bg(theme::LIST_HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(theme::LIST_HIGHLIGHT)
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    frame.render_stateful_widget(list, area, list_state);
}
