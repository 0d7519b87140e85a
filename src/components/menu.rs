use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme;
use crate::workspace::{ContextMenu, MenuItem};

const MENU_WIDTH: u16 = 14;
const MENU_HEIGHT: u16 = MenuItem::ALL.len() as u16 + 2;

/// Where the popup lands: anchored at the menu's position, shifted back
/// inside `bounds` when it would overflow.
pub fn popup_area(menu: &ContextMenu, bounds: Rect) -> Rect {
    let width = MENU_WIDTH.min(bounds.width);
    let height = MENU_HEIGHT.min(bounds.height);
    let max_x = (bounds.x + bounds.width).saturating_sub(width);
    let max_y = (bounds.y + bounds.height).saturating_sub(height);
    Rect::new(
        menu.x.clamp(bounds.x, max_x.max(bounds.x)),
        menu.y.clamp(bounds.y, max_y.max(bounds.y)),
        width,
        height,
    )
}

/// The entry under a screen position inside a popup drawn at `area`.
pub fn item_at(area: Rect, x: u16, y: u16) -> Option<MenuItem> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    if x < inner.x || x >= inner.x + inner.width || y < inner.y || y >= inner.y + inner.height {
        return None;
    }
    MenuItem::ALL.get((y - inner.y) as usize).copied()
}

pub fn render(frame: &mut Frame, menu: &ContextMenu, area: Rect) {
    frame.render_widget(Clear, area);

    let lines: Vec<Line> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == menu.highlighted {
                Style::default()
                    .fg(theme::WHITE)
                    .bg(theme::SELECTION)
                    .add_modifier(Modifier::BOLD)
            } else if *item == MenuItem::Delete {
                Style::default().fg(theme::ERROR)
            } else {
                Style::default().fg(theme::FG)
            };
            Line::from(Span::styled(format!(" {:<10}", item.label()), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .style(Style::default().fg(theme::FG).bg(theme::BAR_BG));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_pushed_back_inside_bounds() {
        let menu = ContextMenu::new("a.md", 78, 23);
        let area = popup_area(&menu, Rect::new(0, 0, 80, 24));
        assert_eq!(area, Rect::new(80 - MENU_WIDTH, 24 - MENU_HEIGHT, MENU_WIDTH, MENU_HEIGHT));
    }

    #[test]
    fn rows_map_to_items() {
        let area = Rect::new(10, 5, MENU_WIDTH, MENU_HEIGHT);
        assert_eq!(item_at(area, 12, 6), Some(MenuItem::Export));
        assert_eq!(item_at(area, 12, 8), Some(MenuItem::Delete));
        assert_eq!(item_at(area, 12, 5), None);
        assert_eq!(item_at(area, 2, 6), None);
    }
}
