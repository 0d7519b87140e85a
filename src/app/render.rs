//! UI rendering: frame layout, editor pane with the syntax overlay, preview
//! delegation, context menu, and help modal overlay.

use super::*;

impl<'a> App<'a> {
    /// Runs one frame of the main loop: draw + tick.
    /// This is the canonical render path -- tested by render_test to ensure
    /// no accidental screen clears (which cause flicker).
    pub fn render_frame<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> std::io::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        self.tick();
        Ok(())
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let full = frame.area();

        // Fill entire frame background first
        let bg = Paragraph::new("").style(theme::editor_style());
        frame.render_widget(bg, full);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Divider
            Constraint::Min(3),    // Panes
            Constraint::Length(1), // Divider
            Constraint::Length(1), // Status
        ])
        .split(full);

        let panes = Layout::horizontal([
            Constraint::Length(sidebar::SIDEBAR_WIDTH),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .split(chunks[2]);

        self.areas.header = chunks[0];
        self.areas.sidebar = sidebar::SidebarAreas::split(panes[0]);

        let rename = self
            .rename_input
            .as_ref()
            .map(|input| (input.text(), input.cursor()));
        header::render(
            frame,
            chunks[0],
            header::HeaderInfo {
                file: self.workspace.selected(),
                unsaved: self.workspace.is_unsaved(),
                rename,
            },
        );

        // Thin dividers between bars and content
        let divider_style = Style::default().fg(theme::BORDER);
        for divider in [chunks[1], chunks[3]] {
            let line = Paragraph::new("\u{2500}".repeat(divider.width as usize)).style(divider_style);
            frame.render_widget(line, divider);
        }

        self.render_sidebar(frame);
        self.render_editor_pane(frame, panes[1]);
        self.render_preview_pane(frame, panes[2]);

        let cursor = self.workspace.draft().map(|_| {
            let (row, col) = self.textarea.cursor();
            (row + 1, col + 1)
        });
        status::render(
            frame,
            chunks[4],
            status::StatusInfo {
                alert: self.workspace.alert(),
                cursor,
                word_count: self.word_count(),
            },
        );

        // Popups last so they sit on top of everything
        self.areas.menu = self.workspace.menu().map(|m| {
            let area = menu::popup_area(m, full);
            menu::render(frame, m, area);
            area
        });

        if self.show_help {
            self.render_help(frame);
        }
    }

    fn render_sidebar(&mut self, frame: &mut Frame) {
        let files = self.workspace.visible_files();
        let info = sidebar::SidebarInfo {
            search: sidebar::InputView {
                text: self.search_input.text(),
                cursor: self.search_input.cursor(),
                focused: self.focus == Focus::Search,
            },
            new_file: sidebar::InputView {
                text: self.new_file_input.text(),
                cursor: self.new_file_input.cursor(),
                focused: self.focus == Focus::NewFile,
            },
            files: &files,
            selected: self.workspace.selected(),
            list_focused: self.focus == Focus::Files,
        };
        sidebar::render(frame, self.areas.sidebar, info, &mut self.file_list);
    }

    fn render_editor_pane(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Editor ")
            .border_style(theme::pane_border_style(self.focus == Focus::Editor));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.areas.editor = inner;

        if self.workspace.draft().is_none() {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Select a note, or create one with Ctrl+N.",
                    theme::muted_style(),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(hint, inner);
            return;
        }
        self.render_editor(frame, inner);
    }

    fn render_preview_pane(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Preview ")
            .border_style(theme::pane_border_style(self.focus == Focus::Preview));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.areas.preview = inner;

        let content = self.workspace.draft().map_or("", |d| d.text());
        preview::render(frame, inner, content, self.workspace.scroll(), &mut self.preview);
    }

    /// Renders a centered modal overlay listing all keybindings.
    /// Dismissed by pressing any key.
    fn render_help(&self, frame: &mut Frame) {
        let area = frame.area();
        // Size the modal to fit content, clamped to terminal size
        let width = 48u16.min(area.width.saturating_sub(4));
        let height = 24u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let help_area = Rect::new(x, y, width, height);

        // Clear the area behind the modal
        frame.render_widget(Clear, help_area);

        // Help content -- must match the actual keybinding handlers!
        let bindings: [(&str, &str); 18] = [
            ("Tab / Shift+Tab", "Cycle focus"),
            ("Ctrl+F", "Search notes"),
            ("Ctrl+N", "New note"),
            ("Ctrl+S", "Save"),
            ("Ctrl+Q", "Save & quit"),
            ("Ctrl+T", "Rename open note"),
            ("F5", "Refresh file list"),
            ("Esc", "Back / close"),
            ("", ""),
            ("Enter (files)", "Open note"),
            ("m / Del (files)", "File menu"),
            ("Ctrl+Z / Ctrl+Y", "Undo / Redo"),
            ("Ctrl+C / Ctrl+V", "Copy / Paste (system)"),
            ("Ctrl+A", "Select all"),
            ("", ""),
            ("Click file", "Open note"),
            ("Right-click file", "File menu"),
            ("Wheel", "Scroll editor + preview"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "Keybindings",
                Style::default()
                    .fg(theme::HEADING)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        help_text.extend(bindings.iter().map(|(keys, action)| {
            if keys.is_empty() {
                Line::from("")
            } else {
                Line::from(vec![
                    Span::styled(format!("  {:<18}", keys), Style::default().fg(theme::LINK)),
                    Span::raw(*action),
                ])
            }
        }));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().fg(theme::FG).bg(theme::BAR_BG));

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, help_area);
    }

    /// Renders the tui-textarea widget plus tilde markers for empty lines,
    /// then overlays markdown syntax colours.
    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        let cursor_style = if self.focus == Focus::Editor {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor_style);
        frame.render_widget(&self.textarea, area);

        // Track scroll position (mirrors tui-textarea's internal viewport logic)
        // so we can translate mouse coordinates -> buffer positions correctly.
        let before = self.editor_scroll_top;
        let cursor_row = saturating_u16(self.textarea.cursor().0);
        if cursor_row < self.editor_scroll_top {
            self.editor_scroll_top = cursor_row;
        } else if self.editor_scroll_top + area.height <= cursor_row {
            self.editor_scroll_top = cursor_row + 1 - area.height;
        }
        // Cursor-driven scrolling in the editor carries the preview along
        if self.editor_scroll_top != before && self.focus == Focus::Editor {
            self.workspace.update(Msg::Scroll(self.editor_scroll_top));
        }

        // Render vim-style tilde markers for lines beyond the file content
        let total_lines = self.textarea.lines().len();
        let gutter_width = editor::gutter_width(total_lines);
        let visible_content_lines = saturating_u16(total_lines).saturating_sub(self.editor_scroll_top);
        for row in visible_content_lines..area.height {
            let tilde_area = Rect {
                x: area.x,
                y: area.y + row,
                width: area.width,
                height: 1,
            };
            let tilde = Paragraph::new(Line::from(vec![
                Span::raw(" ".repeat(gutter_width.saturating_sub(1) as usize)),
                Span::styled("~", Style::default().fg(theme::TILDE)),
            ]));
            frame.render_widget(tilde, tilde_area);
        }

        self.apply_syntax_overlay(frame, area, gutter_width);
    }

    /// Overlays markdown syntax colours on the ratatui buffer after
    /// tui-textarea has rendered, overwriting foreground colours only
    /// (preserving cursor/selection backgrounds).
    fn apply_syntax_overlay(&mut self, frame: &mut Frame, area: Rect, gutter_width: u16) {
        if self.overlay_dirty {
            // Non-blocking: if syntect hasn't finished loading, retry next frame
            match code_highlight::highlight_source_lines(self.textarea.lines()) {
                Some(overlay) => {
                    self.overlay = overlay;
                    self.overlay_dirty = false;
                }
                None => return,
            }
        }

        let scroll_top = self.editor_scroll_top as usize;
        let cursor_pos = self.textarea.cursor();
        let text_start_x = area.x + gutter_width;

        for (row, spans) in self
            .overlay
            .iter()
            .enumerate()
            .skip(scroll_top)
            .take(area.height as usize)
        {
            let screen_row = area.y + (row - scroll_top) as u16;
            let mut col: u16 = 0;
            for (fg, text) in spans {
                for _ in text.chars() {
                    let cell_x = text_start_x + col;
                    if cell_x >= area.x + area.width {
                        break;
                    }
                    // Skip cursor cell (preserve cursor visibility)
                    let is_cursor = row == cursor_pos.0 && col as usize == cursor_pos.1;
                    if let (Some(color), false) = (fg, is_cursor) {
                        if let Some(cell) = frame.buffer_mut().cell_mut((cell_x, screen_row)) {
                            // Only recolour plain cells (keeps selection intact)
                            if cell.bg == ratatui::style::Color::Reset {
                                cell.set_fg(*color);
                            }
                        }
                    }
                    col += 1;
                }
            }
        }
    }
}
