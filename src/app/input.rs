//! Input handling: keyboard events, mouse events, and paste.

use super::*;

impl<'a> App<'a> {
    /// Handles bracketed paste events. Inserts into whichever input has focus.
    pub(super) fn handle_paste(&mut self, text: String) {
        if let Some(rename) = self.rename_input.as_mut() {
            rename.insert_str(&text);
            return;
        }
        match self.focus {
            Focus::Search => {
                if self.search_input.insert_str(&text) == LineAction::Changed {
                    self.dispatch(Msg::Search(self.search_input.text().to_string()));
                }
            }
            Focus::NewFile => {
                if self.new_file_input.insert_str(&text) == LineAction::Changed {
                    self.dispatch(Msg::NewFileInput(self.new_file_input.text().to_string()));
                }
            }
            Focus::Editor if self.workspace.draft().is_some() => {
                self.textarea.insert_str(text);
                self.sync_draft();
            }
            _ => {}
        }
    }

    // ─── Key handling ────────────────────────────────────────────────────

    /// Main key handler. Processes modal states first (help, rename, context
    /// menu), then Esc-as-back, then global keybindings, then delegates to
    /// the focused pane.
    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        // Help modal: any key dismisses it (swallows the keypress)
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Rename mode: all keys go to the header rename input
        if self.rename_input.is_some() {
            self.handle_rename_key(key);
            return;
        }

        // Context menu: navigation keys only
        if self.workspace.menu().is_some() {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.dispatch(Msg::MenuUp),
                KeyCode::Down | KeyCode::Char('j') => self.dispatch(Msg::MenuDown),
                KeyCode::Enter => self.dispatch(Msg::MenuActivate),
                KeyCode::Esc => self.dispatch(Msg::CloseMenu),
                _ => {}
            }
            return;
        }

        // Esc: step back towards the file list
        if key.code == KeyCode::Esc && key.modifiers.is_empty() {
            self.focus = match self.focus {
                Focus::Preview => Focus::Editor,
                _ => Focus::Files,
            };
            return;
        }

        // Global keybindings (work in every pane)
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                self.request_quit();
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                self.dispatch(Msg::Save);
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('f')) => {
                self.focus = Focus::Search;
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
                self.focus = Focus::NewFile;
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
                self.start_rename();
                return;
            }
            (_, KeyCode::F(1)) => {
                self.show_help = true;
                return;
            }
            (_, KeyCode::F(5)) => {
                self.dispatch(Msg::Refresh);
                return;
            }
            (_, KeyCode::Tab) => {
                self.cycle_focus(true);
                return;
            }
            (_, KeyCode::BackTab) => {
                self.cycle_focus(false);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Files => self.handle_files_key(key),
            Focus::Search => self.handle_search_key(key),
            Focus::NewFile => self.handle_new_file_key(key),
            Focus::Editor => self.handle_editor_key(key),
            Focus::Preview => self.handle_preview_key(key),
        }
    }

    /// File list: move the cursor, open, or bring up the context menu.
    fn handle_files_key(&mut self, key: KeyEvent) {
        let count = self.workspace.visible_files().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_list_cursor(-1, count),
            KeyCode::Down | KeyCode::Char('j') => self.move_list_cursor(1, count),
            KeyCode::Home => self.move_list_cursor(i32::MIN, count),
            KeyCode::End => self.move_list_cursor(i32::MAX, count),
            KeyCode::Enter => {
                if let Some(name) = self.highlighted_file() {
                    self.dispatch(Msg::Select(name));
                    self.focus = Focus::Editor;
                }
            }
            KeyCode::Char('m') | KeyCode::Delete => {
                if let Some(name) = self.highlighted_file() {
                    let (x, y) = self.highlighted_row_position();
                    self.dispatch(Msg::OpenMenu { file: name, x, y });
                }
            }
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('n') => self.focus = Focus::NewFile,
            _ => {}
        }
    }

    fn move_list_cursor(&mut self, delta: i32, count: usize) {
        if count == 0 {
            return;
        }
        let current = self.file_list.selected().unwrap_or(0) as i64;
        let next = (current + delta as i64).clamp(0, count as i64 - 1);
        self.file_list.select(Some(next as usize));
    }

    /// Screen cell just right of the highlighted file name, where a
    /// keyboard-opened menu is anchored.
    fn highlighted_row_position(&self) -> (u16, u16) {
        let inner = self.areas.sidebar.list_inner();
        let index = self.file_list.selected().unwrap_or(0);
        let row = index.saturating_sub(self.file_list.offset()) as u16;
        (inner.x + 2, inner.y + row + 1)
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match self.search_input.handle_key(key) {
            LineAction::Changed => {
                self.dispatch(Msg::Search(self.search_input.text().to_string()));
            }
            LineAction::Submit | LineAction::Cancel => self.focus = Focus::Files,
            LineAction::None => {
                if key.code == KeyCode::Down {
                    self.focus = Focus::Files;
                }
            }
        }
    }

    fn handle_new_file_key(&mut self, key: KeyEvent) {
        match self.new_file_input.handle_key(key) {
            LineAction::Changed => {
                self.dispatch(Msg::NewFileInput(self.new_file_input.text().to_string()));
            }
            LineAction::Submit => {
                let generation = self.workspace.generation();
                self.dispatch(Msg::Create);
                // Only follow into the editor when the new note was opened
                if self.workspace.generation() != generation {
                    self.focus = Focus::Editor;
                }
            }
            LineAction::Cancel => self.focus = Focus::Files,
            LineAction::None => {}
        }
    }

    /// Editor key handler. Intercepts standard keybindings (Ctrl+Z, Ctrl+C, etc.)
    /// BEFORE passing to tui-textarea, which has non-standard defaults:
    ///   tui-textarea: Ctrl+U=undo, Ctrl+Y=paste, Ctrl+V=PageDown, Ctrl+A=line-start
    ///   We remap:     Ctrl+Z=undo, Ctrl+Y=redo,  Ctrl+V=paste,    Ctrl+A=select-all
    ///
    /// With no note open the editor is read-only.
    fn handle_editor_key(&mut self, key: KeyEvent) {
        if self.workspace.draft().is_none() {
            return;
        }
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('z')) => {
                self.textarea.undo();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('y')) => {
                self.textarea.redo();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
                self.textarea.select_all();
                return;
            }
            // Copy selection to system clipboard (overrides tui-textarea's internal-only yank)
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                if let Some(text) = self.selected_text() {
                    self.copy_to_clipboard(&text);
                }
                // Also yank internally so paste works without a system clipboard
                self.textarea.copy();
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('x')) => {
                if let Some(text) = self.selected_text() {
                    self.copy_to_clipboard(&text);
                }
                self.textarea.cut();
            }
            // Paste from system clipboard, falling back to the internal yank
            (KeyModifiers::CONTROL, KeyCode::Char('v')) => match self.paste_from_clipboard() {
                Some(text) => {
                    self.textarea.insert_str(text);
                }
                None => {
                    self.textarea.paste();
                }
            },
            // On macOS, Ctrl+Backspace sends Ctrl+H (0x08), so we match both
            (KeyModifiers::CONTROL, KeyCode::Backspace)
            | (KeyModifiers::CONTROL, KeyCode::Char('h')) => {
                self.textarea.delete_word();
            }
            (KeyModifiers::CONTROL, KeyCode::Delete)
            | (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
                self.textarea.delete_next_word();
            }
            _ => {
                // Everything else: tui-textarea's built-in handling (arrows,
                // Enter, Backspace, Home/End, Ctrl+K, word navigation, ...)
                self.textarea.input(Input::from(key));
            }
        }
        self.sync_draft();
    }

    /// Preview key handler: scrolling only. Scrolls the editor in step.
    fn handle_preview_key(&mut self, key: KeyEvent) {
        let page = self.preview.viewport_height.saturating_sub(2).max(1) as i32;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home => self.scroll_by(-(self.workspace.scroll() as i32)),
            KeyCode::End => {
                let end = self.preview.max_scroll() as i32 - self.workspace.scroll() as i32;
                self.scroll_by(end);
            }
            _ => {}
        }
    }

    // ─── Mouse handling ──────────────────────────────────────────────────

    /// Handles all mouse events: wheel scrolling, clicks on files, panes,
    /// header and menu, right-click menus, and drag selection in the editor.
    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let down = mouse.kind == MouseEventKind::ScrollDown;
                if contains(self.areas.sidebar.list, x, y) {
                    let count = self.workspace.visible_files().len();
                    self.move_list_cursor(if down { 1 } else { -1 }, count);
                } else {
                    self.scroll_by(if down { SCROLL_LINES } else { -SCROLL_LINES });
                }
            }

            MouseEventKind::Down(MouseButton::Left) => {
                // An open menu takes the click: run the entry or dismiss
                if self.workspace.menu().is_some() {
                    match self.areas.menu.and_then(|area| menu::item_at(area, x, y)) {
                        Some(item) => self.dispatch(Msg::MenuChoose(item)),
                        None => self.dispatch(Msg::CloseMenu),
                    }
                    return;
                }

                let areas = self.areas;
                if contains(areas.header, x, y) {
                    // Click on the title -> rename the open note
                    self.start_rename();
                } else if contains(areas.sidebar.search, x, y) {
                    self.focus = Focus::Search;
                } else if contains(areas.sidebar.new_file, x, y) {
                    self.focus = Focus::NewFile;
                } else if let Some(index) = self.list_index_at(x, y) {
                    self.focus = Focus::Files;
                    self.file_list.select(Some(index));
                    if let Some(name) = self.highlighted_file() {
                        self.dispatch(Msg::Select(name));
                    }
                } else if contains(areas.sidebar.list, x, y) {
                    self.focus = Focus::Files;
                } else if contains(areas.editor, x, y) {
                    self.focus = Focus::Editor;
                    if self.workspace.draft().is_some() {
                        let (row, col) = self.mouse_to_buffer_pos(x, y);
                        self.textarea.cancel_selection();
                        self.textarea.move_cursor(CursorMove::Jump(row, col));
                        self.textarea.start_selection();
                        self.mouse_dragging = true;
                    }
                } else if contains(areas.preview, x, y) {
                    self.focus = Focus::Preview;
                    if let Some(url) = self.preview.url_at(x, y) {
                        preview::open_url(url);
                    }
                }
            }

            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(index) = self.list_index_at(x, y) {
                    self.focus = Focus::Files;
                    self.file_list.select(Some(index));
                    if let Some(name) = self.highlighted_file() {
                        self.dispatch(Msg::OpenMenu { file: name, x, y });
                    }
                }
            }

            // Left drag: extend selection to current mouse position
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.mouse_dragging && contains(self.areas.editor, x, y) {
                    let (row, col) = self.mouse_to_buffer_pos(x, y);
                    self.textarea.move_cursor(CursorMove::Jump(row, col));
                }
            }

            // Left release: finalize selection (cancel if it was just a click with no drag)
            MouseEventKind::Up(MouseButton::Left) => {
                if self.mouse_dragging {
                    self.mouse_dragging = false;
                    match self.textarea.selection_range() {
                        Some((start, end)) if start != end => {}
                        _ => self.textarea.cancel_selection(),
                    }
                }
            }
            _ => {}
        }
    }

    /// Index into the visible file list under a screen position.
    fn list_index_at(&self, x: u16, y: u16) -> Option<usize> {
        let inner = self.areas.sidebar.list_inner();
        if !contains(inner, x, y) {
            return None;
        }
        let index = self.file_list.offset() + (y - inner.y) as usize;
        (index < self.workspace.visible_files().len()).then_some(index)
    }

    /// Converts terminal mouse coordinates to buffer (row, col) positions,
    /// accounting for the line number gutter width and scroll offset.
    pub(super) fn mouse_to_buffer_pos(&self, column: u16, row: u16) -> (u16, u16) {
        let area = self.areas.editor;
        let gutter = editor::gutter_width(self.textarea.lines().len());
        let buffer_row = row.saturating_sub(area.y) + self.editor_scroll_top;
        let buffer_col = column.saturating_sub(area.x).saturating_sub(gutter);
        (buffer_row, buffer_col)
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}
