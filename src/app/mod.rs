use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListState, Paragraph, Wrap},
    Frame,
};
use tui_textarea::{CursorMove, Input, Scrolling, TextArea};

use crate::components::{editor, header, menu, preview, sidebar, status};
use crate::markdown::code_highlight::{self, OverlaySpan};
use crate::theme;
use crate::workspace::{Msg, Workspace};

pub use line_input::{LineAction, LineInput};

/// Lines to scroll per mouse wheel tick.
const SCROLL_LINES: i32 = 3;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Files,
    Search,
    NewFile,
    Editor,
    Preview,
}

/// Screen regions from the last render, used for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
struct ScreenAreas {
    header: Rect,
    sidebar: sidebar::SidebarAreas,
    /// Text area inside the editor pane border.
    editor: Rect,
    /// Text area inside the preview pane border.
    preview: Rect,
    menu: Option<Rect>,
}

/// The terminal front end. Owns the [`Workspace`] and everything that only
/// matters on screen: focus, the editing widget, input boxes, list cursor.
pub struct App<'a> {
    pub workspace: Workspace,
    pub focus: Focus,
    pub textarea: TextArea<'a>,
    pub preview: preview::PreviewState,
    pub search_input: LineInput,
    pub new_file_input: LineInput,
    /// Open while the workspace has a rename in progress.
    pub rename_input: Option<LineInput>,
    /// Highlighted row of the visible file list.
    pub file_list: ListState,
    pub show_help: bool,
    pub should_quit: bool,

    /// Workspace generation the textarea was last built from.
    loaded_generation: u64,
    areas: ScreenAreas,
    /// Tracks tui-textarea's scroll position for mouse click → buffer position math.
    editor_scroll_top: u16,
    /// True while left mouse button is held down for drag selection.
    mouse_dragging: bool,

    // --- Editor syntax overlay cache ---
    overlay: Vec<Vec<OverlaySpan>>,
    overlay_dirty: bool,
}

impl<'a> App<'a> {
    pub fn new(workspace: Workspace) -> Self {
        let mut app = Self {
            workspace,
            focus: Focus::Files,
            textarea: editor::textarea_from(""),
            preview: preview::PreviewState::new(),
            search_input: LineInput::default(),
            new_file_input: LineInput::default(),
            rename_input: None,
            file_list: ListState::default(),
            show_help: false,
            should_quit: false,
            loaded_generation: 0,
            areas: ScreenAreas::default(),
            editor_scroll_top: 0,
            mouse_dragging: false,
            overlay: Vec::new(),
            overlay_dirty: true,
        };
        app.sync_from_workspace();
        app
    }

    /// Returns the full editor content as a single string.
    pub fn textarea_content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    // ─── Workspace plumbing ──────────────────────────────────────────────

    /// Applies a message, then pulls any resulting changes into the view.
    pub fn dispatch(&mut self, msg: Msg) {
        self.workspace.update(msg);
        self.sync_from_workspace();
    }

    /// Brings view-owned copies (textarea, inputs, list cursor) in line with
    /// the workspace after an update.
    fn sync_from_workspace(&mut self) {
        if self.workspace.generation() != self.loaded_generation {
            let text = self.workspace.draft().map_or("", |d| d.text());
            self.textarea = editor::textarea_from(text);
            self.loaded_generation = self.workspace.generation();
            self.editor_scroll_top = 0;
            self.overlay_dirty = true;
            if let Some(name) = self.workspace.selected() {
                let index = self.workspace.visible_files().iter().position(|f| *f == name);
                if index.is_some() {
                    self.file_list.select(index);
                }
            }
        }

        match (self.workspace.rename_target(), self.rename_input.is_some()) {
            (Some(target), false) => self.rename_input = Some(LineInput::with_text(target)),
            (None, true) => self.rename_input = None,
            _ => {}
        }

        if self.new_file_input.text() != self.workspace.new_file_name() {
            self.new_file_input.set_text(self.workspace.new_file_name());
        }

        let count = self.workspace.visible_files().len();
        if count == 0 {
            self.file_list.select(None);
        } else {
            let index = self.file_list.selected().unwrap_or(0).min(count - 1);
            self.file_list.select(Some(index));
        }
    }

    /// Pushes the textarea's text into the draft when it differs.
    fn sync_draft(&mut self) {
        let Some(draft) = self.workspace.draft() else {
            return;
        };
        let text = self.textarea_content();
        if draft.text() != text {
            self.dispatch(Msg::Edit(text));
            self.overlay_dirty = true;
        }
    }

    /// Name under the file list cursor.
    pub fn highlighted_file(&self) -> Option<String> {
        let index = self.file_list.selected()?;
        self.workspace
            .visible_files()
            .get(index)
            .map(|name| name.to_string())
    }

    // ─── Tick / timers ───────────────────────────────────────────────────

    /// Called every 100ms from the main loop. Expires the alert banner.
    pub fn tick(&mut self) {
        self.dispatch(Msg::Tick(Instant::now()));
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Top-level event handler. Dispatches to key, mouse, or paste handlers.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Bracketed paste: terminal sends entire clipboard as one event
            // (enabled via EnableBracketedPaste in main.rs)
            Event::Paste(text) => self.handle_paste(text),
            _ => {}
        }
    }

    /// Counts the total number of words in the editor.
    fn word_count(&self) -> usize {
        self.textarea
            .lines()
            .iter()
            .map(|line| line.split_whitespace().count())
            .sum()
    }

    /// Moves keyboard focus forward (Tab) or backward (Shift+Tab) through
    /// files, editor, and preview. The two sidebar inputs count as files.
    fn cycle_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (Focus::Files | Focus::Search | Focus::NewFile, true) => Focus::Editor,
            (Focus::Editor, true) => Focus::Preview,
            (Focus::Preview, true) => Focus::Files,
            (Focus::Files | Focus::Search | Focus::NewFile, false) => Focus::Preview,
            (Focus::Editor, false) => Focus::Files,
            (Focus::Preview, false) => Focus::Editor,
        };
    }

    /// Quits, saving a dirty draft first. A failed save keeps the app open
    /// with the error banner showing.
    fn request_quit(&mut self) {
        if self.workspace.is_unsaved() {
            self.dispatch(Msg::Save);
        }
        if !self.workspace.is_unsaved() {
            self.should_quit = true;
        }
    }

    /// Moves the shared scroll offset by `delta` lines and brings the editor
    /// viewport along, so editor and preview stay aligned.
    pub(super) fn scroll_by(&mut self, delta: i32) {
        let last_line = saturating_u16(self.textarea.lines().len().saturating_sub(1));
        let max = last_line.max(self.preview.max_scroll());
        let current = self.workspace.scroll();
        let target = i32::from(current).saturating_add(delta).clamp(0, i32::from(max)) as u16;
        if target == current {
            return;
        }

        let editor_target = target.min(last_line);
        let mut rows = i32::from(editor_target) - i32::from(self.editor_scroll_top);
        while rows != 0 {
            let step = rows.clamp(i32::from(i16::MIN), i32::from(i16::MAX));
            self.textarea.scroll(Scrolling::Delta {
                rows: step as i16,
                cols: 0,
            });
            rows -= step;
        }
        self.editor_scroll_top = editor_target;
        self.dispatch(Msg::Scroll(target));
    }
}

/// Line counts and offsets past `u16::MAX` pin to the maximum.
fn saturating_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

mod clipboard;
mod input;
mod line_input;
mod rename;
mod render;
