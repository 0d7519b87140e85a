//! Single-line text inputs: search box, new-file box, and the header's
//! rename field. The cursor is a byte offset that always sits on a char
//! boundary.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a keypress did to a [`LineInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    /// The key was ignored or only moved the cursor.
    None,
    Changed,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    buf: String,
    cursor: usize,
}

impl LineInput {
    /// An input pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let buf = text.into();
        let cursor = buf.len();
        Self { buf, cursor }
    }

    pub fn text(&self) -> &str {
        &self.buf
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_text(&mut self, text: &str) {
        self.buf = text.to_string();
        self.cursor = self.buf.len();
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
    }

    /// Inserts pasted text, dropping line breaks and path separators.
    pub fn insert_str(&mut self, text: &str) -> LineAction {
        let mut changed = false;
        for ch in text.chars() {
            if accepts(ch) {
                self.insert(ch);
                changed = true;
            }
        }
        if changed {
            LineAction::Changed
        } else {
            LineAction::None
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LineAction {
        match key.code {
            KeyCode::Esc => LineAction::Cancel,
            KeyCode::Enter => LineAction::Submit,
            KeyCode::Backspace => {
                let Some(prev) = self.prev_boundary() else {
                    return LineAction::None;
                };
                self.buf.remove(prev);
                self.cursor = prev;
                LineAction::Changed
            }
            KeyCode::Delete => {
                if self.cursor < self.buf.len() {
                    self.buf.remove(self.cursor);
                    LineAction::Changed
                } else {
                    LineAction::None
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                LineAction::None
            }
            KeyCode::Right => {
                if let Some(ch) = self.buf[self.cursor..].chars().next() {
                    self.cursor += ch.len_utf8();
                }
                LineAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                LineAction::None
            }
            KeyCode::End => {
                self.cursor = self.buf.len();
                LineAction::None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.buf.is_empty() {
                    return LineAction::None;
                }
                self.clear();
                LineAction::Changed
            }
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                if accepts(ch) {
                    self.insert(ch);
                    LineAction::Changed
                } else {
                    LineAction::None
                }
            }
            _ => LineAction::None,
        }
    }

    fn insert(&mut self, ch: char) {
        self.buf.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buf[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}

// Keep the value a bare file name.
fn accepts(ch: char) -> bool {
    !matches!(ch, '\n' | '\r' | '/' | '\\')
}
