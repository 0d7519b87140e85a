use crate::markdown::{self, Rendered};

/// In-memory copy of the selected note. `text` diverges from `disk`
/// until the next successful save.
#[derive(Debug, Clone)]
pub struct Draft {
    name: String,
    disk: String,
    text: String,
    rendered: Rendered,
    edited: bool,
}

impl Draft {
    /// A freshly loaded, unedited draft.
    pub fn load(name: impl Into<String>, content: String) -> Self {
        let rendered = markdown::render(&content);
        Self {
            name: name.into(),
            disk: content.clone(),
            text: content,
            rendered,
            edited: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Content as last read from or written to disk.
    pub fn disk_text(&self) -> &str {
        &self.disk
    }

    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }

    /// True once any change has been applied since loading.
    pub fn edited(&self) -> bool {
        self.edited
    }

    pub fn is_dirty(&self) -> bool {
        self.text != self.disk
    }

    /// Replaces the buffer and re-derives both HTML views. Identical text is
    /// not a change.
    pub fn set_text(&mut self, text: String) {
        if text == self.text {
            return;
        }
        self.text = text;
        self.rendered = markdown::render(&self.text);
        self.edited = true;
    }

    /// Records that the current text is now what's on disk.
    pub fn mark_saved(&mut self) {
        self.disk.clone_from(&self.text);
        self.edited = true;
    }

    pub(super) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
