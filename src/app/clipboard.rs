//! System clipboard integration for the editor: copy selection, paste text.

use super::*;

impl<'a> App<'a> {
    // arboard::Clipboard is created on demand (not stored in App: it is not Send
    // and creating it is cheap).

    /// Writes text to the system clipboard via arboard.
    pub(super) fn copy_to_clipboard(&self, text: &str) {
        let result = arboard::Clipboard::new().and_then(|mut clip| clip.set_text(text.to_string()));
        if let Err(e) = result {
            tracing::debug!(error = %e, "clipboard copy unavailable");
        }
    }

    /// Reads text from the system clipboard. Returns None on failure.
    pub(super) fn paste_from_clipboard(&self) -> Option<String> {
        arboard::Clipboard::new().ok()?.get_text().ok()
    }

    /// The editor's current selection as text, lines joined with `\n`.
    pub(super) fn selected_text(&self) -> Option<String> {
        let ((sr, sc), (er, ec)) = self.textarea.selection_range()?;
        let lines = self.textarea.lines();
        // Selection columns are char offsets
        let slice = |line: &str, from: usize, to: Option<usize>| -> String {
            let chars = line.chars().skip(from);
            match to {
                Some(to) => chars.take(to.saturating_sub(from)).collect(),
                None => chars.collect(),
            }
        };

        if sr == er {
            return Some(slice(lines.get(sr)?, sc, Some(ec)));
        }
        let mut parts = Vec::with_capacity(er - sr + 1);
        for (i, line) in lines.iter().enumerate().take(er + 1).skip(sr) {
            let part = if i == sr {
                slice(line, sc, None)
            } else if i == er {
                slice(line, 0, Some(ec))
            } else {
                line.clone()
            };
            parts.push(part);
        }
        Some(parts.join("\n"))
    }
}
