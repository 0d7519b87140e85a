//! Header rename field for the open note.
//!
//! Activated via Ctrl+T, clicking the title in the header bar, or the
//! context menu's Rename entry. The workspace owns the rename target; this
//! side only edits the text.

use super::*;

impl<'a> App<'a> {
    /// Starts renaming the open note, if there is one.
    pub(super) fn start_rename(&mut self) {
        if let Some(name) = self.workspace.selected().map(str::to_string) {
            self.dispatch(Msg::StartRename(name));
        }
    }

    /// Handles keypresses while renaming.
    /// Enter confirms, Esc cancels, everything else edits the name.
    pub(super) fn handle_rename_key(&mut self, key: KeyEvent) {
        let Some(input) = self.rename_input.as_mut() else {
            return;
        };
        match input.handle_key(key) {
            LineAction::Submit => {
                let name = input.text().to_string();
                self.dispatch(Msg::Rename(name));
            }
            LineAction::Cancel => self.dispatch(Msg::CancelRename),
            LineAction::Changed | LineAction::None => {}
        }
    }
}
