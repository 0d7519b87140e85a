//! Editor state and its single update function.
//!
//! The view layer never mutates this directly: it turns input into [`Msg`]s
//! and hands them to [`Workspace::update`], then renders from the accessors.
//! Filesystem failures become error alerts; nothing here panics on I/O.

mod alert;
mod draft;
mod filter;
mod menu;

use std::time::Instant;

use tracing::{info, warn};

use crate::config::{Config, SavePolicy};
use crate::error::StoreError;
use crate::export::{self, ExportFormat};
use crate::store::{self, NoteStore};

pub use alert::{Alert, AlertKind};
pub use draft::Draft;
pub use filter::filter_names;
pub use menu::{ContextMenu, MenuItem};

/// Where the selection/edit state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoSelection,
    /// A note is loaded and untouched.
    Viewing,
    /// The note has been changed (and possibly saved) since loading.
    Editing { dirty: bool },
}

/// Everything that can happen to the workspace.
#[derive(Debug, Clone)]
pub enum Msg {
    Select(String),
    Edit(String),
    Save,
    /// Contents of the new-file input changed.
    NewFileInput(String),
    /// Submit the new-file input.
    Create,
    Delete(String),
    /// Contents of the search box changed.
    Search(String),
    Scroll(u16),
    OpenMenu { file: String, x: u16, y: u16 },
    MenuUp,
    MenuDown,
    /// Run the highlighted menu entry.
    MenuActivate,
    /// Run a specific menu entry (mouse click).
    MenuChoose(MenuItem),
    CloseMenu,
    Export(String),
    StartRename(String),
    Rename(String),
    CancelRename,
    Refresh,
    Tick(Instant),
}

pub struct Workspace {
    store: NoteStore,
    config: Config,
    files: Vec<String>,
    search: String,
    new_file_name: String,
    selected: Option<String>,
    draft: Option<Draft>,
    alert: Option<Alert>,
    menu: Option<ContextMenu>,
    rename_target: Option<String>,
    scroll: u16,
    generation: u64,
}

impl Workspace {
    /// Opens (creating if needed) the storage directory and lists it.
    pub fn open(config: Config) -> Result<Self, StoreError> {
        let store = NoteStore::open(&config.storage_dir)?;
        let files = store.list()?;
        info!(count = files.len(), root = %store.root().display(), "workspace opened");
        Ok(Self {
            store,
            config,
            files,
            search: String::new(),
            new_file_name: String::new(),
            selected: None,
            draft: None,
            alert: None,
            menu: None,
            rename_target: None,
            scroll: 0,
            generation: 0,
        })
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Every note in the storage directory, as of the last refresh.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Notes matching the search box.
    pub fn visible_files(&self) -> Vec<&str> {
        filter_names(&self.files, &self.search)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn new_file_name(&self) -> &str {
        &self.new_file_name
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    pub fn rename_target(&self) -> Option<&str> {
        self.rename_target.as_deref()
    }

    /// Scroll offset shared by the editor, its overlay, and the preview.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Bumped whenever the draft is replaced from disk (or dropped), so views
    /// holding their own copy of the text know to reload it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        match &self.draft {
            None => Phase::NoSelection,
            Some(d) if !d.edited() => Phase::Viewing,
            Some(d) => Phase::Editing { dirty: d.is_dirty() },
        }
    }

    /// True when the draft differs from what is on disk.
    pub fn is_unsaved(&self) -> bool {
        self.draft.as_ref().is_some_and(Draft::is_dirty)
    }

    // ─── Update ──────────────────────────────────────────────────────────

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Select(name) => {
                self.select(name);
            }
            Msg::Edit(text) => self.edit(text),
            Msg::Save => {
                self.save();
            }
            Msg::NewFileInput(text) => self.new_file_name = text,
            Msg::Create => self.create(),
            Msg::Delete(name) => self.delete(&name),
            Msg::Search(text) => self.search = text,
            Msg::Scroll(offset) => self.scroll = offset,
            Msg::OpenMenu { file, x, y } => self.menu = Some(ContextMenu::new(file, x, y)),
            Msg::MenuUp => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.up();
                }
            }
            Msg::MenuDown => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.down();
                }
            }
            Msg::MenuActivate => {
                if let Some(item) = self.menu.as_ref().map(ContextMenu::item) {
                    self.run_menu_item(item);
                }
            }
            Msg::MenuChoose(item) => self.run_menu_item(item),
            Msg::CloseMenu => self.menu = None,
            Msg::Export(name) => self.export(&name),
            Msg::StartRename(name) => self.rename_target = Some(name),
            Msg::Rename(new_name) => self.rename(&new_name),
            Msg::CancelRename => self.rename_target = None,
            Msg::Refresh => self.refresh(),
            Msg::Tick(now) => {
                if self
                    .alert
                    .as_ref()
                    .is_some_and(|a| a.is_expired(now, self.config.alert_duration))
                {
                    self.alert = None;
                }
            }
        }
    }

    fn raise(&mut self, alert: Alert) {
        if alert.kind == AlertKind::Error {
            warn!(message = %alert.message, "alert");
        }
        self.alert = Some(alert);
    }

    /// Re-reads the directory listing in full.
    fn refresh(&mut self) {
        match self.store.list() {
            Ok(files) => self.files = files,
            Err(e) => self.raise(Alert::error(format!("Refresh failed: {}", e))),
        }
    }

    /// Loads `name` into the draft. Returns whether it is now the selection.
    fn select(&mut self, name: String) -> bool {
        if self.selected.as_deref() == Some(name.as_str()) {
            return true;
        }
        // Switching away never drops unsaved work.
        if self.is_unsaved() && !self.save() {
            return false;
        }
        match self.store.read(&name) {
            Ok(content) => {
                info!(name = %name, "selected note");
                self.draft = Some(Draft::load(name.clone(), content));
                self.selected = Some(name);
                self.scroll = 0;
                self.generation += 1;
                true
            }
            Err(e) => {
                self.raise(Alert::error(format!("Open failed: {}", e)));
                false
            }
        }
    }

    fn edit(&mut self, text: String) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        draft.set_text(text);
        if self.config.save_policy == SavePolicy::OnChange && draft.is_dirty() {
            let name = draft.name().to_string();
            match self.store.write(&name, draft.text()) {
                Ok(()) => draft.mark_saved(),
                Err(e) => self.raise(Alert::error(format!("Save failed: {}", e))),
            }
        }
    }

    /// Writes the draft back. Returns whether the draft is now on disk.
    fn save(&mut self) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        let name = draft.name().to_string();
        match self.store.write(&name, draft.text()) {
            Ok(()) => {
                draft.mark_saved();
                info!(name = %name, "saved note");
                self.raise(Alert::success("Saved"));
                true
            }
            Err(e) => {
                self.raise(Alert::error(format!("Save failed: {}", e)));
                false
            }
        }
    }

    fn create(&mut self) {
        let raw = self.new_file_name.clone();
        match self.store.create(&raw) {
            Ok(name) => {
                info!(name = %name, "created note");
                self.new_file_name.clear();
                self.refresh();
                let previous = self.selected.clone();
                if self.select(name.clone()) {
                    self.raise(Alert::success(format!("{} Created", name)));
                } else if let Some(open) = previous.filter(|_| self.is_unsaved()) {
                    // The open note stays selected with its edits.
                    self.raise(Alert::error(format!(
                        "{} Created, but {} could not be saved",
                        name, open
                    )));
                }
            }
            Err(e) => self.raise(Alert::error(format!("Create failed: {}", e))),
        }
    }

    fn delete(&mut self, name: &str) {
        self.menu = None;
        let result = self.store.delete(name);
        if self.selected.as_deref() == Some(name) && result.is_ok() {
            self.selected = None;
            self.draft = None;
            self.scroll = 0;
            self.generation += 1;
        }
        self.refresh();
        match result {
            Ok(()) => {
                info!(name, "deleted note");
                self.raise(Alert::success(format!("Deleted {}", name)));
            }
            Err(e) => self.raise(Alert::error(format!("Delete failed: {}", e))),
        }
    }

    fn export(&mut self, name: &str) {
        self.menu = None;
        let out_dir = &self.config.export_dir;
        // A clean draft already holds the rendered disk content
        let result = match self.draft.as_ref().filter(|d| d.name() == name && !d.is_dirty()) {
            Some(draft) => export::write_rendered(name, draft.rendered(), out_dir, ExportFormat::Html),
            None => export::export_note(&self.store, name, out_dir, ExportFormat::Html),
        };
        match result {
            Ok(path) => self.raise(Alert::success(format!("Exported to {}", path.display()))),
            Err(e) => self.raise(Alert::error(format!("Export failed: {}", e))),
        }
    }

    fn rename(&mut self, new_name: &str) {
        let Some(from) = self.rename_target.take() else {
            return;
        };
        let to = new_name.trim();
        if to.is_empty() || to == from {
            return;
        }
        if let Err(e) = store::validate_name(to).and_then(|_| self.store.rename(&from, to)) {
            self.raise(Alert::error(format!("Rename failed: {}", e)));
            return;
        }
        info!(from = %from, to, "renamed note");
        if self.selected.as_deref() == Some(from.as_str()) {
            self.selected = Some(to.to_string());
            if let Some(draft) = self.draft.as_mut() {
                draft.rename(to);
            }
        }
        self.refresh();
        self.raise(Alert::success(format!("Renamed to {}", to)));
    }

    fn run_menu_item(&mut self, item: MenuItem) {
        let Some(menu) = self.menu.take() else {
            return;
        };
        match item {
            MenuItem::Export => self.export(&menu.file),
            MenuItem::Rename => self.rename_target = Some(menu.file),
            MenuItem::Delete => self.delete(&menu.file),
        }
    }
}

#[cfg(test)]
mod tests;
