//! Whole-file note storage in a single flat directory.
//!
//! Every call is synchronous and goes straight to the filesystem: no caching,
//! no locking, no atomic replace. If something outside the editor changes a
//! note at the same time, the last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// Extension appended to names given to [`NoteStore::create`].
pub const NOTE_EXTENSION: &str = ".md";

#[derive(Debug, Clone)]
pub struct NoteStore {
    root: PathBuf,
}

impl NoteStore {
    /// Opens the store at `root`, creating the directory (and parents) if absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let label = root.display().to_string();
        fs::create_dir_all(&root).map_err(|e| StoreError::from_io(&label, e))?;
        debug!(root = %label, "opened note store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute-or-relative location of `name`, joined onto the store root.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Names of all regular files in the store, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let label = self.root.display().to_string();
        let entries = fs::read_dir(&self.root).map_err(|e| StoreError::from_io(&label, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::from_io(&label, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!(name = ?raw, "skipping note with a non-UTF-8 name"),
            }
        }
        names.sort();
        debug!(count = names.len(), "listed notes");
        Ok(names)
    }

    /// Reads the entire note as UTF-8 text.
    pub fn read(&self, name: &str) -> Result<String> {
        validate_name(name)?;
        let text = fs::read_to_string(self.path(name)).map_err(|e| StoreError::from_io(name, e))?;
        debug!(name, bytes = text.len(), "read note");
        Ok(text)
    }

    /// Replaces the note's content with `text`, creating the file if needed.
    pub fn write(&self, name: &str, text: &str) -> Result<()> {
        validate_name(name)?;
        fs::write(self.path(name), text).map_err(|e| StoreError::from_io(name, e))?;
        debug!(name, bytes = text.len(), "wrote note");
        Ok(())
    }

    /// Removes the note. Missing files are reported, not ignored.
    pub fn delete(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        fs::remove_file(self.path(name)).map_err(|e| StoreError::from_io(name, e))?;
        debug!(name, "deleted note");
        Ok(())
    }

    /// Creates an empty note from a user-typed name and returns the final
    /// file name. `.md` is appended unless the name already carries it.
    /// Refuses to truncate an existing note.
    pub fn create(&self, raw_name: &str) -> Result<String> {
        let name = note_file_name(raw_name)?;
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.path(&name))
            .map_err(|e| StoreError::from_io(&name, e))?;
        debug!(name = %name, "created note");
        Ok(name)
    }

    /// Moves `from` to `to` inside the store. Never overwrites.
    pub fn rename(&self, from: &str, to: &str) -> Result<()> {
        validate_name(from)?;
        validate_name(to)?;
        if !self.path(from).is_file() {
            return Err(StoreError::NotFound(from.to_string()));
        }
        if self.path(to).exists() {
            return Err(StoreError::AlreadyExists(to.to_string()));
        }
        fs::rename(self.path(from), self.path(to)).map_err(|e| StoreError::from_io(from, e))?;
        debug!(from, to, "renamed note");
        Ok(())
    }
}

/// Rejects names that would escape the storage directory or are empty.
pub fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Turns the text typed into the new-file box into a note file name.
pub fn note_file_name(raw_name: &str) -> Result<String> {
    let trimmed = raw_name.trim();
    validate_name(trimmed)?;
    if trimmed.to_ascii_lowercase().ends_with(NOTE_EXTENSION) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}{}", trimmed, NOTE_EXTENSION))
    }
}
