//! Standalone HTML export of a note.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::error::StoreError;
use crate::markdown::{self, html::escape_html, Rendered};
use crate::store::NoteStore;

/// Errors that can occur while exporting.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Which view of the note goes into the exported page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// The rendered document.
    #[default]
    Html,
    /// The syntax-highlighted markdown source.
    Source,
}

/// Renders the on-disk content of `name` and writes `<stem>.html` into
/// `out_dir`, creating the directory if needed. Returns the written path.
pub fn export_note(
    store: &NoteStore,
    name: &str,
    out_dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let text = store.read(name)?;
    write_rendered(name, &markdown::render(&text), out_dir, format)
}

/// Writes already rendered views of `name` as `<stem>.html` into `out_dir`.
pub fn write_rendered(
    name: &str,
    rendered: &Rendered,
    out_dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let body = match format {
        ExportFormat::Html => rendered.html.clone(),
        ExportFormat::Source => format!("<pre class=\"code\">{}</pre>\n", rendered.highlighted),
    };
    let document = html_document(name, &body);

    fs::create_dir_all(out_dir).map_err(|source| ExportError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    let path = out_dir.join(format!("{}.html", stem));
    fs::write(&path, document).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    info!(name, path = %path.display(), ?format, "exported note");
    Ok(path)
}

/// Wraps an HTML fragment in a minimal standalone document.
pub fn html_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}
