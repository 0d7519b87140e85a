use std::path::PathBuf;
use std::time::Duration;

/// Default storage directory, relative to the working directory.
pub const DEFAULT_STORAGE_DIR: &str = "storage";

/// Default directory for exported HTML files.
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// How long alert banners stay visible before auto-dismissing.
pub const DEFAULT_ALERT_DURATION: Duration = Duration::from_secs(3);

/// When the draft is written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    /// Only on an explicit save (Ctrl+S, or quitting with a dirty draft).
    #[default]
    Manual,
    /// After every change to the draft.
    OnChange,
}

/// Runtime settings, assembled from CLI flags in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub export_dir: PathBuf,
    pub save_policy: SavePolicy,
    pub alert_duration: Duration,
}

impl Config {
    /// Config rooted at `storage_dir` with every other setting at its default.
    pub fn with_storage(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            save_policy: SavePolicy::Manual,
            alert_duration: DEFAULT_ALERT_DURATION,
        }
    }
}
