use std::path::{Path, PathBuf};

pub const DATA_FILE: &str = "activities.dat";
pub const LOG_FILE: &str = "activities.log";
pub const BACKUP_DIR: &str = "backups";

/// Env var naming the directory that holds the default files.
pub const ROOT_ENV: &str = "CONCIERGE_ROOT";

pub fn data_path(root: &Path) -> PathBuf {
    root.join(DATA_FILE)
}

pub fn log_path(root: &Path) -> PathBuf {
    root.join(LOG_FILE)
}

pub fn backup_dir(root: &Path) -> PathBuf {
    root.join(BACKUP_DIR)
}

/// Resolved file locations for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConciergePaths {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub backup_dir: PathBuf,
}

impl ConciergePaths {
    /// Default layout under `root`.
    pub fn at(root: &Path) -> Self {
        Self {
            data_file: data_path(root),
            log_file: log_path(root),
            backup_dir: backup_dir(root),
        }
    }

    pub fn with_data_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.data_file = path;
        }
        self
    }

    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.log_file = path;
        }
        self
    }

    pub fn with_backup_dir(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.backup_dir = path;
        }
        self
    }
}
