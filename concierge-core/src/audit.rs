//! Audit log capability.
//!
//! Store operations report what they did through [`AuditLog`]. The file
//! implementation appends timestamped lines:
//!
//! ```text
//! [[[ ACTIVITY CONCIERGE LOG ]]]
//!
//! [2024-05-01 08:00:00] 	Loading activities from 'activities.dat'...
//! ```

use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Header written before the first entry of a fresh log file.
pub const LOG_HEADER: &str = "[[[ ACTIVITY CONCIERGE LOG ]]]\n\n";

/// Timestamp format for log entries.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sink for human-readable operation records.
///
/// Recording never fails from the caller's point of view.
pub trait AuditLog {
    fn record(&self, message: &str);
}

/// Format a single log line: `[<timestamp>] \t<message>\n`.
pub fn format_entry(at: DateTime<Local>, message: &str) -> String {
    format!("[{}] \t{message}\n", at.format(LOG_TIMESTAMP_FORMAT))
}

/// Appends entries to a log file on disk.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, entry: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // A zero-length file is fresh, whether we created it or not.
        if file.metadata()?.len() == 0 {
            file.write_all(LOG_HEADER.as_bytes())?;
        }
        file.write_all(entry.as_bytes())
    }
}

impl AuditLog for FileAuditLog {
    fn record(&self, message: &str) {
        let entry = format_entry(Local::now(), message);
        if let Err(err) = self.append(&entry) {
            tracing::warn!(path = %self.path.display(), error = %err, "audit log write failed");
        }
    }
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: RefCell<Vec<String>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// True when any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.borrow().iter().any(|e| e.contains(needle))
    }
}

impl AuditLog for MemoryAuditLog {
    fn record(&self, message: &str) {
        self.entries.borrow_mut().push(message.to_owned());
    }
}

/// Discards every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAuditLog;

impl AuditLog for NullAuditLog {
    fn record(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn entry_format_matches_log_layout() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(format_entry(at, "hello"), "[2024-05-01 08:00:00] \thello\n");
    }

    #[test]
    fn header_written_once_for_fresh_file() {
        let dir = TempDir::new().unwrap();
        let log = FileAuditLog::new(dir.path().join("activities.log"));
        log.record("first");
        log.record("second");

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.starts_with(LOG_HEADER));
        assert_eq!(contents.matches("ACTIVITY CONCIERGE LOG").count(), 1);
        let lines: Vec<_> = contents.lines().skip(2).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("\tfirst"));
        assert!(lines[1].ends_with("\tsecond"));
    }

    #[test]
    fn existing_log_is_appended_without_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("activities.log");
        std::fs::write(&path, "previous\n").unwrap();
        FileAuditLog::new(&path).record("next");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("previous\n["));
        assert!(!contents.contains("ACTIVITY CONCIERGE LOG"));
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = TempDir::new().unwrap();
        let log = FileAuditLog::new(dir.path().join("nested").join("dir").join("x.log"));
        log.record("kept");
        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.starts_with(LOG_HEADER));
        assert!(contents.ends_with("\tkept\n"));
    }

    #[test]
    fn unwritable_log_does_not_panic() {
        let dir = TempDir::new().unwrap();
        // The parent is a regular file, so no directory can be made there.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let log = FileAuditLog::new(blocker.join("activities.log"));
        log.record("dropped");
        assert!(!log.path().exists());
    }

    #[test]
    fn memory_log_collects_messages() {
        let log = MemoryAuditLog::new();
        log.record("Loaded 2 activities");
        assert!(log.contains("Loaded 2"));
        assert_eq!(log.entries().len(), 1);
    }
}
