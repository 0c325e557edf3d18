//! Data file persistence.
//!
//! # File layout
//!
//! ```text
//! <root>/
//!   activities.dat                          (one record line per activity)
//!   activities.dat.tmp                      (only while a save is in flight)
//!   backups/
//!     activities_2024-05-01_08-00-00.dat    (verbatim copies)
//! ```
//!
//! # Save protocol
//!
//! 1. Serialize every activity into `<path>.tmp` (same directory).
//! 2. Flush and fsync the temp file. Any failure aborts; `<path>` is untouched.
//! 3. `rename` the temp file over `<path>` (atomic on POSIX).
//! 4. The temp file is removed on every exit path.
//!
//! No locking is done: two processes saving the same file race, and the last
//! rename wins.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::audit::AuditLog;
use crate::catalog::Catalog;
use crate::codec;
use crate::error::{io_err, ModelError, StoreError};

/// Timestamp format embedded in backup file names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

const BACKUP_PREFIX: &str = "activities_";
const BACKUP_EXTENSION: &str = ".dat";

// ---------------------------------------------------------------------------
// 1. Load
// ---------------------------------------------------------------------------

/// A data-file line that was skipped during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line_number: usize,
    pub content: String,
    pub reason: ModelError,
}

/// Result of [`load_at`].
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub catalog: Catalog,
    /// Number of records loaded into `catalog`.
    pub loaded: usize,
    pub malformed: Vec<MalformedLine>,
    /// The data file did not exist; `catalog` is empty.
    pub source_missing: bool,
}

/// Read the whole catalog from `path`.
///
/// A missing file yields an empty catalog with `source_missing` set.
/// Malformed lines, including repeats of an earlier name, are skipped and
/// listed in [`LoadReport::malformed`], as are lines that are not valid
/// UTF-8. Blank lines are ignored.
pub fn load_at(path: &Path, audit: &dyn AuditLog) -> Result<LoadReport, StoreError> {
    audit.record(&format!("Loading activities from '{}'...", path.display()));

    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "data file not found; starting empty");
            audit.record(&format!(
                "Could not find Activities data file '{}'",
                path.display()
            ));
            audit.record(&format!("Loaded 0 activities from '{}'.", path.display()));
            return Ok(LoadReport {
                source_missing: true,
                ..LoadReport::default()
            });
        }
        Err(err) => {
            audit.record(&format!(
                "Error loading Activities data file '{}': {err}",
                path.display()
            ));
            return Err(io_err(path, err));
        }
    };

    let mut report = LoadReport::default();
    for (idx, raw) in contents.split(|&b| b == b'\n').enumerate() {
        let line_number = idx + 1;
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line.strip_suffix('\r').unwrap_or(line),
            Err(err) => {
                let reason = ModelError::malformed(format!("line is not valid UTF-8: {err}"));
                let content = String::from_utf8_lossy(raw);
                skip_line(path, line_number, &content, reason, audit, &mut report);
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let parsed = codec::deserialize(line).and_then(|activity| {
            let name = activity.name().clone();
            if report.catalog.insert(activity) {
                Ok(name)
            } else {
                Err(ModelError::malformed(format!(
                    "duplicate activity name '{name}'"
                )))
            }
        });

        match parsed {
            Ok(name) => {
                report.loaded += 1;
                tracing::debug!(line = line_number, activity = %name, "loaded record");
                audit.record(&format!("\tLoaded activity '{name}'."));
            }
            Err(reason) => skip_line(path, line_number, line, reason, audit, &mut report),
        }
    }

    tracing::info!(
        path = %path.display(),
        loaded = report.loaded,
        malformed = report.malformed.len(),
        "catalog loaded"
    );
    audit.record(&format!(
        "Loaded {} activities from '{}'.",
        report.loaded,
        path.display()
    ));
    Ok(report)
}

fn skip_line(
    path: &Path,
    line_number: usize,
    content: &str,
    reason: ModelError,
    audit: &dyn AuditLog,
    report: &mut LoadReport,
) {
    tracing::warn!(
        path = %path.display(),
        line = line_number,
        error = %reason,
        "skipping malformed record"
    );
    audit.record(&format!(
        "\tSkipped malformed line {line_number} in '{}': {reason}",
        path.display()
    ));
    report.malformed.push(MalformedLine {
        line_number,
        content: content.to_owned(),
        reason,
    });
}

// ---------------------------------------------------------------------------
// 2. Save (atomic)
// ---------------------------------------------------------------------------

/// `<path>.tmp`, the sibling used while saving.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically replace `path` with the serialized `catalog`.
///
/// On error the previous contents of `path` are left as they were.
pub fn save_at(catalog: &Catalog, path: &Path, audit: &dyn AuditLog) -> Result<(), StoreError> {
    save_with_tmp(catalog, path, &temp_path_for(path), audit)
}

fn save_with_tmp(
    catalog: &Catalog,
    path: &Path,
    tmp: &Path,
    audit: &dyn AuditLog,
) -> Result<(), StoreError> {
    audit.record(&format!("Saving activities to '{}'...", path.display()));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let _guard = TempFileGuard(tmp);
    audit.record(&format!("\tWriting to temp file '{}'...", tmp.display()));
    if let Err(err) = write_records(catalog, tmp, audit) {
        audit.record(&format!(
            "Error writing to temp file '{}': {err}",
            tmp.display()
        ));
        return Err(err);
    }

    audit.record(&format!(
        "\tOverwriting '{}' with temp file '{}'...",
        path.display(),
        tmp.display()
    ));
    if let Err(err) = fs::rename(tmp, path) {
        audit.record(&format!(
            "Error overwriting data file '{}' with temp file '{}': {err}",
            path.display(),
            tmp.display()
        ));
        return Err(io_err(path, err));
    }

    tracing::info!(path = %path.display(), count = catalog.len(), "catalog saved");
    audit.record(&format!(
        "Saved {} activities to '{}'.",
        catalog.len(),
        path.display()
    ));
    Ok(())
}

fn write_records(catalog: &Catalog, tmp: &Path, audit: &dyn AuditLog) -> Result<(), StoreError> {
    let file = File::create(tmp).map_err(|e| io_err(tmp, e))?;
    let mut out = BufWriter::new(file);
    for activity in catalog {
        let record = codec::serialize(activity);
        writeln!(out, "{record}").map_err(|e| io_err(tmp, e))?;
        audit.record(&format!(
            "\t\tWrote activity '{}' to temp file as '{record}'.",
            activity.name()
        ));
    }
    let file = out.into_inner().map_err(|e| io_err(tmp, e.into_error()))?;
    file.sync_all().map_err(|e| io_err(tmp, e))
}

/// Removes the temp file when dropped, whatever happened in between.
struct TempFileGuard<'a>(&'a Path);

impl Drop for TempFileGuard<'_> {
    fn drop(&mut self) {
        match fs::remove_file(self.0) {
            Ok(()) => tracing::debug!(path = %self.0.display(), "removed temp file"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.0.display(), error = %err, "failed to remove temp file")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Backup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    /// The data file was copied verbatim.
    Copied { bytes: u64 },
    /// There was no data file to copy; nothing was written.
    SourceMissing,
}

/// Result of [`backup_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    /// Backup file path. Not created when the source was missing.
    pub path: PathBuf,
    pub outcome: BackupOutcome,
}

/// `activities_<YYYY-MM-DD_HH-MM-SS>.dat`
pub fn backup_file_name(at: DateTime<Local>) -> String {
    format!(
        "{BACKUP_PREFIX}{}{BACKUP_EXTENSION}",
        at.format(BACKUP_TIMESTAMP_FORMAT)
    )
}

/// Copy `source` byte-for-byte into `backup_dir`, named after `at`.
///
/// The file is not parsed, so malformed data files back up fine. A missing
/// source is reported through [`BackupOutcome::SourceMissing`], not an error.
pub fn backup_at(
    source: &Path,
    backup_dir: &Path,
    at: DateTime<Local>,
    audit: &dyn AuditLog,
) -> Result<BackupReport, StoreError> {
    let path = backup_dir.join(backup_file_name(at));

    match fs::metadata(source) {
        Ok(_) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %source.display(), "nothing to back up");
            audit.record(&format!(
                "Could not find Activities data file '{}'",
                source.display()
            ));
            return Ok(BackupReport {
                path,
                outcome: BackupOutcome::SourceMissing,
            });
        }
        Err(err) => return Err(backup_failed(source, err, audit)),
    }

    fs::create_dir_all(backup_dir).map_err(|e| backup_failed(backup_dir, e, audit))?;
    let bytes = fs::copy(source, &path).map_err(|e| backup_failed(&path, e, audit))?;

    tracing::info!(source = %source.display(), backup = %path.display(), bytes, "backup written");
    audit.record(&format!(
        "Backed up '{}' to '{}'.",
        source.display(),
        path.display()
    ));
    Ok(BackupReport {
        path,
        outcome: BackupOutcome::Copied { bytes },
    })
}

/// [`backup_at`] stamped with the current local time.
pub fn backup(
    source: &Path,
    backup_dir: &Path,
    audit: &dyn AuditLog,
) -> Result<BackupReport, StoreError> {
    backup_at(source, backup_dir, Local::now(), audit)
}

fn backup_failed(path: &Path, err: std::io::Error, audit: &dyn AuditLog) -> StoreError {
    audit.record(&format!(
        "Error backing up Activities data file to '{}': {err}",
        path.display()
    ));
    io_err(path, err)
}

/// Backup files in `backup_dir`, oldest first. A missing directory is empty.
pub fn list_backups(backup_dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let entries = match fs::read_dir(backup_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
        Err(err) => return Err(io_err(backup_dir, err)),
    };
    let mut backups: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_EXTENSION)
        })
        .map(|e| e.path())
        .collect();
    backups.sort();
    Ok(backups)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
