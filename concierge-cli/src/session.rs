//! One CLI run: load the catalog, run a command, save the catalog.

use anyhow::{Context, Result};
use colored::Colorize;

use concierge_core::{store, AuditLog, Catalog, ConciergePaths, FileAuditLog, LoadReport};

use crate::commands;
use crate::Commands;

/// Shared state handed to every command.
pub struct Session<'a> {
    pub paths: &'a ConciergePaths,
    pub audit: &'a dyn AuditLog,
}

impl Session<'_> {
    /// Record `message` in the audit log and print it to stdout.
    pub fn say(&self, message: &str) {
        self.audit.record(message);
        println!("{message}");
    }

    /// Record `message` in the audit log and print it to stderr as a warning.
    pub fn warn(&self, message: &str) {
        self.audit.record(&format!("WARNING: {message}"));
        eprintln!("{} {message}", "warning:".yellow().bold());
    }
}

/// Run `command` against the catalog at `paths.data_file`.
///
/// The catalog is saved after the command whether or not it succeeded. A
/// failed save makes the run fail. A load failure (other than a missing
/// file) aborts before anything is written.
pub fn run(paths: &ConciergePaths, command: Option<Commands>) -> Result<()> {
    tracing::debug!(
        data = %paths.data_file.display(),
        log = %paths.log_file.display(),
        backups = %paths.backup_dir.display(),
        ?command,
        "session started"
    );
    let audit = FileAuditLog::new(&paths.log_file);
    audit.record("[[[BEGIN PROGRAM]]]");
    let session = Session {
        paths,
        audit: &audit,
    };

    let report = store::load_at(&paths.data_file, &audit).with_context(|| {
        format!(
            "failed to load activities from '{}'",
            paths.data_file.display()
        )
    })?;
    let mut catalog = report_load(&session, report);

    let outcome = match command {
        None => {
            audit.record("No command given. Printing usage...");
            println!("{}", commands::help::usage());
            Ok(())
        }
        Some(command) => commands::dispatch(command, &mut catalog, &session),
    };
    if let Err(err) = &outcome {
        tracing::debug!(error = %err, "command failed; saving catalog anyway");
    }

    let saved = store::save_at(&catalog, &paths.data_file, &audit).with_context(|| {
        format!(
            "failed to save activities to '{}'",
            paths.data_file.display()
        )
    });
    audit.record("[[[END PROGRAM]]]");

    match (outcome, saved) {
        (outcome, Ok(())) => outcome,
        (Ok(()), Err(save_err)) => Err(save_err),
        (Err(cmd_err), Err(save_err)) => {
            eprintln!("{} {cmd_err:#}", "error:".red().bold());
            Err(save_err)
        }
    }
}

fn report_load(session: &Session<'_>, report: LoadReport) -> Catalog {
    if report.source_missing {
        eprintln!(
            "No data file at '{}'; starting with an empty catalog.",
            session.paths.data_file.display()
        );
    }
    for bad in &report.malformed {
        eprintln!(
            "{} skipped line {} of '{}': {}",
            "warning:".yellow().bold(),
            bad.line_number,
            session.paths.data_file.display(),
            bad.reason
        );
    }
    if !report.malformed.is_empty() {
        eprintln!("Skipped lines are not kept when the catalog is saved.");
    }
    report.catalog
}
