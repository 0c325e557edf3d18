//! `concierge backup [--list]`

use anyhow::{Context, Result};
use clap::Args;

use concierge_core::{store, BackupOutcome};

use crate::session::Session;

/// Arguments for `concierge backup`.
#[derive(Args, Debug)]
pub struct BackupArgs {
    /// List existing backups instead of creating one.
    #[arg(long)]
    pub list: bool,
}

impl BackupArgs {
    pub fn run(self, session: &Session<'_>) -> Result<()> {
        let paths = session.paths;
        if self.list {
            let backups = store::list_backups(&paths.backup_dir).context("failed to list backups")?;
            if backups.is_empty() {
                println!("No backups in '{}'.", paths.backup_dir.display());
            }
            for path in backups {
                println!("{}", path.display());
            }
            return Ok(());
        }

        let report = store::backup(&paths.data_file, &paths.backup_dir, session.audit)
            .with_context(|| format!("failed to back up '{}'", paths.data_file.display()))?;
        match report.outcome {
            BackupOutcome::Copied { bytes } => {
                println!("✓ Backed up {bytes} bytes to '{}'", report.path.display());
            }
            BackupOutcome::SourceMissing => {
                session.warn(&format!(
                    "nothing to back up: '{}' does not exist",
                    paths.data_file.display()
                ));
            }
        }
        Ok(())
    }
}
