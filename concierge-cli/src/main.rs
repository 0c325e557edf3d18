//! Activity Concierge: track activities with tags, ease and reward scores.
//!
//! # Usage
//!
//! ```text
//! concierge help
//! concierge list [--json]
//! concierge add <name> [description] [tags] [ease] [reward]
//! concierge remove <name>
//! concierge edit <name> [--description ..] [--tags ..] [--ease ..] [--reward ..]
//! concierge score <name>
//! concierge backup [--list]
//! ```
//!
//! Every run loads the data file, performs at most one command, and saves
//! the whole catalog back before exiting.

mod commands;
mod logging;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use commands::{
    add::AddArgs, backup::BackupArgs, edit::EditArgs, list::ListArgs, remove::RemoveArgs,
    score::ScoreArgs,
};
use concierge_core::{paths, ConciergePaths};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "concierge",
    version,
    about = "Keep a scored catalog of activities",
    long_about = None,
    disable_help_subcommand = true,
)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the full manual.
    Help,

    /// List all activities, highest score first.
    List(ListArgs),

    /// Add a new activity.
    Add(AddArgs),

    /// Remove an activity.
    Remove(RemoveArgs),

    /// Edit the attributes of an activity.
    Edit(EditArgs),

    /// Show the composite score of an activity.
    Score(ScoreArgs),

    /// Copy the data file into the backup directory.
    Backup(BackupArgs),
}

// ---------------------------------------------------------------------------
// File locations
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
struct PathArgs {
    /// Directory holding activities.dat, activities.log and backups/.
    #[arg(long, global = true, env = paths::ROOT_ENV, default_value = ".")]
    root: PathBuf,

    /// Data file (overrides <root>/activities.dat).
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Audit log file (overrides <root>/activities.log).
    #[arg(long, global = true, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Backup directory (overrides <root>/backups).
    #[arg(long, global = true, value_name = "DIR")]
    backup_dir: Option<PathBuf>,
}

impl PathArgs {
    fn resolve(self) -> ConciergePaths {
        ConciergePaths::at(&self.root)
            .with_data_file(self.data)
            .with_log_file(self.log)
            .with_backup_dir(self.backup_dir)
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();
    session::run(&cli.paths.resolve(), cli.command)
}
