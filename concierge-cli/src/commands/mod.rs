//! One module per subcommand.

pub mod add;
pub mod backup;
pub mod edit;
pub mod help;
pub mod list;
pub mod remove;
pub mod score;

use anyhow::Result;

use concierge_core::Catalog;

use crate::session::Session;
use crate::Commands;

pub fn dispatch(command: Commands, catalog: &mut Catalog, session: &Session<'_>) -> Result<()> {
    match command {
        Commands::Help => help::run(session),
        Commands::List(args) => args.run(catalog, session),
        Commands::Add(args) => args.run(catalog, session),
        Commands::Remove(args) => args.run(catalog, session),
        Commands::Edit(args) => args.run(catalog, session),
        Commands::Score(args) => args.run(catalog, session),
        Commands::Backup(args) => args.run(session),
    }
}

/// Split a comma-separated tag argument, ignoring blanks.
pub(crate) fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tags_trims_and_skips_blanks() {
        assert_eq!(split_tags("Outdoor, Cardio,,"), vec!["Outdoor", "Cardio"]);
        assert!(split_tags("").is_empty());
    }
}
