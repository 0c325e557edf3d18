//! `concierge add <name> [description] [tags] [ease] [reward]`

use anyhow::{Context, Result};
use clap::Args;

use concierge_core::{Catalog, NewActivity};

use super::split_tags;
use crate::session::Session;

/// Arguments for `concierge add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Activity name; stored uppercase.
    pub name: String,

    /// Free-text description.
    pub description: Option<String>,

    /// Comma-separated tags, e.g. "Outdoor,Cardio".
    pub tags: Option<String>,

    /// Ease score, 0-10. Defaults to 0.
    #[arg(allow_negative_numbers = true)]
    pub ease: Option<i64>,

    /// Reward score, 0-10. Defaults to 0.
    #[arg(allow_negative_numbers = true)]
    pub reward: Option<i64>,
}

impl AddArgs {
    pub fn run(self, catalog: &mut Catalog, session: &Session<'_>) -> Result<()> {
        let new = self.to_new_activity();
        session.audit.record(&format!("Adding activity '{}'...", new.name));
        if new.uses_defaults() {
            session.warn(&format!("Using default values for activity '{}'", new.name));
        }

        let added = catalog
            .add(new)
            .with_context(|| format!("failed to add activity '{}'", self.name))?;
        let name = self.name.trim().to_uppercase();
        if added {
            session.say(&format!("\tAdded activity '{name}'."));
        } else {
            session.say(&format!("\tActivity '{name}' already exists."));
        }
        Ok(())
    }

    fn to_new_activity(&self) -> NewActivity {
        NewActivity {
            name: self.name.clone(),
            description: self.description.clone(),
            tags: self.tags.as_deref().map(split_tags).unwrap_or_default(),
            ease: self.ease,
            reward: self.reward,
        }
    }
}
