//! `concierge score <name>`

use anyhow::Result;
use clap::Args;

use concierge_core::Catalog;

use crate::session::Session;

/// Arguments for `concierge score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Name of the activity to score.
    pub name: String,
}

impl ScoreArgs {
    pub fn run(self, catalog: &Catalog, session: &Session<'_>) -> Result<()> {
        let Some(activity) = catalog.find(&self.name) else {
            session.say(&format!("Activity '{}' not found.", self.name));
            return Ok(());
        };
        session.audit.record(&format!(
            "Scored activity '{}' with ease {} and reward {} as {}.",
            activity.name(),
            activity.ease(),
            activity.reward(),
            activity.score()
        ));
        println!("{}: {}", activity.name(), activity.score());
        Ok(())
    }
}
