//! `concierge remove <name>`

use anyhow::Result;
use clap::Args;

use concierge_core::Catalog;

use crate::session::Session;

/// Arguments for `concierge remove`.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Name of the activity to remove.
    pub name: String,
}

impl RemoveArgs {
    pub fn run(self, catalog: &mut Catalog, session: &Session<'_>) -> Result<()> {
        session
            .audit
            .record(&format!("Removing activity '{}'...", self.name));
        if catalog.remove(&self.name) {
            let name = self.name.trim().to_uppercase();
            session.say(&format!("\tRemoved activity '{name}'."));
        } else {
            session.say(&format!("\tActivity '{}' not found.", self.name));
        }
        Ok(())
    }
}
