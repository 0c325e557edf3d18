//! `concierge list`: all activities, highest composite score first.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use concierge_core::{Activity, Catalog};

use crate::session::Session;

/// Arguments for `concierge list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EASE")]
    ease: u8,
    #[tabled(rename = "REWARD")]
    reward: u8,
    #[tabled(rename = "SCORE")]
    score: u8,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "TAGS")]
    tags: String,
}

#[derive(Serialize)]
struct ActivityJson<'a> {
    #[serde(flatten)]
    activity: &'a Activity,
    score: u8,
}

impl ListArgs {
    pub fn run(self, catalog: &Catalog, session: &Session<'_>) -> Result<()> {
        let ranked = catalog.ranked();
        session
            .audit
            .record(&format!("Listing {} activities.", ranked.len()));

        if self.json {
            let payload: Vec<ActivityJson<'_>> = ranked
                .into_iter()
                .map(|activity| ActivityJson {
                    activity,
                    score: activity.score(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize activities")?
            );
            return Ok(());
        }

        if ranked.is_empty() {
            println!("\nNo activities found.\n");
            return Ok(());
        }
        println!("\n{}\n", render_table(&ranked));
        Ok(())
    }
}

fn render_table(activities: &[&Activity]) -> Table {
    let rows = activities.iter().map(|a| ActivityRow {
        name: a.name().to_string(),
        ease: a.ease().value(),
        reward: a.reward().value(),
        score: a.score(),
        description: a.description().to_owned(),
        tags: a.tags_joined(),
    });
    let mut table = Table::new(rows);
    table
        .with(Style::ascii())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()));
    table
}
