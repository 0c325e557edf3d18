//! `concierge edit <name>`
//!
//! Fields given as flags are applied directly. Without flags, each field is
//! prompted for on stdin; an empty answer keeps the current value.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;

use concierge_core::{Activity, ActivityEdit, Catalog};

use super::split_tags;
use crate::session::Session;

/// Arguments for `concierge edit`.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Name of the activity to edit. Names cannot be changed.
    pub name: String,

    /// New description.
    #[arg(long)]
    pub description: Option<String>,

    /// New comma-separated tags; an empty string clears them.
    #[arg(long)]
    pub tags: Option<String>,

    /// New ease score, 0-10.
    #[arg(long, allow_negative_numbers = true)]
    pub ease: Option<i64>,

    /// New reward score, 0-10.
    #[arg(long, allow_negative_numbers = true)]
    pub reward: Option<i64>,
}

impl EditArgs {
    pub fn run(self, catalog: &mut Catalog, session: &Session<'_>) -> Result<()> {
        let Some(activity) = catalog.find(&self.name) else {
            session.say(&format!("Activity '{}' not found.", self.name));
            return Ok(());
        };
        let name = activity.name().to_string();
        session
            .audit
            .record(&format!("User editing activity '{name}'..."));

        let flags = self.to_edit();
        let edit = if flags.is_empty() {
            prompt_edit(activity, &mut io::stdin().lock(), &mut io::stdout().lock())?
        } else {
            flags
        };
        if edit.is_empty() {
            session.say(&format!("No changes for '{name}'."));
            return Ok(());
        }

        catalog
            .edit(&name, edit)
            .with_context(|| format!("failed to edit activity '{name}'"))?;
        session.say(&format!("User edited activity '{name}'."));
        Ok(())
    }

    fn to_edit(&self) -> ActivityEdit {
        ActivityEdit {
            description: self.description.clone(),
            tags: self.tags.as_deref().map(split_tags),
            ease: self.ease,
            reward: self.reward,
        }
    }
}

/// Ask for each field in turn, showing the current value.
pub(crate) fn prompt_edit<R: BufRead, W: Write>(
    activity: &Activity,
    input: &mut R,
    output: &mut W,
) -> Result<ActivityEdit> {
    writeln!(
        output,
        "Enter new values for each attribute. Press Enter to keep the current value."
    )?;
    let description = ask(
        input,
        output,
        &format!("Description [{}]: ", activity.description()),
    )?;
    let tags = ask(input, output, &format!("Tags [{}]: ", activity.tags_joined()))?
        .map(|raw| split_tags(&raw));
    let ease = ask(input, output, &format!("Ease [{}]: ", activity.ease()))?
        .map(|raw| parse_score("ease", &raw))
        .transpose()?;
    let reward = ask(input, output, &format!("Reward [{}]: ", activity.reward()))?
        .map(|raw| parse_score("reward", &raw))
        .transpose()?;

    Ok(ActivityEdit {
        description,
        tags,
        ease,
        reward,
    })
}

/// `None` for an empty answer or end of input. Surrounding quotes are stripped.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read input")? == 0 {
        return Ok(None);
    }
    let answer = line.trim().trim_matches(|c| c == '\'' || c == '"');
    Ok((!answer.is_empty()).then(|| answer.to_owned()))
}

fn parse_score(field: &str, raw: &str) -> Result<i64> {
    raw.parse()
        .with_context(|| format!("{field} must be an integer, got '{raw}'"))
}
