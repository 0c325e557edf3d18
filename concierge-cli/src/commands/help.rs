//! `concierge help` and the bare-invocation usage line.

use anyhow::Result;

use crate::session::Session;

pub fn usage() -> String {
    "Usage: concierge [help | list | add | remove | edit | score | backup]".to_owned()
}

pub fn manual() -> String {
    let mut out = String::new();
    out.push_str("\n[ Activity Concierge Manual ]\n\n\n");
    out.push_str("Syntax:\n\t- <command> <required arguments> [optional arguments]\n\n\n");
    out.push_str("Activity Object:\n\n");
    out.push_str("\t- <name>\t\tthe name of the activity (case-insensitive, stored uppercase)\n");
    out.push_str("\t- [description]\t\ta description of the activity\n");
    out.push_str("\t- [tags]\t\ta comma-separated list of alphanumeric tags\n");
    out.push_str("\t- [ease]\t\tthe ease score of the activity [0,10]\n");
    out.push_str("\t- [reward]\t\tthe reward score of the activity [0,10]\n\n");
    out.push_str("\tNames and descriptions may not contain : [ ] ( ) or line breaks.\n\n\n");
    out.push_str("Command Usage:\n\n");
    out.push_str("\t- help\n");
    out.push_str("\t- list [--json]\n");
    out.push_str("\t- add <name> [description] [tags] [ease] [reward]\n");
    out.push_str("\t- remove <name>\n");
    out.push_str("\t- edit <name> [--description D] [--tags T] [--ease E] [--reward R]\n");
    out.push_str("\t- score <name>\n");
    out.push_str("\t- backup [--list]\n\n\n");
    out.push_str("Command Descriptions:\n\n");
    out.push_str("\t- help\t\tdisplays what you're currently reading\n");
    out.push_str("\t- list\t\tlists all activities, highest composite score first\n");
    out.push_str("\t- add\t\tadds a new activity; unset fields default to empty / 0\n");
    out.push_str("\t- remove\tremoves an activity\n");
    out.push_str("\t- edit\t\tchanges the given fields of an activity;\n");
    out.push_str("\t\t\twithout flags, prompts for each field (Enter keeps the current value)\n");
    out.push_str("\t- score\t\tdisplays the composite score (ease + reward) of an activity\n");
    out.push_str("\t- backup\tcopies the data file to a timestamped file in the backup directory\n\n\n");
    out
}

pub fn run(session: &Session<'_>) -> Result<()> {
    session.audit.record("User requested help menu.");
    println!("{}", manual());
    Ok(())
}
