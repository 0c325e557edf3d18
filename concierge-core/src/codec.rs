//! Record line codec.
//!
//! ```text
//! NAME:DESCRIPTION:[TAG1,TAG2,...]:(EASE:REWARD)
//! ```
//!
//! Parsing works from the right: the `(ease:reward)` group first, then the
//! `[...]` tag group, leaving `name:description` to split on the first colon.
//! Construction rejects the delimiter characters in names and descriptions,
//! so every [`Activity`] encodes to exactly one unambiguous line.

use crate::error::ModelError;
use crate::tags::Tag;
use crate::types::Activity;

/// Encode `activity` as a single record line, without a line terminator.
pub fn serialize(activity: &Activity) -> String {
    format!(
        "{}:{}:[{}]:({}:{})",
        activity.name(),
        activity.description(),
        activity.tags_joined(),
        activity.ease(),
        activity.reward()
    )
}

/// Decode one record line. A trailing `\n` or `\r\n` is ignored.
pub fn deserialize(line: &str) -> Result<Activity, ModelError> {
    let line = line.trim_end_matches(['\r', '\n']);

    let (head, ease, reward) = split_scores(line)?;
    let (head, tags) = split_tags(head)?;
    let (name, description) = head
        .split_once(':')
        .ok_or_else(|| ModelError::malformed("missing ':' between name and description"))?;

    Activity::new(name, description, tags, ease, reward)
        .map_err(|e| ModelError::malformed(e.to_string()))
}

/// `<head>:(<ease>:<reward>)` → `(head, ease, reward)`.
fn split_scores(line: &str) -> Result<(&str, i64, i64), ModelError> {
    let rest = line
        .strip_suffix(')')
        .ok_or_else(|| ModelError::malformed("missing trailing '(ease:reward)' group"))?;
    let open = rest
        .rfind('(')
        .ok_or_else(|| ModelError::malformed("missing '(' before scores"))?;
    let head = rest[..open]
        .strip_suffix(':')
        .ok_or_else(|| ModelError::malformed("missing ':' before scores"))?;

    let (ease, reward) = rest[open + 1..]
        .split_once(':')
        .ok_or_else(|| ModelError::malformed("scores must be written as (ease:reward)"))?;
    Ok((head, parse_score("ease", ease)?, parse_score("reward", reward)?))
}

/// `<head>:[<tags>]` → `(head, tags)`.
fn split_tags(head: &str) -> Result<(&str, Vec<Tag>), ModelError> {
    let rest = head
        .strip_suffix(']')
        .ok_or_else(|| ModelError::malformed("missing '[tags]' group"))?;
    let open = rest
        .rfind('[')
        .ok_or_else(|| ModelError::malformed("missing '[' before tags"))?;
    let head = rest[..open]
        .strip_suffix(':')
        .ok_or_else(|| ModelError::malformed("missing ':' before tags"))?;

    let list = &rest[open + 1..];
    if list.is_empty() {
        return Ok((head, Vec::new()));
    }
    let tags = list
        .split(',')
        .map(|raw| Tag::parse(raw).map_err(|e| ModelError::malformed(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((head, tags))
}

fn parse_score(field: &str, raw: &str) -> Result<i64, ModelError> {
    raw.parse::<i64>()
        .map_err(|_| ModelError::malformed(format!("{field} score '{raw}' is not an integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(name: &str, desc: &str, tags: &[&str], ease: i64, reward: i64) -> Activity {
        let tags = tags.iter().map(|t| Tag::parse(t).unwrap()).collect();
        Activity::new(name, desc, tags, ease, reward).unwrap()
    }

    #[test]
    fn serializes_canonical_form() {
        let a = activity("Run", "Morning jog", &["Outdoor", "Cardio"], 7, 4);
        assert_eq!(serialize(&a), "RUN:Morning jog:[OUTDOOR,CARDIO]:(7:4)");
    }

    #[test]
    fn serializes_empty_tags_as_brackets() {
        let a = activity("read", "", &[], 0, 10);
        assert_eq!(serialize(&a), "READ::[]:(0:10)");
    }

    #[test]
    fn deserializes_zero_tags() {
        let a = deserialize("READ:a book:[]:(3:9)\n").unwrap();
        assert_eq!(a.name().as_str(), "READ");
        assert_eq!(a.description(), "a book");
        assert!(a.tags().is_empty());
        assert_eq!((a.ease().value(), a.reward().value()), (3, 9));
    }

    #[test]
    fn tolerates_crlf() {
        let a = deserialize("SWIM:pool:[SPORT]:(2:8)\r\n").unwrap();
        assert_eq!(a.tags_joined(), "SPORT");
    }

    #[test]
    fn lowercase_fields_are_normalized() {
        let a = deserialize("swim:pool:[sport,water]:(2:8)").unwrap();
        assert_eq!(serialize(&a), "SWIM:pool:[SPORT,WATER]:(2:8)");
    }

    #[test]
    fn rejects_malformed_lines() {
        let cases = [
            "",
            "just some text",
            "RUN:jog:[A]:7:4",
            "RUN:jog:[A]:(7,4)",
            "RUN:jog:[A]:(x:4)",
            "RUN:jog:[A]:(11:4)",
            "RUN:jog:(7:4)",
            "RUN:jog:[A B]:(7:4)",
            "RUN:jog:[A,]:(7:4)",
            "RUN[A]:(7:4)",
            "RUNjog:[A]:(7:4)",
            "RUN:half: marathon:[A]:(7:4)",
        ];
        for line in cases {
            let err = deserialize(line).unwrap_err();
            assert!(
                matches!(err, ModelError::MalformedRecord { .. }),
                "{line:?} gave {err}"
            );
        }
    }

    #[test]
    fn out_of_range_score_reports_field() {
        let err = deserialize("RUN:jog:[]:(7:12)").unwrap_err();
        assert!(err.to_string().contains("reward"), "{err}");
    }
}
