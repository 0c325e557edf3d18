//! Domain types for the activity catalog.
//!
//! Names and descriptions are validated on construction so that every
//! [`Activity`] can be written as a single record line and read back
//! unchanged. See [`crate::codec`] for the line format.

use std::fmt;

use serde::Serialize;

use crate::error::ModelError;
use crate::tags::Tag;

/// Characters that delimit fields in a record line.
pub const RESERVED_CHARS: [char; 5] = [':', '[', ']', '(', ')'];

fn reserved_reason(s: &str) -> Option<String> {
    if let Some(c) = s.chars().find(|c| RESERVED_CHARS.contains(c)) {
        return Some(format!("'{c}' is reserved by the data file format"));
    }
    if s.contains(['\n', '\r']) {
        return Some("line breaks are not allowed".to_owned());
    }
    None
}

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Normalized (uppercase) activity name; the catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ActivityName(String);

impl ActivityName {
    /// Trim, validate and uppercase `raw`.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidName {
                name: raw.to_owned(),
                reason: "name cannot be empty".to_owned(),
            });
        }
        if let Some(reason) = reserved_reason(trimmed) {
            return Err(ModelError::InvalidName {
                name: raw.to_owned(),
                reason,
            });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An ease or reward score in `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;

    /// `field` names the score in the error (`"ease"` or `"reward"`).
    pub fn new(field: &'static str, value: i64) -> Result<Self, ModelError> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            return Err(ModelError::InvalidScore { field, value });
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

/// A user-defined activity.
///
/// Equality follows the catalog key: two activities are equal iff their
/// normalized names match.
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    name: ActivityName,
    description: String,
    tags: Vec<Tag>,
    ease: Score,
    reward: Score,
}

impl Activity {
    /// Build a validated activity. Duplicate tags collapse to one entry.
    pub fn new(
        name: &str,
        description: &str,
        tags: Vec<Tag>,
        ease: i64,
        reward: i64,
    ) -> Result<Self, ModelError> {
        let ease = Score::new("ease", ease)?;
        let reward = Score::new("reward", reward)?;
        let name = ActivityName::parse(name)?;
        validate_description(description)?;

        let mut activity = Self {
            name,
            description: description.to_owned(),
            tags: Vec::with_capacity(tags.len()),
            ease,
            reward,
        };
        for tag in tags {
            activity.attach_tag(tag);
        }
        Ok(activity)
    }

    pub fn name(&self) -> &ActivityName {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn ease(&self) -> Score {
        self.ease
    }

    pub fn reward(&self) -> Score {
        self.reward
    }

    /// Composite score: `reward + ease`.
    ///
    /// Placeholder formula; both inputs are bounded so the sum fits in `u8`.
    pub fn score(&self) -> u8 {
        self.reward.value() + self.ease.value()
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Append `tag` unless already present. Returns `true` when newly added.
    pub fn attach_tag(&mut self, tag: Tag) -> bool {
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Comma-joined tag names, e.g. `OUTDOOR,CARDIO`.
    pub fn tags_joined(&self) -> String {
        self.tags
            .iter()
            .map(Tag::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The record line for this activity (no trailing newline).
    pub fn serialize(&self) -> String {
        crate::codec::serialize(self)
    }

    /// Parse a record line produced by [`Activity::serialize`].
    pub fn deserialize(line: &str) -> Result<Self, ModelError> {
        crate::codec::deserialize(line)
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub(crate) fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags.clear();
        for tag in tags {
            self.attach_tag(tag);
        }
    }

    pub(crate) fn set_ease(&mut self, ease: Score) {
        self.ease = ease;
    }

    pub(crate) fn set_reward(&mut self, reward: Score) {
        self.reward = reward;
    }
}

impl PartialEq for Activity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Activity {}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

pub(crate) fn validate_description(description: &str) -> Result<(), ModelError> {
    match reserved_reason(description) {
        Some(reason) => Err(ModelError::InvalidDescription { reason }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Catalog inputs
// ---------------------------------------------------------------------------

/// Input for [`Catalog::add`](crate::catalog::Catalog::add).
///
/// Unset fields fall back to an empty description, no tags and zero scores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewActivity {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub ease: Option<i64>,
    pub reward: Option<i64>,
}

impl NewActivity {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn ease(mut self, ease: i64) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn reward(mut self, reward: i64) -> Self {
        self.reward = Some(reward);
        self
    }

    /// True when any optional field was left to its default.
    pub fn uses_defaults(&self) -> bool {
        self.description.is_none() || self.ease.is_none() || self.reward.is_none()
    }
}

/// Replacement values for [`Catalog::edit`](crate::catalog::Catalog::edit).
///
/// `None` keeps the current value. There is no name field: the name is the
/// catalog key and cannot be edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityEdit {
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ease: Option<i64>,
    pub reward: Option<i64>,
}

impl ActivityEdit {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.tags.is_none()
            && self.ease.is_none()
            && self.reward.is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> Tag {
        Tag::parse(s).unwrap()
    }

    #[test]
    fn score_bounds_are_inclusive() {
        assert!(Activity::new("a", "", vec![], 0, 0).is_ok());
        assert!(Activity::new("a", "", vec![], 10, 10).is_ok());
    }

    #[test]
    fn out_of_range_scores_are_rejected() {
        let err = Activity::new("a", "", vec![], 11, 0).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidScore {
                field: "ease",
                value: 11
            }
        );
        let err = Activity::new("a", "", vec![], 0, -1).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidScore {
                field: "reward",
                value: -1
            }
        );
    }

    #[test]
    fn name_is_normalized_and_used_for_equality() {
        let a = Activity::new("Run", "Morning jog", vec![], 7, 4).unwrap();
        let b = Activity::new("RUN", "different", vec![], 1, 1).unwrap();
        assert_eq!(a.name().as_str(), "RUN");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "RUN");
    }

    #[test]
    fn reserved_characters_are_rejected() {
        assert!(matches!(
            ActivityName::parse("a:b"),
            Err(ModelError::InvalidName { .. })
        ));
        assert!(matches!(
            ActivityName::parse("   "),
            Err(ModelError::InvalidName { .. })
        ));
        for desc in ["half: marathon", "see [notes]", "(maybe)", "two\nlines"] {
            assert!(
                matches!(
                    Activity::new("a", desc, vec![], 1, 1),
                    Err(ModelError::InvalidDescription { .. })
                ),
                "{desc:?}"
            );
        }
    }

    #[test]
    fn score_is_sum_of_ease_and_reward() {
        let a = Activity::new("run", "", vec![], 7, 4).unwrap();
        assert_eq!(a.score(), 11);
    }

    #[test]
    fn attach_tag_is_idempotent() {
        let mut a = Activity::new("run", "", vec![tag("cardio")], 1, 1).unwrap();
        assert!(!a.attach_tag(tag("CARDIO")));
        assert!(a.attach_tag(tag("outdoor")));
        assert_eq!(a.tags_joined(), "CARDIO,OUTDOOR");
    }

    #[test]
    fn duplicate_constructor_tags_collapse() {
        let a = Activity::new("run", "", vec![tag("x"), tag("X")], 1, 1).unwrap();
        assert_eq!(a.tags().len(), 1);
    }

    #[test]
    fn new_activity_builder_tracks_defaults() {
        let full = NewActivity::named("run")
            .description("d")
            .tags(["a"])
            .ease(1)
            .reward(2);
        assert!(!full.uses_defaults());
        assert!(NewActivity::named("run").uses_defaults());
    }

    #[test]
    fn empty_edit_is_detected() {
        assert!(ActivityEdit::default().is_empty());
        let edit = ActivityEdit {
            ease: Some(3),
            ..ActivityEdit::default()
        };
        assert!(!edit.is_empty());
    }
}
