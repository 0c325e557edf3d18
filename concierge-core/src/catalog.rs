//! In-memory activity catalog.
//!
//! Insertion order is preserved and names are unique after normalization.
//! The catalog owns the [`TagRegistry`] for its activities, so tag
//! back-references stay in step with add, edit and remove.

use crate::error::ModelError;
use crate::tags::{Tag, TagRegistry};
use crate::types::{validate_description, Activity, ActivityEdit, ActivityName, NewActivity, Score};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    activities: Vec<Activity>,
    tags: TagRegistry,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.activities.iter()
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Look up an activity by name, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&Activity> {
        let key = ActivityName::parse(name).ok()?;
        self.activities.iter().find(|a| *a.name() == key)
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = ActivityName::parse(name).ok()?;
        self.activities.iter().position(|a| *a.name() == key)
    }

    /// Build and append a new activity.
    ///
    /// Returns `Ok(false)` and leaves the catalog unchanged when an activity
    /// with the same normalized name exists. Validation failures propagate.
    pub fn add(&mut self, new: NewActivity) -> Result<bool, ModelError> {
        let name = ActivityName::parse(&new.name)?;
        if self.position(name.as_str()).is_some() {
            tracing::debug!(activity = %name, "add skipped: already exists");
            return Ok(false);
        }

        let tags = parse_tags(&new.tags)?;
        let activity = Activity::new(
            &new.name,
            new.description.as_deref().unwrap_or_default(),
            tags,
            new.ease.unwrap_or(0),
            new.reward.unwrap_or(0),
        )?;
        self.insert(activity);
        tracing::debug!(activity = %name, "added activity");
        Ok(true)
    }

    /// Append an already-built activity, registering its tags.
    ///
    /// Returns `false` when the name is already taken.
    pub fn insert(&mut self, activity: Activity) -> bool {
        if self.position(activity.name().as_str()).is_some() {
            return false;
        }
        self.link_tags(&activity);
        self.activities.push(activity);
        true
    }

    /// Remove by name, preserving the order of the remaining activities.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(idx) = self.position(name) else {
            return false;
        };
        let removed = self.activities.remove(idx);
        self.tags.detach_all(removed.name());
        tracing::debug!(activity = %removed.name(), "removed activity");
        true
    }

    /// Apply the supplied fields of `edit` to the named activity.
    ///
    /// Returns `Ok(false)` when no such activity exists. Every supplied value
    /// is validated before anything changes, so a failed edit is a no-op.
    pub fn edit(&mut self, name: &str, edit: ActivityEdit) -> Result<bool, ModelError> {
        let Some(idx) = self.position(name) else {
            return Ok(false);
        };

        let ease = edit.ease.map(|v| Score::new("ease", v)).transpose()?;
        let reward = edit.reward.map(|v| Score::new("reward", v)).transpose()?;
        if let Some(description) = &edit.description {
            validate_description(description)?;
        }
        let tags = edit.tags.as_deref().map(parse_tags).transpose()?;

        let activity = &mut self.activities[idx];
        if let Some(description) = edit.description {
            activity.set_description(description);
        }
        if let Some(ease) = ease {
            activity.set_ease(ease);
        }
        if let Some(reward) = reward {
            activity.set_reward(reward);
        }
        if let Some(tags) = tags {
            activity.set_tags(tags);
            let activity = activity.clone();
            self.tags.detach_all(activity.name());
            self.link_tags(&activity);
        }
        tracing::debug!(activity = %self.activities[idx].name(), "edited activity");
        Ok(true)
    }

    /// Composite score of the named activity.
    pub fn score(&self, name: &str) -> Option<u8> {
        self.find(name).map(Activity::score)
    }

    /// Activities ordered by composite score, highest first.
    /// Ties keep insertion order.
    pub fn ranked(&self) -> Vec<&Activity> {
        let mut ranked: Vec<&Activity> = self.activities.iter().collect();
        ranked.sort_by(|a, b| b.score().cmp(&a.score()));
        ranked
    }

    fn link_tags(&mut self, activity: &Activity) {
        for tag in activity.tags() {
            self.tags.attach(tag, activity.name());
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn parse_tags(raw: &[String]) -> Result<Vec<Tag>, ModelError> {
    raw.iter().map(|t| Tag::parse(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> NewActivity {
        NewActivity::named("Run")
            .description("Morning jog")
            .tags(["Outdoor", "Cardio"])
            .ease(7)
            .reward(4)
    }

    #[test]
    fn add_scenario_produces_canonical_record() {
        let mut catalog = Catalog::new();
        assert!(catalog.add(run()).unwrap());
        assert_eq!(catalog.len(), 1);
        let a = catalog.find("run").unwrap();
        assert_eq!(a.serialize(), "RUN:Morning jog:[OUTDOOR,CARDIO]:(7:4)");
        assert_eq!(a.score(), 11);
    }

    #[test]
    fn add_rejects_duplicate_names_case_insensitively() {
        let mut catalog = Catalog::new();
        catalog.add(run()).unwrap();
        let dup = NewActivity::named("rUn").description("other").ease(1);
        assert!(!catalog.add(dup).unwrap());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("RUN").unwrap().description(), "Morning jog");
    }

    #[test]
    fn add_uses_defaults() {
        let mut catalog = Catalog::new();
        catalog.add(NewActivity::named("nap")).unwrap();
        assert_eq!(catalog.find("nap").unwrap().serialize(), "NAP::[]:(0:0)");
    }

    #[test]
    fn add_propagates_validation_errors() {
        let mut catalog = Catalog::new();
        let err = catalog.add(NewActivity::named("x").ease(11)).unwrap_err();
        assert!(matches!(err, ModelError::InvalidScore { .. }));
        let err = catalog
            .add(NewActivity::named("x").tags(["two words"]))
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidTag { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn add_registers_tag_back_references() {
        let mut catalog = Catalog::new();
        catalog.add(run()).unwrap();
        let cardio = Tag::parse("cardio").unwrap();
        let names: Vec<_> = catalog
            .tags()
            .activities_for(&cardio)
            .into_iter()
            .map(|n| n.as_str().to_owned())
            .collect();
        assert_eq!(names, vec!["RUN"]);
    }

    #[test]
    fn remove_twice() {
        let mut catalog = Catalog::new();
        catalog.add(run()).unwrap();
        assert!(catalog.remove("Run"));
        assert!(catalog.is_empty());
        assert!(!catalog.remove("Run"));
    }

    #[test]
    fn remove_preserves_order_and_drops_back_references() {
        let mut catalog = Catalog::new();
        for name in ["a", "b", "c"] {
            catalog
                .add(NewActivity::named(name).tags(["shared"]))
                .unwrap();
        }
        assert!(catalog.remove("b"));
        let names: Vec<_> = catalog.iter().map(|a| a.name().as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        let shared = Tag::parse("shared").unwrap();
        assert_eq!(catalog.tags().activities_for(&shared).len(), 2);
    }

    #[test]
    fn edit_replaces_only_supplied_fields() {
        let mut catalog = Catalog::new();
        catalog.add(run()).unwrap();
        catalog.add(NewActivity::named("swim")).unwrap();
        let edit = ActivityEdit {
            reward: Some(9),
            ..ActivityEdit::default()
        };
        assert!(catalog.edit("run", edit).unwrap());
        let a = catalog.find("RUN").unwrap();
        assert_eq!(a.serialize(), "RUN:Morning jog:[OUTDOOR,CARDIO]:(7:9)");
        assert_eq!(catalog.iter().next().unwrap().name().as_str(), "RUN");
    }

    #[test]
    fn edit_replaces_tags_and_back_references() {
        let mut catalog = Catalog::new();
        catalog.add(run()).unwrap();
        let edit = ActivityEdit {
            tags: Some(vec!["Indoor".to_owned()]),
            ..ActivityEdit::default()
        };
        catalog.edit("run", edit).unwrap();
        assert_eq!(catalog.find("run").unwrap().tags_joined(), "INDOOR");
        let outdoor = Tag::parse("outdoor").unwrap();
        assert!(catalog.tags().activities_for(&outdoor).is_empty());
        assert!(catalog.tags().contains(&outdoor));
    }

    #[test]
    fn failed_edit_changes_nothing() {
        let mut catalog = Catalog::new();
        catalog.add(run()).unwrap();
        let edit = ActivityEdit {
            description: Some("new".to_owned()),
            reward: Some(-1),
            ..ActivityEdit::default()
        };
        assert!(catalog.edit("run", edit).is_err());
        assert_eq!(catalog.find("run").unwrap().description(), "Morning jog");
    }

    #[test]
    fn edit_missing_returns_false() {
        let mut catalog = Catalog::new();
        assert!(!catalog.edit("ghost", ActivityEdit::default()).unwrap());
    }

    #[test]
    fn ranked_sorts_by_score_with_stable_ties() {
        let mut catalog = Catalog::new();
        catalog.add(NewActivity::named("low").ease(1).reward(1)).unwrap();
        catalog.add(NewActivity::named("tie1").ease(5).reward(0)).unwrap();
        catalog.add(NewActivity::named("high").ease(9).reward(9)).unwrap();
        catalog.add(NewActivity::named("tie2").ease(0).reward(5)).unwrap();
        let order: Vec<_> = catalog.ranked().iter().map(|a| a.name().as_str()).collect();
        assert_eq!(order, vec!["HIGH", "TIE1", "TIE2", "LOW"]);
        assert_eq!(catalog.score("high"), Some(18));
        assert_eq!(catalog.score("ghost"), None);
    }
}
