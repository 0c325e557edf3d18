//! Tags and the tag registry.
//!
//! A [`Tag`] is a validated, uppercase, alphanumeric label. The
//! [`TagRegistry`] owns the set of known tags for one catalog and an index
//! from each tag to the activities that carry it. Activities hold plain
//! [`Tag`] values; the registry index is the only back-reference.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::error::ModelError;
use crate::types::ActivityName;

/// A normalized tag label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Validate and normalize `raw` without registering it anywhere.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if raw.is_empty() {
            return Err(invalid(raw, "tag name cannot be empty"));
        }
        if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid(raw, "tag name must be alphanumeric"));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn invalid(raw: &str, reason: &str) -> ModelError {
    ModelError::InvalidTag {
        name: raw.to_owned(),
        reason: reason.to_owned(),
    }
}

/// Known tags plus the tag → activity back-reference index.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    index: BTreeMap<Tag, BTreeSet<ActivityName>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a brand-new tag on its own, without attaching it.
    ///
    /// Catalog operations go through [`Tag::parse`] and [`attach`](Self::attach),
    /// which register a tag on first use. Fails with [`ModelError::InvalidTag`] when the name is invalid or
    /// already registered (compared after normalization).
    pub fn create(&mut self, raw: &str) -> Result<Tag, ModelError> {
        let tag = Tag::parse(raw)?;
        if self.index.contains_key(&tag) {
            return Err(invalid(raw, "tag name must be unique"));
        }
        self.index.insert(tag.clone(), BTreeSet::new());
        Ok(tag)
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.index.contains_key(tag)
    }

    /// Record that `activity` carries `tag`.
    ///
    /// Returns `true` when the link is new, `false` when it already existed.
    pub fn attach(&mut self, tag: &Tag, activity: &ActivityName) -> bool {
        self.index
            .entry(tag.clone())
            .or_default()
            .insert(activity.clone())
    }

    /// Drop every back-reference to `activity`. Tags stay registered.
    pub fn detach_all(&mut self, activity: &ActivityName) {
        for names in self.index.values_mut() {
            names.remove(activity);
        }
    }

    /// Activities currently carrying `tag`, in name order.
    pub fn activities_for(&self, tag: &Tag) -> Vec<&ActivityName> {
        self.index
            .get(tag)
            .map(|names| names.iter().collect())
            .unwrap_or_default()
    }

    /// All registered tags, in name order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.index.keys()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
