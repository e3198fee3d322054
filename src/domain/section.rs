//! Section domain model
//!
//! A section is one heading-delimited span of a document. Its entities are
//! attached after detection, once the extractor has run over its content.

use serde::{Deserialize, Serialize};

use super::id::SectionId;

/// Ordered, duplicate-free set of lower-cased entity names
///
/// Keeps first-insertion order. Entity vocabularies are small, so a linear
/// membership check beats hashing here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntitySet(Vec<String>);

impl EntitySet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts a value (lower-cased), returning false if it was already present
    pub fn insert(&mut self, value: &str) -> bool {
        let value = value.to_lowercase();
        if self.0.contains(&value) {
            false
        } else {
            self.0.push(value);
            true
        }
    }

    /// Merges another set into this one, keeping this set's order first
    pub fn extend_from(&mut self, other: &EntitySet) {
        for value in other.iter() {
            self.insert(value);
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(&value.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the values in insertion order
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> FromIterator<&'a str> for EntitySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = EntitySet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// Entities recognised in a stretch of text, grouped by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBundle {
    pub actors: EntitySet,
    pub systems: EntitySet,
    pub features: EntitySet,
}

impl EntityBundle {
    /// Returns true if no category has any entity
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty() && self.systems.is_empty() && self.features.is_empty()
    }
}

/// A heading-delimited section of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique identifier within the document
    pub id: SectionId,

    /// Heading text without markers, trimmed
    pub title: String,

    /// Number of heading markers that introduced the section
    pub level: usize,

    /// Body text with blank lines removed
    pub content: String,

    /// Entities found in `content`
    pub entities: EntityBundle,
}

impl Section {
    /// Creates a section with no entities attached yet
    pub fn new(
        id: SectionId,
        title: impl Into<String>,
        level: usize,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            level,
            content: content.into(),
            entities: EntityBundle::default(),
        }
    }

    /// Returns the section with the given entities attached
    pub fn with_entities(self, entities: EntityBundle) -> Self {
        Self { entities, ..self }
    }
}
