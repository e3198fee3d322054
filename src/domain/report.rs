//! Processing report
//!
//! The single value the compiler hands back to its callers. Persistence and
//! prompt-generation layers consume it as-is.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{DocumentId, SectionId};
use super::section::{EntitySet, Section};
use super::task::{PreOrder, TaskNode};

/// Entity totals and document-wide unique sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStats {
    pub total_actors: usize,
    pub total_systems: usize,
    pub total_features: usize,
    pub unique_actors: EntitySet,
    pub unique_systems: EntitySet,
    pub unique_features: EntitySet,
}

/// Timing and size information for one compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingMetadata {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Milliseconds between `start_time` and `end_time`
    pub processing_duration: i64,

    /// Character count of the raw input, before newline normalization
    pub input_size: usize,
}

/// Result of compiling one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingReport {
    pub document_id: DocumentId,
    pub sections: Vec<Section>,
    pub task_tree: Vec<TaskNode>,
    pub total_tasks: usize,
    pub level_distribution: BTreeMap<usize, usize>,
    pub entity_stats: EntityStats,
    pub processing_metadata: ProcessingMetadata,
}

impl ProcessingReport {
    /// Iterates over every task node in pre-order
    pub fn iter_tasks(&self) -> PreOrder<'_> {
        PreOrder::new(&self.task_tree)
    }

    /// Looks up a task node anywhere in the tree
    pub fn find_task(&self, id: &SectionId) -> Option<&TaskNode> {
        if id.document_id() != &self.document_id {
            return None;
        }
        self.iter_tasks().find(|node| &node.id == id)
    }

    /// Returns true if the document had no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Title of the first root task, if any
    pub fn headline(&self) -> Option<&str> {
        self.task_tree.first().map(|node| node.title.as_str())
    }
}
