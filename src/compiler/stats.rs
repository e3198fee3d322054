//! Statistics over a compiled forest

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{EntityStats, PreOrder, ProcessingMetadata, TaskNode};

/// Numeric portion of a processing report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total_tasks: usize,
    pub level_distribution: BTreeMap<usize, usize>,
    pub entity_stats: EntityStats,
    pub processing_metadata: ProcessingMetadata,
}

/// Counts nodes per heading level; absent levels are omitted
pub fn level_distribution(forest: &[TaskNode]) -> BTreeMap<usize, usize> {
    let mut distribution = BTreeMap::new();
    for node in PreOrder::new(forest) {
        *distribution.entry(node.level).or_insert(0) += 1;
    }
    distribution
}

/// Sums per-node entity counts and collects document-wide unique sets
pub fn entity_stats(forest: &[TaskNode]) -> EntityStats {
    let mut stats = EntityStats::default();

    for node in PreOrder::new(forest) {
        let entities = &node.entities;

        stats.total_actors += entities.actors.len();
        stats.total_systems += entities.systems.len();
        stats.total_features += entities.features.len();

        stats.unique_actors.extend_from(&entities.actors);
        stats.unique_systems.extend_from(&entities.systems);
        stats.unique_features.extend_from(&entities.features);
    }

    stats
}

/// Aggregates the forest into report statistics
///
/// `raw_text` is the input exactly as received; `start_time` is when the
/// compilation began. The end time is taken after aggregation finishes.
pub fn aggregate(forest: &[TaskNode], raw_text: &str, start_time: DateTime<Utc>) -> Statistics {
    let total_tasks = PreOrder::new(forest).count();
    let level_distribution = level_distribution(forest);
    let entity_stats = entity_stats(forest);

    let end_time = Utc::now();
    let processing_metadata = ProcessingMetadata {
        start_time,
        end_time,
        processing_duration: (end_time - start_time).num_milliseconds(),
        input_size: raw_text.chars().count(),
    };

    Statistics {
        total_tasks,
        level_distribution,
        entity_stats,
        processing_metadata,
    }
}
