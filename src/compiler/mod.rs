//! # Document Compiler
//!
//! Turns a requirements document into a task tree in four pure stages:
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Detect | [`sections`] | ordered [`Section`]s |
//! | Extract | [`entities`] | an [`EntityBundle`](crate::domain::EntityBundle) per section |
//! | Nest | [`tree`] | forest of [`TaskNode`](crate::domain::TaskNode) |
//! | Aggregate | [`stats`] | counts, distributions, unique entities |
//!
//! [`process`] runs them in order and never fails: any string, including an
//! absent one, produces a report.

pub mod sections;
pub mod entities;
pub mod tree;
pub mod stats;

use chrono::Utc;

use crate::domain::{DocumentId, ProcessingReport, Section};

pub use entities::{extract_entities, EntityCategory};
pub use sections::detect_sections;
pub use stats::aggregate;
pub use tree::build_task_tree;

/// Compiles a document into a processing report
///
/// `None` is treated as empty text.
pub fn process(raw_text: Option<&str>) -> ProcessingReport {
    let raw_text = raw_text.unwrap_or_default();
    let start_time = Utc::now();
    let document_id = DocumentId::new(raw_text, start_time);

    let sections: Vec<Section> = detect_sections(raw_text, &document_id)
        .into_iter()
        .map(|section| {
            let entities = extract_entities(&section.content);
            section.with_entities(entities)
        })
        .collect();
    tracing::debug!(document = %document_id, sections = sections.len(), "detected sections");

    let task_tree = build_task_tree(sections.clone());
    tracing::debug!(document = %document_id, roots = task_tree.len(), "built task tree");

    let stats = aggregate(&task_tree, raw_text, start_time);
    tracing::debug!(
        document = %document_id,
        total_tasks = stats.total_tasks,
        duration_ms = stats.processing_metadata.processing_duration,
        "aggregated statistics"
    );

    ProcessingReport {
        document_id,
        sections,
        task_tree,
        total_tasks: stats.total_tasks,
        level_distribution: stats.level_distribution,
        entity_stats: stats.entity_stats,
        processing_metadata: stats.processing_metadata,
    }
}

/// Compiles a document that is known to be present
pub fn process_str(raw_text: &str) -> ProcessingReport {
    process(Some(raw_text))
}
