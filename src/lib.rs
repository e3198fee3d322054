//! prdtree - compile product requirement documents into task trees
//!
//! A document is split into heading-delimited sections, each section is
//! scanned for actors, systems and features, and the sections are nested by
//! heading depth into a forest of tasks with aggregate statistics.
//!
//! ```
//! let report = prdtree::process(Some("# Checkout\nThe user pays.\n## Refunds"));
//!
//! assert_eq!(report.total_tasks, 2);
//! assert_eq!(report.task_tree[0].sub_tasks[0].title, "Refunds");
//! assert_eq!(report.entity_stats.unique_actors.as_slice(), &["user"]);
//! ```

pub mod domain;
pub mod compiler;
pub mod storage;
pub mod cli;

pub use compiler::{process, process_str};
pub use domain::{
    DocumentId, EntityBundle, EntityStats, ProcessingReport, Section, SectionId, TaskNode,
    TaskStatus,
};
