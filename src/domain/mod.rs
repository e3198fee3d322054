//! Domain models for prdtree
//!
//! Plain data types shared by the compiler and the layers around it.
//! Nothing here performs I/O.

mod id;
mod section;
mod task;
mod report;

pub use id::{DocumentId, SectionId, IdError};
pub use section::{EntityBundle, EntitySet, Section};
pub use task::{PreOrder, Priority, RiskLevel, TaskMetadata, TaskNode, TaskStatus};
pub use report::{EntityStats, ProcessingMetadata, ProcessingReport};
