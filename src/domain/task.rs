//! Task node domain model
//!
//! Task nodes are sections promoted into a tree. Each node owns its subtasks,
//! so a forest is simply `Vec<TaskNode>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::SectionId;
use super::section::{EntityBundle, Section};

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Returns true if this status represents completion
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Returns true if this task is not yet started
    pub fn is_pending(&self) -> bool {
        matches!(self, TaskStatus::Pending)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" | "todo" => Ok(TaskStatus::Pending),
            "in_progress" | "in-progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "completed" | "complete" | "done" => Ok(TaskStatus::Completed),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// Priority of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "normal" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" | "urgent" => Ok(Priority::Critical),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Risk assessment of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

/// Scheduling metadata attached to every task node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    pub priority: Priority,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskMetadata {
    /// Default metadata stamped with the given construction time
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            priority: Priority::default(),
            risk_level: RiskLevel::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A node of the compiled task tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskNode {
    /// Identifier of the section this node was built from
    pub id: SectionId,

    /// Heading text
    pub title: String,

    /// Heading level
    pub level: usize,

    /// Section body
    pub content: String,

    /// Entities found in the section body
    pub entities: EntityBundle,

    /// Current status
    pub status: TaskStatus,

    /// Tasks this one depends on. Never populated by the compiler.
    #[serde(default)]
    pub dependencies: Vec<SectionId>,

    /// Child tasks in document order
    #[serde(default)]
    pub sub_tasks: Vec<TaskNode>,

    pub metadata: TaskMetadata,
}

impl TaskNode {
    /// Creates a leaf node from a section, stamped with the current time
    pub fn new(section: Section) -> Self {
        Self::at(section, Utc::now())
    }

    /// Creates a leaf node from a section with an explicit construction time
    pub fn at(section: Section, now: DateTime<Utc>) -> Self {
        let Section {
            id,
            title,
            level,
            content,
            entities,
        } = section;

        Self {
            id,
            title,
            level,
            content,
            entities,
            status: TaskStatus::Pending,
            dependencies: Vec::new(),
            sub_tasks: Vec::new(),
            metadata: TaskMetadata::at(now),
        }
    }

    /// Returns true if the node has no subtasks
    pub fn is_leaf(&self) -> bool {
        self.sub_tasks.is_empty()
    }

    /// Iterates over this node and all of its descendants in pre-order
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Finds a node by ID in this subtree
    pub fn find(&self, id: &SectionId) -> Option<&TaskNode> {
        self.iter().find(|node| &node.id == id)
    }

    /// Counts this node and all of its descendants
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

/// Pre-order traversal over a forest of task nodes
///
/// Uses an explicit stack, so arbitrarily deep trees cannot overflow the
/// call stack.
pub struct PreOrder<'a> {
    stack: Vec<&'a TaskNode>,
}

impl<'a> PreOrder<'a> {
    /// Starts a traversal over the given roots, in order
    pub fn new(roots: &'a [TaskNode]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TaskNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.sub_tasks.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentId;

    fn make_node(doc: &DocumentId, seq: u64, level: usize) -> TaskNode {
        let section = Section::new(doc.section_id(seq), format!("Task {}", seq), level, "");
        TaskNode::new(section)
    }

    #[test]
    fn new_node_has_defaults() {
        let doc = DocumentId::new("", Utc::now());
        let node = make_node(&doc, 1, 1);

        assert_eq!(node.status, TaskStatus::Pending);
        assert!(node.status.is_pending());
        assert!(node.dependencies.is_empty());
        assert!(node.is_leaf());
        assert_eq!(node.metadata.priority, Priority::Medium);
        assert_eq!(node.metadata.risk_level, RiskLevel::Low);
        assert_eq!(node.metadata.created_at, node.metadata.updated_at);
    }

    #[test]
    fn preorder_visits_parents_before_children() {
        let doc = DocumentId::new("", Utc::now());
        let mut a = make_node(&doc, 1, 1);
        let mut b = make_node(&doc, 2, 2);
        b.sub_tasks.push(make_node(&doc, 3, 3));
        a.sub_tasks.push(b);
        a.sub_tasks.push(make_node(&doc, 4, 2));
        let forest = vec![a, make_node(&doc, 5, 1)];

        let order: Vec<u64> = PreOrder::new(&forest).map(|n| n.id.sequence()).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
        assert_eq!(forest[0].count(), 4);
    }

    #[test]
    fn find_locates_nested_node() {
        let doc = DocumentId::new("", Utc::now());
        let mut root = make_node(&doc, 1, 1);
        root.sub_tasks.push(make_node(&doc, 2, 2));

        assert_eq!(root.find(&doc.section_id(2)).map(|n| n.level), Some(2));
        assert!(root.find(&doc.section_id(9)).is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let doc = DocumentId::new("", Utc::now());
        let node = make_node(&doc, 1, 1);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["status"], "pending");
        assert!(json["subTasks"].as_array().unwrap().is_empty());
        assert_eq!(json["metadata"]["priority"], "medium");
        assert_eq!(json["metadata"]["riskLevel"], "low");
        assert!(json["metadata"]["createdAt"].is_string());
    }

    #[test]
    fn status_parses_aliases() {
        assert_eq!("done".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
        assert_eq!("In-Progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert!("later".parse::<TaskStatus>().is_err());
        assert_eq!("urgent".parse::<Priority>(), Ok(Priority::Critical));
        assert_eq!("HIGH".parse::<RiskLevel>(), Ok(RiskLevel::High));
    }
}
