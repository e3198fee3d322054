//! Task tree assembly
//!
//! Nests sections by heading level in one linear pass. The stack holds the
//! currently open ancestors; a node is attached to its parent when it is
//! popped, which happens exactly once per node.

use chrono::{DateTime, Utc};

use crate::domain::{Section, TaskNode};

/// Returns true if an open ancestor at `open_level` must be closed before a
/// section at `level` can be placed
pub fn closes_ancestor(open_level: usize, level: usize) -> bool {
    open_level >= level
}

/// Pops the stack top and attaches it to its parent, or to the roots when the
/// stack becomes empty
fn close_top(stack: &mut Vec<TaskNode>, roots: &mut Vec<TaskNode>) {
    if let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.sub_tasks.push(node),
            None => roots.push(node),
        }
    }
}

/// Builds a forest from sections in document order
///
/// Every node is stamped with `now` for both timestamps.
pub fn build_task_tree_at(sections: Vec<Section>, now: DateTime<Utc>) -> Vec<TaskNode> {
    let mut roots: Vec<TaskNode> = Vec::new();
    let mut stack: Vec<TaskNode> = Vec::new();

    for section in sections {
        while stack
            .last()
            .is_some_and(|open| closes_ancestor(open.level, section.level))
        {
            close_top(&mut stack, &mut roots);
        }
        stack.push(TaskNode::at(section, now));
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }

    roots
}

/// Builds a forest from sections, stamping nodes with the current time
pub fn build_task_tree(sections: Vec<Section>) -> Vec<TaskNode> {
    build_task_tree_at(sections, Utc::now())
}

/// Computes, for each position in `levels`, the index of its parent
///
/// Uses the same pop rule as [`build_task_tree`] without building nodes, so the
/// attachment decisions can be inspected directly.
pub fn parent_indices(levels: &[usize]) -> Vec<Option<usize>> {
    let mut stack: Vec<usize> = Vec::new();
    let mut parents = Vec::with_capacity(levels.len());

    for (index, &level) in levels.iter().enumerate() {
        while stack
            .last()
            .is_some_and(|&open| closes_ancestor(levels[open], level))
        {
            stack.pop();
        }
        parents.push(stack.last().copied());
        stack.push(index);
    }

    parents
}
