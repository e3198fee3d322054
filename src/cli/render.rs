//! Text rendering for task trees and report summaries

use std::fmt::Write;

use crate::domain::{EntityBundle, EntitySet, ProcessingReport, TaskNode};

/// Renders a task forest as an ASCII tree
///
/// Example output:
/// ```text
/// Checkout [d-1a2b3c4.1]
/// ├── Payment [d-1a2b3c4.2]  actors: user  systems: api
/// │   └── Card Input [d-1a2b3c4.3]
/// └── Refunds [d-1a2b3c4.4]
/// ```
pub fn render_tree(nodes: &[TaskNode]) -> String {
    let mut output = String::new();
    for node in nodes {
        render_node(&mut output, node, "", true, true);
    }
    output
}

fn render_node(output: &mut String, node: &TaskNode, prefix: &str, is_last: bool, is_root: bool) {
    if !is_root {
        let branch = if is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(branch);
    }

    let _ = write!(output, "{} [{}]", node.title, node.id);
    let entities = entity_summary(&node.entities);
    if !entities.is_empty() {
        output.push_str("  ");
        output.push_str(&entities);
    }
    output.push('\n');

    let child_prefix = if is_root {
        String::new()
    } else {
        let continuation = if is_last { "    " } else { "│   " };
        format!("{}{}", prefix, continuation)
    };

    for (i, child) in node.sub_tasks.iter().enumerate() {
        let child_is_last = i == node.sub_tasks.len() - 1;
        render_node(output, child, &child_prefix, child_is_last, false);
    }
}

fn join(set: &EntitySet) -> String {
    set.iter().collect::<Vec<_>>().join(", ")
}

/// One-line `label: a, b` listing of the non-empty categories
fn entity_summary(entities: &EntityBundle) -> String {
    [
        ("actors", &entities.actors),
        ("systems", &entities.systems),
        ("features", &entities.features),
    ]
    .iter()
    .filter(|(_, set)| !set.is_empty())
    .map(|(label, set)| format!("{}: {}", label, join(set)))
    .collect::<Vec<_>>()
    .join("  ")
}

/// Renders totals, level distribution and entity statistics
pub fn render_summary(report: &ProcessingReport) -> String {
    let mut output = String::new();
    let stats = &report.entity_stats;

    let _ = writeln!(output, "Document:  {}", report.document_id);
    let _ = writeln!(output, "Tasks:     {}", report.total_tasks);

    let levels = report
        .level_distribution
        .iter()
        .map(|(level, count)| format!("H{}={}", level, count))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(output, "Levels:    {}", if levels.is_empty() { "-" } else { levels.as_str() });

    for (label, total, unique) in [
        ("Actors", stats.total_actors, &stats.unique_actors),
        ("Systems", stats.total_systems, &stats.unique_systems),
        ("Features", stats.total_features, &stats.unique_features),
    ] {
        let _ = write!(output, "{:<10} {}", format!("{}:", label), total);
        if !unique.is_empty() {
            let _ = write!(output, " ({})", join(unique));
        }
        output.push('\n');
    }

    let meta = &report.processing_metadata;
    let _ = writeln!(
        output,
        "Input:     {} chars in {} ms",
        meta.input_size, meta.processing_duration
    );

    output
}

/// Renders one task with its details and subtree
pub fn render_task(node: &TaskNode) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{} [{}]", node.title, node.id);
    let _ = writeln!(output, "  level:    {}", node.level);
    let _ = writeln!(output, "  status:   {}", node.status);
    let _ = writeln!(output, "  priority: {}", node.metadata.priority);
    let _ = writeln!(output, "  risk:     {}", node.metadata.risk_level);

    let entities = entity_summary(&node.entities);
    if !entities.is_empty() {
        let _ = writeln!(output, "  {}", entities);
    }

    if !node.content.is_empty() {
        output.push('\n');
        for line in node.content.lines() {
            let _ = writeln!(output, "  {}", line);
        }
    }

    if !node.is_leaf() {
        output.push('\n');
        output.push_str(&render_tree(std::slice::from_ref(node)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::process_str;

    #[test]
    fn renders_nested_branches() {
        let report = process_str("# A\n## B\n### C\n## D\n# E");
        let id = |i: usize| report.sections[i].id.to_string();

        let expected = format!(
            "A [{}]\n├── B [{}]\n│   └── C [{}]\n└── D [{}]\nE [{}]\n",
            id(0),
            id(1),
            id(2),
            id(3),
            id(4)
        );
        assert_eq!(render_tree(&report.task_tree), expected);
    }

    #[test]
    fn annotates_entities() {
        let report = process_str("# Login\nThe user calls the API");
        let rendered = render_tree(&report.task_tree);

        assert!(rendered.contains("actors: user"));
        assert!(rendered.contains("systems: api"));
        assert!(!rendered.contains("features:"));
    }

    #[test]
    fn summary_lists_levels_and_uniques() {
        let report = process_str("# A\nuser\n## B\nuser admin\n## C");
        let summary = render_summary(&report);

        assert!(summary.contains("Tasks:     3"));
        assert!(summary.contains("H1=1 H2=2"));
        assert!(summary.contains("Actors:    3 (user, admin)"));
    }

    #[test]
    fn summary_of_empty_report() {
        let summary = render_summary(&process_str(""));
        assert!(summary.contains("Tasks:     0"));
        assert!(summary.contains("Levels:    -"));
    }

    #[test]
    fn task_details_include_content_and_children() {
        let report = process_str("# Parent\nsome body\n## Child");
        let rendered = render_task(&report.task_tree[0]);

        assert!(rendered.contains("status:   pending"));
        assert!(rendered.contains("priority: medium"));
        assert!(rendered.contains("  some body"));
        assert!(rendered.contains("└── Child"));
    }
}
