//! Commands over saved reports

use anyhow::{Context, Result};

use super::output::Output;
use super::render::render_task;
use crate::domain::SectionId;
use crate::storage::{Config, ReportStore};

fn project_store(config: &Config) -> Result<ReportStore> {
    Ok(ReportStore::for_project(config.require_project_root()?))
}

/// Lists saved reports
pub fn list(output: &Output, config: &Config) -> Result<()> {
    let summaries = project_store(config)?.list()?;

    if !output.is_text() {
        return output.data(&summaries);
    }

    if summaries.is_empty() {
        output.text("No saved reports.");
        return Ok(());
    }

    for summary in &summaries {
        output.text(&format!(
            "{}\t{} tasks\t{}\t{}",
            summary.id,
            summary.total_tasks,
            summary.compiled_at.format("%Y-%m-%d %H:%M"),
            summary.headline.as_deref().unwrap_or("(no sections)")
        ));
    }

    Ok(())
}

/// Shows one saved task node with its subtree
pub fn show(output: &Output, config: &Config, id: &str) -> Result<()> {
    let section_id: SectionId = id
        .parse()
        .with_context(|| format!("Invalid task ID: {}", id))?;

    let node = project_store(config)?
        .find_task(&section_id)?
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", section_id))?;

    if output.is_text() {
        output.text(&render_task(&node));
        Ok(())
    } else {
        output.data(&node)
    }
}
