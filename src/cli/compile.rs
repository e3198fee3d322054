//! Compile and stats commands

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use super::input::{read_document, InputSource};
use super::output::Output;
use super::render::{render_summary, render_tree};
use crate::compiler;
use crate::domain::{DocumentId, EntityStats, ProcessingMetadata, ProcessingReport};
use crate::storage::{Config, ReportStore};

/// Statistics-only view of a report
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView<'a> {
    document_id: &'a DocumentId,
    total_tasks: usize,
    level_distribution: &'a BTreeMap<usize, usize>,
    entity_stats: &'a EntityStats,
    processing_metadata: &'a ProcessingMetadata,
}

impl<'a> From<&'a ProcessingReport> for StatsView<'a> {
    fn from(report: &'a ProcessingReport) -> Self {
        Self {
            document_id: &report.document_id,
            total_tasks: report.total_tasks,
            level_distribution: &report.level_distribution,
            entity_stats: &report.entity_stats,
            processing_metadata: &report.processing_metadata,
        }
    }
}

/// Reads the document and compiles it
fn load_and_compile(config: &Config, file: Option<PathBuf>) -> Result<ProcessingReport> {
    let source = InputSource::from_arg(file);
    let text = read_document(&source, &config.project.input)?;
    let report = compiler::process_str(&text);

    tracing::info!(
        document = %report.document_id,
        tasks = report.total_tasks,
        "compiled {}",
        source
    );
    Ok(report)
}

pub fn compile(output: &Output, config: &Config, file: Option<PathBuf>, save: bool) -> Result<()> {
    let report = load_and_compile(config, file)?;

    let saved = if save || config.project.auto_save {
        let store = ReportStore::for_project(config.require_project_root()?);
        let path = store.write(&report)?;
        tracing::info!(path = %path.display(), "saved report");
        Some(path)
    } else {
        None
    };

    if output.is_text() {
        if report.is_empty() {
            output.text("No sections found.");
        } else {
            output.text(&render_tree(&report.task_tree));
        }
        output.text("");
        output.text(&render_summary(&report));
        if let Some(path) = saved {
            output.text(&format!("Saved report to {}", path.display()));
        }
    } else {
        output.data(&report)?;
    }

    Ok(())
}

pub fn stats(output: &Output, config: &Config, file: Option<PathBuf>) -> Result<()> {
    let report = load_and_compile(config, file)?;

    if output.is_text() {
        output.text(&render_summary(&report));
    } else {
        output.data(&StatsView::from(&report))?;
    }

    Ok(())
}
