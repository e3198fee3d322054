//! JSON storage for processing reports
//!
//! Reports are stored as pretty-printed JSON files in `.prdtree/reports/`,
//! one per compiled document, named after the document ID.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DocumentId, ProcessingReport, SectionId, TaskNode};

use super::config::PROJECT_DIR;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Corrupt report file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// Summary line for a stored report
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub id: DocumentId,
    pub total_tasks: usize,
    pub headline: Option<String>,
    pub compiled_at: chrono::DateTime<chrono::Utc>,
}

impl From<&ProcessingReport> for ReportSummary {
    fn from(report: &ProcessingReport) -> Self {
        Self {
            id: report.document_id.clone(),
            total_tasks: report.total_tasks,
            headline: report.headline().map(str::to_string),
            compiled_at: report.processing_metadata.start_time,
        }
    }
}

/// Parses a stored report of any nesting depth
///
/// Every heading level adds two JSON nesting levels, so serde_json's default
/// recursion limit would reject deep documents. The stack grows on demand
/// instead.
fn parse_report(content: &str) -> serde_json::Result<ProcessingReport> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();

    let report = ProcessingReport::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(report)
}

/// Store for processing reports as JSON files
pub struct ReportStore {
    /// Directory containing report files
    dir: PathBuf,
}

impl ReportStore {
    /// Creates a new report store at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(PROJECT_DIR).join("reports"))
    }

    /// Returns the directory containing report files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path to a report file
    fn report_path(&self, id: &DocumentId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Reads a report from a file
    fn read_from_file(&self, path: &Path) -> Result<ProcessingReport> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report file: {}", path.display()))?;

        let report = parse_report(&content).map_err(|e| StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(report)
    }

    /// Writes a report atomically (temp file + rename)
    pub fn write(&self, report: &ProcessingReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.report_path(&report.document_id);
        let temp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(report).context("Failed to serialize report")?;

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

        fs::rename(&temp_path, &path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        tracing::debug!(path = %path.display(), "wrote report");
        Ok(path)
    }

    /// Reads a single report by document ID
    pub fn read(&self, id: &DocumentId) -> Result<Option<ProcessingReport>> {
        let path = self.report_path(id);
        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(self.read_from_file(&path)?))
    }

    /// Lists stored reports, sorted by document ID
    ///
    /// Unreadable files are skipped with a warning.
    pub fn list(&self) -> Result<Vec<ReportSummary>> {
        let mut summaries = Vec::new();

        if !self.dir.exists() {
            return Ok(summaries);
        }

        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read directory: {}", self.dir.display()))?
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.extension().is_some_and(|e| e == "json") {
                match self.read_from_file(&path) {
                    Ok(report) => summaries.push(ReportSummary::from(&report)),
                    Err(e) => tracing::warn!("Skipping {}: {:#}", path.display(), e),
                }
            }
        }

        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }

    /// Looks up a task node through the report that owns it
    pub fn find_task(&self, id: &SectionId) -> Result<Option<TaskNode>> {
        let report = match self.read(id.document_id())? {
            Some(report) => report,
            None => return Ok(None),
        };

        Ok(report.find_task(id).cloned())
    }

    /// Removes a report by document ID
    pub fn remove(&self, id: &DocumentId) -> Result<bool> {
        let path = self.report_path(id);
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)
            .with_context(|| format!("Failed to remove report file: {}", path.display()))?;

        Ok(true)
    }

    /// Checks if a report exists
    pub fn exists(&self, id: &DocumentId) -> bool {
        self.report_path(id).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::process_str;
    use tempfile::TempDir;

    const DOC: &str = "# Checkout\nThe user pays through the API.\n## Refunds\nAdmin feature";

    #[test]
    fn read_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn write_and_read_report() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        let report = process_str(DOC);

        store.write(&report).unwrap();

        let loaded = store.read(&report.document_id).unwrap().unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn list_reports_sorted() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));

        let a = process_str(DOC);
        let b = process_str("# Other");
        store.write(&a).unwrap();
        store.write(&b).unwrap();

        let list = store.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list[0].id < list[1].id);
        assert!(list.iter().any(|s| s.headline.as_deref() == Some("Checkout")));
    }

    #[test]
    fn find_task_through_section_id() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        let report = process_str(DOC);
        store.write(&report).unwrap();

        let refunds = store.find_task(&report.sections[1].id).unwrap().unwrap();
        assert_eq!(refunds.title, "Refunds");
        assert_eq!(refunds.level, 2);

        let missing = "d-0000000.1".parse().unwrap();
        assert!(store.find_task(&missing).unwrap().is_none());
    }

    #[test]
    fn remove_report() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        let report = process_str(DOC);
        store.write(&report).unwrap();

        assert!(store.exists(&report.document_id));
        assert!(store.remove(&report.document_id).unwrap());
        assert!(!store.exists(&report.document_id));
        assert!(!store.remove(&report.document_id).unwrap());
    }

    #[test]
    fn corrupt_files_are_skipped_in_list() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        store.write(&process_str(DOC)).unwrap();
        fs::write(store.dir().join("d-fffffff.json"), "{not json").unwrap();

        assert_eq!(store.list().unwrap().len(), 1);

        let err = store.read(&"d-fffffff".parse().unwrap()).unwrap_err();
        assert!(err.downcast_ref::<StoreError>().is_some());
    }

    fn nested_document(depth: usize) -> String {
        (1..=depth)
            .map(|level| format!("{} Level {}\nThe user at depth {}", "#".repeat(level), level, level))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn deeply_nested_report_reads_back() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        let report = process_str(&nested_document(70));
        assert_eq!(report.iter_tasks().map(|n| n.level).max(), Some(70));

        store.write(&report).unwrap();

        let loaded = store.read(&report.document_id).unwrap().unwrap();
        assert_eq!(loaded, report);
        assert_eq!(store.list().unwrap().len(), 1);

        let deepest = store.find_task(&report.sections[69].id).unwrap().unwrap();
        assert_eq!(deepest.title, "Level 70");
        assert_eq!(deepest.level, 70);
    }

    #[test]
    fn trailing_garbage_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        let report = process_str(DOC);
        let path = store.write(&report).unwrap();

        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("{}");
        fs::write(&path, content).unwrap();

        let err = store.read(&report.document_id).unwrap_err();
        assert!(err.downcast_ref::<StoreError>().is_some());
    }

    #[test]
    fn summary_serializes_with_camel_case_keys() {
        let report = process_str(DOC);
        let json = serde_json::to_value(ReportSummary::from(&report)).unwrap();

        assert_eq!(json["totalTasks"], report.total_tasks);
        assert_eq!(json["headline"], "Checkout");
        assert!(json["compiledAt"].is_string());
        assert!(json.get("total_tasks").is_none());
    }

    #[test]
    fn atomic_write_no_temp_file_left() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        let report = process_str(DOC);

        let path = store.write(&report).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists(), "Temp file should be removed after atomic write");
    }
}
