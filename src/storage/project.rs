//! Project management
//!
//! Handles project initialization and provides access to the report store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::{Config, PROJECT_DIR};
use super::ReportStore;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a prdtree project. Run 'prdtree init' first.")]
    NotInProject,
}

const DEFAULT_CONFIG: &str = r#"# prdtree project configuration

# Save every compiled report to .prdtree/reports/
auto_save = false

[input]
# Largest accepted document in bytes
max_bytes = 5242880

# Refuse documents containing NUL bytes
reject_binary = true
"#;

/// A prdtree project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;
        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;
        Self::open(root)
    }

    /// Initializes a new project at the given path; existing files are kept
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = Self::scaffold(root)?;
        Self::open(root)
    }

    /// Creates the project layout without reading any configuration
    ///
    /// Returns the project root.
    pub fn scaffold(root: impl Into<PathBuf>) -> Result<PathBuf> {
        let root = root.into();
        let project_dir = root.join(PROJECT_DIR);

        let reports_dir = project_dir.join("reports");
        fs::create_dir_all(&reports_dir).with_context(|| {
            format!(
                "Failed to create reports directory: {}",
                reports_dir.display()
            )
        })?;

        let config_path = project_dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        tracing::info!(root = %root.display(), "initialized project");
        Ok(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .prdtree directory path
    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the report store
    pub fn reports(&self) -> ReportStore {
        ReportStore::for_project(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::parse_project;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.project_dir().join("reports").is_dir());
        assert!(project.project_dir().join("config.toml").is_file());
        assert_eq!(project.reports().dir(), project.project_dir().join("reports"));
    }

    #[test]
    fn init_is_idempotent_and_keeps_config() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();

        let config_path = dir.path().join(PROJECT_DIR).join("config.toml");
        fs::write(&config_path, "auto_save = true\n").unwrap();

        let project = Project::init(dir.path()).unwrap();
        assert!(project.config().project.auto_save);
    }

    #[test]
    fn scaffold_ignores_malformed_config() {
        let dir = TempDir::new().unwrap();
        Project::scaffold(dir.path()).unwrap();

        let config_path = dir.path().join(PROJECT_DIR).join("config.toml");
        fs::write(&config_path, "auto_save = \"sometimes\"\n").unwrap();

        assert_eq!(Project::scaffold(dir.path()).unwrap(), dir.path());
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "auto_save = \"sometimes\"\n");
        assert!(Project::init(dir.path()).is_err());
    }

    #[test]
    fn open_requires_project_dir() {
        let dir = TempDir::new().unwrap();
        let err = Project::open(dir.path()).err().unwrap();
        assert!(err.downcast_ref::<ProjectError>().is_some());
    }

    #[test]
    fn default_config_parses() {
        assert_eq!(parse_project(DEFAULT_CONFIG).unwrap(), Default::default());
    }
}
