//! Configuration handling for prdtree
//!
//! Configuration is stored in `.prdtree/config.toml` (project) and
//! `~/.config/prdtree/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the per-project directory
pub const PROJECT_DIR: &str = ".prdtree";

/// Default upper bound for a single input document (5 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Limits applied when reading documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfig {
    /// Largest accepted input in bytes
    pub max_bytes: u64,

    /// Reject inputs that contain NUL bytes
    pub reject_binary: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_INPUT_BYTES,
            reject_binary: true,
        }
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Save every compiled report to the project store
    pub auto_save: bool,

    /// Input limits
    pub input: InputConfig,
}

impl ProjectConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.input.max_bytes == 0 {
            return Err(ConfigError::Invalid(
                "input.max_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text, json or yaml)
    pub default_format: OutputFormat,

    /// Tracing filter used when neither RUST_LOG nor --verbose is given
    pub log_filter: Option<String>,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = match Self::find_project_root() {
            Some(root) => (Self::load_project_config(&root)?, Some(root)),
            None => (ProjectConfig::default(), None),
        };

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "prdtree", "prdtree").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_path = match Self::global_config_dir() {
            Some(dir) => dir.join("config.toml"),
            None => return Ok(GlobalConfig::default()),
        };

        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        parse_global(&content).context("Failed to parse global config")
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_DIR).join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        parse_project(&content).context("Failed to parse project config")
    }

    /// Finds the project root by looking for a `.prdtree/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_project_root_from(&current)
    }

    /// Finds the project root starting at `start` and walking up
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if we're in a prdtree project
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Returns the project root, or an error if not in a project
    pub fn require_project_root(&self) -> Result<&Path> {
        self.project_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not in a prdtree project. Run 'prdtree init' first."))
    }
}

/// Parses and validates project configuration text
pub fn parse_project(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Parses global configuration text
pub fn parse_global(content: &str) -> Result<GlobalConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: None,
        };

        assert_eq!(config.project.input.max_bytes, DEFAULT_MAX_INPUT_BYTES);
        assert!(config.project.input.reject_binary);
        assert!(!config.project.auto_save);
        assert_eq!(config.global.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
auto_save = true

[input]
max_bytes = 1024
"#;

        let config = parse_project(toml).unwrap();
        assert!(config.auto_save);
        assert_eq!(config.input.max_bytes, 1024);
        assert!(config.input.reject_binary, "unset keys keep their defaults");
    }

    #[test]
    fn parse_global_config() {
        let toml = r#"
default_format = "yaml"
log_filter = "prdtree=info"
"#;

        let config = parse_global(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Yaml);
        assert_eq!(config.log_filter.as_deref(), Some("prdtree=info"));
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        assert!(matches!(parse_project("auto_save = ["), Err(ConfigError::Parse(_))));
        assert!(matches!(parse_global("default_format = \"xml\""), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn zero_input_limit_is_invalid() {
        let err = parse_project("[input]\nmax_bytes = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn find_project_root_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(PROJECT_DIR)).unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let root = Config::find_project_root_from(&sub_dir);
        assert_eq!(root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn config_not_in_project() {
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: None,
        };

        assert!(!config.is_in_project());
        assert!(config.require_project_root().is_err());
    }
}
