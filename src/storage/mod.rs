//! # Storage Layer
//!
//! Persistence for compiled reports and configuration.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Reports | Pretty JSON, one file per document | `.prdtree/reports/{document-id}.json` |
//! | Project config | TOML | `.prdtree/config.toml` |
//! | Global config | TOML | `{config_dir}/prdtree/config.toml` |
//!
//! All report writes are atomic (temp file + rename).
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for a prdtree project
//! - [`ReportStore`] - Read/write reports and look up task nodes by ID
//! - [`Config`] - Project and global configuration

mod config;
mod project;
mod reports;

pub use config::{
    parse_global, parse_project, Config, ConfigError, GlobalConfig, InputConfig, OutputFormat,
    ProjectConfig, DEFAULT_MAX_INPUT_BYTES, PROJECT_DIR,
};
pub use project::{Project, ProjectError};
pub use reports::{ReportStore, ReportSummary, StoreError};
