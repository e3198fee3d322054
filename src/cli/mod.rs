//! # Command-Line Interface
//!
//! User-facing commands wrapped around the compiler.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create a `.prdtree/` project directory |
//! | `compile` | Compile a document (file or stdin) and print the report |
//! | `stats` | Print statistics only |
//! | `reports` | List saved reports |
//! | `show` | Look up a saved task by ID |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//! - `yaml` - YAML
//!
//! ## Logging
//!
//! Logs go to stderr. `RUST_LOG` wins, then `--verbose`, then `log_filter`
//! from the global config.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod compile;
mod report_cmd;
mod render;
pub mod input;

pub use app::{Cli, Commands, run};
pub use output::Output;
pub use render::{render_summary, render_task, render_tree};
