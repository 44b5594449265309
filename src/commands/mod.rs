//! CLI command implementations for pstree-graph.
//!
//! This module provides implementations for all CLI subcommands:
//! - `render`: Default action, draws the graph and prints the summary
//! - `check`: Snapshot inspection without rendering
//! - `config`: Configuration file generation
//! - `names`: Classifier list listing
//! - `generate`: Synthetic snapshot generation

pub mod check;
pub mod config;
pub mod generate;
pub mod names;
pub mod render;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
pub use generate::command_generate_testdata;
pub use names::command_names;
pub use render::command_render;
