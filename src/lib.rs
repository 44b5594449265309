//! pstree-graph library
//!
//! Turns a process tree snapshot into a small graph of the processes worth
//! looking at, lays it out and renders it as a PNG (or SVG) figure.
//!
//! # Stages
//!
//! - **Loading**: JSON snapshot of root records with nested children
//! - **Filtering**: depth-limited walk keeping important and root processes
//! - **Fallback**: bare "System" structure when nothing matched
//! - **Layout**: BFS levels for small graphs, spring layout for larger ones
//! - **Rendering**: nodes, arrows, labels, legend, caption and a text summary
//!
//! # Usage
//!
//! ```rust
//! use pstree_graph::{Pipeline, ProcessRecord};
//!
//! let forest = vec![ProcessRecord::new(1, "System").with_children(vec![
//!     ProcessRecord::new(2, "chrome.exe"),
//!     ProcessRecord::new(3, "svchost.exe"),
//! ])];
//!
//! let report = Pipeline::default().run(&forest)?;
//! assert_eq!(report.roots, [1]);
//! assert_eq!(report.summary.important, 1);
//! assert_eq!(report.summary.total, 2);
//! # Ok::<(), pstree_graph::PstreeError>(())
//! ```

pub mod error;
pub mod graph;
pub mod layout;
pub mod pipeline;
pub mod process;
pub mod render;
pub mod tree;

// Re-export main types for convenience
pub use error::PstreeError;
pub use graph::{BuildOptions, FallbackOptions, ProcessGraph};
pub use layout::{Layout, LayoutConfig, LayoutKind, Position};
pub use pipeline::{Pipeline, PipelineOptions, PipelineReport};
pub use process::{Classifier, Importance};
pub use render::{ImageFormat, RenderConfig, Summary};
pub use tree::{load_forest, ProcessRecord};
