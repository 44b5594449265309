//! Process-related modules for classification and display.
//!
//! This module provides:
//! - `classifier`: importance lists and name matching
//! - `label`: display label cleanup for rendered nodes

pub mod classifier;
pub mod label;

// Re-export commonly used types
pub use classifier::{Classifier, Importance, ProcessLists, BUILTIN_LISTS};
pub use label::{clean_label, node_label};
