//! Process tree snapshot loading.
//!
//! A snapshot is a JSON array of root records. Each record carries a `PID`,
//! an optional `ImageFileName` and its children under `__children`:
//!
//! ```json
//! [{"PID": 4, "ImageFileName": "System", "__children": [
//!     {"PID": 88, "ImageFileName": "smss.exe", "__children": []}
//! ]}]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{PstreeError, Result};

/// One process in the snapshot, with its children in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    #[serde(rename = "PID", default)]
    pub pid: u32,

    #[serde(rename = "ImageFileName", default)]
    pub name: Option<String>,

    #[serde(rename = "__children", default)]
    pub children: Vec<ProcessRecord>,
}

impl ProcessRecord {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: Some(name.into()),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<ProcessRecord>) -> Self {
        self.children = children;
        self
    }

    /// Image name, or `PID <n>` when the snapshot has none.
    ///
    /// The placeholder never matches a classifier list.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("PID {}", self.pid),
        }
    }

    /// Number of records in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }

    /// Depth of the deepest record below this one (0 for a leaf).
    pub fn subtree_depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.subtree_depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Parses a snapshot from a JSON string.
pub fn parse_forest(content: &str, origin: &Path) -> Result<Vec<ProcessRecord>> {
    serde_json::from_str(content).map_err(|source| PstreeError::ParseInput {
        path: origin.to_path_buf(),
        source,
    })
}

/// Loads a snapshot from disk.
pub fn load_forest(path: &Path) -> Result<Vec<ProcessRecord>> {
    debug!("Loading process tree from: {}", path.display());

    let content = fs::read_to_string(path).map_err(|source| PstreeError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let forest = parse_forest(&content, path)?;

    info!(
        "Loaded {} root records ({} processes) from {}",
        forest.len(),
        forest.iter().map(|r| r.subtree_len()).sum::<usize>(),
        path.display()
    );

    Ok(forest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_forest() {
        let json = r#"[
            {"PID": 4, "ImageFileName": "System", "__children": [
                {"PID": 88, "ImageFileName": "smss.exe", "__children": []},
                {"PID": 90, "ImageFileName": null}
            ]},
            {"PID": 500, "ImageFileName": "explorer.exe", "__children": []}
        ]"#;

        let forest = parse_forest(json, Path::new("inline.json")).unwrap();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].children.len(), 2);
        assert_eq!(forest[0].children[0].name.as_deref(), Some("smss.exe"));
        assert_eq!(forest[0].children[1].name, None);
        assert!(forest[0].children[1].children.is_empty());
        assert_eq!(forest[0].subtree_len(), 3);
        assert_eq!(forest[0].subtree_depth(), 1);
    }

    #[test]
    fn test_missing_fields_are_tolerated() {
        let json = r#"[{"Offset": 123, "__children": [{"PID": 7}]}]"#;
        let forest = parse_forest(json, Path::new("inline.json")).unwrap();

        assert_eq!(forest[0].pid, 0);
        assert_eq!(forest[0].display_name(), "PID 0");
        assert_eq!(forest[0].children[0].display_name(), "PID 7");
    }

    #[test]
    fn test_empty_name_gets_placeholder() {
        let record = ProcessRecord {
            pid: 12,
            name: Some(String::new()),
            children: Vec::new(),
        };
        assert_eq!(record.display_name(), "PID 12");
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let err = parse_forest("{not json", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, PstreeError::ParseInput { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_forest(Path::new("/nonexistent/pstree.json")).unwrap_err();
        assert!(matches!(err, PstreeError::ReadInput { .. }));
    }
}
