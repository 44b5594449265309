//! Console summary of the rendered graph.

use std::io::{self, Write};

use crate::graph::ProcessGraph;
use crate::process::Importance;

/// Node listing and class counts, printed after rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Node names in insertion order.
    pub names: Vec<String>,
    pub important: usize,
    /// Everything that is not very important, fallback children included.
    pub system: usize,
    pub total: usize,
}

impl Summary {
    pub fn from_graph(graph: &ProcessGraph) -> Self {
        let important = graph.count(Importance::VeryImportant);
        Self {
            names: graph.nodes().iter().map(|n| n.name.clone()).collect(),
            important,
            system: graph.len() - important,
            total: graph.len(),
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nDisplayed processes:")?;
        for name in &self.names {
            writeln!(out, "  - {}", name)?;
        }
        writeln!(out, "\nSummary:")?;
        writeln!(out, "  Important applications: {}", self.important)?;
        writeln!(out, "  System processes: {}", self.system)?;
        writeln!(out, "  Total: {}", self.total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_listing() {
        let mut g = ProcessGraph::new();
        g.insert_node(1, "System", 0, Importance::RootEssential);
        g.insert_node(2, "chrome.exe", 1, Importance::VeryImportant);
        g.insert_node(3, "a.exe", 1, Importance::Excluded);

        let summary = Summary::from_graph(&g);
        assert_eq!(summary.important, 1);
        assert_eq!(summary.system, 2);
        assert_eq!(summary.total, 3);

        let mut out = Vec::new();
        summary.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  - System\n  - chrome.exe\n  - a.exe\n"));
        assert!(text.contains("Important applications: 1"));
        assert!(text.contains("System processes: 2"));
        assert!(text.contains("Total: 3"));
    }

    #[test]
    fn test_empty_graph_summary() {
        let summary = Summary::from_graph(&ProcessGraph::new());
        assert_eq!(summary.total, 0);
        assert!(summary.names.is_empty());
    }
}
