//! Minimal graph used when no process in the snapshot matched.

use tracing::{debug, info};

use super::ProcessGraph;
use crate::process::Classifier;
use crate::tree::ProcessRecord;

#[derive(Debug, Clone)]
pub struct FallbackOptions {
    /// Root record to show (matched case-insensitively).
    pub root_name: String,
    /// How many of its children to add, in input order.
    pub max_children: usize,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            root_name: "System".to_string(),
            max_children: 3,
        }
    }
}

/// Builds the fallback graph: the first root named `root_name` at depth 0
/// and its first `max_children` children at depth 1, each with an edge from
/// the root. Empty if no such root exists.
pub fn populate_fallback(
    forest: &[ProcessRecord],
    classifier: &Classifier,
    options: &FallbackOptions,
) -> ProcessGraph {
    let mut graph = ProcessGraph::new();

    let root = forest.iter().find(|r| {
        r.name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case(&options.root_name))
    });

    let Some(root) = root else {
        info!(
            "No root record named '{}' - graph stays empty",
            options.root_name
        );
        return graph;
    };

    let root_name = root.display_name();
    let importance = classifier.classify(Some(&root_name));
    graph.insert_node(root.pid, root_name, 0, importance);

    for child in root.children.iter().take(options.max_children) {
        let child_name = child.display_name();
        let importance = classifier.classify(Some(&child_name));
        graph.insert_node(child.pid, child_name, 1, importance);
        graph.add_edge(root.pid, child.pid);
    }

    debug!(
        "Fallback graph: root PID {} with {} children",
        root.pid,
        graph.len() - 1
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Importance;

    fn system_with(children: &[(u32, &str)]) -> ProcessRecord {
        ProcessRecord::new(4, "System").with_children(
            children
                .iter()
                .map(|&(pid, name)| ProcessRecord::new(pid, name))
                .collect(),
        )
    }

    #[test]
    fn test_system_and_first_three_children() {
        let forest = vec![
            ProcessRecord::new(1, "init"),
            system_with(&[
                (10, "a.exe"),
                (11, "b.exe"),
                (12, "c.exe"),
                (13, "d.exe"),
            ]),
        ];

        let g = populate_fallback(&forest, &Classifier::builtin(), &FallbackOptions::default());
        let pids: Vec<u32> = g.nodes().iter().map(|n| n.pid).collect();
        assert_eq!(pids, [4, 10, 11, 12]);
        assert_eq!(g.node(4).unwrap().depth, 0);
        assert_eq!(g.node(4).unwrap().importance, Importance::RootEssential);
        assert_eq!(g.node(11).unwrap().depth, 1);
        assert_eq!(g.node(11).unwrap().importance, Importance::Excluded);
        assert_eq!(g.edges().len(), 3);
        assert!(g.edges().iter().all(|e| e.parent == 4));
    }

    #[test]
    fn test_fewer_children_than_limit() {
        let forest = vec![system_with(&[(10, "a.exe")])];
        let g = populate_fallback(&forest, &Classifier::builtin(), &FallbackOptions::default());
        assert_eq!(g.len(), 2);
        assert_eq!(g.edges().len(), 1);
    }

    #[test]
    fn test_name_match_ignores_case() {
        let forest = vec![ProcessRecord::new(4, "SYSTEM")];
        let g = populate_fallback(&forest, &Classifier::builtin(), &FallbackOptions::default());
        assert!(g.contains(4));
    }

    #[test]
    fn test_no_system_root_stays_empty() {
        // A nested "System" does not count, only roots are scanned
        let forest =
            vec![ProcessRecord::new(1, "init").with_children(vec![ProcessRecord::new(4, "System")])];
        let g = populate_fallback(&forest, &Classifier::builtin(), &FallbackOptions::default());
        assert!(g.is_empty());
    }

    #[test]
    fn test_unnamed_children_get_placeholder() {
        let mut root = ProcessRecord::new(4, "System");
        root.children.push(ProcessRecord {
            pid: 77,
            name: None,
            children: Vec::new(),
        });
        let g = populate_fallback(&[root], &Classifier::builtin(), &FallbackOptions::default());
        assert_eq!(g.node(77).unwrap().name, "PID 77");
    }
}
