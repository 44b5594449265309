//! Directed graph of the processes that survive filtering.
//!
//! This module provides:
//! - `builder`: depth-limited traversal of the snapshot
//! - `fallback`: minimal "System" graph used when nothing matched
//! - `roots`: root detection with the min-PID fallback
//!
//! Nodes keep insertion order so that layout and output are deterministic.

pub mod builder;
pub mod fallback;
pub mod roots;

use ahash::{AHashMap as HashMap, AHashSet as HashSet};

use crate::process::Importance;

pub use builder::{build_subgraph, BuildOptions, DEFAULT_MAX_DEPTH};
pub use fallback::{populate_fallback, FallbackOptions};
pub use roots::find_roots;

/// A process kept in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub pid: u32,
    pub name: String,
    /// Traversal depth at first insertion.
    pub depth: usize,
    pub importance: Importance,
}

/// Parent → child edge between two graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub parent: u32,
    pub child: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<u32, usize>,
    edges: Vec<Edge>,
    edge_set: HashSet<Edge>,
    children: HashMap<u32, Vec<u32>>,
}

impl ProcessGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, pid: u32) -> bool {
        self.index.contains_key(&pid)
    }

    pub fn node(&self, pid: u32) -> Option<&GraphNode> {
        self.index.get(&pid).map(|&i| &self.nodes[i])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Inserts a node. An existing PID keeps its first name and depth.
    ///
    /// Returns `true` if the node was new.
    pub fn insert_node(
        &mut self,
        pid: u32,
        name: impl Into<String>,
        depth: usize,
        importance: Importance,
    ) -> bool {
        if self.index.contains_key(&pid) {
            return false;
        }
        self.index.insert(pid, self.nodes.len());
        self.nodes.push(GraphNode {
            pid,
            name: name.into(),
            depth,
            importance,
        });
        true
    }

    /// Adds a parent → child edge when both endpoints are already nodes.
    ///
    /// Returns `true` if a new edge was recorded.
    pub fn add_edge(&mut self, parent: u32, child: u32) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        let edge = Edge { parent, child };
        if !self.edge_set.insert(edge) {
            return false;
        }
        self.edges.push(edge);
        self.children.entry(parent).or_default().push(child);
        true
    }

    /// Children of a node in edge insertion order.
    pub fn successors(&self, pid: u32) -> &[u32] {
        self.children.get(&pid).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn in_degree(&self, pid: u32) -> usize {
        self.edges.iter().filter(|e| e.child == pid).count()
    }

    /// Count of nodes in a class.
    pub fn count(&self, importance: Importance) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.importance == importance)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_wins() {
        let mut g = ProcessGraph::new();
        assert!(g.insert_node(10, "explorer.exe", 1, Importance::VeryImportant));
        assert!(!g.insert_node(10, "renamed.exe", 3, Importance::Excluded));

        let node = g.node(10).unwrap();
        assert_eq!(node.name, "explorer.exe");
        assert_eq!(node.depth, 1);
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn test_edges_need_both_endpoints() {
        let mut g = ProcessGraph::new();
        g.insert_node(1, "System", 0, Importance::RootEssential);
        assert!(!g.add_edge(1, 2));
        assert!(!g.add_edge(2, 1));

        g.insert_node(2, "smss.exe", 1, Importance::RootEssential);
        assert!(g.add_edge(1, 2));
        assert!(!g.add_edge(1, 2), "duplicate edges collapse");
        assert_eq!(g.edges().len(), 1);
        assert_eq!(g.successors(1), [2]);
        assert!(g.successors(2).is_empty());
        assert_eq!(g.in_degree(2), 1);
        assert_eq!(g.in_degree(1), 0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut g = ProcessGraph::new();
        for pid in [30, 10, 20] {
            g.insert_node(pid, format!("p{pid}"), 0, Importance::Excluded);
        }
        let order: Vec<u32> = g.nodes().iter().map(|n| n.pid).collect();
        assert_eq!(order, [30, 10, 20]);
        assert_eq!(g.count(Importance::Excluded), 3);
        assert_eq!(g.count(Importance::VeryImportant), 0);
    }
}
