//! Root detection.

use ahash::AHashSet as HashSet;

use super::ProcessGraph;

/// Nodes without an incoming edge, in insertion order.
///
/// If every node has a parent (only possible through a cycle) the node with
/// the smallest PID is used instead. Empty only for an empty graph.
pub fn find_roots(graph: &ProcessGraph) -> Vec<u32> {
    let targets: HashSet<u32> = graph.edges().iter().map(|e| e.child).collect();
    let roots: Vec<u32> = graph
        .nodes()
        .iter()
        .map(|n| n.pid)
        .filter(|pid| !targets.contains(pid))
        .collect();

    if roots.is_empty() {
        return graph.nodes().iter().map(|n| n.pid).min().into_iter().collect();
    }
    roots
}
