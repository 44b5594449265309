//! Depth-limited traversal that keeps only includable processes.

use tracing::{debug, trace};

use super::ProcessGraph;
use crate::process::Classifier;
use crate::tree::ProcessRecord;

pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    /// Deepest traversal depth (roots are depth 0) whose records may be kept.
    pub max_depth: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Builds the filtered graph from a snapshot.
///
/// Each root is walked depth first. A record is inserted if its name passes
/// the classifier and it lies within `max_depth`. An edge is added from a
/// record to an included child only if the record itself is already a node.
/// Recursion continues below excluded records, so their important
/// descendants show up as extra roots.
pub fn build_subgraph(
    forest: &[ProcessRecord],
    classifier: &Classifier,
    options: &BuildOptions,
) -> ProcessGraph {
    let mut graph = ProcessGraph::new();
    for root in forest {
        visit(root, 0, classifier, options, &mut graph);
    }
    debug!(
        "Subgraph built: {} nodes, {} edges from {} roots",
        graph.len(),
        graph.edges().len(),
        forest.len()
    );
    graph
}

fn visit(
    record: &ProcessRecord,
    depth: usize,
    classifier: &Classifier,
    options: &BuildOptions,
    graph: &mut ProcessGraph,
) {
    if depth > options.max_depth {
        return;
    }

    let name = record.display_name();
    let importance = classifier.classify(Some(&name));
    if importance.is_included() && graph.insert_node(record.pid, &name, depth, importance) {
        trace!("Included {} (PID {}) at depth {}", name, record.pid, depth);
    }

    for child in &record.children {
        if depth < options.max_depth {
            let child_name = child.display_name();
            let child_importance = classifier.classify(Some(&child_name));
            if child_importance.is_included() {
                graph.insert_node(child.pid, &child_name, depth + 1, child_importance);
                // only when the parent made it in
                graph.add_edge(record.pid, child.pid);
            }
        }
        visit(child, depth + 1, classifier, options, graph);
    }
}
