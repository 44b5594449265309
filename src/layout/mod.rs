//! Node placement.
//!
//! Small graphs get a layered layout (one row per BFS level below the
//! roots); larger ones fall back to a spring layout without level meaning.

pub mod force;
pub mod levels;

use ahash::AHashMap as HashMap;
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::error::{PstreeError, Result};
use crate::graph::ProcessGraph;

pub use force::spring_layout;
pub use levels::{assign_levels, leveled_layout};

/// 2D coordinate in layout units (y grows upwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which layout regime produced the positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Leveled,
    Spring,
}

/// Layout tuning parameters.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Graphs with at most this many nodes get the leveled layout.
    pub small_graph_threshold: usize,
    /// Horizontal distance between nodes of one level.
    pub level_spacing_x: f64,
    /// Vertical distance between levels.
    pub level_spacing_y: f64,
    /// Optimal node distance of the spring layout.
    pub spring_k: f64,
    pub spring_iterations: usize,
    pub spring_seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            small_graph_threshold: 10,
            level_spacing_x: 6.0,
            level_spacing_y: 4.0,
            spring_k: 3.0,
            spring_iterations: 50,
            spring_seed: 42,
        }
    }
}

/// False for zero, negatives and NaN.
pub(crate) fn is_positive(v: f64) -> bool {
    v.partial_cmp(&0.0) == Some(Ordering::Greater)
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if self.small_graph_threshold == 0 {
            return Err(PstreeError::InvalidConfig(
                "small_graph_threshold must be at least 1".into(),
            ));
        }
        if !is_positive(self.level_spacing_x) || !is_positive(self.level_spacing_y) {
            return Err(PstreeError::InvalidConfig(
                "level_spacing_x and level_spacing_y must be positive".into(),
            ));
        }
        if !is_positive(self.spring_k) {
            return Err(PstreeError::InvalidConfig("spring_k must be positive".into()));
        }
        if self.spring_iterations == 0 {
            return Err(PstreeError::InvalidConfig(
                "spring_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Positions for the placed nodes plus the nodes that got none.
#[derive(Debug, Clone)]
pub struct Layout {
    pub kind: LayoutKind,
    positions: HashMap<u32, Position>,
    /// BFS level per node (leveled layout only).
    levels: HashMap<u32, usize>,
    /// Nodes the leveled layout never reached, in insertion order.
    pub unplaced: Vec<u32>,
}

impl Layout {
    pub fn position(&self, pid: u32) -> Option<Position> {
        self.positions.get(&pid).copied()
    }

    pub fn level(&self, pid: u32) -> Option<usize> {
        self.levels.get(&pid).copied()
    }

    pub fn placed_count(&self) -> usize {
        self.positions.len()
    }

    /// Bounding box of all positions as `(min, max)`.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let mut it = self.positions.values();
        let first = *it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| {
            (
                Position::new(lo.x.min(p.x), lo.y.min(p.y)),
                Position::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}

/// Places the graph, choosing the regime by node count.
pub fn compute_layout(graph: &ProcessGraph, roots: &[u32], config: &LayoutConfig) -> Layout {
    if graph.len() <= config.small_graph_threshold {
        let levels = assign_levels(graph, roots);
        let positions = leveled_layout(&levels, config);
        let level_map: HashMap<u32, usize> = levels.iter().copied().collect();

        let unplaced: Vec<u32> = graph
            .nodes()
            .iter()
            .map(|n| n.pid)
            .filter(|pid| !level_map.contains_key(pid))
            .collect();
        if !unplaced.is_empty() {
            warn!(
                "{} node(s) unreachable from any root are left out of the drawing: {:?}",
                unplaced.len(),
                unplaced
            );
        }

        debug!(
            "Leveled layout: {} nodes on {} levels",
            positions.len(),
            level_map.values().max().map_or(0, |m| m + 1)
        );
        Layout {
            kind: LayoutKind::Leveled,
            positions: positions.into_iter().collect(),
            levels: level_map,
            unplaced,
        }
    } else {
        let positions = spring_layout(graph, config);
        debug!("Spring layout: {} nodes", positions.len());
        Layout {
            kind: LayoutKind::Spring,
            positions: positions.into_iter().collect(),
            levels: HashMap::new(),
            unplaced: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::find_roots;
    use crate::process::Importance;

    fn chain(n: u32) -> ProcessGraph {
        let mut g = ProcessGraph::new();
        for pid in 1..=n {
            g.insert_node(pid, format!("p{pid}"), 0, Importance::RootEssential);
            if pid > 1 {
                g.add_edge(pid - 1, pid);
            }
        }
        g
    }

    #[test]
    fn test_small_graph_uses_levels() {
        let g = chain(3);
        let roots = find_roots(&g);
        let layout = compute_layout(&g, &roots, &LayoutConfig::default());

        assert_eq!(layout.kind, LayoutKind::Leveled);
        assert_eq!(layout.level(1), Some(0));
        assert_eq!(layout.level(2), Some(1));
        assert_eq!(layout.level(3), Some(2));

        let (root, a, b) = (
            layout.position(1).unwrap(),
            layout.position(2).unwrap(),
            layout.position(3).unwrap(),
        );
        assert!(root.y > a.y && a.y > b.y);
        assert!(layout.unplaced.is_empty());
    }

    #[test]
    fn test_large_graph_uses_spring() {
        let g = chain(11);
        let roots = find_roots(&g);
        let layout = compute_layout(&g, &roots, &LayoutConfig::default());

        assert_eq!(layout.kind, LayoutKind::Spring);
        assert_eq!(layout.placed_count(), 11);
        assert_eq!(layout.level(1), None);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let g = chain(10);
        let layout = compute_layout(&g, &find_roots(&g), &LayoutConfig::default());
        assert_eq!(layout.kind, LayoutKind::Leveled);
    }

    #[test]
    fn test_unreachable_nodes_reported() {
        // 1 -> 2 plus a 3 <-> 4 cycle: roots = [1], cycle never reached
        let mut g = chain(2);
        g.insert_node(3, "p3", 0, Importance::RootEssential);
        g.insert_node(4, "p4", 0, Importance::RootEssential);
        g.add_edge(3, 4);
        g.add_edge(4, 3);

        let layout = compute_layout(&g, &find_roots(&g), &LayoutConfig::default());
        assert_eq!(layout.unplaced, [3, 4]);
        assert_eq!(layout.placed_count(), 2);
        assert!(layout.position(3).is_none());
    }

    #[test]
    fn test_empty_graph_layout() {
        let g = ProcessGraph::new();
        let layout = compute_layout(&g, &[], &LayoutConfig::default());
        assert_eq!(layout.placed_count(), 0);
        assert!(layout.bounds().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = LayoutConfig::default();
        assert!(cfg.validate().is_ok());
        cfg.small_graph_threshold = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = LayoutConfig::default();
        cfg.level_spacing_y = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = LayoutConfig::default();
        cfg.spring_iterations = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = LayoutConfig::default();
        cfg.spring_k = f64::NAN;
        assert!(cfg.validate().is_err());
        cfg.spring_k = -1.0;
        assert!(cfg.validate().is_err());
    }
}
