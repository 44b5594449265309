//! Breadth-first leveling and the layered layout built on it.

use ahash::AHashSet as HashSet;
use std::collections::{BTreeMap, VecDeque};

use super::{LayoutConfig, Position};
use crate::graph::ProcessGraph;

/// BFS levels from all roots at once, in visiting order.
///
/// Every root is level 0. A node takes the level of whichever path reaches
/// it first; nodes no root reaches are absent from the result.
pub fn assign_levels(graph: &ProcessGraph, roots: &[u32]) -> Vec<(u32, usize)> {
    let mut levels = Vec::with_capacity(graph.len());
    let mut visited: HashSet<u32> = HashSet::new();
    let mut queue = VecDeque::new();

    for &root in roots {
        if graph.contains(root) && visited.insert(root) {
            levels.push((root, 0));
            queue.push_back((root, 0));
        }
    }

    while let Some((pid, level)) = queue.pop_front() {
        for &child in graph.successors(pid) {
            if visited.insert(child) {
                levels.push((child, level + 1));
                queue.push_back((child, level + 1));
            }
        }
    }

    levels
}

/// Rows by level: `y = -level * level_spacing_y`, nodes of a row spaced by
/// `level_spacing_x` and centered on `x = 0`, in visiting order.
pub fn leveled_layout(levels: &[(u32, usize)], config: &LayoutConfig) -> Vec<(u32, Position)> {
    let mut rows: BTreeMap<usize, Vec<u32>> = BTreeMap::new();
    for &(pid, level) in levels {
        rows.entry(level).or_default().push(pid);
    }

    let mut positions = Vec::with_capacity(levels.len());
    for (level, pids) in rows {
        let y = -(level as f64) * config.level_spacing_y;
        let start_x = -((pids.len() - 1) as f64) * config.level_spacing_x / 2.0;
        for (i, pid) in pids.into_iter().enumerate() {
            positions.push((pid, Position::new(start_x + i as f64 * config.level_spacing_x, y)));
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Importance;

    fn graph(pids: &[u32], edges: &[(u32, u32)]) -> ProcessGraph {
        let mut g = ProcessGraph::new();
        for &pid in pids {
            g.insert_node(pid, format!("p{pid}"), 0, Importance::VeryImportant);
        }
        for &(p, c) in edges {
            g.add_edge(p, c);
        }
        g
    }

    #[test]
    fn test_path_levels() {
        let g = graph(&[1, 2, 3], &[(1, 2), (2, 3)]);
        assert_eq!(assign_levels(&g, &[1]), [(1, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn test_first_reach_wins() {
        // 1 -> 3 directly, and 2 -> 4 -> 3; both 1 and 2 are roots
        let g = graph(&[1, 2, 3, 4], &[(1, 3), (2, 4), (4, 3)]);
        let levels = assign_levels(&g, &[1, 2]);
        assert_eq!(levels, [(1, 0), (2, 0), (3, 1), (4, 1)]);
    }

    #[test]
    fn test_every_root_is_level_zero() {
        let g = graph(&[5, 6], &[]);
        assert_eq!(assign_levels(&g, &[5, 6]), [(5, 0), (6, 0)]);
    }

    #[test]
    fn test_rows_centered_and_spaced() {
        let g = graph(&[1, 2, 3, 4], &[(1, 2), (1, 3), (1, 4)]);
        let cfg = LayoutConfig::default();
        let pos: Vec<(u32, Position)> = leveled_layout(&assign_levels(&g, &[1]), &cfg);

        assert_eq!(pos[0], (1, Position::new(0.0, 0.0)));
        assert_eq!(pos[1], (2, Position::new(-6.0, -4.0)));
        assert_eq!(pos[2], (3, Position::new(0.0, -4.0)));
        assert_eq!(pos[3], (4, Position::new(6.0, -4.0)));
    }

    #[test]
    fn test_two_node_row() {
        let g = graph(&[1, 2], &[]);
        let pos = leveled_layout(&assign_levels(&g, &[1, 2]), &LayoutConfig::default());
        assert_eq!(pos[0].1, Position::new(-3.0, 0.0));
        assert_eq!(pos[1].1, Position::new(3.0, 0.0));
    }
}
