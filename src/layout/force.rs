//! Fruchterman-Reingold spring layout for graphs too large to level.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{LayoutConfig, Position};
use crate::graph::ProcessGraph;

const INITIAL_TEMPERATURE: f64 = 0.1;
const MIN_DISTANCE: f64 = 0.01;

/// Spring layout over the undirected view of the graph.
///
/// Starts from seeded random positions in the unit square, runs
/// `spring_iterations` rounds with linear cooling, then recenters on the
/// origin and scales the largest coordinate to 1.
pub fn spring_layout(graph: &ProcessGraph, config: &LayoutConfig) -> Vec<(u32, Position)> {
    let nodes = graph.nodes();
    let n = nodes.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![(nodes[0].pid, Position::new(0.0, 0.0))],
        _ => {}
    }

    let index_of = |pid: u32| nodes.iter().position(|node| node.pid == pid);
    let mut adjacent = vec![vec![false; n]; n];
    for edge in graph.edges() {
        if let (Some(a), Some(b)) = (index_of(edge.parent), index_of(edge.child)) {
            adjacent[a][b] = true;
            adjacent[b][a] = true;
        }
    }

    let mut rng = StdRng::seed_from_u64(config.spring_seed);
    let mut pos: Vec<[f64; 2]> = (0..n).map(|_| [rng.gen::<f64>(), rng.gen::<f64>()]).collect();

    let k = config.spring_k;
    let mut temperature = INITIAL_TEMPERATURE;
    let cooling = temperature / (config.spring_iterations as f64 + 1.0);

    for _ in 0..config.spring_iterations {
        let mut displacement = vec![[0.0f64; 2]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                // repulsion k²/d, attraction d²/k along edges
                let mut force = k * k / (distance * distance);
                if adjacent[i][j] {
                    force -= distance / k;
                }
                displacement[i][0] += dx * force;
                displacement[i][1] += dy * force;
            }
        }

        for i in 0..n {
            let [dx, dy] = displacement[i];
            let length = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            pos[i][0] += dx * temperature / length;
            pos[i][1] += dy * temperature / length;
        }
        temperature -= cooling;
    }

    rescale(&mut pos);
    nodes
        .iter()
        .zip(pos)
        .map(|(node, [x, y])| (node.pid, Position::new(x, y)))
        .collect()
}

/// Centers on the origin and scales so the largest |coordinate| is 1.
fn rescale(pos: &mut [[f64; 2]]) {
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut extent: f64 = 0.0;
    for p in pos.iter_mut() {
        p[0] -= mean_x;
        p[1] -= mean_y;
        extent = extent.max(p[0].abs()).max(p[1].abs());
    }
    if extent > 0.0 {
        for p in pos.iter_mut() {
            p[0] /= extent;
            p[1] /= extent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Importance;

    fn star(n: u32) -> ProcessGraph {
        let mut g = ProcessGraph::new();
        g.insert_node(1, "System", 0, Importance::RootEssential);
        for pid in 2..=n {
            g.insert_node(pid, format!("p{pid}"), 1, Importance::VeryImportant);
            g.add_edge(1, pid);
        }
        g
    }

    #[test]
    fn test_all_nodes_placed_within_unit_box() {
        let g = star(15);
        let pos = spring_layout(&g, &LayoutConfig::default());

        assert_eq!(pos.len(), 15);
        let max = pos
            .iter()
            .map(|(_, p)| p.x.abs().max(p.y.abs()))
            .fold(0.0f64, f64::max);
        assert!((max - 1.0).abs() < 1e-9);
        assert!(pos.iter().all(|(_, p)| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_centered_on_origin() {
        let pos = spring_layout(&star(12), &LayoutConfig::default());
        let n = pos.len() as f64;
        let cx: f64 = pos.iter().map(|(_, p)| p.x).sum::<f64>() / n;
        let cy: f64 = pos.iter().map(|(_, p)| p.y).sum::<f64>() / n;
        assert!(cx.abs() < 1e-9 && cy.abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let g = star(12);
        let cfg = LayoutConfig::default();
        assert_eq!(spring_layout(&g, &cfg), spring_layout(&g, &cfg));
    }

    #[test]
    fn test_trivial_graphs() {
        assert!(spring_layout(&ProcessGraph::new(), &LayoutConfig::default()).is_empty());

        let mut g = ProcessGraph::new();
        g.insert_node(9, "cmd.exe", 0, Importance::VeryImportant);
        assert_eq!(
            spring_layout(&g, &LayoutConfig::default()),
            [(9, Position::new(0.0, 0.0))]
        );
    }
}
