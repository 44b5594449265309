//! Generate testdata command implementation.
//!
//! Generates synthetic process tree snapshots for trying out the renderer.

use anyhow::Context;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use pstree_graph::process::BUILTIN_LISTS;
use pstree_graph::ProcessRecord;

// Names that never match either list
const BACKGROUND_NAMES: [&str; 10] = [
    "svchost.exe",
    "lsass.exe",
    "csrss.exe",
    "conhost.exe",
    "RuntimeBroker.exe",
    "dllhost.exe",
    "audiodg.exe",
    "SearchHost.exe",
    "winlogon.exe",
    "fontdrvhost.exe",
];

// Chances per generated record
const IMPORTANT_RATIO: f64 = 0.2;
const ROOT_RATIO: f64 = 0.05;
const UNNAMED_RATIO: f64 = 0.05;

/// Sequential PID source, Windows style (multiples of 4).
struct PidSource(u32);

impl PidSource {
    fn next(&mut self) -> u32 {
        self.0 += 4;
        self.0
    }
}

fn random_name(rng: &mut impl Rng) -> Option<String> {
    let roll: f64 = rng.gen();
    if roll < UNNAMED_RATIO {
        None
    } else if roll < UNNAMED_RATIO + IMPORTANT_RATIO {
        BUILTIN_LISTS.important.choose(rng).cloned()
    } else if roll < UNNAMED_RATIO + IMPORTANT_RATIO + ROOT_RATIO {
        BUILTIN_LISTS.root.choose(rng).cloned()
    } else {
        BACKGROUND_NAMES.choose(rng).map(|s| s.to_string())
    }
}

fn random_subtree(
    rng: &mut impl Rng,
    pids: &mut PidSource,
    depth: usize,
    max_children: usize,
) -> Vec<ProcessRecord> {
    if depth == 0 || max_children == 0 {
        return Vec::new();
    }
    let count = rng.gen_range(0..=max_children);
    (0..count)
        .map(|_| ProcessRecord {
            pid: pids.next(),
            name: random_name(rng),
            children: random_subtree(rng, pids, depth - 1, max_children),
        })
        .collect()
}

/// Builds a snapshot: a "System" root with the usual boot chain plus
/// `roots` extra roots, each grown to `depth` levels.
pub fn generate_forest(
    rng: &mut impl Rng,
    roots: usize,
    max_children: usize,
    depth: usize,
) -> Vec<ProcessRecord> {
    let mut pids = PidSource(0);
    let system_pid = pids.next();

    // System -> smss.exe -> wininit.exe -> services.exe
    let services = ProcessRecord {
        pid: pids.next(),
        name: Some("services.exe".to_string()),
        children: random_subtree(rng, &mut pids, depth.saturating_sub(3), max_children),
    };
    let wininit = ProcessRecord::new(pids.next(), "wininit.exe").with_children(vec![services]);
    let smss = ProcessRecord::new(pids.next(), "smss.exe").with_children(vec![wininit]);

    let mut system_children = vec![smss];
    system_children.extend(random_subtree(rng, &mut pids, depth.saturating_sub(1), max_children));
    let mut forest = vec![ProcessRecord::new(system_pid, "System").with_children(system_children)];

    for _ in 0..roots {
        forest.push(ProcessRecord {
            pid: pids.next(),
            name: random_name(rng),
            children: random_subtree(rng, &mut pids, depth.saturating_sub(1), max_children),
        });
    }
    forest
}

/// Generates a synthetic snapshot JSON file.
pub fn command_generate_testdata(
    output: PathBuf,
    roots: usize,
    max_children: usize,
    depth: usize,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(
        "Generating snapshot: roots={}, max_children={}, depth={}, seed={:?}",
        roots, max_children, depth, seed
    );

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let forest = generate_forest(&mut rng, roots, max_children, depth);
    let total: usize = forest.iter().map(|r| r.subtree_len()).sum();

    let json_content = serde_json::to_string_pretty(&forest)?;
    fs::write(&output, &json_content)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "✅ Generated snapshot: {} processes in {} root records -> {}",
        total,
        forest.len(),
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pstree_graph::tree::parse_forest;
    use std::path::Path;

    #[test]
    fn test_forest_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let forest = generate_forest(&mut rng, 3, 3, 5);

        assert_eq!(forest.len(), 4);
        assert_eq!(forest[0].name.as_deref(), Some("System"));
        assert_eq!(forest[0].children[0].name.as_deref(), Some("smss.exe"));
        assert!(forest.iter().all(|r| r.subtree_depth() <= 5));
    }

    #[test]
    fn test_pids_are_unique() {
        fn collect(records: &[ProcessRecord], out: &mut Vec<u32>) {
            for r in records {
                out.push(r.pid);
                collect(&r.children, out);
            }
        }
        let mut rng = StdRng::seed_from_u64(11);
        let forest = generate_forest(&mut rng, 2, 4, 5);
        let mut pids = Vec::new();
        collect(&forest, &mut pids);
        let len = pids.len();
        pids.sort_unstable();
        pids.dedup();
        assert_eq!(pids.len(), len);
    }

    #[test]
    fn test_written_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pstree.json");
        command_generate_testdata(path.clone(), 1, 2, 3, Some(5)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let forest = parse_forest(&content, Path::new("pstree.json")).unwrap();
        assert_eq!(forest.len(), 2);
        assert!(content.contains("\"ImageFileName\""));
        assert!(content.contains("\"__children\""));
    }
}
