//! Check command implementation.
//!
//! Inspects a snapshot and reports what a render would show.

use anyhow::Context;

use pstree_graph::{load_forest, Classifier, Pipeline, ProcessRecord};

use crate::config::{validate_effective_config, Config};

/// Counts records in the forest whose name the classifier accepts.
fn count_includable(forest: &[ProcessRecord], classifier: &Classifier) -> usize {
    forest
        .iter()
        .map(|r| {
            let own = usize::from(classifier.should_include(Some(&r.display_name())));
            own + count_includable(&r.children, classifier)
        })
        .sum()
}

/// Loads the snapshot and prints what the graph would contain.
pub fn command_check(verbose: bool, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 pstree-graph - Snapshot Check");
    println!("================================");

    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => println!("   ✅ Configuration is valid"),
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            std::process::exit(1);
        }
    }

    let input = config.input_path();
    println!("\n📁 Loading {}...", input.display());
    let forest = load_forest(&input)
        .with_context(|| format!("cannot check snapshot {}", input.display()))?;

    let records: usize = forest.iter().map(|r| r.subtree_len()).sum();
    let depth = forest.iter().map(|r| r.subtree_depth()).max().unwrap_or(0);
    println!("   ✅ {} root records, {} processes", forest.len(), records);
    println!("   ├─ Deepest level: {}", depth);

    let pipeline = Pipeline::new(config.classifier(), config.pipeline_options());
    let includable = count_includable(&forest, pipeline.classifier());
    println!("   └─ Matching names anywhere in the tree: {}", includable);

    let report = pipeline.run(&forest)?;
    println!("\n📊 Resulting graph:");
    println!(
        "   ├─ Depth limit: {}",
        pipeline.options().build.max_depth
    );
    if report.fallback_used {
        println!("   ├─ ⚠️  No matches, fallback structure used");
    }
    println!(
        "   ├─ Nodes: {} ({} important, {} system)",
        report.summary.total, report.summary.important, report.summary.system
    );
    println!("   ├─ Edges: {}", report.graph.edges().len());
    println!("   ├─ Roots: {:?}", report.roots);
    println!("   └─ Unplaced: {}", report.layout.unplaced.len());

    if verbose {
        println!("\n🧾 Nodes:");
        for node in report.graph.nodes() {
            println!(
                "   ├─ {} (PID: {}) depth {} [{}]",
                node.name, node.pid, node.depth, node.importance
            );
        }
    }

    Ok(())
}
