//! Names command implementation.
//!
//! Lists the process names that make it into the graph.

use pstree_graph::{Classifier, Importance};

use crate::cli::NameClass;

/// Lists the important and root name lists.
pub fn command_names(
    class: Option<NameClass>,
    verbose: bool,
    classifier: &Classifier,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("📊 pstree-graph - Process Name Lists");
    println!("====================================");

    let sections = [
        (NameClass::Important, Importance::VeryImportant, "Important applications"),
        (NameClass::Root, Importance::RootEssential, "Root system processes"),
    ];

    let mut total = 0;
    for (section, importance, title) in sections {
        if class.is_some_and(|c| c != section) {
            continue;
        }

        let names = classifier.names(importance);
        let extra = classifier.extra_names(importance);
        println!("\n🏷️  {} ({})", title, names.len());
        println!("{}", "─".repeat(50));
        for name in &names {
            if verbose && extra.iter().any(|e| e.as_str() == *name) {
                println!("   ├─ {}  (config)", name);
            } else {
                println!("   ├─ {}", name);
            }
        }
        total += names.len();
    }

    println!("\n📋 Total: {} names (matched exactly, case-insensitive)", total);
    Ok(())
}
