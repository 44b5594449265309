//! Render command implementation.
//!
//! Runs the full pipeline on the configured snapshot, writes the figure and
//! prints the process summary.

use anyhow::{bail, Context};
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

use pstree_graph::Pipeline;

use crate::config::Config;

/// Renders the configured snapshot.
pub fn command_render(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let input = config.input_path();
    let output = config.output_path();

    let pipeline = Pipeline::new(config.classifier(), config.pipeline_options());
    let report = pipeline.run_file(&input)?;

    if report.fallback_used {
        println!("No specific important processes found");
        println!("Showing basic system structure...");
    }
    println!("Total important nodes: {}", report.graph.len());
    println!("Roots: {}", report.roots.len());
    if !report.layout.unplaced.is_empty() {
        println!(
            "Not drawn (unreachable from any root): {}",
            report.layout.unplaced.len()
        );
    }

    report.render(&config.render_config(), &output)?;
    println!("✅ Graph written to: {}", output.display());

    if config.open_viewer.unwrap_or(false) {
        if let Err(e) = open_in_viewer(&output) {
            warn!("Could not open {}: {:#}", output.display(), e);
        }
    }

    report.summary.write_to(&mut io::stdout().lock())?;
    Ok(())
}

/// Hands the image to the platform's default viewer.
fn open_in_viewer(path: &Path) -> anyhow::Result<()> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    info!("Opening {} with {}", path.display(), opener);

    let status = Command::new(opener)
        .arg(path)
        .status()
        .with_context(|| format!("failed to start {}", opener))?;
    if !status.success() {
        bail!("{} exited with {}", opener, status);
    }
    Ok(())
}
