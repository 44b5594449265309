//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{serialize_config, Config};

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
    commented: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let output = match output {
        Some(path) => path,
        None => PathBuf::from("pstree-graph.yaml"),
    };

    let mut content = serialize_config(&config, format.clone())?;
    if commented && matches!(format, ConfigFormat::Yaml) {
        content = add_config_comments(content);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# pstree-graph Configuration
# ==========================
#
# Files
# -----
# input: "pstree.json"          # Process tree snapshot (JSON)
# output: "pstree_graph.png"    # Rendered figure
#
# Filtering
# ---------
# max_depth: 3                  # Deepest tree level kept (roots are 0)
# extra_important_names: null   # Added to the built-in application list
# extra_root_names: null        # Added to the built-in OS process list
#
# Fallback (used when nothing matched)
# ------------------------------------
# fallback_root_name: "System"  # Root record to show
# fallback_children: 3          # How many of its children to show
#
# Layout
# ------
# small_graph_threshold: 10     # Up to this many nodes: layered layout
# level_spacing_x: 6.0          # Horizontal distance inside a level
# level_spacing_y: 4.0          # Vertical distance between levels
# spring_k: 3.0                 # Spring layout optimal distance
# spring_iterations: 50         # Spring layout rounds
# spring_seed: 42               # Spring layout random seed
#
# Rendering
# ---------
# figure_width_in: 16.0         # Canvas width in inches
# figure_height_in: 10.0        # Canvas height in inches
# dpi: 300                      # Pixels per inch
# image_format: null            # png or svg (null: by output extension)
# open_viewer: false            # Open the figure after writing it
#
# Logging
# -------
# log_level: "warn"             # off, error, warn, info, debug, trace
"#;

    format!("{comments}\n{yaml}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_commented_config_still_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pstree-graph.yaml");

        command_config(Some(path.clone()), ConfigFormat::Yaml, true).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# pstree-graph Configuration"));

        let cfg = parse_config(&content, &path).unwrap();
        assert_eq!(cfg.max_depth, Some(3));
    }

    #[test]
    fn test_toml_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pstree-graph.toml");

        command_config(Some(path.clone()), ConfigFormat::Toml, false).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let cfg = parse_config(&content, &path).unwrap();
        assert_eq!(cfg.dpi, Some(300));
    }
}
