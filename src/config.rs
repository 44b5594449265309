//! Configuration management for pstree-graph.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat};
use pstree_graph::{
    BuildOptions, Classifier, FallbackOptions, ImageFormat, LayoutConfig, PipelineOptions,
    RenderConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_INPUT: &str = "pstree.json";
pub const DEFAULT_OUTPUT: &str = "pstree_graph.png";

/// Enhanced configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Files
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,

    // Filtering
    #[serde(alias = "max-depth")]
    pub max_depth: Option<usize>,
    /// Names added to the built-in important list
    #[serde(alias = "extra-important-names")]
    pub extra_important_names: Option<Vec<String>>,
    /// Names added to the built-in root list
    #[serde(alias = "extra-root-names")]
    pub extra_root_names: Option<Vec<String>>,

    // Fallback when nothing matched
    #[serde(alias = "fallback-root-name")]
    pub fallback_root_name: Option<String>,
    #[serde(alias = "fallback-children")]
    pub fallback_children: Option<usize>,

    // Layout
    #[serde(alias = "small-graph-threshold")]
    pub small_graph_threshold: Option<usize>,
    #[serde(alias = "level-spacing-x")]
    pub level_spacing_x: Option<f64>,
    #[serde(alias = "level-spacing-y")]
    pub level_spacing_y: Option<f64>,
    #[serde(alias = "spring-k")]
    pub spring_k: Option<f64>,
    #[serde(alias = "spring-iterations")]
    pub spring_iterations: Option<usize>,
    #[serde(alias = "spring-seed")]
    pub spring_seed: Option<u64>,

    // Rendering
    #[serde(alias = "figure-width-in")]
    pub figure_width_in: Option<f64>,
    #[serde(alias = "figure-height-in")]
    pub figure_height_in: Option<f64>,
    pub dpi: Option<u32>,
    /// png or svg; unset means by output extension
    #[serde(alias = "image-format")]
    pub image_format: Option<ImageFormat>,
    #[serde(alias = "open-viewer")]
    pub open_viewer: Option<bool>,

    // Logging
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let build = BuildOptions::default();
        let fallback = FallbackOptions::default();
        let layout = LayoutConfig::default();
        let render = RenderConfig::default();
        Self {
            input: Some(PathBuf::from(DEFAULT_INPUT)),
            output: Some(PathBuf::from(DEFAULT_OUTPUT)),
            max_depth: Some(build.max_depth),
            extra_important_names: None,
            extra_root_names: None,
            fallback_root_name: Some(fallback.root_name),
            fallback_children: Some(fallback.max_children),
            small_graph_threshold: Some(layout.small_graph_threshold),
            level_spacing_x: Some(layout.level_spacing_x),
            level_spacing_y: Some(layout.level_spacing_y),
            spring_k: Some(layout.spring_k),
            spring_iterations: Some(layout.spring_iterations),
            spring_seed: Some(layout.spring_seed),
            figure_width_in: Some(render.figure_width_in),
            figure_height_in: Some(render.figure_height_in),
            dpi: Some(render.dpi),
            image_format: None,
            open_viewer: Some(false),
            log_level: Some("warn".into()),
        }
    }
}

impl Config {
    pub fn input_path(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Stage options with unset values taken from the library defaults.
    pub fn pipeline_options(&self) -> PipelineOptions {
        let build = BuildOptions::default();
        let fallback = FallbackOptions::default();
        let layout = LayoutConfig::default();

        PipelineOptions {
            build: BuildOptions {
                max_depth: self.max_depth.unwrap_or(build.max_depth),
            },
            fallback: FallbackOptions {
                root_name: self
                    .fallback_root_name
                    .clone()
                    .unwrap_or(fallback.root_name),
                max_children: self.fallback_children.unwrap_or(fallback.max_children),
            },
            layout: LayoutConfig {
                small_graph_threshold: self
                    .small_graph_threshold
                    .unwrap_or(layout.small_graph_threshold),
                level_spacing_x: self.level_spacing_x.unwrap_or(layout.level_spacing_x),
                level_spacing_y: self.level_spacing_y.unwrap_or(layout.level_spacing_y),
                spring_k: self.spring_k.unwrap_or(layout.spring_k),
                spring_iterations: self.spring_iterations.unwrap_or(layout.spring_iterations),
                spring_seed: self.spring_seed.unwrap_or(layout.spring_seed),
            },
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        let render = RenderConfig::default();
        RenderConfig {
            figure_width_in: self.figure_width_in.unwrap_or(render.figure_width_in),
            figure_height_in: self.figure_height_in.unwrap_or(render.figure_height_in),
            dpi: self.dpi.unwrap_or(render.dpi),
            format: self
                .image_format
                .unwrap_or_else(|| ImageFormat::from_path(&self.output_path())),
        }
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::with_extra(
            self.extra_important_names.as_deref().unwrap_or_default(),
            self.extra_root_names.as_deref().unwrap_or_default(),
        )
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    cfg.pipeline_options().layout.validate()?;
    cfg.render_config().validate()?;

    if cfg
        .fallback_root_name
        .as_deref()
        .is_some_and(|n| n.trim().is_empty())
    {
        return Err("fallback_root_name must not be empty".into());
    }

    if let Some(level) = cfg.log_level.as_deref() {
        match level.to_ascii_lowercase().as_str() {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(format!(
                    "Invalid log_level '{}', expected off/error/warn/info/debug/trace",
                    other
                )
                .into());
            }
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(input) = &args.input {
        config.input = Some(input.clone());
    }
    if let Some(output) = &args.output {
        config.output = Some(output.clone());
    }
    if let Some(depth) = args.max_depth {
        config.max_depth = Some(depth);
    }
    if let Some(dpi) = args.dpi {
        config.dpi = Some(dpi);
    }
    if let Some(format) = &args.format {
        config.image_format = Some(format.into());
    }
    if let Some(seed) = args.seed {
        config.spring_seed = Some(seed);
    }
    if args.open {
        config.open_viewer = Some(true);
    }
    if let Some(level) = &args.log_level {
        config.log_level = Some(level.as_str().to_string());
    }

    Ok(config)
}

/// Enhanced configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(format!("Config file not found: {}", p.display()).into());
            }
            p.to_path_buf()
        }
        None => {
            // Try default locations
            let defaults = [
                "./pstree-graph.yaml",
                "./pstree-graph.yml",
                "./pstree-graph.json",
                "./pstree-graph.toml",
            ];

            match defaults.iter().find(|p| Path::new(p).exists()) {
                Some(p) => PathBuf::from(p),
                None => return Ok(Config::default()),
            }
        }
    };

    let content = fs::read_to_string(&path)?;
    let config = parse_config(&content, &path)?;
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}

/// Parses config content, choosing the format by file extension (YAML default).
///
/// Keys missing from the file fall back to the defaults.
pub fn parse_config(content: &str, path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let partial: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(content)?,
        Some("toml") => toml::from_str(content)?,
        _ => serde_yaml::from_str(content)?,
    };
    Ok(partial.merged_over(Config::default()))
}

impl Config {
    /// Fills every unset field from `base`.
    fn merged_over(self, base: Config) -> Config {
        Config {
            input: self.input.or(base.input),
            output: self.output.or(base.output),
            max_depth: self.max_depth.or(base.max_depth),
            extra_important_names: self.extra_important_names.or(base.extra_important_names),
            extra_root_names: self.extra_root_names.or(base.extra_root_names),
            fallback_root_name: self.fallback_root_name.or(base.fallback_root_name),
            fallback_children: self.fallback_children.or(base.fallback_children),
            small_graph_threshold: self.small_graph_threshold.or(base.small_graph_threshold),
            level_spacing_x: self.level_spacing_x.or(base.level_spacing_x),
            level_spacing_y: self.level_spacing_y.or(base.level_spacing_y),
            spring_k: self.spring_k.or(base.spring_k),
            spring_iterations: self.spring_iterations.or(base.spring_iterations),
            spring_seed: self.spring_seed.or(base.spring_seed),
            figure_width_in: self.figure_width_in.or(base.figure_width_in),
            figure_height_in: self.figure_height_in.or(base.figure_height_in),
            dpi: self.dpi.or(base.dpi),
            image_format: self.image_format.or(base.image_format),
            open_viewer: self.open_viewer.or(base.open_viewer),
            log_level: self.log_level.or(base.log_level),
        }
    }
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serialize_config(config, format)?);
    Ok(())
}

pub fn serialize_config(
    config: &Config,
    format: ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}
