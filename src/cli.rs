//! CLI arguments and subcommands for pstree-graph.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use pstree_graph::ImageFormat;
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Image encoding for the rendered figure
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl From<&OutputFormat> for ImageFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Svg => ImageFormat::Svg,
        }
    }
}

/// Name list selector for the `names` subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NameClass {
    Important,
    Root,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "pstree-graph",
    about = "Render the important part of a process tree snapshot as a graph",
    long_about = "Render the important part of a process tree snapshot as a graph.\n\n\
                  Reads a JSON process tree, keeps well-known applications and the OS \
                  processes they hang off, and draws the result as a layered PNG figure \
                  followed by a short text summary.",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Process tree snapshot (JSON)
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Output image (PNG unless --format svg or a .svg path)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output image encoding
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log level (overrides the config file; default warn)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Deepest tree level (roots are 0) that may appear in the graph
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Output resolution in dots per inch
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Seed for the spring layout of large graphs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Open the rendered image in the system viewer
    #[arg(long)]
    pub open: bool,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect a snapshot without rendering
    Check {
        /// Also list every included process
        #[arg(long)]
        verbose: bool,
    },

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },

    /// List the process names that are kept in the graph
    Names {
        /// Show only one list
        #[arg(long, value_enum)]
        class: Option<NameClass>,

        /// Mark names that come from the configuration
        #[arg(long)]
        verbose: bool,
    },

    /// Generate a synthetic process tree snapshot
    GenerateTestdata {
        /// Output file path
        #[arg(short = 'o', long, default_value = "pstree.json")]
        output: PathBuf,

        /// Number of root records besides "System"
        #[arg(long, default_value_t = 2)]
        roots: usize,

        /// Maximum children per record
        #[arg(long, default_value_t = 4)]
        max_children: usize,

        /// Depth of the generated trees
        #[arg(long, default_value_t = 5)]
        depth: usize,

        /// Random seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}
