//! End-to-end run: filter, fallback, roots and layout.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::graph::{
    build_subgraph, find_roots, populate_fallback, BuildOptions, FallbackOptions, ProcessGraph,
};
use crate::layout::{compute_layout, Layout, LayoutConfig};
use crate::process::Classifier;
use crate::render::{render_to_file, RenderConfig, Summary};
use crate::tree::{load_forest, ProcessRecord};

/// Options for every stage before rendering.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub build: BuildOptions,
    pub fallback: FallbackOptions,
    pub layout: LayoutConfig,
}

/// Everything a run produced, ready to render or inspect.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub graph: ProcessGraph,
    pub roots: Vec<u32>,
    pub layout: Layout,
    /// Whether the "System" fallback replaced an empty result.
    pub fallback_used: bool,
    pub summary: Summary,
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    classifier: Classifier,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(classifier: Classifier, options: PipelineOptions) -> Self {
        Self {
            classifier,
            options,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Runs every stage up to and including layout.
    pub fn run(&self, forest: &[ProcessRecord]) -> Result<PipelineReport> {
        self.options.layout.validate()?;

        let mut graph = build_subgraph(forest, &self.classifier, &self.options.build);
        let mut fallback_used = false;
        if graph.is_empty() {
            warn!("No important processes found, showing basic system structure");
            graph = populate_fallback(forest, &self.classifier, &self.options.fallback);
            fallback_used = true;
        }

        let roots = find_roots(&graph);
        info!("Important nodes: {}, roots: {}", graph.len(), roots.len());
        debug!("Roots: {:?}", roots);

        let layout = compute_layout(&graph, &roots, &self.options.layout);
        let summary = Summary::from_graph(&graph);

        Ok(PipelineReport {
            graph,
            roots,
            layout,
            fallback_used,
            summary,
        })
    }

    /// Loads a snapshot file and runs it.
    pub fn run_file(&self, input: &Path) -> Result<PipelineReport> {
        let forest = load_forest(input)?;
        self.run(&forest)
    }
}

impl PipelineReport {
    /// Writes the figure for this report.
    pub fn render(&self, config: &RenderConfig, output: &Path) -> Result<()> {
        render_to_file(&self.graph, &self.layout, config, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutKind;

    #[test]
    fn test_fallback_only_when_empty() {
        let forest = vec![ProcessRecord::new(4, "System")
            .with_children(vec![ProcessRecord::new(8, "a.exe"), ProcessRecord::new(9, "b.exe")])];
        let report = Pipeline::default().run(&forest).unwrap();
        // System itself is root-essential, so no fallback
        assert!(!report.fallback_used);
        assert_eq!(report.graph.len(), 1);

        let forest = vec![ProcessRecord::new(1, "init")];
        let report = Pipeline::default().run(&forest).unwrap();
        assert!(report.fallback_used);
        assert!(report.graph.is_empty());
        assert!(report.roots.is_empty());
        assert_eq!(report.layout.placed_count(), 0);
    }

    #[test]
    fn test_invalid_layout_config_rejected() {
        let mut options = PipelineOptions::default();
        options.layout.small_graph_threshold = 0;
        let pipeline = Pipeline::new(Classifier::builtin(), options);
        assert!(pipeline.run(&[]).is_err());
    }

    #[test]
    fn test_dangling_important_process_becomes_root() {
        let forest = vec![ProcessRecord::new(4, "System").with_children(vec![
            ProcessRecord::new(700, "svchost.exe")
                .with_children(vec![ProcessRecord::new(701, "teams.exe")]),
        ])];
        let report = Pipeline::default().run(&forest).unwrap();

        assert_eq!(report.roots, [4, 701]);
        assert_eq!(report.layout.kind, LayoutKind::Leveled);
        assert_eq!(report.layout.level(701), Some(0));
        assert!(report.layout.unplaced.is_empty());
    }
}
