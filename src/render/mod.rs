//! Figure rendering and the console summary.
//!
//! This module provides:
//! - `figure`: PNG or SVG drawing of nodes, arrows, labels, legend and caption
//! - `fonts`: embedded label fonts for the bitmap backend
//! - `summary`: per-node listing and class counts

pub mod figure;
mod fonts;
pub mod summary;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PstreeError, Result};
use crate::layout::is_positive;

pub use figure::{render_to_file, render_to_string};
pub use summary::Summary;

/// Encoding of the written figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// `.svg` paths get SVG, everything else PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }
}

/// Canvas parameters. Pixel size is inches times DPI.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub figure_width_in: f64,
    pub figure_height_in: f64,
    pub dpi: u32,
    pub format: ImageFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            figure_width_in: 16.0,
            figure_height_in: 10.0,
            dpi: 300,
            format: ImageFormat::Png,
        }
    }
}

impl RenderConfig {
    pub fn canvas_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.figure_width_in * dpi).round() as u32,
            (self.figure_height_in * dpi).round() as u32,
        )
    }

    /// Converts typographic points to pixels at the configured DPI.
    pub fn pt(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(PstreeError::InvalidConfig("dpi must be at least 1".into()));
        }
        if !is_positive(self.figure_width_in) || !is_positive(self.figure_height_in) {
            return Err(PstreeError::InvalidConfig(
                "figure_width_in and figure_height_in must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_from_inches() {
        let cfg = RenderConfig::default();
        assert_eq!(cfg.canvas_size(), (4800, 3000));
        assert!((cfg.pt(72.0) - 300.0).abs() < 1e-9);

        let cfg = RenderConfig {
            dpi: 100,
            ..RenderConfig::default()
        };
        assert_eq!(cfg.canvas_size(), (1600, 1000));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("out.svg")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("OUT.SVG")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("out.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("out")), ImageFormat::Png);
    }

    #[test]
    fn test_validate() {
        assert!(RenderConfig::default().validate().is_ok());
        let cfg = RenderConfig {
            dpi: 0,
            ..RenderConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = RenderConfig {
            figure_height_in: -1.0,
            ..RenderConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = RenderConfig {
            figure_width_in: f64::NAN,
            ..RenderConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
