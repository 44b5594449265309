//! Figure of the filtered process graph, as PNG or SVG.
//!
//! Layout coordinates are fitted into the canvas below the title band; the
//! y axis is flipped so that deeper levels end up lower on the page. The same
//! drawing code runs against either plotters backend.

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, TextStyle};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::{fonts, ImageFormat, RenderConfig};
use crate::error::{PstreeError, Result};
use crate::graph::ProcessGraph;
use crate::layout::{Layout, Position};
use crate::process::{node_label, Importance};

pub const TITLE: &str = "Most Important System Processes";
pub const LEGEND_IMPORTANT: &str = "Important applications";
pub const LEGEND_SYSTEM: &str = "System processes";

const IMPORTANT_COLOR: RGBColor = RGBColor(144, 238, 144);
const SYSTEM_COLOR: RGBColor = RGBColor(173, 216, 230);
const EDGE_COLOR: RGBColor = RGBColor(169, 169, 169);

// Sizes in points
const NODE_RADIUS_PT: f64 = 31.0;
const LABEL_PT: f64 = 8.0;
const TITLE_PT: f64 = 14.0;
const LEGEND_PT: f64 = 10.0;
const CAPTION_PT: f64 = 8.0;
const ARROW_PT: f64 = 10.0;

fn render_err<E: std::fmt::Display>(e: E) -> PstreeError {
    PstreeError::Render(e.to_string())
}

fn font(size_px: f64, style: FontStyle) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size_px, style)
}

pub fn caption_text(node_count: usize) -> String {
    format!("Showing {} most relevant processes", node_count)
}

/// Maps layout coordinates to pixels inside the plot region.
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    min: Position,
    max: Position,
}

impl Frame {
    fn new(layout: &Layout, config: &RenderConfig) -> Self {
        let (width, height) = config.canvas_size();
        let (width, height) = (width as f64, height as f64);
        let radius = config.pt(NODE_RADIUS_PT);
        let title_band = config.pt(TITLE_PT) * 3.0;
        let caption_band = config.pt(CAPTION_PT) * 3.0;
        let origin = Position::new(0.0, 0.0);
        let (min, max) = layout.bounds().unwrap_or((origin, origin));

        Self {
            left: radius * 2.0,
            right: (width - radius * 2.0).max(radius * 2.0),
            top: title_band + radius * 1.5,
            bottom: (height - caption_band - radius * 1.5).max(title_band + radius * 1.5),
            min,
            max,
        }
    }

    fn map(&self, p: Position) -> (f64, f64) {
        let axis = |v: f64, lo: f64, hi: f64, from: f64, to: f64| {
            if hi - lo < f64::EPSILON {
                (from + to) / 2.0
            } else {
                from + (v - lo) / (hi - lo) * (to - from)
            }
        };
        (
            axis(p.x, self.min.x, self.max.x, self.left, self.right),
            // flipped: max.y maps to the top
            axis(p.y, self.min.y, self.max.y, self.bottom, self.top),
        )
    }
}

fn px(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

/// Renders the figure into an SVG document string, whatever `config.format` says.
pub fn render_to_string(
    graph: &ProcessGraph,
    layout: &Layout,
    config: &RenderConfig,
) -> Result<String> {
    config.validate()?;
    fonts::ensure_registered()?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, config.canvas_size()).into_drawing_area();
        draw_figure(&root, graph, layout, config)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Renders the figure in `config.format` and writes it to `path`.
pub fn render_to_file(
    graph: &ProcessGraph,
    layout: &Layout,
    config: &RenderConfig,
    path: &Path,
) -> Result<()> {
    match config.format {
        ImageFormat::Svg => {
            let svg = render_to_string(graph, layout, config)?;
            fs::write(path, svg).map_err(|source| PstreeError::WriteOutput {
                path: path.to_path_buf(),
                source,
            })?;
        }
        ImageFormat::Png => render_png(graph, layout, config, path)?,
    }
    let (w, h) = config.canvas_size();
    info!(
        "Graph written to {} ({}x{} px, {:?})",
        path.display(),
        w,
        h,
        config.format
    );
    Ok(())
}

fn render_png(
    graph: &ProcessGraph,
    layout: &Layout,
    config: &RenderConfig,
    path: &Path,
) -> Result<()> {
    config.validate()?;
    fonts::ensure_registered()?;
    let root = BitMapBackend::new(path, config.canvas_size()).into_drawing_area();
    draw_figure(&root, graph, layout, config)?;
    root.present()
        .map_err(|e| render_err(format!("cannot write {}: {}", path.display(), e)))
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    graph: &ProcessGraph,
    layout: &Layout,
    config: &RenderConfig,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;
    let frame = Frame::new(layout, config);

    let mut arrows = 0;
    for edge in graph.edges() {
        if let (Some(from), Some(to)) = (layout.position(edge.parent), layout.position(edge.child))
        {
            draw_arrow(root, frame.map(from), frame.map(to), config)?;
            arrows += 1;
        }
    }

    let mut drawn = 0;
    for node in graph.nodes() {
        let Some(pos) = layout.position(node.pid) else {
            continue;
        };
        draw_node(root, frame.map(pos), &node.name, node.pid, node.importance, config)?;
        drawn += 1;
    }
    debug!("Drew {} nodes and {} arrows", drawn, arrows);

    draw_title(root, config)?;
    if graph.count(Importance::VeryImportant) > 0 {
        draw_legend(root, config)?;
    }
    draw_caption(root, graph.len(), config)?;
    Ok(())
}

fn draw_arrow<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    from: (f64, f64),
    to: (f64, f64),
    config: &RenderConfig,
) -> Result<()> {
    let radius = config.pt(NODE_RADIUS_PT);
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length <= radius * 2.0 {
        // circles overlap, nothing visible to connect
        return Ok(());
    }
    let (ux, uy) = (dx / length, dy / length);

    let head = config.pt(ARROW_PT);
    let half = head * 0.4;
    let start = (from.0 + ux * radius, from.1 + uy * radius);
    let tip = (to.0 - ux * radius, to.1 - uy * radius);
    let base = (tip.0 - ux * head, tip.1 - uy * head);

    let shaft = EDGE_COLOR.mix(0.8).stroke_width(config.pt(2.0).round().max(1.0) as u32);
    root.draw(&PathElement::new(vec![px(start), px(base)], shaft))
        .map_err(render_err)?;
    root.draw(&Polygon::new(
        vec![
            px(tip),
            px((base.0 - uy * half, base.1 + ux * half)),
            px((base.0 + uy * half, base.1 - ux * half)),
        ],
        EDGE_COLOR.mix(0.8).filled(),
    ))
    .map_err(render_err)?;
    Ok(())
}

fn draw_node<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    center: (f64, f64),
    name: &str,
    pid: u32,
    importance: Importance,
    config: &RenderConfig,
) -> Result<()> {
    let radius = config.pt(NODE_RADIUS_PT).round() as i32;
    let fill = match importance {
        Importance::VeryImportant => IMPORTANT_COLOR,
        _ => SYSTEM_COLOR,
    };
    let c = px(center);

    root.draw(&Circle::new(c, radius, fill.mix(0.9).filled()))
        .map_err(render_err)?;
    let outline = config.pt(1.0).round().max(1.0) as u32;
    root.draw(&Circle::new(c, radius, BLACK.stroke_width(outline)))
        .map_err(render_err)?;

    let (title, pid_line) = node_label(name, pid);
    let size = config.pt(LABEL_PT);
    let style = TextStyle::from(font(size, FontStyle::Bold)).pos(Pos::new(HPos::Center, VPos::Center));
    let offset = (size * 0.6).round() as i32;
    root.draw(&Text::new(title, (c.0, c.1 - offset), style.clone()))
        .map_err(render_err)?;
    root.draw(&Text::new(pid_line, (c.0, c.1 + offset), style))
        .map_err(render_err)?;
    Ok(())
}

fn draw_title<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, config: &RenderConfig) -> Result<()> {
    let (width, _) = config.canvas_size();
    let style = TextStyle::from(font(config.pt(TITLE_PT), FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Center));
    let y = (config.pt(TITLE_PT) * 1.5).round() as i32;
    root.draw(&Text::new(TITLE, ((width / 2) as i32, y), style))
        .map_err(render_err)?;
    Ok(())
}

fn draw_legend<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, config: &RenderConfig) -> Result<()> {
    let (width, _) = config.canvas_size();
    let size = config.pt(LEGEND_PT);
    let pad = config.pt(6.0);
    let box_w = config.pt(170.0);
    let row_h = size * 1.6;

    let x1 = width as f64 - pad;
    let x0 = x1 - box_w;
    let y0 = config.pt(TITLE_PT) * 3.0;
    let y1 = y0 + row_h * 2.0 + pad;

    root.draw(&Rectangle::new([px((x0, y0)), px((x1, y1))], WHITE.filled()))
        .map_err(render_err)?;
    root.draw(&Rectangle::new(
        [px((x0, y0)), px((x1, y1))],
        BLACK.mix(0.3).stroke_width(1),
    ))
    .map_err(render_err)?;

    let style = TextStyle::from(font(size, FontStyle::Normal)).pos(Pos::new(HPos::Left, VPos::Center));
    let entries = [
        (IMPORTANT_COLOR, LEGEND_IMPORTANT),
        (SYSTEM_COLOR, LEGEND_SYSTEM),
    ];
    for (i, (color, label)) in entries.into_iter().enumerate() {
        let y = y0 + pad / 2.0 + row_h * (i as f64 + 0.5);
        let marker = px((x0 + pad + size / 2.0, y));
        root.draw(&Circle::new(marker, (size / 2.0).round() as i32, color.filled()))
            .map_err(render_err)?;
        root.draw(&Text::new(label, px((x0 + pad * 2.0 + size, y)), style.clone()))
            .map_err(render_err)?;
    }
    Ok(())
}

fn draw_caption<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    node_count: usize,
    config: &RenderConfig,
) -> Result<()> {
    let (width, height) = config.canvas_size();
    let style = TextStyle::from(font(config.pt(CAPTION_PT), FontStyle::Italic))
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    let anchor = px((width as f64 * 0.02, height as f64 * 0.98));
    root.draw(&Text::new(caption_text(node_count), anchor, style))
        .map_err(render_err)?;
    Ok(())
}
