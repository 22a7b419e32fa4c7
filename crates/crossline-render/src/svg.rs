//! SVG renderer.

use crate::renderer::{RenderContext, RenderResult, Renderer};
use crossline_core::{Snapshot, Surface};
use kurbo::{Line, Point, Shape, Size};
use peniko::Color;
use std::fmt::Write as _;
use std::path::Path;

/// Flattening tolerance for paths. Segments are straight, so any value works.
const PATH_TOLERANCE: f64 = 0.1;

/// Renders snapshots into standalone SVG documents.
///
/// Keeps only the most recent frame.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    size: Size,
    marker_radius: f64,
    live_marker_color: Option<Color>,
    frame: String,
    frame_count: usize,
}

impl SvgRenderer {
    /// Create a renderer for a viewport of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            marker_radius: 4.0,
            live_marker_color: None,
            frame: String::new(),
            frame_count: 0,
        }
    }

    /// Set the marker radius.
    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    /// Draw markers of the open segment in a different color.
    pub fn with_live_marker_color(mut self, color: Color) -> Self {
        self.live_marker_color = Some(color);
        self
    }

    /// The most recent frame, empty before the first render.
    pub fn last_frame(&self) -> &str {
        &self.frame
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Render a snapshot with this renderer's settings.
    pub fn render(&mut self, snapshot: &Snapshot) -> RenderResult<()> {
        let ctx = self.context(snapshot);
        self.build_scene(&ctx)
    }

    /// Write the most recent frame to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        std::fs::write(path.as_ref(), &self.frame)?;
        log::debug!("Wrote frame {} to {}", self.frame_count, path.as_ref().display());
        Ok(())
    }

    fn context<'a>(&self, snapshot: &'a Snapshot) -> RenderContext<'a> {
        let ctx = RenderContext::new(snapshot, self.size).with_marker_radius(self.marker_radius);
        match self.live_marker_color {
            Some(live) => {
                let permanent = ctx.marker_color;
                ctx.with_markers(permanent, live)
            }
            None => ctx,
        }
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let mut out = String::new();
        let (width, height) = (ctx.viewport_size.width, ctx.viewport_size.height);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;

        let (fill, opacity) = svg_color(self.background_color(ctx));
        writeln!(
            out,
            r#"  <rect width="100%" height="100%" fill="{fill}" fill-opacity="{opacity}"/>"#
        )?;

        let (stroke, opacity) = svg_color(ctx.stroke_color);
        for segment in &ctx.snapshot.segments {
            let path = Line::new(segment.from, segment.to).to_path(PATH_TOLERANCE);
            writeln!(
                out,
                r#"  <path d="{}" stroke="{stroke}" stroke-opacity="{opacity}" stroke-width="{}" fill="none"/>"#,
                path.to_svg(),
                ctx.stroke_width
            )?;
        }

        write_markers(&mut out, &ctx.snapshot.intersections, ctx.marker_color, ctx.marker_radius)?;
        write_markers(
            &mut out,
            &ctx.snapshot.live_intersections,
            ctx.live_marker_color,
            ctx.marker_radius,
        )?;

        out.push_str("</svg>\n");
        self.frame = out;
        self.frame_count += 1;
        Ok(())
    }
}

impl Surface for SvgRenderer {
    fn redraw(&mut self, snapshot: &Snapshot) {
        if let Err(e) = self.render(snapshot) {
            log::error!("SVG render failed: {}", e);
        }
    }
}

fn write_markers(out: &mut String, points: &[Point], color: Color, radius: f64) -> RenderResult<()> {
    let (fill, opacity) = svg_color(color);
    for p in points {
        writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="{radius}" fill="{fill}" fill-opacity="{opacity}"/>"#,
            p.x, p.y
        )?;
    }
    Ok(())
}

/// Hex color and opacity for SVG attributes.
fn svg_color(color: Color) -> (String, f64) {
    let rgba = color.to_rgba8();
    (
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b),
        f64::from(rgba.a) / 255.0,
    )
}
