//! Renderer trait abstraction.

use crossline_core::Snapshot;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::fmt::Error> for RendererError {
    fn from(err: std::fmt::Error) -> Self {
        RendererError::RenderFailed(err.to_string())
    }
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The state to draw.
    pub snapshot: &'a Snapshot,
    /// Viewport size.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Segment stroke color.
    pub stroke_color: Color,
    /// Segment stroke width.
    pub stroke_width: f64,
    /// Fill of permanent intersection markers.
    pub marker_color: Color,
    /// Fill of markers for the segment being drawn.
    pub live_marker_color: Color,
    /// Marker radius.
    pub marker_radius: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context: white background, black 1px strokes
    /// and red markers of radius 4.
    pub fn new(snapshot: &'a Snapshot, viewport_size: Size) -> Self {
        let red = Color::from_rgba8(255, 0, 0, 255);
        Self {
            snapshot,
            viewport_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            stroke_color: Color::from_rgba8(0, 0, 0, 255),
            stroke_width: 1.0,
            marker_color: red,
            live_marker_color: red,
            marker_radius: 4.0,
        }
    }

    /// Set the marker colors.
    pub fn with_markers(mut self, permanent: Color, live: Color) -> Self {
        self.marker_color = permanent;
        self.live_marker_color = live;
        self
    }

    /// Set the marker radius.
    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the output for one frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
