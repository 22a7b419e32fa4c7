//! CrossLine Render Library
//!
//! Renderer abstraction and an SVG implementation that turns store
//! snapshots into frames.

mod renderer;
mod svg;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;
