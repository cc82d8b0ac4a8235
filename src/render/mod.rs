mod frame;
mod null_renderer;
mod primitives;

pub use frame::{DrawCommand, DrawLayer, Primitive, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PolylinePrimitive, RectPrimitive, TextFont, TextHAlign, TextPrimitive,
    TextVAlign,
};

use crate::error::GraphResult;

/// Contract implemented by any drawing surface.
///
/// Backends receive a fully materialized, deterministic `RenderFrame`: they
/// resize and clear the surface to `frame.viewport`, then paint the commands
/// in order. Surface failures must be returned, never swallowed.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
