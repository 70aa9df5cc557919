mod frame;
mod null_renderer;
mod primitives;

pub use frame::{DrawCommand, FrameStats, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    ArcPrimitive, Color, CurvePrimitive, Hsv, LinePrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, ordered `RenderFrame`, so drawing
/// code stays isolated from layout, selection and weight logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderer};
