mod frame;
mod null_renderer;
mod primitives;

pub use frame::{
    AxisConfig, AxisTick, DecimationAlgorithm, DecimationDirective, RenderDataset, RenderFrame,
    RenderPoint,
};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, SeriesStyle};

use crate::error::TrendResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from aggregation and viewport logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> TrendResult<()>;
}
