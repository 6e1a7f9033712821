use crate::error::TrendResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests catch unsorted datasets or an
/// inverted axis before a real backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_dataset_count: usize,
    pub last_point_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TrendResult<()> {
        frame.validate()?;
        self.last_dataset_count = frame.datasets.len();
        self.last_point_count = frame.point_count();
        self.frames_rendered += 1;
        Ok(())
    }
}
