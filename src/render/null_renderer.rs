use crate::core::Viewport;
use crate::error::GraphResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless graph usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_viewport: Option<Viewport>,
    pub last_command_count: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub last_polyline_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_viewport = Some(frame.viewport);
        self.last_command_count = frame.commands().len();
        self.last_line_count = frame.lines().count();
        self.last_text_count = frame.texts().count();
        self.last_polyline_count = frame.polylines().count();
        Ok(())
    }
}
