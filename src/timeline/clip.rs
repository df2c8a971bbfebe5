use crate::foundation::core::{Canvas, FrameIndex, Rgba8};
use crate::foundation::error::TextreelResult;
use crate::render::frame::FrameRGBA;

/// A fixed-length run of frames addressed by clip-local index.
///
/// Frame indices at or past [`FrameSource::frame_count`] must render the final state.
pub trait FrameSource {
    /// Short name used in logs.
    fn label(&self) -> &str;

    /// Number of frames the clip occupies on the timeline.
    fn frame_count(&self) -> u64;

    /// Render one opaque frame.
    fn render_frame(&self, frame: FrameIndex) -> TextreelResult<FrameRGBA>;
}

/// Solid background for a fixed number of frames (separators, trailing hold).
#[derive(Clone, Debug)]
pub struct HoldClip {
    label: String,
    frame: FrameRGBA,
    frames: u64,
}

impl HoldClip {
    /// Hold `color` for `frames` frames.
    pub fn new(label: impl Into<String>, canvas: Canvas, color: Rgba8, frames: u64) -> Self {
        Self {
            label: label.into(),
            frame: FrameRGBA::solid(canvas, color),
            frames,
        }
    }
}

impl FrameSource for HoldClip {
    fn label(&self) -> &str {
        &self.label
    }

    fn frame_count(&self) -> u64 {
        self.frames
    }

    fn render_frame(&self, _frame: FrameIndex) -> TextreelResult<FrameRGBA> {
        Ok(self.frame.clone())
    }
}
