use std::sync::Arc;

use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8};
use crate::render::frame::FrameRGBA;
use crate::timeline::clip::FrameSource;
use crate::timeline::overlay::Overlay;

/// Clips laid end to end with an optional overlay on top.
///
/// Frame rendering never fails: a clip error is logged and replaced by a background frame, so
/// the output stays time-aligned.
pub struct Timeline {
    canvas: Canvas,
    fps: Fps,
    background: Rgba8,
    clips: Vec<Box<dyn FrameSource>>,
    starts: Vec<u64>,
    total_frames: u64,
    overlay: Option<Arc<Overlay>>,
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("canvas", &self.canvas)
            .field("fps", &self.fps)
            .field("clips", &self.clips.len())
            .field("total_frames", &self.total_frames)
            .field("overlay", &self.overlay.is_some())
            .finish()
    }
}

impl Timeline {
    /// Empty timeline.
    pub fn new(canvas: Canvas, fps: Fps, background: Rgba8) -> Self {
        Self {
            canvas,
            fps,
            background,
            clips: Vec::new(),
            starts: Vec::new(),
            total_frames: 0,
            overlay: None,
        }
    }

    /// Append a clip after the current end.
    pub fn push(&mut self, clip: Box<dyn FrameSource>) {
        self.starts.push(self.total_frames);
        self.total_frames += clip.frame_count();
        self.clips.push(clip);
    }

    /// Composite `overlay` over every frame.
    pub fn set_overlay(&mut self, overlay: Option<Arc<Overlay>>) {
        self.overlay = overlay;
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Sum of all clip lengths.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Whether an overlay is attached.
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// `(label, range)` of every clip in order.
    pub fn segments(&self) -> Vec<(&str, FrameRange)> {
        self.clips
            .iter()
            .zip(&self.starts)
            .map(|(clip, &start)| {
                let range = FrameRange {
                    start: FrameIndex(start),
                    end: FrameIndex(start + clip.frame_count()),
                };
                (clip.label(), range)
            })
            .collect()
    }

    fn locate(&self, frame: FrameIndex) -> Option<(&dyn FrameSource, FrameIndex)> {
        let idx = match self.starts.binary_search(&frame.0) {
            Ok(i) => {
                // Zero-length clips share a start with their successor; take the last one.
                let mut i = i;
                while i + 1 < self.starts.len() && self.starts[i + 1] == frame.0 {
                    i += 1;
                }
                i
            }
            Err(0) => return None,
            Err(i) => i - 1,
        };
        let clip = self.clips.get(idx)?;
        Some((clip.as_ref(), FrameIndex(frame.0 - self.starts[idx])))
    }

    /// Render global `frame`; frames past the end repeat the last clip's final state.
    pub fn render_frame(&self, frame: FrameIndex) -> FrameRGBA {
        let mut out = match self.locate(frame) {
            Some((clip, local)) => match clip.render_frame(local) {
                Ok(f) if f.canvas() == self.canvas => f,
                Ok(f) => {
                    tracing::warn!(
                        clip = clip.label(),
                        frame = frame.0,
                        width = f.width,
                        height = f.height,
                        "clip frame has wrong size, substituting background"
                    );
                    FrameRGBA::solid(self.canvas, self.background)
                }
                Err(err) => {
                    tracing::warn!(
                        clip = clip.label(),
                        frame = frame.0,
                        error = %err,
                        "clip frame failed, substituting background"
                    );
                    FrameRGBA::solid(self.canvas, self.background)
                }
            },
            None => FrameRGBA::solid(self.canvas, self.background),
        };

        if let Some(overlay) = &self.overlay
            && let Err(err) = overlay.apply(&mut out)
        {
            tracing::warn!(frame = frame.0, error = %err, "overlay composite failed");
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequence.rs"]
mod tests;
