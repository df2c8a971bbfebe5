use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{TextreelError, TextreelResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::render::composite::over_in_place;
use crate::render::frame::FrameRGBA;

/// Full-canvas image composited over every frame of a timeline (logo, watermark).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    canvas: Canvas,
    rgba8_premul: Vec<u8>,
}

impl Overlay {
    /// Stretch a decoded image to `canvas` and premultiply it.
    pub fn from_image(img: &image::DynamicImage, canvas: Canvas) -> Self {
        let rgba = img.to_rgba8();
        let rgba = if rgba.dimensions() == (canvas.width, canvas.height) {
            rgba
        } else {
            image::imageops::resize(
                &rgba,
                canvas.width,
                canvas.height,
                image::imageops::FilterType::Lanczos3,
            )
        };
        let mut rgba8_premul = rgba.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            canvas,
            rgba8_premul,
        }
    }

    /// Decode an image file.
    pub fn load(path: &Path, canvas: Canvas) -> TextreelResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            TextreelError::resource(format!("read overlay '{}': {e}", path.display()))
        })?;
        let img = image::load_from_memory(&bytes)
            .with_context(|| format!("decode overlay '{}'", path.display()))?;
        Ok(Self::from_image(&img, canvas))
    }

    /// Load the overlay if it is usable; a missing file is a warning, anything else an error.
    /// Either way the run continues without it.
    pub fn load_optional(path: &Path, canvas: Canvas) -> Option<Self> {
        if !path.exists() {
            tracing::warn!(overlay = %path.display(), "overlay image not found, skipping");
            return None;
        }
        match Self::load(path, canvas) {
            Ok(overlay) => {
                tracing::info!(overlay = %path.display(), "overlay loaded");
                Some(overlay)
            }
            Err(err) => {
                tracing::error!(overlay = %path.display(), error = %err, "overlay unusable, skipping");
                None
            }
        }
    }

    /// Composite onto `frame`.
    pub fn apply(&self, frame: &mut FrameRGBA) -> TextreelResult<()> {
        if frame.canvas() != self.canvas {
            return Err(TextreelError::render(format!(
                "overlay is {}x{} but frame is {}x{}",
                self.canvas.width, self.canvas.height, frame.width, frame.height
            )));
        }
        over_in_place(&mut frame.data, &self.rgba8_premul, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/overlay.rs"]
mod tests;
