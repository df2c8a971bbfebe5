use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{TextreelError, TextreelResult};
use crate::render::frame::FrameRGBA;

/// Immediate-mode `vello_cpu` painter for one transparent layer.
///
/// Draw calls are recorded in order and rasterized by [`CpuPainter::finish`] into a
/// premultiplied [`FrameRGBA`].
pub struct CpuPainter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl CpuPainter {
    /// Start an empty layer covering `canvas`.
    pub fn new(canvas: Canvas) -> TextreelResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| TextreelError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| TextreelError::render("canvas height exceeds u16"))?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    /// Fill an axis-aligned rectangle, scaled by `opacity`.
    pub fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgba8, opacity: f32) {
        if opacity <= 0.0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
    }

    /// Fill shaped glyphs whose coordinates are relative to `origin`.
    pub fn fill_glyphs(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        size_px: f32,
        glyphs: &[vello_cpu::Glyph],
        origin: kurbo::Point,
        color: Rgba8,
    ) {
        if glyphs.is_empty() {
            return;
        }
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx
            .glyph_run(font)
            .font_size(size_px)
            .fill_glyphs(glyphs.iter().cloned());
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
