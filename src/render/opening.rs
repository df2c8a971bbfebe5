use crate::config::settings::{HighlightBand, Palette, RenderConfig};
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::TextreelResult;
use crate::render::block::{ShapedBlock, wrap_paragraphs};
use crate::render::composite::{WipeMask, over_in_place};
use crate::render::cpu::CpuPainter;
use crate::render::frame::FrameRGBA;
use crate::render::layout::line_height;
use crate::render::reveal::WipeTiming;
use crate::text::shaper::{FontBook, TextShaper};
use crate::text::wrap::OrphanWords;
use crate::timeline::clip::FrameSource;

/// Title card: upper line, title and optional subtitle stacked around the vertical anchor, shown
/// after a blank lead-in and uncovered by a full-canvas wipe.
pub struct OpeningClip {
    canvas: Canvas,
    palette: Palette,
    band: HighlightBand,
    blocks: Vec<ShapedBlock>,
    lead_in_frames: u64,
    wipe: WipeTiming,
    frames: u64,
}

fn shape_role(
    text: &str,
    shaper: &mut TextShaper,
    cfg: &RenderConfig,
    top: impl FnOnce(f64) -> f64,
) -> Option<ShapedBlock> {
    if text.trim().is_empty() {
        return None;
    }
    let lines = wrap_paragraphs(text, shaper, &OrphanWords::default(), cfg.available_width());
    let lh = line_height(shaper.metrics(), &cfg.layout);
    let top = top(lines.len() as f64 * lh);
    Some(ShapedBlock::new(
        &lines,
        shaper,
        lh,
        cfg.layout.margin_left,
        top,
    ))
}

impl OpeningClip {
    /// Lay out the three title roles for a clip of `frames` frames.
    pub fn new(
        upper: &str,
        title: &str,
        subtitle: Option<&str>,
        fonts: &mut FontBook,
        cfg: &RenderConfig,
        frames: u64,
    ) -> Self {
        let anchor = f64::from(cfg.canvas.height) * cfg.layout.anchor_y;
        let opening = &cfg.opening;

        let title_block = shape_role(title, &mut fonts.title, cfg, |_| anchor);
        let title_bottom = title_block
            .as_ref()
            .map_or(anchor, |b| b.layout().top + b.layout().height());
        let upper_block = shape_role(upper, &mut fonts.upper, cfg, |h| {
            anchor - h - opening.upper_gap
        });
        let subtitle_block = subtitle.and_then(|s| {
            shape_role(s, &mut fonts.subtitle, cfg, |_| {
                title_bottom + opening.subtitle_gap
            })
        });

        let lead_in_frames = cfg.fps.secs_to_frames_floor(opening.static_secs).min(frames);
        let wipe = WipeTiming {
            frames: cfg
                .fps
                .secs_to_frames_floor(opening.wipe_secs)
                .min(frames - lead_in_frames),
            ease: opening.ease,
        };

        Self {
            canvas: cfg.canvas,
            palette: cfg.palette,
            band: cfg.highlight.clone(),
            blocks: [upper_block, title_block, subtitle_block]
                .into_iter()
                .flatten()
                .collect(),
            lead_in_frames,
            wipe,
            frames,
        }
    }

    /// Shaped blocks in drawing order (upper, title, subtitle), empty roles omitted.
    pub fn blocks(&self) -> &[ShapedBlock] {
        &self.blocks
    }
}

impl FrameSource for OpeningClip {
    fn label(&self) -> &str {
        "opening"
    }

    fn frame_count(&self) -> u64 {
        self.frames
    }

    fn render_frame(&self, frame: FrameIndex) -> TextreelResult<FrameRGBA> {
        let mut out = FrameRGBA::solid(self.canvas, self.palette.background);
        let frame = frame.0.min(self.frames);
        if frame < self.lead_in_frames {
            return Ok(out);
        }

        let mut painter = CpuPainter::new(self.canvas)?;
        for block in &self.blocks {
            block.draw_bands(&mut painter, &self.band, &self.palette);
            block.draw_text(&mut painter, &self.palette);
        }
        let mut layer = painter.finish();

        let local = frame - self.lead_in_frames;
        if let Some(cutoff_x) = self.wipe.cutoff(local, 0.0, f64::from(self.canvas.width)) {
            WipeMask {
                cutoff_x,
                step_px: self.band.soft_edge_step_px,
                opacities: &self.band.soft_edge_opacities,
            }
            .apply(&mut layer.data, layer.width)?;
        }

        over_in_place(&mut out.data, &layer.data, 1.0)?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/opening.rs"]
mod tests;
