use crate::animation::ease::frame_progress;
use crate::config::settings::{HighlightBand, Palette, RenderConfig};
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::TextreelResult;
use crate::render::composite::{WipeMask, over_in_place};
use crate::render::cpu::CpuPainter;
use crate::render::frame::FrameRGBA;
use crate::render::layout::{BlockLayout, anchored_top, line_height};
use crate::render::reveal::{RevealSchedule, RevealStrategy, sweep_fills};
use crate::text::markup::parse_markup;
use crate::text::shaper::TextShaper;
use crate::text::wrap::{Line, OrphanWords, WordWrapper};
use crate::timeline::clip::FrameSource;

/// Wrap marked-up `text` to `max_width`, keeping explicit newlines as hard breaks.
///
/// Blank paragraphs become empty lines.
pub fn wrap_paragraphs(
    text: &str,
    shaper: &mut TextShaper,
    orphans: &OrphanWords,
    max_width: f64,
) -> Vec<Line> {
    let wrapper = WordWrapper::new(max_width, orphans);
    let mut lines = Vec::new();
    for para in text.split('\n') {
        let wrapped = wrapper.wrap(&parse_markup(para), shaper);
        if wrapped.is_empty() {
            lines.push(Line::default());
        } else {
            lines.extend(wrapped);
        }
    }
    lines
}

/// A laid-out block with its glyphs shaped once, ready to draw at any frame.
pub struct ShapedBlock {
    layout: BlockLayout,
    glyphs: Vec<Vec<vello_cpu::Glyph>>,
    font: vello_cpu::peniko::FontData,
    size_px: f32,
}

impl ShapedBlock {
    /// Shape and place `lines` with `shaper`'s face.
    pub fn new(
        lines: &[Line],
        shaper: &mut TextShaper,
        line_height: f64,
        left: f64,
        top: f64,
    ) -> Self {
        let layout = BlockLayout::new(lines, shaper, line_height, left, top);
        let glyphs = layout
            .words
            .iter()
            .map(|w| shaper.shape(&w.word.text))
            .collect();
        Self {
            layout,
            glyphs,
            font: shaper.font().clone(),
            size_px: shaper.size_px(),
        }
    }

    /// Geometry of the block.
    pub fn layout(&self) -> &BlockLayout {
        &self.layout
    }

    /// Draw every word.
    pub fn draw_text(&self, painter: &mut CpuPainter, palette: &Palette) {
        for (word, glyphs) in self.layout.words.iter().zip(&self.glyphs) {
            let origin = kurbo::Point::new(word.x, self.layout.line_top(word.line_index));
            painter.fill_glyphs(&self.font, self.size_px, glyphs, origin, palette.text);
        }
    }

    /// Draw every highlight band at full width.
    pub fn draw_bands(&self, painter: &mut CpuPainter, band: &HighlightBand, palette: &Palette) {
        for run in &self.layout.runs {
            painter.fill_rect(self.layout.band_rect(run, band), palette.highlight, 1.0);
        }
    }

    /// Draw highlight bands filled to `fills` (one fraction per run), with a stepped soft edge on
    /// bands that are still filling.
    pub fn draw_band_fills(
        &self,
        painter: &mut CpuPainter,
        band: &HighlightBand,
        palette: &Palette,
        fills: &[f64],
    ) {
        for (run, &fill) in self.layout.runs.iter().zip(fills) {
            if fill <= 0.0 {
                continue;
            }
            let full = self.layout.band_rect(run, band);
            let edge = full.x0 + full.width() * fill.min(1.0);
            painter.fill_rect(full.with_size((edge - full.x0, full.height())), palette.highlight, 1.0);
            if fill >= 1.0 {
                continue;
            }
            for (step, &opacity) in band.soft_edge_opacities.iter().enumerate() {
                let reach = band.soft_edge_step_px * (step + 1) as f64;
                let soft = kurbo::Rect::new(edge, full.y0, (edge + reach).min(full.x1), full.y1);
                painter.fill_rect(soft, palette.highlight, opacity);
            }
        }
    }
}

/// Body paragraph clip: one text block revealed over `frames` frames.
pub struct TextBlockClip {
    label: String,
    canvas: Canvas,
    palette: Palette,
    band: HighlightBand,
    block: ShapedBlock,
    schedule: RevealSchedule,
    frames: u64,
}

impl TextBlockClip {
    /// Wrap, lay out and shape `text` for a clip lasting `frames` frames, revealed by `reveal`.
    pub fn new(
        label: impl Into<String>,
        text: &str,
        shaper: &mut TextShaper,
        cfg: &RenderConfig,
        reveal: &RevealStrategy,
        frames: u64,
    ) -> Self {
        let orphans = OrphanWords::new(&cfg.orphan_words);
        let lines = wrap_paragraphs(text, shaper, &orphans, cfg.available_width());
        let metrics = shaper.metrics();
        let lh = line_height(metrics, &cfg.layout);
        let height = lines.len() as f64 * lh;
        let top = anchored_top(height, f64::from(cfg.canvas.height), &cfg.layout);
        let block = ShapedBlock::new(&lines, shaper, lh, cfg.layout.margin_left, top);

        Self {
            label: label.into(),
            canvas: cfg.canvas,
            palette: cfg.palette,
            band: cfg.highlight.clone(),
            block,
            schedule: reveal.schedule(cfg.fps, frames),
            frames,
        }
    }

    /// Placed block geometry.
    pub fn layout(&self) -> &BlockLayout {
        self.block.layout()
    }

    fn draw_layer(&self, frame: u64) -> TextreelResult<FrameRGBA> {
        let mut painter = CpuPainter::new(self.canvas)?;
        let cutoff = match self.schedule {
            RevealSchedule::Sweep {
                sweep_frames,
                ease,
                word_ease,
                intro,
            } => {
                let progress = ease.apply(frame_progress(frame, sweep_frames));
                let fills = sweep_fills(&self.block.layout().runs, progress, word_ease);
                self.block
                    .draw_band_fills(&mut painter, &self.band, &self.palette, &fills);
                self.block.draw_text(&mut painter, &self.palette);
                intro.cutoff(frame, 0.0, f64::from(self.canvas.width))
            }
            RevealSchedule::Wipe(wipe) => {
                self.block
                    .draw_bands(&mut painter, &self.band, &self.palette);
                self.block.draw_text(&mut painter, &self.palette);
                let (left, width) = self.block.layout().horizontal_extent(&self.band);
                wipe.cutoff(frame, left, width)
            }
        };

        let mut layer = painter.finish();
        if let Some(cutoff_x) = cutoff {
            WipeMask {
                cutoff_x,
                step_px: self.band.soft_edge_step_px,
                opacities: &self.band.soft_edge_opacities,
            }
            .apply(&mut layer.data, layer.width)?;
        }
        Ok(layer)
    }
}

impl FrameSource for TextBlockClip {
    fn label(&self) -> &str {
        &self.label
    }

    fn frame_count(&self) -> u64 {
        self.frames
    }

    fn render_frame(&self, frame: FrameIndex) -> TextreelResult<FrameRGBA> {
        let layer = self.draw_layer(frame.0.min(self.frames))?;
        let mut out = FrameRGBA::solid(self.canvas, self.palette.background);
        over_in_place(&mut out.data, &layer.data, 1.0)?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/block.rs"]
mod tests;
