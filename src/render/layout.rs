use crate::config::settings::{BlockLayoutConfig, HighlightBand};
use crate::render::reveal::HighlightRun;
use crate::text::shaper::FontMetrics;
use crate::text::wrap::{Line, TextMeasure, Word};

/// A word with its position inside a laid-out block.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedWord {
    /// The wrapped word.
    pub word: Word,
    /// Line the word sits on.
    pub line_index: usize,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Width of the bare word.
    pub width: f64,
}

/// Fixed-line-height block of wrapped words anchored at `(left, top)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockLayout {
    /// Every word in reading order.
    pub words: Vec<PlacedWord>,
    /// Highlighted words in reading order with their cursor slots.
    pub runs: Vec<HighlightRun>,
    /// Number of lines, blank lines included.
    pub line_count: usize,
    /// Distance between consecutive line tops.
    pub line_height: f64,
    /// Text origin x.
    pub left: f64,
    /// Top of the first line.
    pub top: f64,
    /// Widest line, measured from `left` to the end of its last word.
    pub text_width: f64,
}

/// Fixed line height for a face: `max(ascent + descent, min_text_height) + line_padding`.
pub fn line_height(metrics: FontMetrics, cfg: &BlockLayoutConfig) -> f64 {
    (metrics.ascent + metrics.descent).max(cfg.min_text_height) + cfg.line_padding
}

/// Top of a body block of `height` pixels: anchored at `anchor_y`, lifted when it would run into
/// the bottom safe area, never above `min_top`.
pub fn anchored_top(height: f64, canvas_height: f64, cfg: &BlockLayoutConfig) -> f64 {
    let base = canvas_height * cfg.anchor_y;
    let limit = canvas_height - cfg.bottom_safe_margin;
    let overflow = base + height - limit;
    if overflow <= 0.0 {
        return base;
    }
    let lift = (overflow + cfg.overflow_lift_extra).min(cfg.max_overflow_lift);
    (base - lift).max(cfg.min_top)
}

impl BlockLayout {
    /// Place `lines` left-aligned at `left`, one `line_height` apart starting at `top`.
    ///
    /// Words advance by their measured width plus a trailing space, the same metric the wrapper
    /// used to break lines.
    pub fn new(
        lines: &[Line],
        measure: &mut dyn TextMeasure,
        line_height: f64,
        left: f64,
        top: f64,
    ) -> Self {
        let mut words = Vec::new();
        let mut runs = Vec::new();
        let mut cursor = 0usize;
        let mut text_width = 0.0f64;

        for (line_index, line) in lines.iter().enumerate() {
            let mut x = left;
            for word in &line.words {
                let width = measure.measure(&word.text);
                let advance = measure.measure(&format!("{} ", word.text));
                if word.is_highlighted {
                    let chars = word.text.chars().count();
                    runs.push(HighlightRun {
                        line_index,
                        start_x: x,
                        width,
                        char_start: cursor,
                        char_end: cursor + chars,
                    });
                    cursor += chars + 1;
                }
                text_width = text_width.max(x + width - left);
                words.push(PlacedWord {
                    word: word.clone(),
                    line_index,
                    x,
                    width,
                });
                x += advance;
            }
        }

        Self {
            words,
            runs,
            line_count: lines.len(),
            line_height,
            left,
            top,
            text_width,
        }
    }

    /// Total block height.
    pub fn height(&self) -> f64 {
        self.line_count as f64 * self.line_height
    }

    /// Top y of line `index`.
    pub fn line_top(&self, index: usize) -> f64 {
        self.top + index as f64 * self.line_height
    }

    /// Full highlight band behind `run`.
    pub fn band_rect(&self, run: &HighlightRun, band: &HighlightBand) -> kurbo::Rect {
        let top = self.line_top(run.line_index);
        kurbo::Rect::new(
            run.start_x - band.pad_x,
            top + band.top,
            run.start_x + run.width + band.pad_x,
            top + self.line_height + band.bottom,
        )
    }

    /// Horizontal extent `(left, width)` of everything drawn for this block, band padding
    /// included.
    pub fn horizontal_extent(&self, band: &HighlightBand) -> (f64, f64) {
        let pad = if self.runs.is_empty() { 0.0 } else { band.pad_x };
        (self.left - pad, self.text_width + 2.0 * pad)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
