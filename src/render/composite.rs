use crate::foundation::error::{TextreelError, TextreelResult};
use crate::foundation::math::{mul_div255_u8, unit_to_u8};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over of premultiplied `src` onto `dst`, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = unit_to_u8(opacity);
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite a whole premultiplied buffer over `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> TextreelResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TextreelError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Left-to-right reveal mask: columns right of `cutoff_x` are hidden.
///
/// The soft edge sits just inside the cutoff as `opacities.len()` bands of `step_px` each; the
/// band touching the cutoff uses the last (faintest) opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct WipeMask<'a> {
    /// Reveal boundary in pixels.
    pub cutoff_x: f64,
    /// Width of one soft-edge band.
    pub step_px: f64,
    /// Band opacities, innermost first.
    pub opacities: &'a [f32],
}

impl WipeMask<'_> {
    /// Visible fraction of the column whose center is at `x`.
    pub fn coverage(&self, x: f64) -> f32 {
        if x >= self.cutoff_x {
            return 0.0;
        }
        if self.step_px <= 0.0 || self.opacities.is_empty() {
            return 1.0;
        }
        let band = ((self.cutoff_x - x) / self.step_px).floor() as usize;
        match self.opacities.len().checked_sub(band + 1) {
            Some(i) => self.opacities[i].clamp(0.0, 1.0),
            None => 1.0,
        }
    }

    /// Scale every pixel of a premultiplied `width`-wide buffer by its column coverage.
    pub fn apply(&self, data: &mut [u8], width: u32) -> TextreelResult<()> {
        let row_len = width as usize * 4;
        if row_len == 0 || !data.len().is_multiple_of(row_len) {
            return Err(TextreelError::render(
                "wipe mask expects a whole number of rgba8 rows",
            ));
        }
        let weights: Vec<u16> = (0..width)
            .map(|x| unit_to_u8(self.coverage(f64::from(x) + 0.5)))
            .collect();

        for row in data.chunks_exact_mut(row_len) {
            for (px, &w) in row.chunks_exact_mut(4).zip(&weights) {
                match w {
                    255 => {}
                    0 => px.fill(0),
                    _ => {
                        for c in px.iter_mut() {
                            *c = mul_div255_u8(u16::from(*c), w);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
