use std::borrow::Cow;

use crate::config::settings::{FontSet, FontSpec};
use crate::foundation::error::{TextreelError, TextreelResult};
use crate::text::font::FontFace;
use crate::text::wrap::TextMeasure;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Vertical font metrics in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Distance from the line top to the baseline.
    pub ascent: f64,
    /// Distance from the baseline to the line bottom.
    pub descent: f64,
}

/// Parley-backed shaper for one face at one size.
///
/// The same instance measures words for wrapping and produces the glyphs that get drawn.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    size_px: f32,
    font: vello_cpu::peniko::FontData,
}

impl TextShaper {
    /// Register `face` and prepare to shape at `size_px`.
    pub fn new(face: &FontFace, size_px: f32) -> TextreelResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TextreelError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes.as_ref().clone()), None);
        // Collections register every face; keep the family holding the face the rasterizer draws.
        let family_id = families
            .iter()
            .find(|(_, infos)| infos.iter().any(|info| info.index() == face.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                TextreelError::resource("no font families registered from font bytes")
            })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TextreelError::resource("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
            face.index,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            size_px,
            font,
        })
    }

    /// Family name resolved from the font bytes.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Font size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Font handle for the rasterizer.
    pub fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    fn layout(&mut self, text: &str) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(
            TextBrushRgba8::default(),
        ));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Shape `text` on a single line; glyphs are relative to the string's top-left corner with
    /// the baseline already applied to `y`.
    pub fn shape(&mut self, text: &str) -> Vec<vello_cpu::Glyph> {
        let layout = self.layout(text);
        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }
        glyphs
    }

    /// Ascent/descent of the face at this size.
    pub fn metrics(&mut self) -> FontMetrics {
        let layout = self.layout("HgypqA");
        let (ascent, descent) = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                (f64::from(m.ascent), f64::from(m.descent))
            })
            .unwrap_or((f64::from(self.size_px), 0.0));
        FontMetrics { ascent, descent }
    }
}

impl TextMeasure for TextShaper {
    fn measure(&mut self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout(text)
            .lines()
            .map(|line| f64::from(line.metrics().advance))
            .sum()
    }
}

/// One shaper per text role, loaded once per run.
pub struct FontBook {
    /// Line above the title.
    pub upper: TextShaper,
    /// Title.
    pub title: TextShaper,
    /// Subtitle.
    pub subtitle: TextShaper,
    /// Body paragraphs.
    pub body: TextShaper,
}

impl FontBook {
    /// Load every configured face. A role whose file is missing or does not parse as a font falls
    /// back to a single shared system face.
    #[tracing::instrument(skip_all)]
    pub fn load(fonts: &FontSet) -> TextreelResult<Self> {
        let mut fallback: Option<FontFace> = None;
        let mut shaper_for = |role: &str, spec: &FontSpec| -> TextreelResult<TextShaper> {
            let err = match configured_shaper(spec) {
                Ok(shaper) => return Ok(shaper),
                Err(err) => err,
            };
            let face = match &fallback {
                Some(face) => face.clone(),
                None => {
                    let face = FontFace::system_fallback()?;
                    fallback = Some(face.clone());
                    face
                }
            };
            tracing::warn!(
                role,
                font = %spec.path.display(),
                error = %err,
                fallback = ?face.origin,
                "font unusable, using fallback face"
            );
            TextShaper::new(&face, spec.size_px)
        };

        Ok(Self {
            upper: shaper_for("upper", &fonts.upper)?,
            title: shaper_for("title", &fonts.title)?,
            subtitle: shaper_for("subtitle", &fonts.subtitle)?,
            body: shaper_for("body", &fonts.body)?,
        })
    }
}

fn configured_shaper(spec: &FontSpec) -> TextreelResult<TextShaper> {
    let face = FontFace::from_path(&spec.path)?;
    TextShaper::new(&face, spec.size_px)
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
