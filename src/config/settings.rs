use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::foundation::error::{TextreelError, TextreelResult};
use crate::render::reveal::RevealStrategy;

/// Immutable per-run rendering parameters.
///
/// Built once (defaults, optionally overridden from JSON) and passed by reference into every
/// component. Every field is optional in JSON; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output canvas (vertical video).
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Background, text and highlight colors.
    pub palette: Palette,
    /// Font file and size per text role.
    pub fonts: FontSet,
    /// Body block geometry.
    pub layout: BlockLayoutConfig,
    /// Highlight band geometry and soft edges.
    pub highlight: HighlightBand,
    /// Reveal model used for body paragraphs.
    pub reveal: RevealStrategy,
    /// Title card timing and spacing.
    pub opening: OpeningConfig,
    /// Body duration estimator parameters.
    pub duration: DurationConfig,
    /// Separator, trailing hold and placeholder clip settings.
    pub sequence: SequenceConfig,
    /// Words that must not be stranded at the end of a line.
    pub orphan_words: Vec<String>,
    /// Optional image composited over the whole timeline.
    pub overlay: Option<PathBuf>,
    /// Output file naming.
    pub output: OutputConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 720,
                height: 1280,
            },
            fps: Fps { num: 24, den: 1 },
            palette: Palette::default(),
            fonts: FontSet::default(),
            layout: BlockLayoutConfig::default(),
            highlight: HighlightBand::default(),
            reveal: RevealStrategy::default(),
            opening: OpeningConfig::default(),
            duration: DurationConfig::default(),
            sequence: SequenceConfig::default(),
            orphan_words: ["di", "ke", "rp", "rupiah", "juta", "miliar", "ribu"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            overlay: Some(PathBuf::from("semangat.png")),
            output: OutputConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> TextreelResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| TextreelError::parse(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> TextreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TextreelError::resource(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> TextreelResult<()> {
        let Canvas { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(TextreelError::validation("canvas width/height must be non-zero"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(TextreelError::validation("canvas width/height must fit in u16"));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(TextreelError::validation(
                "canvas width/height must be even (required for yuv420p output)",
            ));
        }
        Fps::new(self.fps.num, self.fps.den)?;

        if !(self.layout.margin_left >= 0.0 && self.layout.margin_right >= 0.0) {
            return Err(TextreelError::validation("margins must be >= 0"));
        }
        if self.available_width() <= 0.0 {
            return Err(TextreelError::validation(
                "margins leave no horizontal room for text",
            ));
        }
        for (role, spec) in self.fonts.roles() {
            if !spec.size_px.is_finite() || spec.size_px <= 0.0 {
                return Err(TextreelError::validation(format!(
                    "font size for '{role}' must be finite and > 0"
                )));
            }
        }

        let d = &self.duration;
        if !(d.words_per_minute.is_finite() && d.words_per_minute > 0.0) {
            return Err(TextreelError::validation("words_per_minute must be > 0"));
        }
        if !(d.min_secs > 0.0 && d.min_secs <= d.max_secs) {
            return Err(TextreelError::validation(
                "duration bounds must satisfy 0 < min_secs <= max_secs",
            ));
        }
        non_negative_secs("duration.max_secs", d.max_secs)?;
        non_negative_secs("duration.buffer_secs", d.buffer_secs)?;
        if d
            .length_tiers
            .iter()
            .any(|t| !(t.multiplier.is_finite() && t.multiplier >= 1.0))
        {
            return Err(TextreelError::validation(
                "length tier multipliers must be >= 1.0",
            ));
        }
        self.reveal.validate()?;
        if self.opening.tiers.is_empty() {
            return Err(TextreelError::validation(
                "opening duration tiers must not be empty",
            ));
        }
        let o = &self.opening;
        non_negative_secs("opening.static_secs", o.static_secs)?;
        non_negative_secs("opening.wipe_secs", o.wipe_secs)?;
        non_negative_secs("opening.max_secs", o.max_secs)?;
        for tier in &o.tiers {
            non_negative_secs("opening.tiers.secs", tier.secs)?;
        }

        let q = &self.sequence;
        non_negative_secs("sequence.separator_secs", q.separator_secs)?;
        non_negative_secs("sequence.trailing_hold_secs", q.trailing_hold_secs)?;
        non_negative_secs("sequence.placeholder_secs", q.placeholder_secs)?;

        if !(self.layout.anchor_y.is_finite() && (0.0..=1.0).contains(&self.layout.anchor_y)) {
            return Err(TextreelError::validation("layout.anchor_y must be within [0, 1]"));
        }
        Ok(())
    }

    /// Horizontal room for body text: canvas width minus both margins.
    pub fn available_width(&self) -> f64 {
        f64::from(self.canvas.width) - self.layout.margin_left - self.layout.margin_right
    }
}

fn non_negative_secs(field: &str, secs: f64) -> TextreelResult<()> {
    if secs.is_finite() && secs >= 0.0 {
        Ok(())
    } else {
        Err(TextreelError::validation(format!(
            "{field} must be finite and >= 0"
        )))
    }
}

/// Colors used by every clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Solid frame background (also used for blank fallback frames).
    pub background: Rgba8,
    /// Text fill.
    pub text: Rgba8,
    /// Highlight band fill.
    pub highlight: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(0, 0, 0),
            text: Rgba8::rgb(255, 255, 255),
            highlight: Rgba8::rgb(0, 124, 188),
        }
    }
}

/// Font file path and pixel size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Path to a TTF/OTF file.
    pub path: PathBuf,
    /// Font size in pixels.
    pub size_px: f32,
}

impl FontSpec {
    fn new(path: &str, size_px: f32) -> Self {
        Self {
            path: PathBuf::from(path),
            size_px,
        }
    }
}

/// Fonts per text role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSet {
    /// Small line above the title.
    pub upper: FontSpec,
    /// Title.
    pub title: FontSpec,
    /// Subtitle below the title.
    pub subtitle: FontSpec,
    /// Body paragraphs.
    pub body: FontSpec,
}

impl FontSet {
    /// Iterate `(role, spec)` pairs.
    pub fn roles(&self) -> [(&'static str, &FontSpec); 4] {
        [
            ("upper", &self.upper),
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("body", &self.body),
        ]
    }
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            upper: FontSpec::new("ProximaNova-Bold.ttf", 28.0),
            title: FontSpec::new("DMSerifDisplay-Regular.ttf", 54.0),
            subtitle: FontSpec::new("ProximaNova-Regular.ttf", 28.0),
            body: FontSpec::new("Poppins-Bold.ttf", 34.0),
        }
    }
}

/// Geometry of body text blocks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockLayoutConfig {
    /// Left margin in pixels (text origin x).
    pub margin_left: f64,
    /// Right margin in pixels.
    pub margin_right: f64,
    /// Extra vertical space added to every line.
    pub line_padding: f64,
    /// Lower bound for the font-derived text height of a line.
    pub min_text_height: f64,
    /// Vertical anchor of the block as a fraction of canvas height.
    pub anchor_y: f64,
    /// Space kept free at the bottom of the canvas (logo area).
    pub bottom_safe_margin: f64,
    /// Extra lift applied when the block overflows the safe area.
    pub overflow_lift_extra: f64,
    /// Maximum lift applied to an overflowing block.
    pub max_overflow_lift: f64,
    /// The block never starts above this y.
    pub min_top: f64,
}

impl Default for BlockLayoutConfig {
    fn default() -> Self {
        Self {
            margin_left: 70.0,
            margin_right: 90.0,
            line_padding: 5.0,
            min_text_height: 30.0,
            anchor_y: 0.60,
            bottom_safe_margin: 170.0,
            overflow_lift_extra: 40.0,
            max_overflow_lift: 250.0,
            min_top: 80.0,
        }
    }
}

/// Highlight band geometry relative to a line box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightBand {
    /// Horizontal padding on both sides of a highlighted word.
    pub pad_x: f64,
    /// Band top, measured down from the line top.
    pub top: f64,
    /// Band bottom, measured down from the line bottom.
    pub bottom: f64,
    /// Width of each soft-edge step at a reveal boundary.
    pub soft_edge_step_px: f64,
    /// Opacity of each soft-edge step, outermost last.
    pub soft_edge_opacities: Vec<f32>,
}

impl Default for HighlightBand {
    fn default() -> Self {
        Self {
            pad_x: 4.0,
            top: 9.0,
            bottom: 4.0,
            soft_edge_step_px: 1.5,
            soft_edge_opacities: vec![0.66, 0.33],
        }
    }
}

/// One step of a word-count tier table: texts up to `max_words` last `secs`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordTier {
    /// Inclusive upper bound on word count.
    pub max_words: usize,
    /// Duration in seconds.
    pub secs: f64,
}

/// Title card settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningConfig {
    /// Blank lead-in before the wipe starts.
    pub static_secs: f64,
    /// Duration of the left-to-right wipe.
    pub wipe_secs: f64,
    /// Wipe easing.
    pub ease: Ease,
    /// Vertical gap between the upper line and the title.
    pub upper_gap: f64,
    /// Vertical gap between the title and the subtitle.
    pub subtitle_gap: f64,
    /// Word-count tiers, ascending by `max_words`.
    pub tiers: Vec<WordTier>,
    /// Duration used above the last tier.
    pub max_secs: f64,
}

impl Default for OpeningConfig {
    fn default() -> Self {
        Self {
            static_secs: 0.2,
            wipe_secs: 0.8,
            ease: Ease::OutCubic,
            upper_gap: 20.0,
            subtitle_gap: 25.0,
            tiers: vec![
                WordTier {
                    max_words: 8,
                    secs: 2.5,
                },
                WordTier {
                    max_words: 14,
                    secs: 3.0,
                },
                WordTier {
                    max_words: 22,
                    secs: 3.5,
                },
                WordTier {
                    max_words: 30,
                    secs: 4.0,
                },
            ],
            max_secs: 4.5,
        }
    }
}

/// Multiplier applied when the plain text is longer than `min_chars`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LengthTier {
    /// Exclusive lower bound on plain character count.
    pub min_chars: usize,
    /// Duration multiplier.
    pub multiplier: f64,
}

/// Body duration estimator parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationConfig {
    /// Assumed reading rate.
    pub words_per_minute: f64,
    /// Lower clamp (before the buffer is added).
    pub min_secs: f64,
    /// Upper clamp (before the buffer is added).
    pub max_secs: f64,
    /// Reading buffer added after clamping.
    pub buffer_secs: f64,
    /// Length multipliers; the first matching tier (largest `min_chars`) wins.
    pub length_tiers: Vec<LengthTier>,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 160.0,
            min_secs: 3.0,
            max_secs: 10.0,
            buffer_secs: 1.5,
            length_tiers: vec![
                LengthTier {
                    min_chars: 300,
                    multiplier: 1.4,
                },
                LengthTier {
                    min_chars: 200,
                    multiplier: 1.2,
                },
            ],
        }
    }
}

/// Clip sequencing settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Pause between the opening and bodies, and between bodies.
    pub separator_secs: f64,
    /// Hold after the last body.
    pub trailing_hold_secs: f64,
    /// Text shown when a record has no body paragraphs.
    pub placeholder_text: String,
    /// Duration of the placeholder clip.
    pub placeholder_secs: f64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            separator_secs: 0.7,
            trailing_hold_secs: 3.0,
            placeholder_text: "Konten tidak tersedia".to_owned(),
            placeholder_secs: 3.0,
        }
    }
}

/// Output file naming: `<dir>/<prefix>_<n>.mp4`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory.
    pub dir: PathBuf,
    /// File name prefix.
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: "output_video_multiline".to_owned(),
        }
    }
}

impl OutputConfig {
    /// Deterministic output path for the 0-based record `index`.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}_{}.mp4", self.prefix, index + 1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
