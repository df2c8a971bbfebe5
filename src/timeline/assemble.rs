use std::sync::Arc;

use crate::config::settings::RenderConfig;
use crate::document::parser::Record;
use crate::render::block::TextBlockClip;
use crate::render::opening::OpeningClip;
use crate::text::shaper::FontBook;
use crate::timeline::clip::HoldClip;
use crate::timeline::overlay::Overlay;
use crate::timeline::sequence::Timeline;
use crate::timing::duration::{body_duration_secs, opening_duration_secs};

/// Turns records into timelines: opening, separator, body paragraphs with separators between
/// them, then a trailing hold.
pub struct ClipAssembler<'a> {
    cfg: &'a RenderConfig,
    fonts: &'a mut FontBook,
    overlay: Option<Arc<Overlay>>,
}

impl<'a> ClipAssembler<'a> {
    /// Load the configured overlay once and keep it for every record.
    pub fn new(cfg: &'a RenderConfig, fonts: &'a mut FontBook) -> Self {
        let overlay = cfg
            .overlay
            .as_deref()
            .and_then(|path| Overlay::load_optional(path, cfg.canvas))
            .map(Arc::new);
        Self::with_overlay(cfg, fonts, overlay)
    }

    /// Use an already loaded overlay (or none).
    pub fn with_overlay(
        cfg: &'a RenderConfig,
        fonts: &'a mut FontBook,
        overlay: Option<Arc<Overlay>>,
    ) -> Self {
        Self {
            cfg,
            fonts,
            overlay,
        }
    }

    fn frames(&self, secs: f64) -> u64 {
        self.cfg.fps.secs_to_frames_floor(secs)
    }

    /// Build the timeline for one record.
    #[tracing::instrument(skip_all, fields(title = record.display_title()))]
    pub fn assemble(&mut self, record: &Record) -> Timeline {
        let cfg = self.cfg;
        let mut timeline = Timeline::new(cfg.canvas, cfg.fps, cfg.palette.background);
        let separator = |label: String| {
            Box::new(HoldClip::new(
                label,
                cfg.canvas,
                cfg.palette.background,
                cfg.fps.secs_to_frames_floor(cfg.sequence.separator_secs),
            ))
        };

        let opening_secs = opening_duration_secs(
            record.upper.as_deref(),
            record.title.as_deref(),
            record.subtitle.as_deref(),
            &cfg.opening,
        );
        let opening_frames = self.frames(opening_secs);
        timeline.push(Box::new(OpeningClip::new(
            record.upper.as_deref().unwrap_or_default(),
            record.title.as_deref().unwrap_or_default(),
            record.subtitle.as_deref(),
            self.fonts,
            cfg,
            opening_frames,
        )));
        timeline.push(separator("separator".to_owned()));

        if record.paragraphs.is_empty() {
            tracing::warn!("record has no body paragraphs, using placeholder");
            let frames = self.frames(cfg.sequence.placeholder_secs);
            timeline.push(Box::new(TextBlockClip::new(
                "placeholder",
                &cfg.sequence.placeholder_text,
                &mut self.fonts.body,
                cfg,
                &cfg.reveal,
                frames,
            )));
        }

        for (i, paragraph) in record.paragraphs.iter().enumerate() {
            if i > 0 {
                timeline.push(separator(format!("separator_{i}")));
            }
            let secs = body_duration_secs(paragraph, &cfg.duration);
            let frames = self.frames(secs);
            tracing::debug!(paragraph = i + 1, secs, frames, "body clip");
            timeline.push(Box::new(TextBlockClip::new(
                format!("body_{}", i + 1),
                paragraph,
                &mut self.fonts.body,
                cfg,
                &cfg.reveal,
                frames,
            )));
        }

        timeline.push(Box::new(HoldClip::new(
            "trailing_hold",
            cfg.canvas,
            cfg.palette.background,
            self.frames(cfg.sequence.trailing_hold_secs),
        )));
        timeline.set_overlay(self.overlay.clone());

        tracing::info!(
            clips = timeline.segments().len(),
            frames = timeline.total_frames(),
            "timeline assembled"
        );
        timeline
    }
}
