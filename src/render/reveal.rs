use serde::{Deserialize, Serialize};

use crate::animation::ease::{Ease, frame_progress};
use crate::foundation::core::Fps;
use crate::foundation::error::{TextreelError, TextreelResult};

fn default_sweep_fraction() -> f64 {
    0.25
}

fn default_sweep_ease() -> Ease {
    Ease::OutQuad
}

fn default_wipe_secs() -> f64 {
    0.8
}

/// How a body text block appears over the lifetime of its clip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RevealStrategy {
    /// Plain text is visible immediately; highlight bands fill word by word, driven by one global
    /// character cursor that finishes after `sweep_fraction` of the clip.
    CharacterSweep {
        /// Share of the clip spent sweeping, in `(0, 1]`.
        #[serde(default = "default_sweep_fraction")]
        sweep_fraction: f64,
        /// Easing of the global cursor.
        #[serde(default = "default_sweep_ease")]
        ease: Ease,
        /// Easing of the fill inside the word under the cursor.
        #[serde(default = "default_sweep_ease")]
        word_ease: Ease,
        /// Full-canvas wipe at the start of the clip; `0` disables it.
        #[serde(default = "default_wipe_secs")]
        intro_wipe_secs: f64,
        /// Easing of the intro wipe.
        #[serde(default)]
        intro_ease: Ease,
    },
    /// Text and full-width highlight bands are uncovered together by a left-to-right cutoff.
    BlockWipe {
        /// Wipe duration, capped at the clip length.
        #[serde(default = "default_wipe_secs")]
        wipe_secs: f64,
        /// Wipe easing.
        #[serde(default)]
        ease: Ease,
    },
}

impl Default for RevealStrategy {
    fn default() -> Self {
        Self::CharacterSweep {
            sweep_fraction: default_sweep_fraction(),
            ease: default_sweep_ease(),
            word_ease: default_sweep_ease(),
            intro_wipe_secs: default_wipe_secs(),
            intro_ease: Ease::OutCubic,
        }
    }
}

impl RevealStrategy {
    /// Reject fractions and durations that cannot be scheduled.
    pub fn validate(&self) -> TextreelResult<()> {
        match *self {
            Self::CharacterSweep {
                sweep_fraction,
                intro_wipe_secs,
                ..
            } => {
                if !(sweep_fraction.is_finite() && sweep_fraction > 0.0 && sweep_fraction <= 1.0)
                {
                    return Err(TextreelError::validation(
                        "reveal.sweep_fraction must be in (0, 1]",
                    ));
                }
                if !(intro_wipe_secs.is_finite() && intro_wipe_secs >= 0.0) {
                    return Err(TextreelError::validation(
                        "reveal.intro_wipe_secs must be finite and >= 0",
                    ));
                }
            }
            Self::BlockWipe { wipe_secs, .. } => {
                if !(wipe_secs.is_finite() && wipe_secs >= 0.0) {
                    return Err(TextreelError::validation(
                        "reveal.wipe_secs must be finite and >= 0",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Resolve durations into frame counts for a clip of `total_frames`.
    pub fn schedule(&self, fps: Fps, total_frames: u64) -> RevealSchedule {
        match *self {
            Self::CharacterSweep {
                sweep_fraction,
                ease,
                word_ease,
                intro_wipe_secs,
                intro_ease,
            } => RevealSchedule::Sweep {
                sweep_frames: ((total_frames as f64 * sweep_fraction).floor() as u64).max(1),
                ease,
                word_ease,
                intro: WipeTiming {
                    frames: fps.secs_to_frames_floor(intro_wipe_secs).min(total_frames),
                    ease: intro_ease,
                },
            },
            Self::BlockWipe { wipe_secs, ease } => RevealSchedule::Wipe(WipeTiming {
                frames: fps.secs_to_frames_floor(wipe_secs).min(total_frames),
                ease,
            }),
        }
    }
}

/// A wipe resolved to frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WipeTiming {
    /// Frames from zero to full width.
    pub frames: u64,
    /// Easing.
    pub ease: Ease,
}

impl WipeTiming {
    /// Eased wipe progress at `frame`; `1.0` once the wipe is done.
    pub fn progress(&self, frame: u64) -> f64 {
        self.ease.apply(frame_progress(frame, self.frames))
    }

    /// Cutoff x for a wipe spanning `[left, left + width]`, or `None` when nothing is masked.
    pub fn cutoff(&self, frame: u64, left: f64, width: f64) -> Option<f64> {
        let p = self.progress(frame);
        if p >= 1.0 {
            return None;
        }
        Some(left + p * width)
    }
}

/// A [`RevealStrategy`] resolved against one clip's frame count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealSchedule {
    /// Character-driven highlight sweep with an optional intro wipe.
    Sweep {
        /// Frames until the cursor reaches the last character (at least one).
        sweep_frames: u64,
        /// Cursor easing.
        ease: Ease,
        /// In-word easing.
        word_ease: Ease,
        /// Full-canvas intro wipe.
        intro: WipeTiming,
    },
    /// Block wipe.
    Wipe(WipeTiming),
}

/// A highlighted word's band on one line, with its slot in the global character cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightRun {
    /// Line the word sits on.
    pub line_index: usize,
    /// Left edge of the word (unpadded).
    pub start_x: f64,
    /// Word width (unpadded, no trailing space).
    pub width: f64,
    /// First cursor position of the word.
    pub char_start: usize,
    /// One past the word's last character.
    pub char_end: usize,
}

impl HighlightRun {
    /// Character count of the word.
    pub fn chars(&self) -> usize {
        self.char_end - self.char_start
    }
}

/// Cursor length: every highlighted word plus one separator slot.
pub fn total_sweep_chars(runs: &[HighlightRun]) -> usize {
    runs.iter().map(|r| r.chars() + 1).sum()
}

/// Fill fraction of every run at eased global `progress` in `[0, 1]`.
pub fn sweep_fills(runs: &[HighlightRun], progress: f64, word_ease: Ease) -> Vec<f64> {
    let total = total_sweep_chars(runs);
    let current = (progress.clamp(0.0, 1.0) * total as f64).floor() as usize;
    runs.iter()
        .map(|run| {
            if run.char_start > current {
                return 0.0;
            }
            let into = current - run.char_start;
            let len = run.chars();
            if into >= len {
                1.0
            } else {
                word_ease.apply(into as f64 / len as f64)
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/reveal.rs"]
mod tests;
