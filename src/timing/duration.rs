use crate::config::settings::{DurationConfig, OpeningConfig};
use crate::text::markup::plain_text;

/// Estimate how long a body paragraph stays on screen, in seconds.
///
/// Markup is stripped before counting. Reading time at `words_per_minute` is stretched by the
/// first matching length tier, clamped to `[min_secs, max_secs]`, extended by `buffer_secs` and
/// rounded to a tenth of a second.
pub fn body_duration_secs(text: &str, cfg: &DurationConfig) -> f64 {
    let clean = plain_text(text).replace('\n', " ");
    let clean = clean.trim();
    if clean.is_empty() {
        return round_tenth(cfg.min_secs + cfg.buffer_secs);
    }

    let words = clean.split_whitespace().count();
    let chars = clean.chars().count();

    let mut secs = words as f64 / cfg.words_per_minute * 60.0;
    if let Some(tier) = length_tier(chars, cfg) {
        secs *= tier;
    }
    let secs = secs.clamp(cfg.min_secs, cfg.max_secs) + cfg.buffer_secs;
    round_tenth(secs)
}

fn length_tier(chars: usize, cfg: &DurationConfig) -> Option<f64> {
    cfg.length_tiers
        .iter()
        .filter(|t| chars > t.min_chars)
        .max_by_key(|t| t.min_chars)
        .map(|t| t.multiplier)
}

/// Title card duration from the combined word count of upper, title and subtitle.
pub fn opening_duration_secs(
    upper: Option<&str>,
    title: Option<&str>,
    subtitle: Option<&str>,
    cfg: &OpeningConfig,
) -> f64 {
    let words: usize = [upper, title, subtitle]
        .into_iter()
        .flatten()
        .map(|s| plain_text(s).split_whitespace().count())
        .sum();

    let mut tiers = cfg.tiers.clone();
    tiers.sort_by_key(|t| t.max_words);
    tiers
        .iter()
        .find(|t| words <= t.max_words)
        .map_or(cfg.max_secs, |t| t.secs)
}

fn round_tenth(secs: f64) -> f64 {
    (secs * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "../../tests/unit/timing/duration.rs"]
mod tests;
