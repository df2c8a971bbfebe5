/// Timing curve applied to normalized reveal progress.
///
/// Names follow the usual `in`/`out`/`in_out` polynomial families; JSON uses snake_case
/// (`"out_cubic"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// `t`.
    Linear,
    /// Accelerating, degree 2.
    InQuad,
    /// Decelerating, degree 2.
    OutQuad,
    /// Accelerate then decelerate, degree 2.
    InOutQuad,
    /// Accelerating, degree 3.
    InCubic,
    /// Decelerating, degree 3.
    #[default]
    OutCubic,
    /// Accelerate then decelerate, degree 3.
    InOutCubic,
}

fn ease_in(t: f64, degree: i32) -> f64 {
    t.powi(degree)
}

fn ease_out(t: f64, degree: i32) -> f64 {
    1.0 - (1.0 - t).powi(degree)
}

fn ease_in_out(t: f64, degree: i32) -> f64 {
    if t < 0.5 {
        ease_in(2.0 * t, degree) / 2.0
    } else {
        0.5 + ease_out(2.0 * t - 1.0, degree) / 2.0
    }
}

impl Ease {
    /// Map `t` (clamped to `[0, 1]`) through the curve; `0 -> 0` and `1 -> 1`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => ease_in(t, 2),
            Self::OutQuad => ease_out(t, 2),
            Self::InOutQuad => ease_in_out(t, 2),
            Self::InCubic => ease_in(t, 3),
            Self::OutCubic => ease_out(t, 3),
            Self::InOutCubic => ease_in_out(t, 3),
        }
    }
}

/// Share of an animation lasting `frames` frames that has elapsed at `frame`, in `[0, 1]`.
///
/// A zero-length animation counts as finished.
pub fn frame_progress(frame: u64, frames: u64) -> f64 {
    if frames == 0 {
        return 1.0;
    }
    (frame as f64 / frames as f64).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
