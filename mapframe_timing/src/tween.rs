// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Easing curve applied to linear animation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, gentle landing: `1 - (1 - t)^3`.
    #[default]
    EaseOutCubic,
}

impl Easing {
    /// Maps linear progress `t` (clamped to `[0, 1]`) through the curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}

/// Timing of a single bounded-duration animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    start_ms: u64,
    duration_ms: u64,
    easing: Easing,
}

impl Tween {
    /// Creates a tween starting at `start_ms` and lasting `duration_ms`.
    #[must_use]
    pub const fn new(start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    ///
    /// A zero-length tween is always complete.
    #[must_use]
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed >= self.duration_ms {
            return 1.0;
        }
        elapsed as f64 / self.duration_ms as f64
    }

    /// Eased progress in `[0, 1]` at `now_ms`.
    #[must_use]
    pub fn eased(&self, now_ms: u64) -> f64 {
        self.easing.apply(self.progress(now_ms))
    }

    /// Returns `true` once `now_ms` has reached the end of the tween.
    #[must_use]
    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }
}
