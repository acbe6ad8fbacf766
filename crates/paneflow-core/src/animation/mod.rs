#![forbid(unsafe_code)]

//! Easing curves and frame interpolation.
//!
//! Easing functions map normalized time `t ∈ [0, 1]` to normalized progress.
//! Inputs outside `[0, 1]` are clamped, so every curve returns exactly `0.0`
//! at the start and `1.0` at the end.
//!
//! [`EasingKind`] names the built-in curves so configurations can carry an
//! easing through serde.

pub mod interpolator;

pub use interpolator::{AnimationFrameInterpolator, InterpolatorFrame};

use serde::{Deserialize, Serialize};

/// An easing curve.
pub type EasingFn = fn(f64) -> f64;

#[inline]
fn clamp01(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

#[must_use]
pub fn linear(t: f64) -> f64 {
    clamp01(t)
}

/// Quadratic ease-in.
#[must_use]
pub fn ease_in(t: f64) -> f64 {
    let t = clamp01(t);
    t * t
}

/// Quadratic ease-out.
#[must_use]
pub fn ease_out(t: f64) -> f64 {
    let t = clamp01(t);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    let t = clamp01(t);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[must_use]
pub fn ease_in_cubic(t: f64) -> f64 {
    let t = clamp01(t);
    t * t * t
}

/// Cubic ease-out; the default for panel transitions.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = clamp01(t);
    1.0 - (1.0 - t).powi(3)
}

/// Linear interpolation between `from` and `to`.
#[inline]
#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Named easing curve, serializable in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingKind {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInCubic,
    #[default]
    EaseOutCubic,
}

impl EasingKind {
    /// The curve this name refers to.
    #[must_use]
    pub fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseIn => ease_in,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
            Self::EaseInCubic => ease_in_cubic,
            Self::EaseOutCubic => ease_out_cubic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingKind; 6] = [
        EasingKind::Linear,
        EasingKind::EaseIn,
        EasingKind::EaseOut,
        EasingKind::EaseInOut,
        EasingKind::EaseInCubic,
        EasingKind::EaseOutCubic,
    ];

    #[test]
    fn endpoints_are_exact() {
        for kind in ALL {
            let f = kind.function();
            assert_eq!(f(0.0), 0.0, "{kind:?} at 0");
            assert_eq!(f(1.0), 1.0, "{kind:?} at 1");
        }
    }

    #[test]
    fn inputs_are_clamped() {
        for kind in ALL {
            let f = kind.function();
            assert_eq!(f(-3.0), 0.0);
            assert_eq!(f(7.0), 1.0);
            assert_eq!(f(f64::NAN), 0.0);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for kind in ALL {
            let f = kind.function();
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = f(f64::from(i) / 100.0);
                assert!(v >= prev - 1e-12, "{kind:?} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(320.0, 0.0, 0.0), 320.0);
        assert_eq!(lerp(320.0, 0.0, 1.0), 0.0);
        assert_eq!(lerp(-120.0, 0.0, 0.5), -60.0);
    }
}
