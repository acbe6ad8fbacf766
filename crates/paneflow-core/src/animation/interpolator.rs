#![forbid(unsafe_code)]

//! Cancellable time-based interpolation between two scalar positions.
//!
//! The host calls [`AnimationFrameInterpolator::frame`] once per animation
//! frame with the current time. There are no callbacks: completion is
//! reported through [`InterpolatorFrame::Complete`].
//!
//! # Invariants
//!
//! 1. Progress is `easing(clamp(elapsed / duration, 0, 1))`.
//! 2. Once `elapsed >= duration` the interpolator yields exactly `to`, once,
//!    as `Complete`, and goes idle.
//! 3. [`cancel`](AnimationFrameInterpolator::cancel) stops all further output.
//! 4. Starting while a run is active restarts from the value the active run
//!    would show at the start time, not from the caller's `from`.
//!
//! # Failure Modes
//!
//! - Zero or negative duration: the first frame completes immediately.
//! - A frame timestamp earlier than the start time yields `from`.

use super::{EasingFn, lerp};

/// Output of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterpolatorFrame {
    /// Intermediate value; more frames will follow.
    Value(f64),
    /// Final value (exactly `to`); the interpolator is now idle.
    Complete(f64),
}

impl InterpolatorFrame {
    /// The value regardless of completion.
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Value(v) | Self::Complete(v) => v,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

#[derive(Clone, Copy)]
struct Run {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
    easing: EasingFn,
}

impl Run {
    fn value_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        lerp(self.from, self.to, (self.easing)(t))
    }

    fn is_done_at(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }
}

impl std::fmt::Debug for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Run")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("start_ms", &self.start_ms)
            .field("duration_ms", &self.duration_ms)
            .finish_non_exhaustive()
    }
}

/// Drives one scalar from `from` to `to` over a duration.
#[derive(Debug, Clone, Default)]
pub struct AnimationFrameInterpolator {
    run: Option<Run>,
    /// Last value handed out by `frame`.
    last: Option<f64>,
}

impl AnimationFrameInterpolator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start interpolating. If a run is already active, the new run starts
    /// from the active run's value at `now_ms` and `from` is ignored.
    pub fn start(&mut self, from: f64, to: f64, duration_ms: f64, easing: EasingFn, now_ms: f64) {
        let effective_from = match &self.run {
            Some(active) => {
                let current = active.value_at(now_ms);
                tracing::trace!(
                    message = "interpolator.restart",
                    requested_from = from,
                    current,
                    to
                );
                current
            }
            None => from,
        };
        self.run = Some(Run {
            from: effective_from,
            to,
            start_ms: now_ms,
            duration_ms,
            easing,
        });
    }

    /// Advance to `now_ms`. Returns `None` when idle.
    pub fn frame(&mut self, now_ms: f64) -> Option<InterpolatorFrame> {
        let run = self.run?;
        if run.is_done_at(now_ms) {
            self.run = None;
            self.last = Some(run.to);
            return Some(InterpolatorFrame::Complete(run.to));
        }
        let value = run.value_at(now_ms);
        self.last = Some(value);
        Some(InterpolatorFrame::Value(value))
    }

    /// Stop without emitting anything further.
    pub fn cancel(&mut self) {
        if self.run.take().is_some() {
            tracing::trace!(message = "interpolator.cancel");
        }
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Destination of the active run.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.run.map(|r| r.to)
    }

    /// Value the active run shows at `now_ms`, without advancing.
    #[must_use]
    pub fn value_at(&self, now_ms: f64) -> Option<f64> {
        self.run.map(|r| r.value_at(now_ms))
    }

    /// Last value returned by [`frame`](Self::frame).
    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.last
    }
}
