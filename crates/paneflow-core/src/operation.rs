#![forbid(unsafe_code)]

//! One phase model for gesture-driven and animation-driven displacement.
//!
//! Layout code reads a [`ContinuousOperationState`] and does not care whether
//! a finger, a wheel, or a programmatic animation is moving the panels.
//! `Tracking` and `Swiping` both collapse to [`OperationPhase::Operating`].

use crate::animation::{AnimationFrameInterpolator, EasingFn, InterpolatorFrame};
use crate::geometry::{Axis, Vector2};
use crate::swipe::{SwipeInputState, SwipePhase, SwipeRecognizer};

/// Phase of a continuous operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationPhase {
    #[default]
    Idle,
    Operating,
    Ended,
}

/// Snapshot consumed by layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContinuousOperationState {
    pub phase: OperationPhase,
    pub displacement: Vector2,
    pub velocity: Vector2,
}

impl ContinuousOperationState {
    pub const IDLE: Self = Self {
        phase: OperationPhase::Idle,
        displacement: Vector2::ZERO,
        velocity: Vector2::ZERO,
    };

    #[inline]
    #[must_use]
    pub fn is_operating(&self) -> bool {
        self.phase == OperationPhase::Operating
    }

    /// Displacement along `axis`.
    #[inline]
    #[must_use]
    pub fn axis_displacement(&self, axis: Axis) -> f64 {
        self.displacement.along(axis)
    }
}

impl From<SwipeInputState> for ContinuousOperationState {
    fn from(state: SwipeInputState) -> Self {
        let phase = match state.phase {
            SwipePhase::Idle => OperationPhase::Idle,
            SwipePhase::Tracking | SwipePhase::Swiping => OperationPhase::Operating,
            SwipePhase::Ended => OperationPhase::Ended,
        };
        Self {
            phase,
            displacement: state.displacement,
            velocity: state.velocity,
        }
    }
}

/// Anything that can report a continuous operation.
pub trait ContinuousOperation {
    fn operation_state(&self) -> ContinuousOperationState;
}

impl ContinuousOperation for SwipeRecognizer {
    fn operation_state(&self) -> ContinuousOperationState {
        self.state().into()
    }
}

// ---------------------------------------------------------------------------
// ProgrammaticOperation
// ---------------------------------------------------------------------------

/// Drives a displacement along one axis from an animation instead of input.
///
/// Used for animated navigation (e.g. a "back" button that slides the active
/// panel away exactly as a finger would). Reports `Operating` while running
/// and `Ended` with the final displacement once complete.
#[derive(Debug, Clone)]
pub struct ProgrammaticOperation {
    axis: Axis,
    interpolator: AnimationFrameInterpolator,
    state: ContinuousOperationState,
    last_ms: Option<f64>,
}

impl ProgrammaticOperation {
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            interpolator: AnimationFrameInterpolator::new(),
            state: ContinuousOperationState::IDLE,
            last_ms: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interpolator.is_running()
    }

    /// Start animating the axis displacement from `from` to `to`.
    pub fn start(&mut self, from: f64, to: f64, duration_ms: f64, easing: EasingFn, now_ms: f64) {
        self.interpolator.start(from, to, duration_ms, easing, now_ms);
        let from = self.interpolator.value_at(now_ms).unwrap_or(from);
        self.state = ContinuousOperationState {
            phase: OperationPhase::Operating,
            displacement: self.vector(from),
            velocity: Vector2::ZERO,
        };
        self.last_ms = Some(now_ms);
        tracing::debug!(message = "operation.start", from, to, duration_ms);
    }

    /// Advance to `now_ms` and return the new state. Returns `true` in the
    /// second position exactly once, on the frame that completes the run.
    pub fn advance(&mut self, now_ms: f64) -> (ContinuousOperationState, bool) {
        let Some(frame) = self.interpolator.frame(now_ms) else {
            return (self.state, false);
        };
        let value = frame.value();
        let previous = self.state.displacement.along(self.axis);
        let elapsed = self.last_ms.map_or(0.0, |last| now_ms - last);
        let speed = if elapsed > 0.0 {
            (value - previous) / elapsed
        } else {
            0.0
        };
        self.last_ms = Some(now_ms);
        let completed = matches!(frame, InterpolatorFrame::Complete(_));
        self.state = ContinuousOperationState {
            phase: if completed {
                OperationPhase::Ended
            } else {
                OperationPhase::Operating
            },
            displacement: self.vector(value),
            velocity: self.vector(speed),
        };
        if completed {
            tracing::debug!(message = "operation.complete", value);
        }
        (self.state, completed)
    }

    /// Abort; the state reports `Ended` at the current displacement.
    pub fn cancel(&mut self) {
        if self.interpolator.is_running() {
            self.interpolator.cancel();
            self.state.phase = OperationPhase::Ended;
            self.state.velocity = Vector2::ZERO;
            tracing::debug!(message = "operation.cancel");
        }
    }

    /// Return to idle.
    pub fn reset(&mut self) {
        self.interpolator.cancel();
        self.state = ContinuousOperationState::IDLE;
        self.last_ms = None;
    }

    fn vector(&self, value: f64) -> Vector2 {
        match self.axis {
            Axis::Horizontal => Vector2::new(value, 0.0),
            Axis::Vertical => Vector2::new(0.0, value),
        }
    }
}

impl ContinuousOperation for ProgrammaticOperation {
    fn operation_state(&self) -> ContinuousOperationState {
        self.state
    }
}
