#![forbid(unsafe_code)]

//! Directional (axis) lock.
//!
//! Once either component of the accumulated displacement exceeds the lock
//! threshold, the gesture is locked to the axis with the larger magnitude
//! for the rest of its lifetime.
//!
//! # Invariants
//!
//! 1. The lock is permanent until [`DirectionalLock::reset`] (or the tracking
//!    state reports the pointer as released).
//! 2. The comparison is strict: a component exactly equal to the threshold
//!    does not lock.
//! 3. Ties (`|dx| == |dy|`) resolve to [`Axis::Horizontal`].

use crate::geometry::{Axis, Vector2};
use crate::pointer::PointerTrackingState;

/// Result of a lock evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockState {
    pub locked_axis: Option<Axis>,
    pub is_locked: bool,
}

impl LockState {
    const UNLOCKED: Self = Self {
        locked_axis: None,
        is_locked: false,
    };

    fn locked(axis: Axis) -> Self {
        Self {
            locked_axis: Some(axis),
            is_locked: true,
        }
    }
}

/// Pure classification: which axis `displacement` locks to, if any.
#[must_use]
pub fn classify_axis(displacement: Vector2, threshold: f64) -> Option<Axis> {
    let ax = displacement.x.abs();
    let ay = displacement.y.abs();
    if ax <= threshold && ay <= threshold {
        return None;
    }
    if ax >= ay {
        Some(Axis::Horizontal)
    } else {
        Some(Axis::Vertical)
    }
}

/// Stateful axis lock for one gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DirectionalLock {
    threshold: f64,
    locked: Option<Axis>,
}

impl DirectionalLock {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            locked: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Current lock without re-evaluating.
    #[must_use]
    pub fn state(&self) -> LockState {
        self.locked.map_or(LockState::UNLOCKED, LockState::locked)
    }

    /// Evaluate against a pointer snapshot; a released pointer resets the lock.
    pub fn update(&mut self, tracking: &PointerTrackingState) -> LockState {
        if !tracking.is_down {
            self.reset();
            return LockState::UNLOCKED;
        }
        self.update_displacement(tracking.displacement())
    }

    /// Evaluate against an accumulated displacement (used by the wheel channel).
    pub fn update_displacement(&mut self, displacement: Vector2) -> LockState {
        if self.locked.is_none()
            && let Some(axis) = classify_axis(displacement, self.threshold)
        {
            tracing::trace!(
                message = "lock.engaged",
                axis = ?axis,
                dx = displacement.x,
                dy = displacement.y
            );
            self.locked = Some(axis);
        }
        self.state()
    }

    pub fn reset(&mut self) {
        self.locked = None;
    }
}
