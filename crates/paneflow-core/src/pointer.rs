#![forbid(unsafe_code)]

//! Single-pointer tracking.
//!
//! [`PointerTracker`] records the start and current sample of exactly one
//! active pointer. It is the only writer of [`PointerTrackingState`].
//!
//! # Invariants
//!
//! 1. At most one pointer is tracked; events for any other `pointer_id` are
//!    ignored until the tracked pointer is released.
//! 2. `start` and `current` are both `Some` iff `is_down`.
//! 3. A release (up or cancel) returns the final snapshot and resets the
//!    state to all-empty.
//! 4. [`wants_document_events`](PointerTracker::wants_document_events) is true
//!    exactly while tracking; hosts attach document-level move/up listeners
//!    only for that lifetime.
//!
//! # Failure Modes
//!
//! - Move/up without a prior down: ignored (returns `false`/`None`).
//! - A second down while tracking: ignored, the first pointer keeps ownership.

use serde::{Deserialize, Serialize};

use crate::event::{PointerEvent, PointerType};
use crate::geometry::{TimestampedPoint, Vector2};

/// Which pointers may start tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerTrackerConfig {
    /// Only the primary pointer starts tracking (default: true).
    pub primary_only: bool,
    /// Accepted device types; empty accepts every type.
    pub pointer_types: Vec<PointerType>,
}

impl Default for PointerTrackerConfig {
    fn default() -> Self {
        Self {
            primary_only: true,
            pointer_types: Vec::new(),
        }
    }
}

impl PointerTrackerConfig {
    #[must_use]
    pub fn with_primary_only(mut self, primary_only: bool) -> Self {
        self.primary_only = primary_only;
        self
    }

    #[must_use]
    pub fn with_pointer_types(mut self, types: impl IntoIterator<Item = PointerType>) -> Self {
        self.pointer_types = types.into_iter().collect();
        self
    }

    fn accepts(&self, event: &PointerEvent) -> bool {
        if self.primary_only && !event.is_primary {
            return false;
        }
        self.pointer_types.is_empty() || self.pointer_types.contains(&event.pointer_type)
    }
}

/// Snapshot of the tracked pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerTrackingState {
    pub is_down: bool,
    pub start: Option<TimestampedPoint>,
    pub current: Option<TimestampedPoint>,
    pub pointer_id: Option<i32>,
    pub was_canceled: bool,
}

impl PointerTrackingState {
    /// `current - start`, or zero when not tracking.
    #[must_use]
    pub fn displacement(&self) -> Vector2 {
        match (self.start, self.current) {
            (Some(start), Some(current)) => current.position() - start.position(),
            _ => Vector2::ZERO,
        }
    }

    /// Displacement divided by elapsed milliseconds (zero if elapsed <= 0).
    #[must_use]
    pub fn velocity(&self) -> Vector2 {
        match (self.start, self.current) {
            (Some(start), Some(current)) => self
                .displacement()
                .per(current.timestamp - start.timestamp),
            _ => Vector2::ZERO,
        }
    }
}

/// Tracks one active pointer from down to up/cancel.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    config: PointerTrackerConfig,
    state: PointerTrackingState,
}

impl PointerTracker {
    #[must_use]
    pub fn new(config: PointerTrackerConfig) -> Self {
        Self {
            config,
            state: PointerTrackingState::default(),
        }
    }

    /// Current snapshot.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &PointerTrackingState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.state.is_down
    }

    /// Whether document-level move/up/cancel listeners should be attached.
    #[inline]
    #[must_use]
    pub fn wants_document_events(&self) -> bool {
        self.state.is_down
    }

    #[must_use]
    pub fn config(&self) -> &PointerTrackerConfig {
        &self.config
    }

    /// Begin tracking. Returns `true` if this pointer now owns the tracker.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> bool {
        if self.state.is_down {
            tracing::trace!(
                message = "pointer.down_ignored",
                reason = "already_tracking",
                pointer_id = event.pointer_id
            );
            return false;
        }
        if !self.config.accepts(event) {
            tracing::trace!(
                message = "pointer.down_ignored",
                reason = "filtered",
                pointer_id = event.pointer_id
            );
            return false;
        }
        let point = TimestampedPoint::new(event.client_x, event.client_y, event.timestamp);
        self.state = PointerTrackingState {
            is_down: true,
            start: Some(point),
            current: Some(point),
            pointer_id: Some(event.pointer_id),
            was_canceled: false,
        };
        tracing::trace!(message = "pointer.listeners_attached", pointer_id = event.pointer_id);
        true
    }

    /// Update `current`. Returns `true` if the event belonged to the tracked pointer.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> bool {
        if !self.owns(event) {
            return false;
        }
        self.state.current = Some(TimestampedPoint::new(
            event.client_x,
            event.client_y,
            event.timestamp,
        ));
        true
    }

    /// End tracking normally, returning the final snapshot.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> Option<PointerTrackingState> {
        if !self.owns(event) {
            return None;
        }
        self.on_pointer_move(event);
        Some(self.release())
    }

    /// End tracking as canceled, returning the final snapshot with
    /// `was_canceled = true`.
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) -> Option<PointerTrackingState> {
        if !self.owns(event) {
            return None;
        }
        self.state.was_canceled = true;
        Some(self.release())
    }

    /// Drop any tracked pointer without reporting it.
    pub fn reset(&mut self) {
        if self.state.is_down {
            tracing::trace!(message = "pointer.listeners_detached", reason = "reset");
        }
        self.state = PointerTrackingState::default();
    }

    fn owns(&self, event: &PointerEvent) -> bool {
        self.state.is_down && self.state.pointer_id == Some(event.pointer_id)
    }

    fn release(&mut self) -> PointerTrackingState {
        let snapshot = self.state;
        self.state = PointerTrackingState::default();
        tracing::trace!(
            message = "pointer.listeners_detached",
            canceled = snapshot.was_canceled
        );
        snapshot
    }
}
