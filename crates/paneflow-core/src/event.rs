#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! These mirror the DOM pointer and wheel events the host forwards. All
//! events carry their own timestamp (milliseconds) so the recognizers never
//! read a clock themselves and stay deterministic under test.
//!
//! # Design Notes
//!
//! - Coordinates are client coordinates (viewport-relative CSS pixels).
//! - Wheel deltas keep the DOM sign convention (positive = scroll down/right);
//!   the swipe recognizer inverts them.

use serde::{Deserialize, Serialize};

/// Kind of device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerType {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// A pointer sample (down, move, up, or cancel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: i32,
    pub client_x: f64,
    pub client_y: f64,
    pub is_primary: bool,
    pub pointer_type: PointerType,
    /// Milliseconds.
    pub timestamp: f64,
}

impl PointerEvent {
    /// Create a primary mouse pointer event with id 1.
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64, timestamp: f64) -> Self {
        Self {
            pointer_id: 1,
            client_x,
            client_y,
            is_primary: true,
            pointer_type: PointerType::Mouse,
            timestamp,
        }
    }

    /// Set the pointer id.
    #[must_use]
    pub const fn with_id(mut self, pointer_id: i32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Set whether this is the primary pointer.
    #[must_use]
    pub const fn primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    /// Set the pointer device type.
    #[must_use]
    pub const fn with_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }
}

/// A wheel/trackpad scroll sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    /// Milliseconds.
    pub timestamp: f64,
}

impl WheelEvent {
    #[must_use]
    pub const fn new(delta_x: f64, delta_y: f64, timestamp: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            timestamp,
        }
    }
}

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    PointerCancel(PointerEvent),
    Wheel(WheelEvent),
}

impl InputEvent {
    /// Timestamp of the underlying sample.
    #[must_use]
    pub const fn timestamp(&self) -> f64 {
        match self {
            Self::PointerDown(e)
            | Self::PointerMove(e)
            | Self::PointerUp(e)
            | Self::PointerCancel(e) => e.timestamp,
            Self::Wheel(e) => e.timestamp,
        }
    }

    /// The pointer payload, if this is a pointer event.
    #[must_use]
    pub const fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::PointerDown(e)
            | Self::PointerMove(e)
            | Self::PointerUp(e)
            | Self::PointerCancel(e) => Some(e),
            Self::Wheel(_) => None,
        }
    }
}
