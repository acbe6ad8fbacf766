#![forbid(unsafe_code)]

//! Edge-gated swipes (e.g. back-swipe from the left edge).
//!
//! [`EdgeGate`] wraps a [`SwipeRecognizer`] and forwards a pointer-down only
//! when it lands within `edge_width` px of the configured edge of the
//! container. Everything after the down is handled by the inner recognizer,
//! which ignores pointers it never started tracking.
//!
//! # Invariants
//!
//! 1. [`is_edge_gesture`](EdgeGate::is_edge_gesture) is true from a
//!    qualifying down until that pointer's release, whether or not the
//!    directional lock has engaged.
//! 2. The swipe axis follows the edge: left/right edges swipe horizontally,
//!    top/bottom edges vertically.

use serde::{Deserialize, Serialize};

use crate::event::{InputEvent, PointerEvent};
use crate::geometry::{Edge, Rect};
use crate::operation::{ContinuousOperation, ContinuousOperationState};
use crate::swipe::{ContainerProps, SwipeConfig, SwipeEnd, SwipeInputState, SwipeRecognizer};

/// Default edge zone width (px).
pub const DEFAULT_EDGE_WIDTH: f64 = 20.0;

/// Edge gate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeGateConfig {
    pub edge: Edge,
    /// Width of the activation zone (px).
    pub edge_width: f64,
    /// Forward wheel events to the inner recognizer (default: false).
    pub forward_wheel: bool,
    /// Inner recognizer config; its axis is overridden by the edge's axis.
    pub swipe: SwipeConfig,
}

impl Default for EdgeGateConfig {
    fn default() -> Self {
        Self {
            edge: Edge::Left,
            edge_width: DEFAULT_EDGE_WIDTH,
            forward_wheel: false,
            swipe: SwipeConfig::default(),
        }
    }
}

impl EdgeGateConfig {
    #[must_use]
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edge = edge;
        self
    }

    #[must_use]
    pub fn with_edge_width(mut self, width: f64) -> Self {
        self.edge_width = width;
        self
    }

    #[must_use]
    pub fn with_forward_wheel(mut self, forward: bool) -> Self {
        self.forward_wheel = forward;
        self
    }

    #[must_use]
    pub fn with_swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }
}

/// Whether `(x, y)` lies within `width` px inside `edge` of `bounds`.
#[must_use]
pub fn in_edge_zone(bounds: &Rect, edge: Edge, width: f64, x: f64, y: f64) -> bool {
    let inset = bounds.inset_from(edge, x, y);
    (0.0..=width).contains(&inset)
}

/// A swipe recognizer that only starts from one container edge.
#[derive(Debug, Clone)]
pub struct EdgeGate {
    edge: Edge,
    edge_width: f64,
    forward_wheel: bool,
    recognizer: SwipeRecognizer,
    edge_gesture: bool,
}

impl Default for EdgeGate {
    fn default() -> Self {
        Self::new(EdgeGateConfig::default())
    }
}

impl EdgeGate {
    #[must_use]
    pub fn new(config: EdgeGateConfig) -> Self {
        let swipe = config.swipe.with_axis(config.edge.axis());
        Self {
            edge: config.edge,
            edge_width: config.edge_width.max(0.0),
            forward_wheel: config.forward_wheel,
            recognizer: SwipeRecognizer::new(swipe),
            edge_gesture: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// True from a qualifying pointer-down until its release.
    #[inline]
    #[must_use]
    pub fn is_edge_gesture(&self) -> bool {
        self.edge_gesture
    }

    #[must_use]
    pub fn state(&self) -> SwipeInputState {
        self.recognizer.state()
    }

    #[must_use]
    pub fn recognizer(&self) -> &SwipeRecognizer {
        &self.recognizer
    }

    pub fn recognizer_mut(&mut self) -> &mut SwipeRecognizer {
        &mut self.recognizer
    }

    #[must_use]
    pub fn container_props(&self) -> ContainerProps {
        self.recognizer.container_props()
    }

    /// Process one event against the container's current bounding rect.
    pub fn handle(&mut self, event: &InputEvent, bounds: &Rect) -> Option<SwipeEnd> {
        match event {
            InputEvent::PointerDown(e) => {
                self.on_pointer_down(e, bounds);
                None
            }
            InputEvent::PointerUp(_) | InputEvent::PointerCancel(_) => {
                let end = self.recognizer.handle(event);
                self.sync_edge_gesture();
                end
            }
            InputEvent::PointerMove(_) => self.recognizer.handle(event),
            InputEvent::Wheel(_) if self.forward_wheel => self.recognizer.handle(event),
            InputEvent::Wheel(_) => None,
        }
    }

    /// Close an open wheel gesture (only relevant with `forward_wheel`).
    pub fn poll(&mut self, now_ms: f64) -> Option<SwipeEnd> {
        self.recognizer.poll(now_ms)
    }

    pub fn reset(&mut self) {
        self.recognizer.reset();
        self.edge_gesture = false;
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, bounds: &Rect) {
        if self.recognizer.is_pointer_down() {
            return;
        }
        let inside = in_edge_zone(
            bounds,
            self.edge,
            self.edge_width,
            event.client_x,
            event.client_y,
        );
        if !inside {
            tracing::trace!(
                message = "edge.rejected",
                edge = ?self.edge,
                x = event.client_x,
                y = event.client_y
            );
            return;
        }
        if self.recognizer.on_pointer_down(event) {
            self.edge_gesture = true;
            tracing::debug!(
                message = "edge.begin",
                edge = ?self.edge,
                pointer_id = event.pointer_id
            );
        }
    }

    fn sync_edge_gesture(&mut self) {
        if self.edge_gesture && !self.recognizer.is_pointer_down() {
            self.edge_gesture = false;
            tracing::debug!(message = "edge.end", edge = ?self.edge);
        }
    }
}

impl ContinuousOperation for EdgeGate {
    fn operation_state(&self) -> ContinuousOperationState {
        self.recognizer.state().into()
    }
}
