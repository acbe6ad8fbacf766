#![forbid(unsafe_code)]

//! Stack navigation pipeline.
//!
//! [`StackView`] owns every piece of a hierarchical navigation surface: the
//! navigator, a left-edge back-swipe gate, a programmatic driver for
//! animated "back" buttons, and the continuity controller over a
//! [`StackTransform`].
//!
//! # Gesture lifecycle
//!
//! 1. A pointer-down inside the edge zone starts an edge gesture.
//! 2. Once the gesture operates the view hands the current layout rules to
//!    the continuity controller, so panels keep following the finger even
//!    if the stack pops before the next frame. At depth > 0 it also
//!    dispatches `BeginReveal` so hosts can mount the parent panel.
//! 3. A release that completes a positive (rightward) swipe pops one level.
//!    A negative swipe is ignored.
//! 4. `EndReveal` is dispatched when the gesture ends without a pop (a pop
//!    clears the reveal itself).
//!
//! With `commit_on_overswipe`, a drag that covers the whole container pops
//! immediately, and the later release does not pop again.
//!
//! # Invariants
//!
//! 1. A canceled gesture never navigates.
//! 2. One gesture pops at most once.
//! 3. Edge input is ignored while an animated back is running.

use paneflow_core::edge::{EdgeGate, EdgeGateConfig};
use paneflow_core::event::InputEvent;
use paneflow_core::geometry::{Axis, Edge, Rect};
use paneflow_core::operation::{
    ContinuousOperation, ContinuousOperationState, OperationPhase, ProgrammaticOperation,
};
use paneflow_core::swipe::{ContainerProps, SwipeDirection, SwipeEnd};
use paneflow_core::time::Clock;
use paneflow_core::PanelId;
use paneflow_layout::{ContinuityController, FrameOutput, PanelPositioner, StackTransform};
use paneflow_nav::{StackNavigator, StackState, StackTransition};

use crate::config::PaneflowConfig;
use crate::Result;

/// Stack navigation with an edge back-swipe and continuous layout.
#[derive(Debug, Clone)]
pub struct StackView {
    config: PaneflowConfig,
    bounds: Rect,
    navigator: StackNavigator,
    gate: EdgeGate,
    programmatic: ProgrammaticOperation,
    transform: StackTransform,
    continuity: ContinuityController<StackTransform>,
    /// The current gesture already popped (overswipe commit).
    committed: bool,
    /// The current gesture's layout rules were handed to continuity.
    latched: bool,
}

impl StackView {
    /// Build a view over `initial` (root first) inside `bounds`.
    pub fn new(
        initial: impl IntoIterator<Item = PanelId>,
        config: PaneflowConfig,
        bounds: Rect,
    ) -> Result<Self> {
        let config = config.validated();
        let navigator = StackNavigator::new(initial)?;
        let size = bounds.size_along(Axis::Horizontal);
        let gate = EdgeGate::new(gate_config(&config, size));
        let transform =
            StackTransform::new(config.stack, Axis::Horizontal, size, navigator.state());
        tracing::debug!(
            message = "stack_view.new",
            depth = navigator.depth(),
            width = size
        );
        Ok(Self {
            continuity: ContinuityController::new(config.continuity),
            programmatic: ProgrammaticOperation::new(Axis::Horizontal),
            committed: false,
            latched: false,
            config,
            bounds,
            navigator,
            gate,
            transform,
        })
    }

    // -- Queries ----------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &PaneflowConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub fn navigator(&self) -> &StackNavigator {
        &self.navigator
    }

    #[must_use]
    pub fn state(&self) -> &StackState {
        self.navigator.state()
    }

    #[must_use]
    pub fn current_id(&self) -> &PanelId {
        self.navigator.current_id()
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.navigator.depth()
    }

    #[must_use]
    pub fn can_go(&self, direction: i32) -> bool {
        self.navigator.can_go(direction)
    }

    /// Props for the gesture container element.
    #[must_use]
    pub fn container_props(&self) -> ContainerProps {
        self.gate.container_props()
    }

    /// Whether the host should listen for document-level pointer events.
    #[must_use]
    pub fn wants_document_events(&self) -> bool {
        self.gate.recognizer().wants_document_events()
    }

    #[must_use]
    pub fn is_edge_gesture(&self) -> bool {
        self.gate.is_edge_gesture()
    }

    /// When the host should call [`poll`](Self::poll) next, if at all.
    #[must_use]
    pub fn wheel_deadline(&self) -> Option<f64> {
        self.gate.recognizer().wheel_deadline()
    }

    /// The operation currently driving the layout.
    #[must_use]
    pub fn operation_state(&self) -> ContinuousOperationState {
        if self.programmatic.is_running() {
            self.programmatic.operation_state()
        } else {
            self.gate.operation_state()
        }
    }

    // -- Navigation -------------------------------------------------------

    pub fn push(&mut self, id: impl Into<PanelId>) -> StackTransition {
        self.navigator.push(id)
    }

    pub fn go(&mut self, direction: i32) -> StackTransition {
        self.navigator.go(direction)
    }

    pub fn move_to(&mut self, depth: usize) -> StackTransition {
        self.navigator.move_to(depth)
    }

    pub fn replace(&mut self, id: impl Into<PanelId>) -> StackTransition {
        self.navigator.replace(id)
    }

    /// Pop one level by sliding the active panel out as a finger would.
    ///
    /// Returns `false` (and does nothing) at the root, while a gesture is
    /// in progress, or while another animated back is running. The pop is
    /// dispatched by the [`frame`](Self::frame) that completes the slide.
    pub fn animate_back(&mut self, now_ms: f64) -> bool {
        if !self.navigator.can_go(-1)
            || self.programmatic.is_running()
            || self.gate.recognizer().is_pointer_down()
        {
            tracing::debug!(message = "stack_view.back_ignored", depth = self.depth());
            return false;
        }
        let size = self.transform.size();
        if size <= 0.0 {
            self.navigator.go(-1);
            return true;
        }
        self.navigator.begin_reveal();
        let continuity = *self.continuity.config();
        self.programmatic.start(
            0.0,
            size,
            continuity.duration_ms,
            continuity.easing.function(),
            now_ms,
        );
        tracing::debug!(message = "stack_view.back_animated", depth = self.depth());
        true
    }

    // -- Input ------------------------------------------------------------

    /// Feed one input event. Returns the transition when it popped a level.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<StackTransition> {
        if self.programmatic.is_running() {
            tracing::trace!(message = "stack_view.input_ignored", reason = "animating");
            return None;
        }
        let end = self.gate.handle(event, &self.bounds);
        self.after_input(end)
    }

    /// Close an open wheel gesture once its idle timeout has passed.
    pub fn poll(&mut self, now_ms: f64) -> Option<StackTransition> {
        let end = self.gate.poll(now_ms);
        self.after_input(end)
    }

    /// Track a new container rect. Layout snaps to the new size on the next
    /// frame; a relative distance threshold is re-resolved.
    pub fn resize(&mut self, bounds: Rect) {
        self.bounds = bounds;
        let size = bounds.size_along(Axis::Horizontal);
        self.transform.set_size(size);
        let thresholds = self.config.thresholds_for(size);
        self.gate.recognizer_mut().set_thresholds(thresholds);
        tracing::debug!(message = "stack_view.resize", width = size);
    }

    // -- Frame ------------------------------------------------------------

    /// [`poll`](Self::poll) at `clock`'s current time.
    pub fn poll_now(&mut self, clock: &impl Clock) -> Option<StackTransition> {
        self.poll(clock.now_ms())
    }

    /// [`frame`](Self::frame) at `clock`'s current time.
    pub fn frame_now(&mut self, clock: &impl Clock) -> FrameOutput {
        self.frame(clock.now_ms())
    }

    /// Compute the frame for `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutput {
        self.transform.set_state(self.navigator.state());
        if !self.programmatic.is_running() {
            let op = self.gate.operation_state();
            return self.continuity.update(&self.transform, &op, now_ms);
        }
        let (op, completed) = self.programmatic.advance(now_ms);
        if !completed {
            return self.continuity.update(&self.transform, &op, now_ms);
        }
        // Land on the final displacement under the pre-pop rules, then pop.
        let landed = ContinuousOperationState {
            phase: OperationPhase::Operating,
            ..op
        };
        self.continuity.update(&self.transform, &landed, now_ms);
        self.navigator.go(-1);
        self.programmatic.reset();
        self.transform.set_state(self.navigator.state());
        self.continuity.update(&self.transform, &op, now_ms)
    }

    fn after_input(&mut self, end: Option<SwipeEnd>) -> Option<StackTransition> {
        let op = self.gate.operation_state();
        let mut popped = None;

        if op.is_operating() {
            if !self.latched {
                self.latched = true;
                self.transform.set_state(self.navigator.state());
                self.continuity.latch(&self.transform);
            }
            let reveal = !self.committed && !self.navigator.state().is_revealing();
            if reveal && self.navigator.depth() > 0 {
                self.navigator.begin_reveal();
            }
            let dragged = op.axis_displacement(Axis::Horizontal);
            if self.config.commit_on_overswipe
                && !self.committed
                && self.transform.size() > 0.0
                && dragged >= self.transform.size()
                && self.navigator.can_go(-1)
            {
                self.committed = true;
                tracing::debug!(message = "stack_view.overswipe", dragged);
                popped = Some(self.navigator.go(-1));
            }
            return popped;
        }

        if let Some(end) = end {
            let back = end.direction == SwipeDirection::Positive && !self.committed;
            if back && self.navigator.can_go(-1) {
                tracing::debug!(
                    message = "stack_view.back_swipe",
                    displacement = end.displacement.x,
                    velocity = end.velocity.x
                );
                popped = Some(self.navigator.go(-1));
            } else {
                tracing::trace!(message = "stack_view.swipe_ignored", direction = ?end.direction);
            }
        }
        if self.navigator.state().is_revealing() {
            self.navigator.end_reveal();
        }
        self.committed = false;
        self.latched = false;
        popped
    }
}

fn gate_config(config: &PaneflowConfig, size: f64) -> EdgeGateConfig {
    EdgeGateConfig::default()
        .with_edge(Edge::Left)
        .with_edge_width(config.edge_width)
        .with_forward_wheel(config.forward_wheel)
        .with_swipe(config.swipe_for(size))
}
