#![forbid(unsafe_code)]

//! Pivot (tab/carousel) pipeline.
//!
//! [`PivotView`] pairs a [`PivotNavigator`] with a horizontal
//! [`SwipeRecognizer`] and keeps the slots continuous through a
//! [`ContinuityController`] over a [`PivotTransform`].
//!
//! A swipe dragged left (direction -1) pages forward, dragged right pages
//! back. Under linear mode a swipe past either end is ignored and the
//! panels settle back.

use paneflow_core::event::InputEvent;
use paneflow_core::geometry::{Axis, Rect};
use paneflow_core::operation::{ContinuousOperation, ContinuousOperationState};
use paneflow_core::swipe::{ContainerProps, SwipeEnd, SwipeRecognizer};
use paneflow_core::time::Clock;
use paneflow_core::PanelId;
use paneflow_layout::{ContinuityController, FrameOutput, PivotSlot, PivotTransform};
use paneflow_nav::{NavigationMode, PivotNavigator, PivotState, PivotTransition};

use crate::config::PaneflowConfig;
use crate::Result;

/// Swipeable tab/carousel view.
#[derive(Debug, Clone)]
pub struct PivotView {
    config: PaneflowConfig,
    bounds: Rect,
    navigator: PivotNavigator,
    recognizer: SwipeRecognizer,
    transform: PivotTransform,
    continuity: ContinuityController<PivotTransform>,
}

impl PivotView {
    /// Build a view over `items` with `active_index` selected.
    pub fn new(
        items: impl IntoIterator<Item = PanelId>,
        active_index: usize,
        mode: NavigationMode,
        config: PaneflowConfig,
        bounds: Rect,
    ) -> Result<Self> {
        let config = config.validated();
        let navigator = PivotNavigator::new(items, active_index, mode)?;
        let size = bounds.size_along(Axis::Horizontal);
        let recognizer = SwipeRecognizer::new(config.swipe_for(size).with_axis(Axis::Horizontal));
        let transform = PivotTransform::new(
            config.pivot,
            Axis::Horizontal,
            size,
            navigator.items(),
            *navigator.state(),
        );
        tracing::debug!(
            message = "pivot_view.new",
            items = navigator.items().len(),
            active = navigator.active_index(),
            mode = ?mode
        );
        Ok(Self {
            continuity: ContinuityController::new(config.continuity),
            config,
            bounds,
            navigator,
            recognizer,
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
    pub fn navigator(&self) -> &PivotNavigator {
        &self.navigator
    }

    #[must_use]
    pub fn state(&self) -> &PivotState {
        self.navigator.state()
    }

    #[inline]
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.navigator.active_index()
    }

    #[must_use]
    pub fn active_id(&self) -> &PanelId {
        self.navigator.active_id()
    }

    #[must_use]
    pub fn can_go(&self, delta: i32) -> bool {
        self.navigator.can_go(delta)
    }

    /// Rendered slots for the committed state.
    #[must_use]
    pub fn slots(&self) -> &[PivotSlot] {
        self.transform.slots()
    }

    #[must_use]
    pub fn container_props(&self) -> ContainerProps {
        self.recognizer.container_props()
    }

    #[must_use]
    pub fn wants_document_events(&self) -> bool {
        self.recognizer.wants_document_events()
    }

    #[must_use]
    pub fn wheel_deadline(&self) -> Option<f64> {
        self.recognizer.wheel_deadline()
    }

    #[must_use]
    pub fn operation_state(&self) -> ContinuousOperationState {
        self.recognizer.operation_state()
    }

    /// Tab indicator offset for tabs `tab_width` px wide.
    #[must_use]
    pub fn indicator_position(&self, tab_width: f64) -> f64 {
        self.transform
            .indicator_position(tab_width, &self.recognizer.operation_state())
    }

    // -- Navigation -------------------------------------------------------

    pub fn go(&mut self, delta: i32) -> PivotTransition {
        self.navigator.go(delta)
    }

    /// Jump to `index` (a tab click), taking the shortest path under loop.
    pub fn select(&mut self, index: usize) -> PivotTransition {
        self.navigator.go_to(index)
    }

    /// Replace the item set, keeping the active index in range.
    pub fn set_items(
        &mut self,
        items: impl IntoIterator<Item = PanelId>,
    ) -> Result<PivotTransition> {
        Ok(self.navigator.set_items(items)?)
    }

    // -- Input ------------------------------------------------------------

    /// Feed one input event. Returns the transition when it paged.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<PivotTransition> {
        let end = self.recognizer.handle(event)?;
        self.page(end)
    }

    /// Close an open wheel gesture once its idle timeout has passed.
    pub fn poll(&mut self, now_ms: f64) -> Option<PivotTransition> {
        let end = self.recognizer.poll(now_ms)?;
        self.page(end)
    }

    /// Track a new container rect.
    pub fn resize(&mut self, bounds: Rect) {
        self.bounds = bounds;
        let size = bounds.size_along(Axis::Horizontal);
        self.transform.set_size(size);
        let thresholds = self.config.thresholds_for(size);
        self.recognizer.set_thresholds(thresholds);
        tracing::debug!(message = "pivot_view.resize", width = size);
    }

    // -- Frame ------------------------------------------------------------

    /// [`poll`](Self::poll) at `clock`'s current time.
    pub fn poll_now(&mut self, clock: &impl Clock) -> Option<PivotTransition> {
        self.poll(clock.now_ms())
    }

    /// [`frame`](Self::frame) at `clock`'s current time.
    pub fn frame_now(&mut self, clock: &impl Clock) -> FrameOutput {
        self.frame(clock.now_ms())
    }

    /// Compute the frame for `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutput {
        self.transform
            .set_state(self.navigator.items(), *self.navigator.state());
        let op = self.recognizer.operation_state();
        self.continuity.update(&self.transform, &op, now_ms)
    }

    fn page(&mut self, end: SwipeEnd) -> Option<PivotTransition> {
        let delta = -end.direction.sign();
        if delta == 0 || !self.navigator.can_go(delta) {
            tracing::debug!(
                message = "pivot_view.swipe_ignored",
                delta,
                active = self.navigator.active_index()
            );
            return None;
        }
        Some(self.navigator.go(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paneflow_core::event::{PointerEvent, WheelEvent};
    use paneflow_core::time::ManualClock;
    use paneflow_layout::{PivotTransformConfig, TabMode};

    fn view(mode: NavigationMode, active: usize) -> PivotView {
        PivotView::new(
            ["t0", "t1", "t2", "t3", "t4"].map(PanelId::from),
            active,
            mode,
            PaneflowConfig::default(),
            Rect::from_size(400.0, 600.0),
        )
        .unwrap()
    }

    fn swipe(view: &mut PivotView, dx: f64) -> Option<PivotTransition> {
        view.handle_input(&InputEvent::PointerDown(PointerEvent::new(200.0, 300.0, 0.0)));
        view.handle_input(&InputEvent::PointerMove(PointerEvent::new(200.0 + dx, 300.0, 500.0)));
        view.handle_input(&InputEvent::PointerUp(PointerEvent::new(200.0 + dx, 300.0, 500.0)))
    }

    #[test]
    fn left_swipe_pages_forward() {
        let mut v = view(NavigationMode::Linear, 0);
        let t = swipe(&mut v, -150.0).unwrap();
        assert_eq!(t.delta, 1);
        assert_eq!(v.active_id().as_str(), "t1");
    }

    #[test]
    fn right_swipe_pages_back() {
        let mut v = view(NavigationMode::Linear, 2);
        swipe(&mut v, 150.0).unwrap();
        assert_eq!(v.active_index(), 1);
    }

    #[test]
    fn linear_edge_is_ignored() {
        let mut v = view(NavigationMode::Linear, 0);
        assert!(swipe(&mut v, 150.0).is_none());
        assert_eq!(v.active_index(), 0);
    }

    #[test]
    fn loop_wraps() {
        let mut v = view(NavigationMode::Loop, 0);
        let t = swipe(&mut v, 150.0).unwrap();
        assert_eq!(t.delta, -1);
        assert_eq!(v.active_index(), 4);
    }

    #[test]
    fn short_slow_drag_does_not_page() {
        let mut v = view(NavigationMode::Linear, 0);
        assert!(swipe(&mut v, -40.0).is_none());
    }

    #[test]
    fn select_takes_shortest_path() {
        let mut v = view(NavigationMode::Loop, 0);
        let t = v.select(4);
        assert_eq!(t.delta, -1);
        assert_eq!(v.active_index(), 4);
    }

    #[test]
    fn wheel_pages_after_idle() {
        let mut v = view(NavigationMode::Linear, 0);
        v.handle_input(&InputEvent::Wheel(WheelEvent::new(60.0, 0.0, 0.0)));
        v.handle_input(&InputEvent::Wheel(WheelEvent::new(60.0, 0.0, 16.0)));
        assert_eq!(v.wheel_deadline(), Some(166.0));
        assert!(v.poll(100.0).is_none());
        let t = v.poll(170.0).unwrap();
        assert_eq!(t.delta, 1);
    }

    #[test]
    fn poll_now_closes_wheel_on_the_clock() {
        let clock = ManualClock::new(0.0);
        let mut v = view(NavigationMode::Linear, 0);
        v.handle_input(&InputEvent::Wheel(WheelEvent::new(60.0, 0.0, 0.0)));
        v.handle_input(&InputEvent::Wheel(WheelEvent::new(60.0, 0.0, 16.0)));
        clock.set(100.0);
        assert!(v.poll_now(&clock).is_none());
        clock.advance(70.0);
        assert_eq!(v.poll_now(&clock).map(|t| t.delta), Some(1));
        assert_eq!(v.frame_now(&clock).position_of("t1"), Some(0.0));
    }

    #[test]
    fn fixed_tabs_indicator_follows_drag() {
        let config = PaneflowConfig::default()
            .with_pivot(PivotTransformConfig::default().with_tab_mode(TabMode::Fixed));
        let mut v = PivotView::new(
            ["a", "b", "c"].map(PanelId::from),
            1,
            NavigationMode::Linear,
            config,
            Rect::from_size(400.0, 600.0),
        )
        .unwrap();
        assert_eq!(v.indicator_position(80.0), 80.0);
        v.handle_input(&InputEvent::PointerDown(PointerEvent::new(200.0, 300.0, 0.0)));
        v.handle_input(&InputEvent::PointerMove(PointerEvent::new(170.0, 300.0, 100.0)));
        assert_eq!(v.indicator_position(80.0), 110.0);
    }

    #[test]
    fn set_items_rejects_duplicates() {
        let mut v = view(NavigationMode::Linear, 3);
        assert!(v.set_items(["x", "x"].map(PanelId::from)).is_err());
        let t = v.set_items(["x", "y"].map(PanelId::from)).unwrap();
        assert_eq!(t.after.active_index(), 1);
    }
}
