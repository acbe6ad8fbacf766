//! End-to-end pipeline tests: raw input in, navigation and frames out.

use paneflow::{
    Error, FrameOutput, InputEvent, MotionState, NavigationMode, OperationPhase,
    PaneflowConfig, PanelId, PanelRole, PivotView, PointerEvent, Rect, StackView,
};
use proptest::prelude::*;

const WIDTH: f64 = 400.0;

fn bounds() -> Rect {
    Rect::from_size(WIDTH, 800.0)
}

fn stack(ids: &[&str], config: PaneflowConfig) -> StackView {
    StackView::new(ids.iter().copied().map(PanelId::from), config, bounds()).unwrap()
}

fn down(x: f64, t: f64) -> InputEvent {
    InputEvent::PointerDown(PointerEvent::new(x, 400.0, t))
}

fn mv(x: f64, t: f64) -> InputEvent {
    InputEvent::PointerMove(PointerEvent::new(x, 400.0, t))
}

fn up(x: f64, t: f64) -> InputEvent {
    InputEvent::PointerUp(PointerEvent::new(x, 400.0, t))
}

fn cancel(x: f64, t: f64) -> InputEvent {
    InputEvent::PointerCancel(PointerEvent::new(x, 400.0, t))
}

// ═════════════════════════════════════════════════════════════════════════
// Edge gate
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn edge_zone_gates_back_swipe() {
    let mut view = stack(&["home", "detail"], PaneflowConfig::default());

    view.handle_input(&down(50.0, 0.0));
    assert!(!view.is_edge_gesture());
    view.handle_input(&mv(350.0, 100.0));
    assert!(view.handle_input(&up(350.0, 100.0)).is_none());
    assert_eq!(view.depth(), 1);

    view.handle_input(&down(10.0, 200.0));
    assert!(view.is_edge_gesture());
    assert!(view.wants_document_events());
    view.handle_input(&mv(310.0, 300.0));
    assert!(view.handle_input(&up(310.0, 300.0)).is_some());
    assert!(!view.is_edge_gesture());
    assert_eq!(view.current_id().as_str(), "home");
}

#[test]
fn leftward_edge_swipe_is_ignored() {
    let mut view = stack(&["home", "detail"], PaneflowConfig::default());
    view.resize(Rect::new(100.0, 0.0, WIDTH, 800.0));
    view.handle_input(&down(105.0, 0.0));
    view.handle_input(&mv(-200.0, 50.0));
    assert!(view.handle_input(&up(-200.0, 50.0)).is_none());
    assert_eq!(view.depth(), 1);
}

#[test]
fn container_props_hint_vertical_panning() {
    let view = stack(&["home"], PaneflowConfig::default());
    assert_eq!(view.container_props().touch_action, "pan-y");
}

// ═════════════════════════════════════════════════════════════════════════
// Continuity through the stack pipeline
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn eighty_percent_back_swipe_continues_from_finger() {
    let mut view = stack(&["home", "detail"], PaneflowConfig::default());
    view.frame(0.0);

    view.handle_input(&down(5.0, 0.0));
    view.handle_input(&mv(325.0, 16.0));
    let live = view.frame(16.0);
    assert_eq!(live.position_of("detail"), Some(320.0));
    assert_eq!(live.position_of("home"), Some(-24.0));
    assert!(view.state().is_revealing());

    assert!(view.handle_input(&up(325.0, 32.0)).is_some());
    let released = view.frame(32.0);
    assert_eq!(released.position_of("detail"), Some(320.0));
    assert_eq!(released.position_of("home"), Some(-24.0));
    assert!(released.needs_frame);

    let mut now = 32.0;
    let mut last_detail = 320.0;
    loop {
        now += 16.0;
        let out = view.frame(now);
        if let Some(x) = out.position_of("detail") {
            assert!(x >= last_detail, "exiting panel moved back into view");
            last_detail = x;
        }
        if !out.needs_frame {
            assert_eq!(out.position_of("home"), Some(0.0));
            assert_eq!(
                out.get(&"home".into()).map(|f| f.motion),
                Some(MotionState::AtRest)
            );
            break;
        }
        assert!(now < 1_000.0, "animation never settled");
    }
}

/// Render frames every 16ms until settled, checking that `key` only ever
/// moves in `direction` (+1 or -1). Returns the settled frame.
fn settle_monotonic(
    mut frame: impl FnMut(f64) -> FrameOutput,
    key: &str,
    direction: f64,
    mut last: f64,
    mut now: f64,
) -> FrameOutput {
    loop {
        now += 16.0;
        let out = frame(now);
        if let Some(x) = out.position_of(key) {
            assert!((x - last) * direction >= -1e-9, "{key} moved back: {last} -> {x}");
            last = x;
        }
        if !out.needs_frame {
            return out;
        }
        assert!(now < 2_000.0, "animation never settled");
    }
}

#[test]
fn move_to_root_reveals_from_behind() {
    let mut view = stack(&["a", "b", "c"], PaneflowConfig::default());
    let rest = view.frame(0.0);
    assert_eq!(rest.position_of("c"), Some(0.0));

    view.move_to(0);
    let out = view.frame(10.0);
    assert_eq!(out.position_of("a"), Some(-120.0));
    assert_eq!(out.position_of("c"), Some(0.0), "exit starts where it was");
    assert_eq!(out.get(&"a".into()).map(|f| f.role), Some(PanelRole::Active));

    let mut exit_view = view.clone();
    let settled = settle_monotonic(|t| exit_view.frame(t), "c", 1.0, 0.0, 10.0);
    assert_eq!(settled.position_of("a"), Some(0.0));
    settle_monotonic(|t| view.frame(t), "a", 1.0, -120.0, 10.0);
}

#[test]
fn tab_click_jump_never_snaps() {
    let mut view = PivotView::new(
        ["t0", "t1", "t2", "t3", "t4"].map(PanelId::from),
        0,
        NavigationMode::Linear,
        PaneflowConfig::default(),
        bounds(),
    )
    .unwrap();
    view.frame(0.0);

    view.select(3);
    let out = view.frame(10.0);
    let entering = out.get(&"t3".into()).unwrap();
    assert_eq!(entering.position, WIDTH);
    assert_eq!(entering.motion, MotionState::Animating);
    assert_eq!(out.position_of("t0"), Some(0.0));

    let mut leaving_view = view.clone();
    settle_monotonic(|t| leaving_view.frame(t), "t0", -1.0, 0.0, 10.0);
    let settled = settle_monotonic(|t| view.frame(t), "t3", -1.0, WIDTH, 10.0);
    assert_eq!(settled.position_of("t3"), Some(0.0));
    assert_eq!(settled.position_of("t0"), Some(-WIDTH), "arrives with the entering tab");
    assert_eq!(view.frame(2_100.0).position_of("t0"), None);
}

#[test]
fn overswipe_between_frames_keeps_panels_in_place() {
    let config = PaneflowConfig::default().with_commit_on_overswipe(true);
    let mut view = stack(&["a", "b"], config);
    view.frame(0.0);

    // Both moves land before the next frame; the second one commits.
    view.handle_input(&down(5.0, 0.0));
    assert!(view.handle_input(&mv(300.0, 8.0)).is_none());
    assert!(view.handle_input(&mv(420.0, 16.0)).is_some());
    let out = view.frame(16.0);
    assert_eq!(out.position_of("b"), Some(415.0));
    assert_eq!(out.position_of("a"), Some(0.0));

    assert!(view.handle_input(&up(420.0, 24.0)).is_none());
    let out = view.frame(24.0);
    assert_eq!(out.position_of("a"), Some(0.0));
    assert_eq!(out.position_of("b"), None);
    assert!(!out.needs_frame);
}

#[test]
fn full_width_swipe_commits_without_animation() {
    let mut view = stack(&["home", "detail"], PaneflowConfig::default());
    view.frame(0.0);
    view.handle_input(&down(0.0, 0.0));
    view.handle_input(&mv(WIDTH, 100.0));
    view.frame(100.0);
    view.handle_input(&up(WIDTH, 110.0));
    let out = view.frame(110.0);
    assert!(!out.needs_frame);
    assert_eq!(out.position_of("home"), Some(0.0));
}

#[test]
fn push_slides_in_from_the_far_edge() {
    let mut view = stack(&["home"], PaneflowConfig::default());
    view.frame(0.0);
    view.push("detail");
    let out = view.frame(0.0);
    assert_eq!(out.position_of("detail"), Some(WIDTH));
    assert!(out.needs_frame);
    let out = view.frame(1_000.0);
    assert_eq!(out.position_of("detail"), Some(0.0));
    assert_eq!(out.position_of("home"), Some(-120.0));
}

#[test]
fn resize_snaps_mid_gesture_release() {
    let mut view = stack(&["home", "detail"], PaneflowConfig::default());
    view.frame(0.0);
    view.handle_input(&down(5.0, 0.0));
    view.handle_input(&mv(105.0, 16.0));
    view.frame(16.0);
    view.handle_input(&cancel(105.0, 20.0));
    view.resize(Rect::from_size(1_000.0, 800.0));
    let out = view.frame(32.0);
    assert!(!out.needs_frame);
    assert_eq!(out.position_of("detail"), Some(0.0));
    assert_eq!(view.depth(), 1);
}

// ═════════════════════════════════════════════════════════════════════════
// Configuration
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn json_ratio_threshold_scales_with_container() {
    let config = PaneflowConfig::from_json_str(
        r#"{ "distance_threshold": { "value": 50, "unit": "ratio" },
             "swipe": { "thresholds": { "velocity_threshold": 10 } } }"#,
    )
    .unwrap();
    let mut view = stack(&["home", "detail"], config);

    // 150px of a 400px container is short of the 200px threshold.
    view.handle_input(&down(5.0, 0.0));
    view.handle_input(&mv(155.0, 1_000.0));
    assert!(view.handle_input(&up(155.0, 1_000.0)).is_none());

    view.resize(Rect::from_size(200.0, 800.0));
    view.handle_input(&down(5.0, 2_000.0));
    view.handle_input(&mv(155.0, 3_000.0));
    assert!(view.handle_input(&up(155.0, 3_000.0)).is_some());
}

#[test]
fn bad_json_surfaces_as_config_error() {
    let err = PaneflowConfig::from_json_str(r#"{ "distance_threshold": "lots" }"#).unwrap_err();
    let err: Error = err.into();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn invalid_initial_state_is_an_error() {
    let empty: [PanelId; 0] = [];
    assert!(matches!(
        StackView::new(empty, PaneflowConfig::default(), bounds()),
        Err(Error::Navigation(_))
    ));
    assert!(matches!(
        PivotView::new(
            ["a", "b"].map(PanelId::from),
            2,
            NavigationMode::Linear,
            PaneflowConfig::default(),
            bounds()
        ),
        Err(Error::Navigation(_))
    ));
}

// ═════════════════════════════════════════════════════════════════════════
// Pivot pipeline
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn pivot_swipe_animates_to_next_tab() {
    let mut view = PivotView::new(
        ["t0", "t1", "t2"].map(PanelId::from),
        0,
        NavigationMode::Linear,
        PaneflowConfig::default(),
        bounds(),
    )
    .unwrap();
    let rest = view.frame(0.0);
    assert_eq!(rest.position_of("t1"), Some(WIDTH));

    view.handle_input(&down(300.0, 0.0));
    view.handle_input(&mv(150.0, 100.0));
    assert_eq!(view.operation_state().phase, OperationPhase::Operating);
    let live = view.frame(100.0);
    assert_eq!(live.position_of("t0"), Some(-150.0));
    assert_eq!(live.position_of("t1"), Some(250.0));

    let t = view.handle_input(&up(150.0, 110.0)).unwrap();
    assert_eq!(t.after.active_index(), 1);
    let out = view.frame(110.0);
    assert_eq!(out.position_of("t1"), Some(250.0));
    assert!(out.needs_frame);

    let out = view.frame(2_000.0);
    assert_eq!(out.position_of("t1"), Some(0.0));
    assert_eq!(out.position_of("t0"), Some(-WIDTH));
    assert!(!out.needs_frame);
}

// ═════════════════════════════════════════════════════════════════════════
// Properties
// ═════════════════════════════════════════════════════════════════════════

fn path() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-600.0f64..600.0, -600.0f64..600.0), 1..20)
}

proptest! {
    #[test]
    fn cancel_never_navigates(moves in path()) {
        let mut view = stack(&["a", "b", "c"], PaneflowConfig::default());
        view.frame(0.0);
        view.handle_input(&down(5.0, 0.0));
        let mut t = 0.0;
        for (dx, dy) in &moves {
            t += 8.0;
            let event = InputEvent::PointerMove(PointerEvent::new(5.0 + dx, 400.0 + dy, t));
            prop_assert!(view.handle_input(&event).is_none());
            view.frame(t);
        }
        prop_assert!(view.handle_input(&cancel(0.0, t + 1.0)).is_none());
        prop_assert_eq!(view.depth(), 2);
        prop_assert!(!view.state().is_revealing());
        view.frame(t + 1.0);
    }

    #[test]
    fn pivot_stays_in_range(swipes in prop::collection::vec(-500.0f64..500.0, 1..12)) {
        let mut view = PivotView::new(
            ["a", "b", "c", "d"].map(PanelId::from),
            1,
            NavigationMode::Linear,
            PaneflowConfig::default(),
            bounds(),
        )
        .unwrap();
        let mut t = 0.0;
        for dx in swipes {
            view.handle_input(&down(200.0, t));
            view.handle_input(&mv(200.0 + dx, t + 50.0));
            view.handle_input(&up(200.0 + dx, t + 50.0));
            view.frame(t + 50.0);
            t += 100.0;
            prop_assert!(view.active_index() < 4);
        }
    }
}
