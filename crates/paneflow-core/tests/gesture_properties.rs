//! Property tests for gesture classification.
//!
//! 1. **Cancel never swipes**: any displacement followed by a cancel yields
//!    no swipe end and a zero direction.
//! 2. **Direction implies on-axis lock**: a non-zero direction only ever
//!    appears together with a swipe on the configured axis.
//! 3. **Release agrees with the pure rule**: the recognizer triggers exactly
//!    when `is_swipe_triggered` does for a locked on-axis release.
//! 4. **Interpolator ends on target**: every run completes at exactly `to`.

use paneflow_core::animation::{AnimationFrameInterpolator, EasingKind, InterpolatorFrame};
use paneflow_core::event::{InputEvent, PointerEvent};
use paneflow_core::swipe::{
    SwipeConfig, SwipeDirection, SwipeInputThresholds, SwipePhase, SwipeRecognizer, TriggerRule,
    is_swipe_triggered,
};
use paneflow_core::threshold::{Threshold, resolve_threshold};
use paneflow_core::{Axis, Vector2};
use proptest::prelude::*;

fn moves() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-600.0f64..600.0, -600.0f64..600.0), 1..20)
}

fn feed(sr: &mut SwipeRecognizer, path: &[(f64, f64)]) {
    sr.handle(&InputEvent::PointerDown(PointerEvent::new(0.0, 0.0, 0.0)));
    for (i, (x, y)) in path.iter().enumerate() {
        let t = (i as f64 + 1.0) * 16.0;
        sr.handle(&InputEvent::PointerMove(PointerEvent::new(*x, *y, t)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Cancel never swipes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cancel_never_swipes(
        path in moves(),
        rule in prop_oneof![Just(TriggerRule::Either), Just(TriggerRule::Both)],
    ) {
        let mut sr = SwipeRecognizer::new(SwipeConfig::default().with_trigger_rule(rule));
        feed(&mut sr, &path);
        let (x, y) = *path.last().unwrap();
        let t = (path.len() as f64 + 1.0) * 16.0;
        let end = sr.handle(&InputEvent::PointerCancel(PointerEvent::new(x, y, t)));
        prop_assert!(end.is_none());
        prop_assert_eq!(sr.state().phase, SwipePhase::Ended);
        prop_assert_eq!(sr.state().direction, SwipeDirection::None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Direction implies on-axis lock
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn direction_only_while_swiping(path in moves(), vertical in any::<bool>()) {
        let axis = if vertical { Axis::Vertical } else { Axis::Horizontal };
        let mut sr = SwipeRecognizer::new(SwipeConfig::default().with_axis(axis));
        sr.handle(&InputEvent::PointerDown(PointerEvent::new(0.0, 0.0, 0.0)));
        for (i, (x, y)) in path.iter().enumerate() {
            let t = (i as f64 + 1.0) * 16.0;
            sr.handle(&InputEvent::PointerMove(PointerEvent::new(*x, *y, t)));
            let state = sr.state();
            if state.direction != SwipeDirection::None {
                prop_assert_eq!(state.phase, SwipePhase::Swiping);
                prop_assert_eq!(
                    state.direction,
                    SwipeDirection::of(state.displacement.along(axis))
                );
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Release agrees with the pure rule
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn release_matches_rule(dx in -500.0f64..500.0, dt in 1.0f64..800.0) {
        prop_assume!(dx.abs() > 11.0);
        let mut sr = SwipeRecognizer::default();
        sr.handle(&InputEvent::PointerDown(PointerEvent::new(0.0, 0.0, 0.0)));
        sr.handle(&InputEvent::PointerMove(PointerEvent::new(dx, 0.0, dt / 2.0)));
        let end = sr.handle(&InputEvent::PointerUp(PointerEvent::new(dx, 0.0, dt)));
        let expected = is_swipe_triggered(
            dx,
            dx / dt,
            &SwipeInputThresholds::default(),
            TriggerRule::Either,
        );
        prop_assert_eq!(end.is_some(), expected);
        if let Some(end) = end {
            prop_assert_eq!(end.direction, SwipeDirection::of(dx));
            prop_assert_eq!(end.displacement, Vector2::new(dx, 0.0));
        }
    }

    #[test]
    fn px_threshold_ignores_container(px in 0.0f64..1_000.0, size in -100.0f64..5_000.0) {
        prop_assert_eq!(resolve_threshold(Threshold::Px(px), size), px);
    }

    #[test]
    fn ratio_threshold_scales(percent in 0.0f64..100.0, size in 1.0f64..5_000.0) {
        let px = resolve_threshold(Threshold::Ratio(percent), size);
        prop_assert!(px >= 0.0 && px <= size + 1e-9);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Interpolator ends on target
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn interpolator_completes_on_target(
        from in -1_000.0f64..1_000.0,
        to in -1_000.0f64..1_000.0,
        duration in 0.0f64..1_000.0,
        step in 1.0f64..50.0,
    ) {
        let mut interp = AnimationFrameInterpolator::new();
        interp.start(from, to, duration, EasingKind::EaseOutCubic.function(), 0.0);
        let mut now = 0.0;
        let mut completions = 0;
        let mut last = from;
        while let Some(frame) = interp.frame(now) {
            if let InterpolatorFrame::Complete(v) = frame {
                completions += 1;
                last = v;
            }
            now += step;
        }
        prop_assert_eq!(completions, 1);
        prop_assert_eq!(last, to);
    }
}
