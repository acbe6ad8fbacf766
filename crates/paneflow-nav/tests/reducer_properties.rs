//! Property tests for the navigation reducers.
//!
//! 1. **Stack shape**: for any action sequence the stack stays non-empty,
//!    ids stay unique, and one action grows it by at most one entry.
//! 2. **can_go mirrors go**: `can_go(n)` is true iff `Go(n)` changes the stack.
//! 3. **Pivot range**: the active index stays inside `[0, item_count)`.
//! 4. **Shortest path**: under loop mode `|shortest_delta| <= count / 2` and
//!    applying it lands on the target.

use paneflow_core::PanelId;
use paneflow_nav::{NavigationMode, PivotAction, PivotState, StackAction, StackState};
use proptest::prelude::*;

fn stack_action() -> impl Strategy<Value = StackAction> {
    prop_oneof![
        (0u8..8).prop_map(|n| StackAction::Push(PanelId::new(format!("p{n}")))),
        (-4i32..3).prop_map(StackAction::Go),
        (0usize..6).prop_map(StackAction::Move),
        (0u8..8).prop_map(|n| StackAction::Replace(PanelId::new(format!("p{n}")))),
        Just(StackAction::BeginReveal),
        Just(StackAction::EndReveal),
    ]
}

fn pivot_action() -> impl Strategy<Value = PivotAction> {
    prop_oneof![
        (-7i32..7).prop_map(PivotAction::Go),
        (0usize..10).prop_map(PivotAction::GoTo),
        (0usize..10).prop_map(PivotAction::SetItemCount),
    ]
}

fn mode() -> impl Strategy<Value = NavigationMode> {
    prop_oneof![Just(NavigationMode::Linear), Just(NavigationMode::Loop)]
}

proptest! {
    #[test]
    fn stack_shape_holds(actions in prop::collection::vec(stack_action(), 0..40)) {
        let mut state = StackState::root(PanelId::from("root"));
        for action in &actions {
            let before = state.stack().len();
            state.apply(action);
            let after = state.stack().len();
            prop_assert!(after >= 1);
            prop_assert!(after <= before + 1);
            prop_assert_eq!(state.depth(), after - 1);
            for (i, id) in state.stack().iter().enumerate() {
                prop_assert!(!state.stack()[..i].contains(id));
            }
            if state.is_revealing() {
                prop_assert_eq!(state.reveal_depth(), Some(state.depth() - 1));
            } else {
                prop_assert_eq!(state.reveal_depth(), None);
            }
        }
    }

    #[test]
    fn can_go_mirrors_go(
        depth in 0usize..6,
        direction in -8i32..4,
    ) {
        let ids = (0..=depth).map(|i| PanelId::new(format!("p{i}")));
        let state = StackState::new(ids).unwrap();
        let next = state.reduce(&StackAction::Go(direction));
        prop_assert_eq!(state.can_go(direction), next != state);
    }

    #[test]
    fn pivot_index_in_range(
        count in 1usize..10,
        start in 0usize..10,
        mode in mode(),
        actions in prop::collection::vec(pivot_action(), 0..40),
    ) {
        let mut state = PivotState::new(count, start % count, mode).unwrap();
        for action in actions {
            state.apply(action);
            prop_assert!(state.item_count() >= 1);
            prop_assert!(state.active_index() < state.item_count());
        }
    }

    #[test]
    fn loop_shortest_path_lands_on_target(
        count in 1usize..12,
        active in 0usize..12,
        target in 0usize..12,
    ) {
        let state = PivotState::new(count, active % count, NavigationMode::Loop).unwrap();
        let target = target % count;
        let delta = state.shortest_delta(target);
        prop_assert!(delta.unsigned_abs() as usize <= count / 2);
        prop_assert_eq!(state.index_after(delta), target);
    }
}

#[test]
fn go_back_at_root_leaves_stack_unchanged() {
    let state = StackState::root(PanelId::from("home"));
    assert!(!state.can_go(-1));
    assert_eq!(state.reduce(&StackAction::Go(-1)), state);
}

#[test]
fn five_item_loop_from_zero_to_four_is_one_step_back() {
    let state = PivotState::new(5, 0, NavigationMode::Loop).unwrap();
    assert_eq!(state.shortest_delta(4), -1);
}
