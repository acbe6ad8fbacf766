#![forbid(unsafe_code)]

//! Navigators: reducer state plus dispatch-time snapshots.
//!
//! Each dispatch snapshots the committed state, reduces it, and returns a
//! transition holding both sides. Consumers never read a state captured
//! earlier than the dispatch. Rapid-fire actions can be queued with
//! `enqueue` and applied in order with `flush`; each one reduces against
//! the state produced by the previous one.

use std::collections::VecDeque;

use paneflow_core::PanelId;

use crate::error::NavigationError;
use crate::pivot::{NavigationMode, PivotAction, PivotState};
use crate::stack::{StackAction, StackState};

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

/// Result of one stack dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackTransition {
    pub before: StackState,
    pub after: StackState,
    pub action: StackAction,
}

impl StackTransition {
    /// Whether the stack contents or reveal flag changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.before != self.after
    }

    /// Ids present before and gone after, top first.
    #[must_use]
    pub fn exiting(&self) -> Vec<PanelId> {
        self.before
            .stack()
            .iter()
            .rev()
            .filter(|id| !self.after.contains(id))
            .cloned()
            .collect()
    }

    /// Ids present after and absent before.
    #[must_use]
    pub fn entering(&self) -> Vec<PanelId> {
        self.after
            .stack()
            .iter()
            .filter(|id| !self.before.contains(id))
            .cloned()
            .collect()
    }

    /// Signed change in depth.
    #[must_use]
    pub fn depth_delta(&self) -> i64 {
        self.after.depth() as i64 - self.before.depth() as i64
    }
}

/// Owns a [`StackState`] and a queue of pending actions.
#[derive(Debug, Clone)]
pub struct StackNavigator {
    state: StackState,
    queue: VecDeque<StackAction>,
}

impl StackNavigator {
    pub fn new(initial: impl IntoIterator<Item = PanelId>) -> Result<Self, NavigationError> {
        Ok(Self::from_state(StackState::new(initial)?))
    }

    #[must_use]
    pub fn from_state(state: StackState) -> Self {
        Self {
            state,
            queue: VecDeque::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &StackState {
        &self.state
    }

    #[must_use]
    pub fn current_id(&self) -> &PanelId {
        self.state.current_id()
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    #[must_use]
    pub fn can_go(&self, direction: i32) -> bool {
        self.state.can_go(direction)
    }

    /// Apply one action against the current state.
    pub fn dispatch(&mut self, action: StackAction) -> StackTransition {
        let before = self.state.clone();
        let after = before.reduce(&action);
        if before != after {
            tracing::debug!(
                message = "stack.dispatch",
                action = ?action,
                from_depth = before.depth(),
                to_depth = after.depth(),
                current = %after.current_id()
            );
        }
        self.state = after.clone();
        StackTransition {
            before,
            after,
            action,
        }
    }

    pub fn push(&mut self, id: impl Into<PanelId>) -> StackTransition {
        self.dispatch(StackAction::Push(id.into()))
    }

    pub fn go(&mut self, direction: i32) -> StackTransition {
        self.dispatch(StackAction::Go(direction))
    }

    pub fn move_to(&mut self, depth: usize) -> StackTransition {
        self.dispatch(StackAction::Move(depth))
    }

    pub fn replace(&mut self, id: impl Into<PanelId>) -> StackTransition {
        self.dispatch(StackAction::Replace(id.into()))
    }

    pub fn begin_reveal(&mut self) -> StackTransition {
        self.dispatch(StackAction::BeginReveal)
    }

    pub fn end_reveal(&mut self) -> StackTransition {
        self.dispatch(StackAction::EndReveal)
    }

    /// Queue an action for the next [`flush`](Self::flush).
    pub fn enqueue(&mut self, action: StackAction) {
        self.queue.push_back(action);
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply all queued actions in order.
    pub fn flush(&mut self) -> Vec<StackTransition> {
        let mut transitions = Vec::with_capacity(self.queue.len());
        while let Some(action) = self.queue.pop_front() {
            transitions.push(self.dispatch(action));
        }
        transitions
    }
}

// ---------------------------------------------------------------------------
// Pivot
// ---------------------------------------------------------------------------

/// Result of one pivot dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PivotTransition {
    pub before: PivotState,
    pub after: PivotState,
    /// Signed step actually taken (shortest path under loop mode).
    pub delta: i32,
}

impl PivotTransition {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// Owns a [`PivotState`] and the ids of its items.
#[derive(Debug, Clone)]
pub struct PivotNavigator {
    state: PivotState,
    items: Vec<PanelId>,
}

impl PivotNavigator {
    pub fn new(
        items: impl IntoIterator<Item = PanelId>,
        active_index: usize,
        mode: NavigationMode,
    ) -> Result<Self, NavigationError> {
        let items: Vec<PanelId> = items.into_iter().collect();
        check_unique(&items)?;
        let state = PivotState::new(items.len(), active_index, mode)?;
        Ok(Self { state, items })
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &PivotState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.state.active_index()
    }

    #[must_use]
    pub fn active_id(&self) -> &PanelId {
        &self.items[self.state.active_index()]
    }

    #[must_use]
    pub fn items(&self) -> &[PanelId] {
        &self.items
    }

    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<&PanelId> {
        self.items.get(index)
    }

    #[must_use]
    pub fn index_of(&self, id: &PanelId) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == id)
    }

    #[must_use]
    pub fn can_go(&self, delta: i32) -> bool {
        self.state.can_go(delta)
    }

    /// Apply one action against the current state.
    pub fn dispatch(&mut self, action: PivotAction) -> PivotTransition {
        let before = self.state;
        let after = before.reduce(action);
        let delta = if after.item_count() == before.item_count() {
            before.shortest_delta(after.active_index())
        } else {
            0
        };
        if before != after {
            tracing::debug!(
                message = "pivot.dispatch",
                action = ?action,
                from = before.active_index(),
                to = after.active_index(),
                delta
            );
        }
        self.state = after;
        PivotTransition {
            before,
            after,
            delta,
        }
    }

    pub fn go(&mut self, delta: i32) -> PivotTransition {
        self.dispatch(PivotAction::Go(delta))
    }

    pub fn go_to(&mut self, index: usize) -> PivotTransition {
        self.dispatch(PivotAction::GoTo(index))
    }

    /// Replace the item set; the active index is clamped into the new range.
    pub fn set_items(
        &mut self,
        items: impl IntoIterator<Item = PanelId>,
    ) -> Result<PivotTransition, NavigationError> {
        let items: Vec<PanelId> = items.into_iter().collect();
        if items.is_empty() {
            return Err(NavigationError::NoItems);
        }
        check_unique(&items)?;
        let transition = self.dispatch(PivotAction::SetItemCount(items.len()));
        self.items = items;
        Ok(transition)
    }
}

fn check_unique(items: &[PanelId]) -> Result<(), NavigationError> {
    for (i, id) in items.iter().enumerate() {
        if items[..i].contains(id) {
            return Err(NavigationError::DuplicateId(id.clone()));
        }
    }
    Ok(())
}
