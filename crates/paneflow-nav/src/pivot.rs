#![forbid(unsafe_code)]

//! Pivot (tab/carousel) navigation reducer.
//!
//! # Invariants
//!
//! 1. `0 <= active_index < item_count` and `item_count >= 1`.
//! 2. Under [`NavigationMode::Loop`] index arithmetic is modulo
//!    `item_count` and every move is possible.
//! 3. Under [`NavigationMode::Linear`] moves clamp to the ends; `can_go`
//!    reports whether the unclamped result would stay in range.
//! 4. [`PivotState::shortest_delta`] picks the smallest signed step to a
//!    target; on a tie it prefers the positive direction.

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;

/// Whether paging wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    #[default]
    Linear,
    Loop,
}

/// A pivot navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PivotAction {
    /// Move by a signed number of items.
    Go(i32),
    /// Jump to an index along the shortest path.
    GoTo(usize),
    /// The item set changed size.
    SetItemCount(usize),
}

/// Committed pivot navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PivotState {
    active_index: usize,
    item_count: usize,
    navigation_mode: NavigationMode,
}

impl PivotState {
    pub fn new(
        item_count: usize,
        active_index: usize,
        navigation_mode: NavigationMode,
    ) -> Result<Self, NavigationError> {
        if item_count == 0 {
            return Err(NavigationError::NoItems);
        }
        if active_index >= item_count {
            return Err(NavigationError::IndexOutOfRange {
                index: active_index,
                count: item_count,
            });
        }
        Ok(Self {
            active_index,
            item_count,
            navigation_mode,
        })
    }

    #[inline]
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    #[inline]
    #[must_use]
    pub fn navigation_mode(&self) -> NavigationMode {
        self.navigation_mode
    }

    /// Whether `go(delta)` lands on a real item without clamping.
    #[must_use]
    pub fn can_go(&self, delta: i32) -> bool {
        match self.navigation_mode {
            NavigationMode::Loop => true,
            NavigationMode::Linear => {
                let next = self.active_index as i64 + i64::from(delta);
                (0..self.item_count as i64).contains(&next)
            }
        }
    }

    /// Index reached by `go(delta)`.
    #[must_use]
    pub fn index_after(&self, delta: i32) -> usize {
        let count = self.item_count as i64;
        let next = self.active_index as i64 + i64::from(delta);
        let resolved = match self.navigation_mode {
            NavigationMode::Loop => next.rem_euclid(count),
            NavigationMode::Linear => next.clamp(0, count - 1),
        };
        resolved as usize
    }

    /// Signed step from the active index to `target`.
    ///
    /// Under loop mode this is the shortest way around (ties toward
    /// positive); under linear mode it is plain subtraction.
    #[must_use]
    pub fn shortest_delta(&self, target: usize) -> i32 {
        let direct = target as i64 - self.active_index as i64;
        let delta = match self.navigation_mode {
            NavigationMode::Linear => direct,
            NavigationMode::Loop => {
                let count = self.item_count as i64;
                let mut best = direct;
                for candidate in [direct - count, direct + count] {
                    let closer = candidate.abs() < best.abs();
                    let tie_positive = candidate.abs() == best.abs() && candidate > best;
                    if closer || tie_positive {
                        best = candidate;
                    }
                }
                best
            }
        };
        i32::try_from(delta).unwrap_or(if delta < 0 { i32::MIN } else { i32::MAX })
    }

    /// Relative offset of `index` from the active item, as laid out.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> i32 {
        self.shortest_delta(index)
    }

    /// Pure reducer.
    #[must_use]
    pub fn reduce(&self, action: PivotAction) -> Self {
        let mut next = *self;
        next.apply(action);
        next
    }

    /// Apply `action` in place. Returns `true` if the state changed.
    pub fn apply(&mut self, action: PivotAction) -> bool {
        let before = self.active_index;
        match action {
            PivotAction::Go(delta) => {
                if !self.can_go(delta) {
                    tracing::debug!(
                        message = "pivot.clamped",
                        delta,
                        active = self.active_index,
                        count = self.item_count
                    );
                }
                self.active_index = self.index_after(delta);
            }
            PivotAction::GoTo(target) => {
                if target >= self.item_count {
                    tracing::debug!(
                        message = "pivot.noop",
                        action = "go_to",
                        target,
                        count = self.item_count
                    );
                    return false;
                }
                self.active_index = target;
            }
            PivotAction::SetItemCount(count) => {
                if count == 0 {
                    tracing::debug!(message = "pivot.noop", action = "set_item_count", count);
                    return false;
                }
                let changed = count != self.item_count;
                self.item_count = count;
                self.active_index = self.active_index.min(count - 1);
                return changed;
            }
        }
        self.active_index != before
    }
}
