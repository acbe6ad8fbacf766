#![forbid(unsafe_code)]

//! Hierarchical (push/pop) navigation reducer.
//!
//! [`StackState`] holds an ordered list of panel ids; the last one is
//! current. [`StackState::reduce`] is a pure function from state and
//! [`StackAction`] to the next state.
//!
//! # Invariants
//!
//! 1. The stack is never empty and ids are unique within it.
//! 2. `depth() == stack().len() - 1`.
//! 3. One action grows the stack by at most one entry.
//! 4. `reveal_depth` is `Some(depth - 1)` exactly while revealing.
//!
//! # Failure Modes
//!
//! - `Go(n)` with `n >= 0`, `Go` at depth 0, `Move` out of range, a duplicate
//!   `Push`, and a `Replace` with an id already below the top are all
//!   logged no-ops. Nothing panics on out-of-range input.

use serde::{Deserialize, Serialize};

use paneflow_core::PanelId;

use crate::error::NavigationError;

/// A stack navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StackAction {
    /// Append a panel and make it current.
    Push(PanelId),
    /// Pop `-n` levels for negative `n`; clamps at the root.
    Go(i32),
    /// Truncate so the panel at `depth` becomes current.
    Move(usize),
    /// Swap the current panel for another.
    Replace(PanelId),
    /// A back gesture started showing the parent.
    BeginReveal,
    /// The back gesture ended.
    EndReveal,
}

/// Committed stack navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackState {
    stack: Vec<PanelId>,
    is_revealing: bool,
    reveal_depth: Option<usize>,
}

impl StackState {
    /// Build a state from the initial stack (root first).
    pub fn new(initial: impl IntoIterator<Item = PanelId>) -> Result<Self, NavigationError> {
        let stack: Vec<PanelId> = initial.into_iter().collect();
        if stack.is_empty() {
            return Err(NavigationError::EmptyStack);
        }
        for (i, id) in stack.iter().enumerate() {
            if stack[..i].contains(id) {
                return Err(NavigationError::DuplicateId(id.clone()));
            }
        }
        Ok(Self {
            stack,
            is_revealing: false,
            reveal_depth: None,
        })
    }

    /// A single-panel stack.
    #[must_use]
    pub fn root(id: PanelId) -> Self {
        Self {
            stack: vec![id],
            is_revealing: false,
            reveal_depth: None,
        }
    }

    /// Ids from root to current.
    #[inline]
    #[must_use]
    pub fn stack(&self) -> &[PanelId] {
        &self.stack
    }

    /// Index of the current panel.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    /// The current (top) panel.
    #[must_use]
    pub fn current_id(&self) -> &PanelId {
        // Never empty: every constructor and action keeps one entry.
        &self.stack[self.depth()]
    }

    #[inline]
    #[must_use]
    pub fn is_revealing(&self) -> bool {
        self.is_revealing
    }

    /// Depth being revealed by a back gesture.
    #[inline]
    #[must_use]
    pub fn reveal_depth(&self) -> Option<usize> {
        self.reveal_depth
    }

    /// Depth of `id`, if it is in the stack.
    #[must_use]
    pub fn depth_of(&self, id: &PanelId) -> Option<usize> {
        self.stack.iter().position(|candidate| candidate == id)
    }

    #[must_use]
    pub fn contains(&self, id: &PanelId) -> bool {
        self.depth_of(id).is_some()
    }

    /// Whether `Go(direction)` would change the stack.
    #[must_use]
    pub fn can_go(&self, direction: i32) -> bool {
        direction < 0 && self.depth() > 0
    }

    /// Pure reducer: the state after `action`.
    #[must_use]
    pub fn reduce(&self, action: &StackAction) -> Self {
        let mut next = self.clone();
        next.apply(action);
        next
    }

    /// Apply `action` in place. Returns `true` if the state changed.
    pub fn apply(&mut self, action: &StackAction) -> bool {
        match action {
            StackAction::Push(id) => {
                if self.contains(id) {
                    tracing::debug!(
                        message = "stack.noop",
                        action = "push",
                        reason = "duplicate",
                        id = %id
                    );
                    return false;
                }
                self.stack.push(id.clone());
                self.clear_reveal();
                true
            }
            StackAction::Go(direction) => {
                if !self.can_go(*direction) {
                    tracing::debug!(
                        message = "stack.noop",
                        action = "go",
                        direction = *direction,
                        depth = self.depth()
                    );
                    return false;
                }
                let steps = direction.unsigned_abs() as usize;
                let target = self.depth().saturating_sub(steps);
                self.truncate_to(target);
                true
            }
            StackAction::Move(target) => {
                if *target >= self.stack.len() || *target == self.depth() {
                    tracing::debug!(
                        message = "stack.noop",
                        action = "move",
                        target = *target,
                        depth = self.depth()
                    );
                    return false;
                }
                self.truncate_to(*target);
                true
            }
            StackAction::Replace(id) => {
                if self.current_id() == id {
                    return false;
                }
                if self.contains(id) {
                    tracing::debug!(
                        message = "stack.noop",
                        action = "replace",
                        reason = "duplicate",
                        id = %id
                    );
                    return false;
                }
                let depth = self.depth();
                self.stack[depth] = id.clone();
                self.clear_reveal();
                true
            }
            StackAction::BeginReveal => {
                if self.depth() == 0 || self.is_revealing {
                    return false;
                }
                self.is_revealing = true;
                self.reveal_depth = Some(self.depth() - 1);
                true
            }
            StackAction::EndReveal => {
                if !self.is_revealing {
                    return false;
                }
                self.clear_reveal();
                true
            }
        }
    }

    fn truncate_to(&mut self, depth: usize) {
        self.stack.truncate(depth + 1);
        self.clear_reveal();
    }

    fn clear_reveal(&mut self) {
        self.is_revealing = false;
        self.reveal_depth = None;
    }
}
