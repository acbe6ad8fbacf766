#![forbid(unsafe_code)]

//! Navigation construction errors.
//!
//! Out-of-range navigation at runtime is never an error (it is a logged
//! no-op or clamp); these only arise when building a navigator.

use paneflow_core::PanelId;

/// Invalid initial navigation state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("stack navigation needs at least one panel")]
    EmptyStack,
    #[error("pivot navigation needs at least one item")]
    NoItems,
    #[error("panel id {0} appears more than once")]
    DuplicateId(PanelId),
    #[error("initial index {index} is out of range for {count} items")]
    IndexOutOfRange { index: usize, count: usize },
}
