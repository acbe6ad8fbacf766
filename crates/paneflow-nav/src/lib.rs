#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Navigation state machines for paneflow.
//!
//! Two models share one shape: a pure reducer over a serializable state plus
//! a navigator that snapshots the state at dispatch time and reports each
//! change as a transition.
//!
//! - [`stack`]: hierarchical push/pop navigation over an ordered id list.
//! - [`pivot`]: paging over a fixed item set, linear or looping.

pub mod error;
pub mod navigator;
pub mod pivot;
pub mod stack;

pub use error::NavigationError;
pub use navigator::{PivotNavigator, PivotTransition, StackNavigator, StackTransition};
pub use pivot::{NavigationMode, PivotAction, PivotState};
pub use stack::{StackAction, StackState};
