#![forbid(unsafe_code)]

//! Panel layout for paneflow.
//!
//! Turns navigation state plus any in-flight operation into per-panel
//! positions:
//!
//! - [`role`]: classify each panel relative to navigation state.
//! - [`stack`] / [`pivot`]: the positioning rules (`TransformEngine`) for
//!   each navigation model, behind the [`PanelPositioner`] trait.
//! - [`continuity`]: keeps rendered positions continuous across gestures,
//!   navigation changes, and interruptions.

pub mod continuity;
pub mod frame;
pub mod pivot;
pub mod positioner;
pub mod role;
pub mod stack;

pub use continuity::{ContinuityConfig, ContinuityController};
pub use frame::{FrameOutput, MotionState, PanelFrame};
pub use pivot::{PivotSlot, PivotTransform, PivotTransformConfig, TabMode, VisibilityMode};
pub use positioner::PanelPositioner;
pub use role::PanelRole;
pub use stack::{BehindDisplay, StackTransform, StackTransformConfig};
