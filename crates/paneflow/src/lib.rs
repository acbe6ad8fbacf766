#![forbid(unsafe_code)]

//! paneflow public facade and prelude.
//!
//! Wires the layers into two ready-made pipelines:
//!
//! - [`StackView`]: hierarchical push/pop navigation with an edge back-swipe.
//! - [`PivotView`]: tab/carousel paging driven by horizontal swipes.
//!
//! Both follow the same host loop: forward input with `handle_input`, call
//! `poll` on timers, and call `frame(now)` once per animation frame, applying
//! the returned [`FrameOutput`] to the rendered panels and scheduling another
//! frame while `needs_frame` is set.

pub mod config;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod pivot_view;
pub mod stack_view;

pub use config::{ConfigError, PaneflowConfig};
pub use pivot_view::PivotView;
pub use stack_view::StackView;

pub use paneflow_core::event::{InputEvent, PointerEvent, PointerType, WheelEvent};
pub use paneflow_core::operation::{ContinuousOperationState, OperationPhase};
pub use paneflow_core::swipe::{SwipeDirection, SwipeEnd, TriggerRule};
pub use paneflow_core::threshold::{Threshold, ThresholdParseError};
pub use paneflow_core::time::{Clock, ManualClock, SystemClock};
pub use paneflow_core::{Axis, Edge, PanelId, Rect, Vector2};
pub use paneflow_layout::{FrameOutput, MotionState, PanelFrame, PanelRole};
pub use paneflow_nav::{
    NavigationError, NavigationMode, PivotTransition, StackAction, StackTransition,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for paneflow hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Initial navigation state was invalid.
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    /// A threshold string could not be parsed.
    #[error(transparent)]
    Threshold(#[from] ThresholdParseError),
}

/// Standard result type for paneflow APIs.
pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{
        Clock, Edge, Error, FrameOutput, InputEvent, NavigationMode, PaneflowConfig, PanelFrame,
        PanelId, PanelRole, PivotView, PointerEvent, Rect, Result, StackView, Threshold,
        WheelEvent,
    };
}

pub use paneflow_core as core;
pub use paneflow_layout as layout;
pub use paneflow_nav as nav;
