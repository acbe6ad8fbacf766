#![forbid(unsafe_code)]

//! The seam between positioning rules and continuity.

use paneflow_core::operation::ContinuousOperationState;
use paneflow_core::{Axis, PanelId};

use crate::role::PanelRole;

/// A snapshot of one navigation model's positioning rules.
///
/// Implementations are cheap value snapshots: the continuity controller
/// clones one when a gesture begins and keeps positioning tracked panels
/// with it until the gesture ends.
pub trait PanelPositioner: Clone {
    /// Layout axis.
    fn axis(&self) -> Axis;

    /// Container extent along the axis (px).
    fn size(&self) -> f64;

    /// Keys to render, in paint order.
    fn panels(&self) -> Vec<PanelId>;

    fn role_of(&self, key: &PanelId) -> PanelRole;

    /// Position along the axis, or `None` for panels that are not rendered.
    /// `op` is only consulted while it is operating.
    fn position(&self, key: &PanelId, op: &ContinuousOperationState) -> Option<f64>;

    fn scale(&self, _key: &PanelId, _op: &ContinuousOperationState) -> f64 {
        1.0
    }

    /// Whether the panel should be visible at `position`.
    fn is_visible(&self, key: &PanelId, position: f64, op: &ContinuousOperationState) -> bool;

    /// Where a panel appearing after the first frame starts from, given the
    /// snapshot rendered on the previous update. `None` starts it at its
    /// target.
    fn entry_position(&self, _key: &PanelId, _previous: &Self) -> Option<f64> {
        None
    }

    /// Off-screen destination of a panel that left the rendered set since
    /// `previous`. `None` sends it to the nearer side.
    fn exit_position(&self, _key: &PanelId, _previous: &Self) -> Option<f64> {
        None
    }
}
