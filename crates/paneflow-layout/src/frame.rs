#![forbid(unsafe_code)]

//! Per-frame output handed to the rendering collaborator.

use std::fmt::Write as _;

use serde::Serialize;

use paneflow_core::{Axis, PanelId};

use crate::role::PanelRole;

/// How a panel's position is currently driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionState {
    #[default]
    AtRest,
    /// Tracking an operation's displacement directly.
    Operating,
    /// Interpolating toward a target.
    Animating,
}

/// One panel in one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelFrame {
    pub key: PanelId,
    pub role: PanelRole,
    /// Offset along the layout axis (px).
    pub position: f64,
    pub scale: f64,
    pub visible: bool,
    pub motion: MotionState,
}

impl PanelFrame {
    /// CSS transform, e.g. `translateX(-24px) scale(1)`.
    #[must_use]
    pub fn transform(&self, axis: Axis) -> String {
        let mut out = String::with_capacity(32);
        let func = match axis {
            Axis::Horizontal => "translateX",
            Axis::Vertical => "translateY",
        };
        // Writing into a String cannot fail.
        let _ = write!(out, "{func}({}px) scale({})", self.position, self.scale);
        out
    }
}

/// Everything the host needs for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameOutput {
    pub panels: Vec<PanelFrame>,
    /// True while any panel is animating; schedule another frame.
    pub needs_frame: bool,
}

impl FrameOutput {
    #[must_use]
    pub fn get(&self, key: &PanelId) -> Option<&PanelFrame> {
        self.panels.iter().find(|p| &p.key == key)
    }

    #[must_use]
    pub fn position_of(&self, key: &str) -> Option<f64> {
        self.panels
            .iter()
            .find(|p| p.key.as_str() == key)
            .map(|p| p.position)
    }
}
