#![forbid(unsafe_code)]

//! Stack positioning rules.
//!
//! The active panel sits at 0; its parent (`Behind`) sits partly off-screen
//! at `behind_offset * size`. A back gesture drags the active panel with the
//! finger and pulls the parent toward 0 with parallax.
//!
//! # Invariants
//!
//! 1. `swipe_progress` is in `[0, 1]` and 0 for a non-positive size.
//! 2. With `behind_offset` in `[-1, 0]`, the behind position stays in
//!    `[behind_offset * size, 0]` and is monotonic in the displacement.
//! 3. The active panel never moves left of 0 during a back gesture.
//! 4. Panels below the parent are `Hidden` and have no position.

use serde::{Deserialize, Serialize};

use paneflow_core::operation::ContinuousOperationState;
use paneflow_core::{Axis, PanelId};
use paneflow_nav::StackState;

use crate::positioner::PanelPositioner;
use crate::role::{PanelRole, stack_role};

/// Default rest offset of the behind panel, as a fraction of the size.
pub const DEFAULT_BEHIND_OFFSET: f64 = -0.3;

/// How the behind panel reacts to a back gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehindDisplay {
    /// Slides toward 0 slower than the finger.
    #[default]
    Parallax,
    /// Stays at its rest offset.
    Static,
}

/// Stack transform configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackTransformConfig {
    /// Rest offset of the behind panel as a fraction of the size (`[-1, 0]`).
    pub behind_offset: f64,
    pub behind_display: BehindDisplay,
    /// Scale of the behind panel at rest; grows to 1 with progress.
    pub behind_scale: Option<f64>,
}

impl Default for StackTransformConfig {
    fn default() -> Self {
        Self {
            behind_offset: DEFAULT_BEHIND_OFFSET,
            behind_display: BehindDisplay::Parallax,
            behind_scale: None,
        }
    }
}

impl StackTransformConfig {
    #[must_use]
    pub fn with_behind_offset(mut self, offset: f64) -> Self {
        self.behind_offset = offset;
        self
    }

    #[must_use]
    pub fn with_behind_display(mut self, display: BehindDisplay) -> Self {
        self.behind_display = display;
        self
    }

    #[must_use]
    pub fn with_behind_scale(mut self, scale: Option<f64>) -> Self {
        self.behind_scale = scale;
        self
    }

    /// Clamp `behind_offset` to `[-1, 0]` and `behind_scale` to `(0, 1]`.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let offset = if self.behind_offset.is_finite() {
            self.behind_offset.clamp(-1.0, 0.0)
        } else {
            DEFAULT_BEHIND_OFFSET
        };
        if offset != self.behind_offset {
            tracing::warn!(
                message = "config.clamped",
                key = "behind_offset",
                value = self.behind_offset,
                clamped = offset
            );
        }
        self.behind_offset = offset;
        self.behind_scale = self
            .behind_scale
            .filter(|s| s.is_finite() && *s > 0.0)
            .map(|s| s.min(1.0));
        self
    }
}

/// Back-gesture progress: `clamp(max(0, d) / size, 0, 1)`.
#[must_use]
pub fn swipe_progress(displacement: f64, size: f64) -> f64 {
    if size <= 0.0 || !displacement.is_finite() {
        return 0.0;
    }
    (displacement.max(0.0) / size).clamp(0.0, 1.0)
}

/// Parallax position of the behind panel.
#[must_use]
pub fn behind_position(displacement: f64, size: f64, behind_offset: f64) -> f64 {
    if size <= 0.0 {
        return 0.0;
    }
    let progress = swipe_progress(displacement, size);
    behind_offset * size + behind_offset.abs() * progress * size
}

/// Positioning snapshot for one stack state and container size.
#[derive(Debug, Clone)]
pub struct StackTransform {
    axis: Axis,
    size: f64,
    config: StackTransformConfig,
    stack: Vec<PanelId>,
}

impl StackTransform {
    #[must_use]
    pub fn new(config: StackTransformConfig, axis: Axis, size: f64, state: &StackState) -> Self {
        Self {
            axis,
            size: size.max(0.0),
            config: config.validated(),
            stack: state.stack().to_vec(),
        }
    }

    /// Re-snapshot navigation state.
    pub fn set_state(&mut self, state: &StackState) {
        self.stack.clear();
        self.stack.extend_from_slice(state.stack());
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size.max(0.0);
    }

    #[must_use]
    pub fn config(&self) -> &StackTransformConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    /// Target position for a role, live during an operating gesture.
    #[must_use]
    pub fn target_position(&self, role: PanelRole, op: &ContinuousOperationState) -> Option<f64> {
        let d = self.live_displacement(op);
        match role {
            PanelRole::Active => Some(d.max(0.0)),
            PanelRole::Behind => Some(match self.config.behind_display {
                BehindDisplay::Parallax => {
                    behind_position(d, self.size, self.config.behind_offset)
                }
                BehindDisplay::Static => self.config.behind_offset * self.size,
            }),
            PanelRole::Hidden | PanelRole::Exiting => None,
        }
    }

    fn live_displacement(&self, op: &ContinuousOperationState) -> f64 {
        if op.is_operating() {
            op.axis_displacement(self.axis)
        } else {
            0.0
        }
    }
}

impl PanelPositioner for StackTransform {
    fn axis(&self) -> Axis {
        self.axis
    }

    fn size(&self) -> f64 {
        self.size
    }

    fn panels(&self) -> Vec<PanelId> {
        let depth = self.depth();
        let from = depth.saturating_sub(1);
        self.stack[from..].to_vec()
    }

    fn role_of(&self, key: &PanelId) -> PanelRole {
        stack_role(self.stack.iter().position(|id| id == key), self.depth())
    }

    fn position(&self, key: &PanelId, op: &ContinuousOperationState) -> Option<f64> {
        self.target_position(self.role_of(key), op)
    }

    fn scale(&self, key: &PanelId, op: &ContinuousOperationState) -> f64 {
        match (self.role_of(key), self.config.behind_scale) {
            (PanelRole::Behind, Some(rest)) => {
                let progress = swipe_progress(self.live_displacement(op), self.size);
                rest + (1.0 - rest) * progress
            }
            _ => 1.0,
        }
    }

    fn is_visible(&self, key: &PanelId, _position: f64, op: &ContinuousOperationState) -> bool {
        match self.role_of(key) {
            PanelRole::Active => true,
            PanelRole::Behind => {
                op.is_operating() && swipe_progress(self.live_displacement(op), self.size) > 0.0
            }
            PanelRole::Hidden | PanelRole::Exiting => false,
        }
    }

    /// A pushed panel slides in from the far edge; an ancestor revealed by
    /// a pop slides out from under its child, starting at the behind offset.
    fn entry_position(&self, key: &PanelId, previous: &Self) -> Option<f64> {
        if self.stack.last() != Some(key) {
            return None;
        }
        if previous.stack.contains(key) {
            Some(self.config.behind_offset * self.size)
        } else {
            Some(self.size)
        }
    }

    /// A popped panel leaves toward the far edge; a replaced one sinks to
    /// the behind offset under its replacement.
    fn exit_position(&self, key: &PanelId, previous: &Self) -> Option<f64> {
        if previous.stack.last() != Some(key) {
            return None;
        }
        let top = self.stack.last()?;
        if previous.stack.contains(top) {
            Some(self.size)
        } else {
            Some(self.config.behind_offset * self.size)
        }
    }
}
