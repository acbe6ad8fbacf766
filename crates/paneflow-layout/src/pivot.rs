#![forbid(unsafe_code)]

//! Pivot (tab/carousel) positioning rules.
//!
//! Items are laid out in *slots*: fixed relative offsets `-radius..=radius`
//! around the active item. Slot `k` rests at `k * size`; while an operation
//! is in progress every slot is shifted by the axis displacement.
//!
//! Under loop mode a small item set can need the same item in two slots
//! (three items with radius 2, say). The slot closest to the active one
//! keeps the item's own key and later ones are marked as clones with a
//! derived key, so every rendered slot has a distinct continuity key.
//!
//! # Invariants
//!
//! 1. The active item is always in slot 0 with its own key.
//! 2. Slot keys are unique.
//! 3. Under linear mode slots past either end are simply absent.

use serde::{Deserialize, Serialize};

use paneflow_core::operation::ContinuousOperationState;
use paneflow_core::{Axis, PanelId};
use paneflow_nav::{NavigationMode, PivotState};

use crate::positioner::PanelPositioner;
use crate::role::{PanelRole, pivot_role};

/// Which non-active panels are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    /// Only the neighbour being swiped toward (plus anything animating).
    #[default]
    Adjacent,
    /// Anything intersecting the viewport.
    Viewport,
}

/// Tab chrome behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabMode {
    /// Tab chrome scrolls with the content.
    #[default]
    Scrollable,
    /// Tab chrome is static; only the indicator follows the gesture.
    Fixed,
}

/// Pivot transform configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PivotTransformConfig {
    /// Slots rendered on each side of the active one.
    pub slot_radius: usize,
    pub visibility: VisibilityMode,
    pub tab_mode: TabMode,
}

impl Default for PivotTransformConfig {
    fn default() -> Self {
        Self {
            slot_radius: 1,
            visibility: VisibilityMode::Adjacent,
            tab_mode: TabMode::Scrollable,
        }
    }
}

impl PivotTransformConfig {
    #[must_use]
    pub fn with_slot_radius(mut self, radius: usize) -> Self {
        self.slot_radius = radius;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: VisibilityMode) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_tab_mode(mut self, mode: TabMode) -> Self {
        self.tab_mode = mode;
        self
    }
}

/// One rendered slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotSlot {
    /// Relative offset from the active slot.
    pub offset: i32,
    /// Logical item index.
    pub index: usize,
    /// Continuity key; the item id unless this slot is a clone.
    pub key: PanelId,
    pub is_clone: bool,
}

/// Positioning snapshot for one pivot state and container size.
#[derive(Debug, Clone)]
pub struct PivotTransform {
    axis: Axis,
    size: f64,
    config: PivotTransformConfig,
    items: Vec<PanelId>,
    state: PivotState,
    slots: Vec<PivotSlot>,
}

impl PivotTransform {
    #[must_use]
    pub fn new(
        config: PivotTransformConfig,
        axis: Axis,
        size: f64,
        items: &[PanelId],
        state: PivotState,
    ) -> Self {
        let mut transform = Self {
            axis,
            size: size.max(0.0),
            config,
            items: items.to_vec(),
            state,
            slots: Vec::new(),
        };
        transform.rebuild_slots();
        transform
    }

    /// Re-snapshot navigation state.
    pub fn set_state(&mut self, items: &[PanelId], state: PivotState) {
        self.items.clear();
        self.items.extend_from_slice(items);
        self.state = state;
        self.rebuild_slots();
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size.max(0.0);
    }

    #[must_use]
    pub fn config(&self) -> &PivotTransformConfig {
        &self.config
    }

    #[must_use]
    pub fn slots(&self) -> &[PivotSlot] {
        &self.slots
    }

    /// Resting position of relative offset `k`.
    #[inline]
    #[must_use]
    pub fn target_position(&self, offset: i32) -> f64 {
        f64::from(offset) * self.size
    }

    /// Tab indicator position for tabs of `tab_width`.
    ///
    /// Under [`TabMode::Fixed`] the indicator follows the gesture inversely;
    /// under [`TabMode::Scrollable`] it stays on the active tab and the chrome
    /// moves instead.
    #[must_use]
    pub fn indicator_position(&self, tab_width: f64, op: &ContinuousOperationState) -> f64 {
        let rest = self.state.active_index() as f64 * tab_width;
        match self.config.tab_mode {
            TabMode::Fixed => rest - self.live_displacement(op),
            TabMode::Scrollable => rest,
        }
    }

    fn slot(&self, key: &PanelId) -> Option<&PivotSlot> {
        self.slots.iter().find(|slot| &slot.key == key)
    }

    /// Direction navigation moved since `previous`: `1` forward, `-1`
    /// back, `0` when the active item or the item set did not change.
    #[must_use]
    pub fn travel_since(&self, previous: &Self) -> i32 {
        let from = previous.state.active_index();
        if previous.items != self.items || from == self.state.active_index() {
            return 0;
        }
        // The old active item sits behind the direction of travel.
        -self.state.offset_of(from).signum()
    }

    fn live_displacement(&self, op: &ContinuousOperationState) -> f64 {
        if op.is_operating() {
            op.axis_displacement(self.axis)
        } else {
            0.0
        }
    }

    fn rebuild_slots(&mut self) {
        self.slots.clear();
        let count = self.items.len() as i64;
        if count == 0 {
            return;
        }
        let radius = i32::try_from(self.config.slot_radius).unwrap_or(i32::MAX);
        let active = self.state.active_index() as i64;

        // Nearest slots first so the closest occurrence keeps the real key.
        let mut offsets: Vec<i32> = (-radius..=radius).collect();
        offsets.sort_by_key(|k| (k.unsigned_abs(), *k < 0));

        for offset in offsets {
            let raw = active + i64::from(offset);
            let index = match self.state.navigation_mode() {
                NavigationMode::Loop => raw.rem_euclid(count),
                NavigationMode::Linear if (0..count).contains(&raw) => raw,
                NavigationMode::Linear => continue,
            };
            let index = index as usize;
            let id = &self.items[index];
            let is_clone = self.slots.iter().any(|slot| slot.index == index);
            let key = if is_clone {
                PanelId::new(format!("{id}@{offset:+}"))
            } else {
                id.clone()
            };
            self.slots.push(PivotSlot {
                offset,
                index,
                key,
                is_clone,
            });
        }
        self.slots.sort_by_key(|slot| slot.offset);
    }
}

impl PanelPositioner for PivotTransform {
    fn axis(&self) -> Axis {
        self.axis
    }

    fn size(&self) -> f64 {
        self.size
    }

    fn panels(&self) -> Vec<PanelId> {
        self.slots.iter().map(|slot| slot.key.clone()).collect()
    }

    fn role_of(&self, key: &PanelId) -> PanelRole {
        if let Some(slot) = self.slot(key) {
            return pivot_role(Some(slot.offset), self.config.slot_radius);
        }
        if self.items.contains(key) {
            PanelRole::Hidden
        } else {
            PanelRole::Exiting
        }
    }

    fn position(&self, key: &PanelId, op: &ContinuousOperationState) -> Option<f64> {
        let slot = self.slot(key)?;
        Some(self.target_position(slot.offset) + self.live_displacement(op))
    }

    fn is_visible(&self, key: &PanelId, position: f64, op: &ContinuousOperationState) -> bool {
        let Some(slot) = self.slot(key) else {
            return false;
        };
        if slot.offset == 0 {
            return true;
        }
        match self.config.visibility {
            VisibilityMode::Adjacent => {
                let d = self.live_displacement(op);
                // Dragging left (negative) reveals the next slot (+1).
                d != 0.0 && slot.offset == -(d.signum() as i32)
            }
            VisibilityMode::Viewport => position < self.size && position + self.size > 0.0,
        }
    }

    /// The new active item comes in from the side navigation moved toward.
    fn entry_position(&self, key: &PanelId, previous: &Self) -> Option<f64> {
        let slot = self.slot(key)?;
        let travel = self.travel_since(previous);
        (slot.offset == 0 && travel != 0).then(|| f64::from(travel) * self.size)
    }

    /// Items dropped from the slots leave opposite to the travel.
    fn exit_position(&self, _key: &PanelId, previous: &Self) -> Option<f64> {
        let travel = self.travel_since(previous);
        (travel != 0).then(|| -f64::from(travel) * self.size)
    }
}
