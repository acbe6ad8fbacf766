#![forbid(unsafe_code)]

//! Panel roles.
//!
//! A role is always derived from navigation state; the continuity controller
//! only remembers the last one it saw.

use serde::{Deserialize, Serialize};

/// How a panel relates to the current navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelRole {
    /// The current panel.
    Active,
    /// Rendered next to the active panel: the parent in a stack, a
    /// neighbouring slot in a pivot.
    Behind,
    /// Still part of navigation state but not rendered.
    Hidden,
    /// No longer part of navigation state.
    Exiting,
}

impl PanelRole {
    /// Whether panels with this role have a layout position.
    #[inline]
    #[must_use]
    pub const fn is_rendered(self) -> bool {
        matches!(self, Self::Active | Self::Behind)
    }
}

/// Role of a stack panel at `panel_depth` (`None` if not in the stack).
#[must_use]
pub fn stack_role(panel_depth: Option<usize>, nav_depth: usize) -> PanelRole {
    match panel_depth {
        None => PanelRole::Exiting,
        Some(d) if d == nav_depth => PanelRole::Active,
        Some(d) if d + 1 == nav_depth => PanelRole::Behind,
        Some(d) if d < nav_depth => PanelRole::Hidden,
        // Above the current depth only happens for a stale id.
        Some(_) => PanelRole::Exiting,
    }
}

/// Role of a pivot item at relative `offset` (`None` if not an item).
#[must_use]
pub fn pivot_role(offset: Option<i32>, radius: usize) -> PanelRole {
    match offset {
        None => PanelRole::Exiting,
        Some(0) => PanelRole::Active,
        Some(k) if k.unsigned_abs() as usize <= radius => PanelRole::Behind,
        Some(_) => PanelRole::Hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_roles() {
        assert_eq!(stack_role(Some(2), 2), PanelRole::Active);
        assert_eq!(stack_role(Some(1), 2), PanelRole::Behind);
        assert_eq!(stack_role(Some(0), 2), PanelRole::Hidden);
        assert_eq!(stack_role(None, 2), PanelRole::Exiting);
        assert_eq!(stack_role(Some(3), 2), PanelRole::Exiting);
    }

    #[test]
    fn pivot_roles() {
        assert_eq!(pivot_role(Some(0), 1), PanelRole::Active);
        assert_eq!(pivot_role(Some(-1), 1), PanelRole::Behind);
        assert_eq!(pivot_role(Some(2), 1), PanelRole::Hidden);
        assert_eq!(pivot_role(None, 1), PanelRole::Exiting);
        assert!(!PanelRole::Hidden.is_rendered());
    }
}
