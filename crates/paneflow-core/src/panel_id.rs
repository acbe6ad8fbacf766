#![forbid(unsafe_code)]

//! Stable panel keys shared by navigation and continuity.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque key identifying one panel (a stack entry or a pivot item).
///
/// Cloning is a reference-count bump, so ids can be copied freely into
/// navigation snapshots and continuity records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(Arc<str>);

impl PanelId {
    /// Create a panel id.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(Arc::from(raw.as_ref()))
    }

    /// Borrow the raw key.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PanelId {
    fn from(raw: String) -> Self {
        Self(Arc::from(raw))
    }
}

impl AsRef<str> for PanelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
