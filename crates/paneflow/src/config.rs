#![forbid(unsafe_code)]

//! Unified view configuration.
//!
//! [`PaneflowConfig`] gathers every tunable the view pipelines use. It can be
//! built in code with `with_*` builders, loaded from JSON, or taken from the
//! environment. Every entry point ends in [`validated`](PaneflowConfig::validated),
//! so out-of-range values are clamped (with a `config.clamped` warning)
//! rather than rejected.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "swipe": { "thresholds": { "velocity_threshold": 0.4 }, "trigger_rule": "both" },
//!   "distance_threshold": "25%",
//!   "edge_width": 24,
//!   "continuity": { "duration_ms": 250, "easing": "ease_out" }
//! }
//! ```
//!
//! Every field is optional. `distance_threshold` accepts `"50px"`, `"25%"`, a
//! bare number, or `{ "value": 25, "unit": "ratio" }`; when present it
//! replaces `swipe.thresholds.distance_threshold` and is re-resolved against
//! the container on every resize.

use serde::{Deserialize, Serialize};

use paneflow_core::edge::DEFAULT_EDGE_WIDTH;
use paneflow_core::swipe::{SwipeConfig, SwipeInputThresholds};
use paneflow_core::threshold::Threshold;
use paneflow_layout::{ContinuityConfig, PivotTransformConfig, StackTransformConfig};

/// Errors loading a [`PaneflowConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed JSON, unknown enum names, or an unparsable threshold.
    #[error("invalid paneflow config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration shared by [`StackView`](crate::StackView) and
/// [`PivotView`](crate::PivotView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneflowConfig {
    /// Recognizer settings. The axis is fixed by each view.
    pub swipe: SwipeConfig,
    /// Container-relative release distance; overrides the pixel value in
    /// `swipe.thresholds` when set.
    pub distance_threshold: Option<Threshold>,
    /// Back-swipe activation zone (px from the left edge).
    pub edge_width: f64,
    /// Let wheel input drive the stack back gesture.
    pub forward_wheel: bool,
    /// Pop as soon as a back drag covers the full container width.
    pub commit_on_overswipe: bool,
    pub stack: StackTransformConfig,
    pub pivot: PivotTransformConfig,
    pub continuity: ContinuityConfig,
}

impl Default for PaneflowConfig {
    fn default() -> Self {
        Self {
            swipe: SwipeConfig::default(),
            distance_threshold: None,
            edge_width: DEFAULT_EDGE_WIDTH,
            forward_wheel: false,
            commit_on_overswipe: false,
            stack: StackTransformConfig::default(),
            pivot: PivotTransformConfig::default(),
            continuity: ContinuityConfig::default(),
        }
    }
}

impl PaneflowConfig {
    #[must_use]
    pub fn with_swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }

    #[must_use]
    pub fn with_distance_threshold(mut self, threshold: Threshold) -> Self {
        self.distance_threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_edge_width(mut self, width: f64) -> Self {
        self.edge_width = width;
        self
    }

    #[must_use]
    pub fn with_forward_wheel(mut self, forward: bool) -> Self {
        self.forward_wheel = forward;
        self
    }

    #[must_use]
    pub fn with_commit_on_overswipe(mut self, commit: bool) -> Self {
        self.commit_on_overswipe = commit;
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: StackTransformConfig) -> Self {
        self.stack = stack;
        self
    }

    #[must_use]
    pub fn with_pivot(mut self, pivot: PivotTransformConfig) -> Self {
        self.pivot = pivot;
        self
    }

    #[must_use]
    pub fn with_continuity(mut self, continuity: ContinuityConfig) -> Self {
        self.continuity = continuity;
        self
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Load config from environment variables on top of the defaults.
    ///
    /// Reads the recognizer variables handled by
    /// [`SwipeConfig::from_env`], plus:
    /// - `PANEFLOW_DISTANCE_THRESHOLD`: also accepts a percentage (`"25%"`)
    /// - `PANEFLOW_ANIMATION_MS`: continuity transition duration in ms
    ///
    /// Unparsable values are ignored with a `config.ignored` warning.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self {
            swipe: SwipeConfig::from_env(),
            ..Self::default()
        };
        if let Ok(raw) = std::env::var("PANEFLOW_DISTANCE_THRESHOLD")
            && let Ok(threshold @ Threshold::Ratio(_)) = raw.parse::<Threshold>()
        {
            config.distance_threshold = Some(threshold);
        }
        if let Ok(raw) = std::env::var("PANEFLOW_ANIMATION_MS") {
            match raw.trim().parse::<f64>() {
                Ok(ms) => config.continuity = config.continuity.with_duration_ms(ms),
                Err(_) => tracing::warn!(
                    message = "config.ignored",
                    key = "PANEFLOW_ANIMATION_MS",
                    value = raw.as_str()
                ),
            }
        }
        config.validated()
    }

    /// Clamp every section to its safe range.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.swipe = self.swipe.validated();
        if !self.edge_width.is_finite() || self.edge_width < 0.0 {
            tracing::warn!(
                message = "config.clamped",
                key = "edge_width",
                value = self.edge_width,
                clamped = DEFAULT_EDGE_WIDTH
            );
            self.edge_width = DEFAULT_EDGE_WIDTH;
        }
        self.stack = self.stack.validated();
        self.continuity = self.continuity.validated();
        self
    }

    /// Recognizer config for a container of `container_size` px along the
    /// swipe axis, with the relative distance threshold resolved.
    #[must_use]
    pub fn swipe_for(&self, container_size: f64) -> SwipeConfig {
        let thresholds = self.thresholds_for(container_size);
        self.swipe.clone().with_thresholds(thresholds)
    }

    /// Thresholds for a container of `container_size` px.
    #[must_use]
    pub fn thresholds_for(&self, container_size: f64) -> SwipeInputThresholds {
        let mut thresholds = self.swipe.thresholds;
        if let Some(threshold) = self.distance_threshold {
            thresholds.distance_threshold = threshold.resolve(container_size);
        }
        thresholds
    }
}
