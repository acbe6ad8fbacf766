#![forbid(unsafe_code)]

//! Container-relative thresholds.
//!
//! A [`Threshold`] is either an absolute pixel distance or a percentage of
//! the container size. Textual forms:
//!
//! | text | meaning |
//! |------|---------|
//! | `"50px"` / `"50"` | 50 pixels |
//! | `"25%"` | 25% of the container |
//!
//! The structured form `{ "value": 25, "unit": "ratio" }` is also 25% of the
//! container: a ratio value is expressed in percent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit of a structured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdUnit {
    Px,
    /// Percent of the container size.
    Ratio,
}

/// A distance threshold, possibly relative to the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdRepr", into = "ThresholdSpec")]
pub enum Threshold {
    Px(f64),
    /// Percent of the container size (`Ratio(25.0)` on 400px is 100px).
    Ratio(f64),
}

impl Default for Threshold {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

/// Errors from parsing a threshold.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdParseError {
    #[error("empty threshold")]
    Empty,
    #[error("invalid threshold number in {input:?}")]
    InvalidNumber { input: String },
    #[error("threshold must be finite and non-negative, got {value}")]
    OutOfRange { value: f64 },
}

impl Threshold {
    /// Resolve to pixels against `container_size`.
    #[must_use]
    pub fn resolve(self, container_size: f64) -> f64 {
        resolve_threshold(self, container_size)
    }

    fn checked(self) -> Result<Self, ThresholdParseError> {
        let value = match self {
            Self::Px(v) | Self::Ratio(v) => v,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(ThresholdParseError::OutOfRange { value });
        }
        Ok(self)
    }
}

/// Resolve a threshold to pixels. Ratios against a non-positive container
/// resolve to 0.
#[must_use]
pub fn resolve_threshold(threshold: Threshold, container_size: f64) -> f64 {
    match threshold {
        Threshold::Px(px) => px,
        Threshold::Ratio(percent) => {
            if container_size <= 0.0 {
                return 0.0;
            }
            percent / 100.0 * container_size
        }
    }
}

impl FromStr for Threshold {
    type Err = ThresholdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ThresholdParseError::Empty);
        }
        let (number, ctor): (&str, fn(f64) -> Threshold) =
            if let Some(rest) = trimmed.strip_suffix('%') {
                (rest, Threshold::Ratio)
            } else if let Some(rest) = trimmed.strip_suffix("px") {
                (rest, Threshold::Px)
            } else {
                (trimmed, Threshold::Px)
            };
        let value = number
            .trim()
            .parse::<f64>()
            .map_err(|_| ThresholdParseError::InvalidNumber {
                input: s.to_string(),
            })?;
        ctor(value).checked()
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Ratio(v) => write!(f, "{v}%"),
        }
    }
}

/// Wire form accepted on deserialization.
#[derive(Deserialize)]
#[serde(untagged)]
enum ThresholdRepr {
    Number(f64),
    Text(String),
    Spec(ThresholdSpec),
}

/// Canonical structured wire form.
#[derive(Serialize, Deserialize)]
struct ThresholdSpec {
    value: f64,
    unit: ThresholdUnit,
}

impl TryFrom<ThresholdRepr> for Threshold {
    type Error = ThresholdParseError;

    fn try_from(repr: ThresholdRepr) -> Result<Self, Self::Error> {
        match repr {
            ThresholdRepr::Number(v) => Threshold::Px(v).checked(),
            ThresholdRepr::Text(text) => text.parse(),
            ThresholdRepr::Spec(spec) => match spec.unit {
                ThresholdUnit::Px => Threshold::Px(spec.value).checked(),
                ThresholdUnit::Ratio => Threshold::Ratio(spec.value).checked(),
            },
        }
    }
}

impl From<Threshold> for ThresholdSpec {
    fn from(threshold: Threshold) -> Self {
        match threshold {
            Threshold::Px(value) => Self {
                value,
                unit: ThresholdUnit::Px,
            },
            Threshold::Ratio(value) => Self {
                value,
                unit: ThresholdUnit::Ratio,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_percent_of_container() {
        assert_eq!(resolve_threshold(Threshold::Ratio(25.0), 400.0), 100.0);
    }

    #[test]
    fn px_ignores_container() {
        let t: Threshold = "50px".parse().unwrap();
        assert_eq!(resolve_threshold(t, 400.0), 50.0);
        assert_eq!(resolve_threshold(t, 0.0), 50.0);
        assert_eq!(resolve_threshold(t, 12345.0), 50.0);
    }

    #[test]
    fn ratio_on_empty_container_is_zero() {
        assert_eq!(resolve_threshold(Threshold::Ratio(50.0), 0.0), 0.0);
        assert_eq!(resolve_threshold(Threshold::Ratio(50.0), -10.0), 0.0);
    }

    #[test]
    fn parses_textual_forms() {
        assert_eq!("25%".parse::<Threshold>(), Ok(Threshold::Ratio(25.0)));
        assert_eq!(" 12 ".parse::<Threshold>(), Ok(Threshold::Px(12.0)));
        assert_eq!("".parse::<Threshold>(), Err(ThresholdParseError::Empty));
        assert!(matches!(
            "abc".parse::<Threshold>(),
            Err(ThresholdParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            "-5px".parse::<Threshold>(),
            Err(ThresholdParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn deserializes_every_wire_form() {
        let structured: Threshold =
            serde_json::from_str(r#"{ "value": 25, "unit": "ratio" }"#).unwrap();
        assert_eq!(structured.resolve(400.0), 100.0);

        let text: Threshold = serde_json::from_str("\"50px\"").unwrap();
        assert_eq!(text, Threshold::Px(50.0));

        let bare: Threshold = serde_json::from_str("80").unwrap();
        assert_eq!(bare, Threshold::Px(80.0));

        assert!(serde_json::from_str::<Threshold>("\"wide\"").is_err());
    }
}
