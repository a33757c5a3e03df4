#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! [`TourConfig`] collects every tunable of the geometry tracker. Defaults
//! match the stock card (360x220 px, 16 px margin). With the `config-files`
//! feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! # waypoint.toml
//! margin = 12.0
//! card_width = 320.0
//! scroll = "instant"
//! ```
//!
//! ```rust,ignore
//! let config = TourConfig::load("waypoint.toml")?;
//! ```

#[cfg(feature = "config-files")]
use std::path::Path;

#[cfg(feature = "config-files")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Size;

/// How the host should bring a newly activated target into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-files", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-files", serde(rename_all = "lowercase"))]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
    /// Never scroll; the user is expected to scroll manually.
    None,
}

/// Tunables for placement and tracking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-files", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-files", serde(default))]
pub struct TourConfig {
    /// Gap between target and card, and minimum distance to viewport edges.
    pub margin: f64,
    /// Card width used for placement.
    pub card_width: f64,
    /// Card height used for placement.
    pub card_height: f64,
    /// Padding added around the target for the scrim cut-out.
    pub highlight_padding: f64,
    /// Scroll behavior on step activation.
    pub scroll: ScrollBehavior,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            margin: 16.0,
            card_width: 360.0,
            card_height: 220.0,
            highlight_padding: 8.0,
            scroll: ScrollBehavior::Smooth,
        }
    }
}

impl TourConfig {
    /// Card size used by placement.
    pub fn card_size(&self) -> Size {
        Size::new(self.card_width, self.card_height)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.margin.is_finite() || self.margin < 0.0 {
            errors.push(format!("margin must be finite and >= 0, got {}", self.margin));
        }
        if !self.card_width.is_finite() || self.card_width <= 0.0 {
            errors.push(format!(
                "card_width must be finite and > 0, got {}",
                self.card_width
            ));
        }
        if !self.card_height.is_finite() || self.card_height <= 0.0 {
            errors.push(format!(
                "card_height must be finite and > 0, got {}",
                self.card_height
            ));
        }
        if !self.highlight_padding.is_finite() || self.highlight_padding < 0.0 {
            errors.push(format!(
                "highlight_padding must be finite and >= 0, got {}",
                self.highlight_padding
            ));
        }

        errors
    }

    /// Return `self` if valid, otherwise the collected problems.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Parse from a TOML string. Missing keys keep their defaults.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Parse from a JSON string. Missing keys keep their defaults.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from disk, picking the format from the file extension.
    #[cfg(feature = "config-files")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&std::fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }
}
