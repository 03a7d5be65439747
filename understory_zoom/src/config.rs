// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom bounds, wheel tuning and animation settings.

use core::fmt;
use core::time::Duration;

use crate::modes::LayoutMode;

/// Configuration surface of a [`crate::ZoomControl`].
///
/// Values are checked by [`ZoomConfig::validate`] whenever a configuration is
/// handed to a control; an invalid configuration is never applied.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomConfig {
    /// Smallest allowed zoom factor.
    pub min_zoom: f64,
    /// Largest allowed zoom factor.
    pub max_zoom: f64,
    /// Upper bound of the multiplicative zoom change of a single wheel tick.
    ///
    /// The lower bound is its reciprocal, so this must be at least `1.0`.
    pub max_zoom_delta: f64,
    /// Scales raw wheel deltas into a multiplicative zoom change.
    pub zoom_delta_multiplier: f64,
    /// Length of animated zoom/translate transitions.
    pub animation_length: Duration,
    /// When `true`, wheel input only zooms while Control is held.
    pub require_modifier_for_wheel_zoom: bool,
    /// Enables bounding of translations so content cannot leave the view.
    ///
    /// Off by default: panning is free.
    pub translation_clamping: bool,
    /// Layout mode applied the first time content is attached.
    pub attach_mode: LayoutMode,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.01,
            max_zoom: 100.0,
            max_zoom_delta: 5.0,
            zoom_delta_multiplier: 100.0,
            animation_length: Duration::from_millis(500),
            require_modifier_for_wheel_zoom: true,
            translation_clamping: false,
            attach_mode: LayoutMode::Original,
        }
    }
}

impl ZoomConfig {
    /// Sets the zoom range.
    #[must_use]
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Sets the per-tick wheel zoom bound.
    #[must_use]
    pub fn with_max_zoom_delta(mut self, max_zoom_delta: f64) -> Self {
        self.max_zoom_delta = max_zoom_delta;
        self
    }

    /// Sets the wheel delta multiplier.
    #[must_use]
    pub fn with_zoom_delta_multiplier(mut self, multiplier: f64) -> Self {
        self.zoom_delta_multiplier = multiplier;
        self
    }

    /// Sets the transition length. A zero length settles on the next tick.
    #[must_use]
    pub fn with_animation_length(mut self, length: Duration) -> Self {
        self.animation_length = length;
        self
    }

    /// Sets whether wheel zoom requires Control to be held.
    #[must_use]
    pub fn with_require_modifier_for_wheel_zoom(mut self, require: bool) -> Self {
        self.require_modifier_for_wheel_zoom = require;
        self
    }

    /// Enables or disables translation clamping.
    #[must_use]
    pub fn with_translation_clamping(mut self, enabled: bool) -> Self {
        self.translation_clamping = enabled;
        self
    }

    /// Sets the layout mode applied when content is first attached.
    #[must_use]
    pub fn with_attach_mode(mut self, mode: LayoutMode) -> Self {
        self.attach_mode = mode;
        self
    }

    /// Checks the configuration for values the control cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() {
            return Err(ConfigError::NonFiniteZoomLimit);
        }
        if self.min_zoom <= 0.0 || self.max_zoom <= 0.0 {
            return Err(ConfigError::NonPositiveZoomLimit {
                min_zoom: self.min_zoom,
                max_zoom: self.max_zoom,
            });
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvertedZoomLimits {
                min_zoom: self.min_zoom,
                max_zoom: self.max_zoom,
            });
        }
        if !self.max_zoom_delta.is_finite() || self.max_zoom_delta < 1.0 {
            return Err(ConfigError::InvalidMaxZoomDelta(self.max_zoom_delta));
        }
        if !self.zoom_delta_multiplier.is_finite() {
            return Err(ConfigError::NonFiniteZoomDeltaMultiplier);
        }
        Ok(())
    }
}

/// Error returned when a [`ZoomConfig`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `min_zoom` or `max_zoom` is NaN or infinite.
    NonFiniteZoomLimit,
    /// A zoom limit is zero or negative.
    NonPositiveZoomLimit {
        /// Rejected minimum.
        min_zoom: f64,
        /// Rejected maximum.
        max_zoom: f64,
    },
    /// `min_zoom` is larger than `max_zoom`.
    InvertedZoomLimits {
        /// Rejected minimum.
        min_zoom: f64,
        /// Rejected maximum.
        max_zoom: f64,
    },
    /// `max_zoom_delta` is below `1.0` or not finite.
    InvalidMaxZoomDelta(f64),
    /// `zoom_delta_multiplier` is NaN or infinite.
    NonFiniteZoomDeltaMultiplier,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteZoomLimit => write!(f, "zoom limits must be finite"),
            Self::NonPositiveZoomLimit { min_zoom, max_zoom } => write!(
                f,
                "zoom limits must be positive (min {min_zoom}, max {max_zoom})"
            ),
            Self::InvertedZoomLimits { min_zoom, max_zoom } => write!(
                f,
                "minimum zoom {min_zoom} is larger than maximum zoom {max_zoom}"
            ),
            Self::InvalidMaxZoomDelta(delta) => {
                write!(f, "max zoom delta must be finite and at least 1 (got {delta})")
            }
            Self::NonFiniteZoomDeltaMultiplier => {
                write!(f, "zoom delta multiplier must be finite")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
