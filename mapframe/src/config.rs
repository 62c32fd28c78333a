// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.
//!
//! [`MapConfig`] is plain data with serde support. Every field has a default,
//! so a JSON document only needs the keys it wants to change:
//!
//! ```
//! use mapframe::MapConfig;
//! use mapframe_selection::SelectionPolicy;
//!
//! let config = MapConfig::from_json(r#"{ "maxSelected": 30, "selectionPolicy": "single" }"#)?;
//! assert_eq!(config.max_selected, Some(30));
//! assert_eq!(config.selection_policy, SelectionPolicy::Single);
//! assert_eq!(config.max_zoom, 8.0);
//! # Ok::<(), mapframe::ConfigError>(())
//! ```

use mapframe_selection::SelectionPolicy;
use mapframe_timing::Easing;
use mapframe_view::{EngineOptions, FitOptions, FitPadding};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for a [`MapController`](crate::MapController).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Multiplier on the fit-to-viewport minimum scale. At least `1`.
    pub min_zoom_multiplier: f64,
    /// Absolute maximum scale.
    pub max_zoom: f64,
    /// Maximum scale a zoom-to-fit may reach.
    pub max_fit_zoom: f64,
    /// Maximum number of selected shapes; `None` is unrestricted.
    pub max_selected: Option<usize>,
    /// Single or multi select.
    pub selection_policy: SelectionPolicy,
    /// Fit padding ratio, measured according to `fit_padding`.
    pub fit_padding_ratio: f64,
    /// How the fit padding ratio is measured.
    pub fit_padding: FitPadding,
    /// Extra padding above framed shapes, in content units.
    pub fit_vertical_offset_px: f64,
    /// Duration of zoom button transitions. Also read from
    /// `animationDurationMs`.
    #[serde(alias = "animationDurationMs")]
    pub zoom_duration_ms: u64,
    /// Duration of zoom-to-fit transitions.
    pub fit_duration_ms: u64,
    /// Duration of the reset transition.
    pub reset_duration_ms: u64,
    /// Resize debounce window.
    pub resize_debounce_ms: u64,
    /// Scale factor of the zoom-in control. Greater than `1`.
    pub zoom_in_factor: f64,
    /// Scale factor of the zoom-out control. Between `0` and `1`.
    pub zoom_out_factor: f64,
    /// Scale factor per wheel notch. Greater than `1`.
    pub wheel_zoom_step: f64,
    /// Easing of animated transitions.
    pub easing: Easing,
    /// Key of the persisted selection in the channel.
    pub query_key: String,
    /// Substring that marks an element id as a selectable shape.
    pub shape_marker: String,
    /// Pointer travel, in viewport pixels, before a press becomes a pan.
    pub drag_slop_px: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            min_zoom_multiplier: 1.0,
            max_zoom: 8.0,
            max_fit_zoom: 4.0,
            max_selected: None,
            selection_policy: SelectionPolicy::Multi,
            fit_padding_ratio: 0.05,
            fit_padding: FitPadding::ViewportRelative,
            fit_vertical_offset_px: 0.0,
            zoom_duration_ms: 200,
            fit_duration_ms: 750,
            reset_duration_ms: 200,
            resize_debounce_ms: 100,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            wheel_zoom_step: 1.1,
            easing: Easing::EaseOutCubic,
            query_key: "selected".to_owned(),
            shape_marker: "click".to_owned(),
            drag_slop_px: 3.0,
        }
    }
}

impl MapConfig {
    /// Parses a JSON document and validates the result.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed input, or the first failed check of
    /// [`MapConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, key: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue { key, reason })
            }
        }

        check(
            self.min_zoom_multiplier.is_finite() && self.min_zoom_multiplier >= 1.0,
            "minZoomMultiplier",
            "must be finite and at least 1",
        )?;
        check(
            self.max_zoom.is_finite() && self.max_zoom > 0.0,
            "maxZoom",
            "must be finite and positive",
        )?;
        check(
            self.max_fit_zoom.is_finite() && self.max_fit_zoom > 0.0,
            "maxFitZoom",
            "must be finite and positive",
        )?;
        check(self.max_selected != Some(0), "maxSelected", "must be at least 1")?;
        check(
            self.fit_padding_ratio.is_finite() && self.fit_padding_ratio >= 0.0,
            "fitPaddingRatio",
            "must be finite and not negative",
        )?;
        check(
            self.fit_vertical_offset_px.is_finite() && self.fit_vertical_offset_px >= 0.0,
            "fitVerticalOffsetPx",
            "must be finite and not negative",
        )?;
        check(
            self.zoom_in_factor.is_finite() && self.zoom_in_factor > 1.0,
            "zoomInFactor",
            "must be greater than 1",
        )?;
        check(
            self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0,
            "zoomOutFactor",
            "must be between 0 and 1",
        )?;
        check(
            self.wheel_zoom_step.is_finite() && self.wheel_zoom_step > 1.0,
            "wheelZoomStep",
            "must be greater than 1",
        )?;
        check(
            self.drag_slop_px.is_finite() && self.drag_slop_px >= 0.0,
            "dragSlopPx",
            "must be finite and not negative",
        )?;
        check(!self.query_key.is_empty(), "queryKey", "must not be empty")?;
        Ok(())
    }

    /// Engine tunables derived from this configuration.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            min_zoom_multiplier: self.min_zoom_multiplier,
            max_zoom: self.max_zoom,
            easing: self.easing,
            resize_debounce_ms: self.resize_debounce_ms,
        }
    }

    /// Fit tunables derived from this configuration.
    #[must_use]
    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            padding_ratio: self.fit_padding_ratio,
            padding: self.fit_padding,
            vertical_offset: self.fit_vertical_offset_px,
            max_fit_scale: self.max_fit_zoom,
        }
    }
}
