//! Map configuration: endpoint, zoom limits, palette, and user-facing messages.
//!
//! Every field has a default, so a host can override only what it needs with
//! a partial JSON object (the browser host reads it from the container's
//! `data-config` attribute).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;
use thiserror::Error;

use crate::consts::{CLICK_SLOP_PX, INDOOR_WIDTH_RATIO, MAX_ZOOM, MIN_ZOOM, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::error::FALLBACK_LOAD_MESSAGE;

pub const DEFAULT_AVAILABILITY_ENDPOINT: &str = "/api/tables/availability";
pub const DEFAULT_NO_TABLES_MESSAGE: &str = "No tables available for the selected date and time.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid table map config: {0}")]
    Parse(String),
    #[error("zoom limits out of order: min {min} must be below max {max}")]
    ZoomLimits { min: String, max: String },
    #[error("zoom factors must bracket 1.0 (in > 1 > out > 0)")]
    ZoomFactors,
    #[error("indoor width ratio must be strictly between 0 and 1")]
    IndoorRatio,
}

/// Colors used when drawing the floor plan. Any CSS color string is accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub indoor_zone: String,
    pub outdoor_zone: String,
    pub divider: String,
    pub zone_label: String,
    pub available_fill: String,
    pub selected_fill: String,
    pub table_stroke: String,
    pub table_label: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            indoor_zone: "#f5f0e8".to_owned(),
            outdoor_zone: "#e8f3e8".to_owned(),
            divider: "#9e9e9e".to_owned(),
            zone_label: "#6d6d6d".to_owned(),
            available_fill: "#ffffff".to_owned(),
            selected_fill: "#4caf50".to_owned(),
            table_stroke: "#333333".to_owned(),
            table_label: "#1f1a17".to_owned(),
        }
    }
}

/// Tunable behavior of one table map instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableMapConfig {
    /// Path or URL of the availability endpoint.
    pub availability_endpoint: String,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    /// Fraction of the canvas width given to the indoor zone.
    pub indoor_width_ratio: f64,
    /// Pointer travel beyond which a press is a drag rather than a click.
    pub click_slop_px: f64,
    pub palette: Palette,
    /// Shown when a load fails without a server message.
    pub fallback_error_message: String,
    /// Shown when a load succeeds with no tables.
    pub no_tables_message: String,
}

impl Default for TableMapConfig {
    fn default() -> Self {
        Self {
            availability_endpoint: DEFAULT_AVAILABILITY_ENDPOINT.to_owned(),
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            indoor_width_ratio: INDOOR_WIDTH_RATIO,
            click_slop_px: CLICK_SLOP_PX,
            palette: Palette::default(),
            fallback_error_message: FALLBACK_LOAD_MESSAGE.to_owned(),
            no_tables_message: DEFAULT_NO_TABLES_MESSAGE.to_owned(),
        }
    }
}

impl TableMapConfig {
    /// Parse a (possibly partial) JSON object over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or a validation
    /// error when the resulting values are inconsistent.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that limits and factors are usable.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0 && self.min_zoom < self.max_zoom) {
            return Err(ConfigError::ZoomLimits { min: self.min_zoom.to_string(), max: self.max_zoom.to_string() });
        }
        if !(self.zoom_in_factor > 1.0 && self.zoom_out_factor < 1.0 && self.zoom_out_factor > 0.0) {
            return Err(ConfigError::ZoomFactors);
        }
        if !(self.indoor_width_ratio > 0.0 && self.indoor_width_ratio < 1.0) {
            return Err(ConfigError::IndoorRatio);
        }
        Ok(())
    }
}
