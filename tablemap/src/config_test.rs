#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_documented_behavior() {
    let cfg = TableMapConfig::default();
    assert_eq!(cfg.availability_endpoint, "/api/tables/availability");
    assert_eq!(cfg.min_zoom, 0.5);
    assert_eq!(cfg.max_zoom, 3.0);
    assert_eq!(cfg.zoom_in_factor, 1.1);
    assert_eq!(cfg.zoom_out_factor, 0.9);
    assert_eq!(cfg.indoor_width_ratio, 0.7);
    assert_eq!(cfg.palette.available_fill, "#ffffff");
    assert!(cfg.validate().is_ok());
}

#[test]
fn from_json_overrides_only_given_fields() {
    let cfg = TableMapConfig::from_json(r##"{"max_zoom": 4.0, "palette": {"selected_fill": "#ff9800"}}"##).unwrap();
    assert_eq!(cfg.max_zoom, 4.0);
    assert_eq!(cfg.min_zoom, 0.5);
    assert_eq!(cfg.palette.selected_fill, "#ff9800");
    assert_eq!(cfg.palette.available_fill, "#ffffff");
}

#[test]
fn from_json_empty_object_is_default() {
    assert_eq!(TableMapConfig::from_json("{}").unwrap(), TableMapConfig::default());
}

#[test]
fn from_json_rejects_malformed() {
    let err = TableMapConfig::from_json("{max_zoom:").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn from_json_rejects_inverted_zoom_limits() {
    let err = TableMapConfig::from_json(r#"{"min_zoom": 2.0, "max_zoom": 1.0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZoomLimits { .. }));
}

#[test]
fn from_json_rejects_factors_that_do_not_bracket_one() {
    let err = TableMapConfig::from_json(r#"{"zoom_out_factor": 1.2}"#).unwrap_err();
    assert_eq!(err, ConfigError::ZoomFactors);
}

#[test]
fn from_json_rejects_bad_indoor_ratio() {
    let err = TableMapConfig::from_json(r#"{"indoor_width_ratio": 1.0}"#).unwrap_err();
    assert_eq!(err, ConfigError::IndoorRatio);
}
