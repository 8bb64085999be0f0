//! Shared numeric constants for the table map crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed camera scale.
pub const MIN_ZOOM: f64 = 0.5;

/// Largest allowed camera scale.
pub const MAX_ZOOM: f64 = 3.0;

/// Scale multiplier applied per zoom-in step.
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Scale multiplier applied per zoom-out step.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

// ── Table footprints ────────────────────────────────────────────

/// Footprint radius (canvas pixels) per capacity tier, as `(max_capacity, radius)`.
///
/// Radii are not multiplied by the camera scale; only positions are.
pub const RADIUS_TIERS: [(u32, f64); 3] = [(2, 20.0), (4, 30.0), (6, 40.0)];

/// Footprint radius for tables larger than the last tier.
pub const RADIUS_LARGE: f64 = 50.0;

// ── Layout ──────────────────────────────────────────────────────

/// Fraction of the canvas width given to the indoor zone.
pub const INDOOR_WIDTH_RATIO: f64 = 0.7;

/// Pointer travel (canvas pixels) beyond which a press counts as a drag, not a click.
pub const CLICK_SLOP_PX: f64 = 4.0;

/// Font size for table labels, in canvas pixels.
pub const LABEL_FONT_PX: f64 = 12.0;

/// Font size for zone captions, in canvas pixels.
pub const ZONE_FONT_PX: f64 = 16.0;
