#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::{RADIUS_LARGE, RADIUS_TIERS};
use crate::table::{Section, Table, TableId, TableSet};

/// Outline used both to draw a table and to hit-test it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Axis-aligned square with half-side equal to the radius.
    Square,
    /// Circle of the radius.
    Circle,
}

impl From<Section> for Shape {
    fn from(section: Section) -> Self {
        match section {
            Section::Indoor => Self::Square,
            Section::Outdoor => Self::Circle,
        }
    }
}

/// A table's on-canvas region in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub shape: Shape,
    pub center: Point,
    pub radius: f64,
}

impl Footprint {
    /// Whether `pt` (canvas pixels) lies inside the region, boundary included.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        match self.shape {
            Shape::Square => (pt.x - self.center.x).abs() <= self.radius && (pt.y - self.center.y).abs() <= self.radius,
            Shape::Circle => pt.distance(self.center) <= self.radius,
        }
    }
}

/// Footprint radius for a party capacity.
#[must_use]
pub fn radius_for_capacity(capacity: u32) -> f64 {
    RADIUS_TIERS
        .iter()
        .find(|(max, _)| capacity <= *max)
        .map_or(RADIUS_LARGE, |(_, radius)| *radius)
}

/// Where `table` sits on the canvas under `camera`.
///
/// The center follows pan and zoom; the radius does not.
#[must_use]
pub fn footprint(table: &Table, camera: &Camera) -> Footprint {
    Footprint {
        shape: Shape::from(table.section),
        center: camera.world_to_screen(table.position()),
        radius: radius_for_capacity(table.capacity),
    }
}

/// The first table (in set order) whose footprint contains `screen_pt`.
#[must_use]
pub fn hit_test(screen_pt: Point, tables: &TableSet, camera: &Camera) -> Option<TableId> {
    tables
        .iter()
        .find(|table| footprint(table, camera).contains(screen_pt))
        .map(|table| table.id)
}
