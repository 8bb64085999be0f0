//! Draw list: what the canvas should show for the current engine state.
//!
//! Building the scene is pure so the drawing rules (zones, shapes, fills,
//! labels) can be tested without a browser. Table geometry comes from
//! [`hit::footprint`], the same function hit-testing uses, so what is drawn
//! and what is clickable cannot drift apart.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::camera::{Camera, Viewport};
use crate::config::TableMapConfig;
use crate::hit::{self, Footprint};
use crate::table::{Section, TableId, TableSet};

/// A background region of the floor plan, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub section: Section,
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub label: &'static str,
}

/// One table ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGlyph {
    pub id: TableId,
    pub footprint: Footprint,
    pub fill: String,
    pub selected: bool,
    pub label: String,
}

/// Everything the renderer draws, bottom layer first.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub zones: [Zone; 2],
    /// X position of the indoor/outdoor divider line.
    pub divider_x: f64,
    pub divider_color: String,
    pub zone_label_color: String,
    pub stroke_color: String,
    pub label_color: String,
    pub tables: Vec<TableGlyph>,
}

/// Build the scene for `tables` seen through `camera`.
#[must_use]
pub fn build(
    tables: &TableSet,
    camera: &Camera,
    selected: Option<TableId>,
    viewport: Viewport,
    config: &TableMapConfig,
) -> Scene {
    let palette = &config.palette;
    let divider_x = viewport.width * config.indoor_width_ratio;

    let zones = [
        Zone {
            section: Section::Indoor,
            x: 0.0,
            width: divider_x,
            height: viewport.height,
            fill: palette.indoor_zone.clone(),
            label: Section::Indoor.label(),
        },
        Zone {
            section: Section::Outdoor,
            x: divider_x,
            width: viewport.width - divider_x,
            height: viewport.height,
            fill: palette.outdoor_zone.clone(),
            label: Section::Outdoor.label(),
        },
    ];

    let glyphs = tables
        .iter()
        .map(|table| {
            let is_selected = selected == Some(table.id);
            TableGlyph {
                id: table.id,
                footprint: hit::footprint(table, camera),
                fill: if is_selected { palette.selected_fill.clone() } else { palette.available_fill.clone() },
                selected: is_selected,
                label: table.label(),
            }
        })
        .collect();

    Scene {
        viewport,
        zones,
        divider_x,
        divider_color: palette.divider.clone(),
        zone_label_color: palette.zone_label.clone(),
        stroke_color: palette.table_stroke.clone(),
        label_color: palette.table_label.clone(),
        tables: glyphs,
    }
}
