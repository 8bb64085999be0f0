//! Rendering: paints a [`Scene`] to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a finished draw list and produces pixels and does not mutate
//! any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{LABEL_FONT_PX, ZONE_FONT_PX};
use crate::hit::Shape;
use crate::scene::{Scene, TableGlyph, Zone};

/// Stroke width for table outlines in canvas pixels.
const TABLE_STROKE_PX: f64 = 2.0;

/// Inset of zone captions from the zone's top-left corner.
const ZONE_LABEL_INSET_PX: f64 = 12.0;

/// Draw the full scene: zones, divider, then tables in set order.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene) -> Result<(), JsValue> {
    let vp = scene.viewport;

    // Layer 1: clear in canvas pixels.
    ctx.set_transform(vp.dpr, 0.0, 0.0, vp.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, vp.width, vp.height);

    // Layer 2: section zones, fixed to the canvas.
    for zone in &scene.zones {
        draw_zone(ctx, zone, &scene.zone_label_color)?;
    }
    draw_divider(ctx, scene);

    // Layer 3: tables.
    for glyph in &scene.tables {
        draw_table(ctx, glyph, scene)?;
    }

    Ok(())
}

fn draw_zone(ctx: &CanvasRenderingContext2d, zone: &Zone, label_color: &str) -> Result<(), JsValue> {
    ctx.set_fill_style_str(&zone.fill);
    ctx.fill_rect(zone.x, 0.0, zone.width, zone.height);

    ctx.set_fill_style_str(label_color);
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    ctx.set_font(&format!("bold {ZONE_FONT_PX:.0}px sans-serif"));
    ctx.fill_text(zone.label, zone.x + ZONE_LABEL_INSET_PX, ZONE_LABEL_INSET_PX)?;
    Ok(())
}

fn draw_divider(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    ctx.save();
    ctx.set_stroke_style_str(&scene.divider_color);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(scene.divider_x, 0.0);
    ctx.line_to(scene.divider_x, scene.viewport.height);
    ctx.stroke();
    ctx.restore();
}

fn draw_table(ctx: &CanvasRenderingContext2d, glyph: &TableGlyph, scene: &Scene) -> Result<(), JsValue> {
    let fp = glyph.footprint;

    ctx.begin_path();
    match fp.shape {
        Shape::Square => {
            let side = fp.radius * 2.0;
            ctx.rect(fp.center.x - fp.radius, fp.center.y - fp.radius, side, side);
        }
        Shape::Circle => {
            ctx.arc(fp.center.x, fp.center.y, fp.radius, 0.0, 2.0 * PI)?;
        }
    }
    ctx.set_fill_style_str(&glyph.fill);
    ctx.fill();
    ctx.set_stroke_style_str(&scene.stroke_color);
    ctx.set_line_width(TABLE_STROKE_PX);
    ctx.stroke();

    ctx.set_fill_style_str(&scene.label_color);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{LABEL_FONT_PX:.0}px sans-serif"));
    ctx.fill_text(&glyph.label, fp.center.x, fp.center.y)?;
    Ok(())
}
