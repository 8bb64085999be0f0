#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either canvas-pixel or layout space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Camera state for pan/zoom over the floor plan.
///
/// `pan_x` / `pan_y` are in canvas pixels.
/// `zoom` is a scale factor (1.0 = no zoom), kept within `[min_zoom, max_zoom]`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, min_zoom: MIN_ZOOM, max_zoom: MAX_ZOOM }
    }
}

impl Camera {
    /// A camera at the identity transform with custom zoom limits.
    #[must_use]
    pub fn with_limits(min_zoom: f64, max_zoom: f64) -> Self {
        Self { min_zoom, max_zoom, ..Self::default() }
    }

    /// Convert a canvas-pixel point to layout coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a layout point to canvas pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Shift the pan offset by a canvas-pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Multiply the zoom by `factor`, keeping `pivot` fixed on screen.
    ///
    /// Returns `false` and leaves the camera untouched when the resulting
    /// zoom would fall outside `[min_zoom, max_zoom]`.
    pub fn zoom_at(&mut self, pivot: Point, factor: f64) -> bool {
        let next = self.zoom * factor;
        if !(self.min_zoom..=self.max_zoom).contains(&next) {
            return false;
        }
        self.pan_x = pivot.x - (pivot.x - self.pan_x) * factor;
        self.pan_y = pivot.y - (pivot.y - self.pan_y) * factor;
        self.zoom = next;
        true
    }
}

/// On-page rectangle of the canvas element in client (CSS) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Logical canvas size in canvas pixels plus the backing-store ratio.
///
/// All engine geometry lives in canvas pixels; the backing store is
/// `width * dpr` by `height * dpr` device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, dpr: 1.0 }
    }
}

impl Viewport {
    /// Backing-store size in whole device pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width * self.dpr).round().max(1.0) as u32;
        let h = (self.height * self.dpr).round().max(1.0) as u32;
        (w, h)
    }

    /// Convert a client-space pointer position into canvas pixels.
    ///
    /// Corrects for the canvas being displayed at a different CSS size than
    /// its logical size (e.g. stretched by a stylesheet before the next resize).
    #[must_use]
    pub fn client_to_canvas(&self, client: Point, rect: DisplayRect) -> Point {
        let sx = if rect.width > 0.0 { self.width / rect.width } else { 1.0 };
        let sy = if rect.height > 0.0 { self.height / rect.height } else { 1.0 };
        Point {
            x: (client.x - rect.left) * sx,
            y: (client.y - rect.top) * sy,
        }
    }
}
