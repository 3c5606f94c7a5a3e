//! Viewport and coordinate transformation for the editor surface.
//!
//! Maps between screen pixels (0,0 at top-left, +Y down) and diagram space.
//! Diagram space also runs +Y down, so no axis flip is involved:
//!
//! ```text
//! screen = diagram * zoom + pan
//! diagram = (screen - pan) / zoom
//! ```

use std::fmt;

use crate::geometry::{Bounds, Point};
use rangekit_core::constants::{MAX_ZOOM, MIN_ZOOM, VIEW_PADDING, ZOOM_STEP};

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Point,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a viewport for a surface of the given pixel size.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan: Point::ZERO,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the surface dimensions (typically called when the host resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the supported range. Non-finite
    /// values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn set_pan(&mut self, pan: Point) {
        if pan.is_finite() {
            self.pan = pan;
        }
    }

    /// Pans by a delta in screen pixels.
    pub fn pan_by(&mut self, delta: Point) {
        self.set_pan(self.pan + delta);
    }

    /// Converts screen pixel coordinates to diagram coordinates.
    pub fn pixel_to_world(&self, pixel: Point) -> Point {
        (pixel - self.pan) * (1.0 / self.zoom)
    }

    /// Converts diagram coordinates to screen pixel coordinates.
    pub fn world_to_pixel(&self, world: Point) -> Point {
        world * self.zoom + self.pan
    }

    /// Zooms to `new_zoom` while keeping `world_point` at the same screen position.
    ///
    /// Useful for "zoom to cursor" functionality.
    pub fn zoom_to_point(&mut self, world_point: Point, new_zoom: f64) {
        if !new_zoom.is_finite() {
            return;
        }
        let pixel = self.world_to_pixel(world_point);
        self.zoom = new_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pixel - world_point * self.zoom;
    }

    /// Multiplies the zoom by `factor`, anchored at a screen position.
    pub fn zoom_at(&mut self, pixel: Point, factor: f64) {
        let world = self.pixel_to_world(pixel);
        self.zoom_to_point(world, self.zoom * factor);
    }

    /// Fits the given bounds into the surface, reserving `padding` (a
    /// fraction of the surface) on each edge, and centers the content.
    pub fn fit_to_bounds(&mut self, bounds: Bounds, padding: f64) {
        let (width, height) = (bounds.width(), bounds.height());
        if width <= 0.0 || height <= 0.0 || self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return;
        }

        let padding_factor = 1.0 - (padding * 2.0);
        let zoom_x = (self.canvas_width * padding_factor) / width;
        let zoom_y = (self.canvas_height * padding_factor) / height;
        self.zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);
        self.center_on(bounds.center());
    }

    /// [`fit_to_bounds`](Self::fit_to_bounds) with the default padding.
    pub fn fit_to_view(&mut self, bounds: Bounds) {
        self.fit_to_bounds(bounds, VIEW_PADDING);
    }

    /// Centers the viewport on a diagram coordinate.
    pub fn center_on(&mut self, world: Point) {
        let screen_center = Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0);
        self.pan = screen_center - world * self.zoom;
    }

    /// Diagram-space rectangle currently visible on the surface.
    pub fn visible_bounds(&self) -> Bounds {
        Bounds::new(
            self.pixel_to_world(Point::ZERO),
            self.pixel_to_world(Point::new(self.canvas_width, self.canvas_height)),
        )
    }

    /// Resets to 1:1 zoom with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::ZERO;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan.x, self.pan.y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
