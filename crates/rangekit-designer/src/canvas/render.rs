//! Scene and overlay output for the host's drawing surface.
//!
//! Everything here is in diagram space; the host applies the viewport
//! transform when painting.

use super::{Canvas, InputState};
use crate::geometry::{polyline_midpoint, Bounds, Point};
use crate::renderer::{
    polyline_path, rect_path, render_with, segments_path, InteractionState, PaintStyle, Primitive,
    RenderOutput, Rgba, GRID, HIGHLIGHT, NEUTRAL,
};
use rangekit_core::format_length;

/// Upper bound on grid lines per axis; denser grids are not drawn.
const MAX_GRID_LINES: usize = 2000;
const RULER_TICK: f64 = 6.0;
const RULER_LABEL_EVERY: usize = 5;
const OVERLAY_FONT_SIZE: f64 = 12.0;
const BAND_FILL: Rgba = Rgba::rgba(59, 130, 246, 32);

impl Canvas {
    /// One output per element, bottom first, with live interaction state.
    pub fn render_scene(&self) -> Vec<RenderOutput> {
        let dragging = matches!(
            self.input,
            InputState::DraggingElements { .. } | InputState::DraggingHandle { .. }
        );
        self.store
            .iter()
            .map(|element| {
                let state = InteractionState {
                    selected: element.selected,
                    hovered: self.hovered.as_ref() == Some(&element.id),
                    dragging: dragging && element.selected,
                };
                render_with(element, state, self.handle_radius)
            })
            .collect()
    }

    /// Transient decorations drawn above the scene: grid, range border,
    /// ruler, rubber band, shape preview and measurement.
    pub fn render_overlays(&self) -> Vec<Primitive> {
        let range = Bounds::new(
            Point::ZERO,
            Point::new(self.dimensions.width, self.dimensions.height),
        );
        let mut out = Vec::new();

        if self.show_grid {
            out.extend(self.grid_overlay(range));
        }
        out.push(Primitive::path(rect_path(range), PaintStyle::stroke(NEUTRAL, 1.0)));
        if self.show_ruler {
            out.extend(self.ruler_overlay(range));
        }

        match &self.input {
            InputState::RubberBand {
                origin, current, ..
            } => {
                let band = Bounds::new(*origin, *current);
                out.push(Primitive::path(
                    rect_path(band),
                    PaintStyle::filled_stroke(BAND_FILL, HIGHLIGHT, 1.0).dashed(&[4.0, 4.0]),
                ));
            }
            InputState::Measuring { origin, current } => {
                out.extend(self.measure_overlay(*origin, *current));
            }
            _ => {}
        }

        if let Some(pending) = &self.pending {
            let mut points = pending.points.clone();
            if let Some(cursor) = self.cursor {
                points.push(self.snap_to_grid_if_enabled(cursor));
            }
            out.push(Primitive::path(
                polyline_path(&points, false),
                PaintStyle::stroke(HIGHLIGHT, 2.0).dashed(&[6.0, 4.0]),
            ));
            out.extend(
                pending
                    .points
                    .iter()
                    .map(|p| Primitive::circle(*p, 3.0, PaintStyle::fill(HIGHLIGHT))),
            );
        }

        out
    }

    fn grid_overlay(&self, range: Bounds) -> Option<Primitive> {
        let g = self.grid_size;
        let columns = (range.width() / g).floor() as usize;
        let rows = (range.height() / g).floor() as usize;
        if columns > MAX_GRID_LINES || rows > MAX_GRID_LINES {
            tracing::debug!(grid_size = g, "Grid too dense to draw");
            return None;
        }

        let vertical = (0..=columns).map(|i| {
            let x = range.min.x + i as f64 * g;
            (Point::new(x, range.min.y), Point::new(x, range.max.y))
        });
        let horizontal = (0..=rows).map(|j| {
            let y = range.min.y + j as f64 * g;
            (Point::new(range.min.x, y), Point::new(range.max.x, y))
        });
        let segments: Vec<_> = vertical.chain(horizontal).collect();
        Some(Primitive::path(segments_path(&segments), PaintStyle::stroke(GRID, 1.0)))
    }

    fn ruler_overlay(&self, range: Bounds) -> Vec<Primitive> {
        let step = self.units_per_measure;
        if !(step.is_finite() && step > 0.0) || range.width() / step > MAX_GRID_LINES as f64 {
            return Vec::new();
        }

        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        let mut i = 0usize;
        loop {
            let x = range.min.x + i as f64 * step;
            if x > range.max.x {
                break;
            }
            let long = i % RULER_LABEL_EVERY == 0;
            let height = if long { RULER_TICK * 2.0 } else { RULER_TICK };
            ticks.push((Point::new(x, range.min.y), Point::new(x, range.min.y + height)));
            if long && i > 0 {
                labels.push(Primitive::label(
                    Point::new(x, range.min.y + height + OVERLAY_FONT_SIZE),
                    format_length(x - range.min.x, step, self.measurement_system),
                    OVERLAY_FONT_SIZE,
                    PaintStyle::fill(NEUTRAL),
                ));
            }
            i += 1;
        }

        let mut out = vec![Primitive::path(
            segments_path(&ticks),
            PaintStyle::stroke(NEUTRAL, 1.0),
        )];
        out.extend(labels);
        out
    }

    fn measure_overlay(&self, origin: Point, current: Point) -> Vec<Primitive> {
        let style = PaintStyle::stroke(HIGHLIGHT, 2.0).dashed(&[8.0, 4.0]);
        let mut out = vec![
            Primitive::path(polyline_path(&[origin, current], false), style),
            Primitive::circle(origin, 3.0, PaintStyle::fill(HIGHLIGHT)),
            Primitive::circle(current, 3.0, PaintStyle::fill(HIGHLIGHT)),
        ];
        if let Some(mid) = polyline_midpoint(&[origin, current]) {
            out.push(Primitive::label(
                mid + Point::new(0.0, -OVERLAY_FONT_SIZE),
                self.measurement_label(origin, current),
                OVERLAY_FONT_SIZE,
                PaintStyle::fill(HIGHLIGHT),
            ));
        }
        out
    }

    /// Real-world length of the measured segment, e.g. `"2.50 ft"`.
    pub fn measurement_label(&self, origin: Point, current: Point) -> String {
        format_length(
            origin.distance_to(&current),
            self.units_per_measure,
            self.measurement_system,
        )
    }

    /// Distance of the measurement in progress, if any, in diagram units.
    pub fn measured_distance(&self) -> Option<f64> {
        match &self.input {
            InputState::Measuring { origin, current } => Some(origin.distance_to(current)),
            _ => None,
        }
    }
}
