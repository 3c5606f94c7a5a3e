use super::{
    polyline_path, segments_path, ElementRenderer, HitRegion, PaintStyle, Primitive,
    RenderContext, RenderOutput, Rgba, BLACK,
};
use crate::geometry::{normalize, perpendicular, Point};
use crate::model::Wall;
use rangekit_core::constants::GEOMETRY_EPSILON;

/// Spacing of the cosmetic grain lines along the wall axis.
pub const GRAIN_SPACING: f64 = 20.0;

const WALL_FILL: Rgba = Rgba::rgb(139, 94, 60);
const GRAIN_OPACITY: f64 = 0.2;

impl Wall {
    /// Outline corners: start+perp, end+perp, end-perp, start-perp.
    ///
    /// `None` for a zero-length wall, whose outline is undefined.
    pub fn outline(&self) -> Option<[Point; 4]> {
        let axis = self.end_point - self.start_point;
        if axis.length() < GEOMETRY_EPSILON {
            return None;
        }
        let perp = perpendicular(axis, self.thickness);
        Some([
            self.start_point + perp,
            self.end_point + perp,
            self.end_point - perp,
            self.start_point - perp,
        ])
    }

    /// Cross-wall grain strokes every [`GRAIN_SPACING`] along the axis,
    /// excluding the two ends.
    pub(crate) fn grain_segments(&self) -> Vec<(Point, Point)> {
        let length = self.length();
        if length < GEOMETRY_EPSILON {
            return Vec::new();
        }
        let dir = normalize(self.end_point - self.start_point);
        let perp = perpendicular(dir, self.thickness);
        let mut segments = Vec::new();
        let mut d = GRAIN_SPACING;
        while d < length {
            let at = self.start_point + dir * d;
            segments.push((at + perp, at - perp));
            d += GRAIN_SPACING;
        }
        segments
    }
}

impl ElementRenderer for Wall {
    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        let style = PaintStyle::filled_stroke(WALL_FILL, BLACK, 1.5).with_interaction(ctx.state);

        let Some(outline) = self.outline() else {
            // Degenerate wall: a round post of the wall's thickness.
            let radius = self.thickness / 2.0;
            let mut output = RenderOutput::new(
                vec![Primitive::circle(self.start_point, radius, style)],
                HitRegion::Circle {
                    center: self.start_point,
                    radius,
                },
            );
            output.handles = ctx.handles_for(&[self.start_point, self.end_point]);
            output.primitives.extend(ctx.handle_primitives(&output.handles));
            return output;
        };

        let mut primitives = vec![Primitive::path(polyline_path(&outline, true), style)];

        let grain = self.grain_segments();
        if !grain.is_empty() {
            primitives.push(Primitive::path(
                segments_path(&grain),
                PaintStyle::stroke(BLACK, 1.0).with_opacity(GRAIN_OPACITY),
            ));
        }

        let mut output = RenderOutput::new(primitives, HitRegion::Polygon(outline.to_vec()));
        output.handles = ctx.handles_for(&[self.start_point, self.end_point]);
        output.primitives.extend(ctx.handle_primitives(&output.handles));
        output
    }
}
