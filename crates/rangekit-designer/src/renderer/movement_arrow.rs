use super::{
    polyline_path, ElementRenderer, HitRegion, PaintStyle, Primitive, RenderContext,
    RenderOutput, Rgba,
};
use crate::geometry::{normalize, polyline_midpoint, rotate90, Point};
use crate::model::MovementArrow;
use rangekit_core::constants::GEOMETRY_EPSILON;

const ARROW_COLOR: Rgba = Rgba::rgb(37, 99, 235);
const ARROW_WIDTH: f64 = 2.0;
const HEAD_LENGTH: f64 = 12.0;
const LABEL_SIZE: f64 = 12.0;

impl MovementArrow {
    /// Arrowhead triangle at the last point, aimed along the last
    /// non-degenerate segment. `None` when every segment has zero length.
    pub(crate) fn arrowhead(&self) -> Option<[Point; 3]> {
        let tip = *self.points.last()?;
        let from = self
            .points
            .iter()
            .rev()
            .skip(1)
            .find(|p| (tip - **p).length() > GEOMETRY_EPSILON)?;
        let dir = normalize(tip - *from);
        let back = tip - dir * HEAD_LENGTH;
        let side = rotate90(dir) * (HEAD_LENGTH / 2.0);
        Some([tip, back + side, back - side])
    }
}

impl ElementRenderer for MovementArrow {
    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        let line = PaintStyle::stroke(ARROW_COLOR, ARROW_WIDTH).with_interaction(ctx.state);
        let mut primitives = Vec::new();

        if self.points.len() >= 2 {
            primitives.push(Primitive::path(polyline_path(&self.points, false), line));
        }
        if let Some(head) = self.arrowhead() {
            primitives.push(Primitive::path(
                polyline_path(&head, true),
                PaintStyle::fill(ARROW_COLOR),
            ));
        }
        if !self.label.is_empty() {
            if let Some(mid) = polyline_midpoint(&self.points) {
                primitives.push(Primitive::label(
                    mid + Point::new(0.0, -LABEL_SIZE),
                    self.label.clone(),
                    LABEL_SIZE,
                    PaintStyle::fill(ARROW_COLOR),
                ));
            }
        }

        let mut output = RenderOutput::new(
            primitives,
            HitRegion::Polyline {
                points: self.points.clone(),
                width: ARROW_WIDTH,
            },
        );
        output.handles = ctx.handles_for(&self.points);
        output.primitives.extend(ctx.handle_primitives(&output.handles));
        output
    }
}
