use super::{
    polyline_path, ElementRenderer, HitRegion, PaintStyle, Primitive, RenderContext,
    RenderOutput, Rgba,
};
use crate::model::{FaultLine, LineStyle};

/// Dash pattern used for dashed fault lines.
pub const FAULT_LINE_DASH: [f64; 2] = [10.0, 5.0];

const FAULT_COLOR: Rgba = Rgba::rgb(220, 38, 38);
const FAULT_WIDTH: f64 = 3.0;
const END_CAP_RADIUS: f64 = 4.0;

impl ElementRenderer for FaultLine {
    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        let mut line = PaintStyle::stroke(FAULT_COLOR, FAULT_WIDTH).with_interaction(ctx.state);
        if self.style == LineStyle::Dashed {
            line = line.dashed(&FAULT_LINE_DASH);
        }

        let mut primitives = Vec::new();
        match self.points.as_slice() {
            [] => {}
            [only] => {
                // Single remaining point: a plain marker, no end caps.
                primitives.push(Primitive::circle(*only, FAULT_WIDTH, PaintStyle::fill(FAULT_COLOR)));
            }
            [first, .., last] => {
                primitives.push(Primitive::path(polyline_path(&self.points, false), line));
                let cap = PaintStyle::fill(FAULT_COLOR);
                primitives.push(Primitive::circle(*first, END_CAP_RADIUS, cap.clone()));
                primitives.push(Primitive::circle(*last, END_CAP_RADIUS, cap));
            }
        }

        let mut output = RenderOutput::new(
            primitives,
            HitRegion::Polyline {
                points: self.points.clone(),
                width: FAULT_WIDTH,
            },
        );
        output.handles = ctx.handles_for(&self.points);
        output.primitives.extend(ctx.handle_primitives(&output.handles));
        output
    }
}
