//! Start positions, text annotations and the placeholder for unknown types.

use super::{
    rect_path, rounded_rect_path, ElementRenderer, HitRegion, PaintStyle, Primitive,
    RenderContext, RenderOutput, Rgba, TextAlign, BLACK, NEUTRAL,
};
use crate::geometry::{Bounds, Point};
use crate::model::{FontWeight, OpaqueElement, StartPosition, StartVariant, TextLabel};

const START_COLOR: Rgba = Rgba::rgb(22, 163, 74);
const START_BOX: f64 = 40.0;
const POINT_RADIUS: f64 = 8.0;

impl ElementRenderer for StartPosition {
    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        let placement = ctx.placement;
        let transform = placement.transform();

        match self.variant {
            StartVariant::Box => {
                let rect = Bounds::centered(Point::ZERO, START_BOX, START_BOX);
                let style = PaintStyle::stroke(START_COLOR, 3.0).with_interaction(ctx.state);
                RenderOutput::new(
                    vec![Primitive::path(rect_path(rect).transformed(&transform), style)],
                    placement.rect_region(rect),
                )
            }
            StartVariant::Feet => {
                let style = PaintStyle::filled_stroke(START_COLOR, BLACK, 1.0)
                    .with_interaction(ctx.state);
                let left = Bounds::new(Point::new(-14.0, -11.0), Point::new(-4.0, 11.0));
                let right = Bounds::new(Point::new(4.0, -11.0), Point::new(14.0, 11.0));
                RenderOutput::new(
                    vec![
                        Primitive::path(rounded_rect_path(left, 5.0).transformed(&transform), style.clone()),
                        Primitive::path(rounded_rect_path(right, 5.0).transformed(&transform), style),
                    ],
                    placement.rect_region(left.union(&right)),
                )
            }
            StartVariant::Point => {
                let style = PaintStyle::fill(START_COLOR).with_interaction(ctx.state);
                let center = placement.apply(Point::ZERO);
                RenderOutput::new(
                    vec![Primitive::circle(center, POINT_RADIUS, style)],
                    HitRegion::Circle {
                        center,
                        radius: POINT_RADIUS,
                    },
                )
            }
        }
    }
}

impl ElementRenderer for TextLabel {
    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        let (width, height) = self.approximate_size();
        let mut style = PaintStyle::fill(BLACK);
        if ctx.state.selected || ctx.state.hovered {
            style = style.with_interaction(ctx.state);
        }
        let text = Primitive::Text {
            anchor: ctx.placement.position,
            align: TextAlign::TopLeft,
            text: self.text.clone(),
            font_size: self.font_size,
            bold: self.font_weight == FontWeight::Bold,
            rotation: ctx.placement.rotation,
            style,
        };
        let local = Bounds::new(Point::ZERO, Point::new(width, height));
        RenderOutput::new(vec![text], ctx.placement.rect_region(local))
    }
}

impl ElementRenderer for OpaqueElement {
    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        let (width, height) = self.footprint();
        let rect = Bounds::centered(Point::ZERO, width, height);
        let style = PaintStyle::stroke(NEUTRAL, 1.5)
            .dashed(&[6.0, 4.0])
            .with_interaction(ctx.state);
        RenderOutput::new(
            vec![
                Primitive::path(rect_path(rect).transformed(&ctx.placement.transform()), style),
                Primitive::label(ctx.placement.position, "?", 14.0, PaintStyle::fill(NEUTRAL)),
            ],
            ctx.placement.rect_region(rect),
        )
    }
}
