use lyon::math::Transform;

use super::{
    rect_path, rounded_rect_path, ElementRenderer, HitRegion, PaintStyle, Primitive,
    RenderContext, RenderOutput, Rgba, BLACK, HIGHLIGHT, WHITE,
};
use crate::geometry::{Bounds, Point};
use crate::model::{SteelShape, SteelTarget};

pub const PLATE_RADIUS: f64 = 20.0;
/// Mini-poppers are the popper silhouette at this scale.
pub const MINI_POPPER_SCALE: f64 = 0.7;

const STEEL_FILL: Rgba = Rgba::rgb(203, 213, 225);
const BADGE_FILL: Rgba = Rgba::rgb(220, 38, 38);
const BADGE_TEXT: &str = "MF";
const RING_GAP: f64 = 6.0;

/// Popper body (rounded top) and base, in local coordinates.
fn popper_parts(scale: f64) -> (Bounds, Bounds) {
    let body = Bounds::new(Point::new(-10.0, -30.0), Point::new(10.0, 15.0));
    let base = Bounds::new(Point::new(-15.0, 15.0), Point::new(15.0, 25.0));
    let scaled = |b: Bounds| Bounds::new(b.min * scale, b.max * scale);
    (scaled(body), scaled(base))
}

impl SteelTarget {
    /// Local extent of the silhouette, before placement.
    pub fn local_bounds(&self) -> Bounds {
        match self.shape {
            SteelShape::Plate => Bounds::centered(Point::ZERO, PLATE_RADIUS * 2.0, PLATE_RADIUS * 2.0),
            SteelShape::Popper => {
                let (body, base) = popper_parts(1.0);
                body.union(&base)
            }
            SteelShape::MiniPopper => {
                let (body, base) = popper_parts(MINI_POPPER_SCALE);
                body.union(&base)
            }
        }
    }
}

impl ElementRenderer for SteelTarget {
    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        let placement = ctx.placement;
        let transform: Transform = placement.transform();
        let style = PaintStyle::filled_stroke(STEEL_FILL, BLACK, 1.5).with_interaction(ctx.state);
        let mut primitives = Vec::new();

        let hit_region = match self.shape {
            SteelShape::Plate => {
                let center = placement.apply(Point::ZERO);
                primitives.push(Primitive::circle(center, PLATE_RADIUS, style));
                HitRegion::Circle {
                    center,
                    radius: PLATE_RADIUS,
                }
            }
            SteelShape::Popper | SteelShape::MiniPopper => {
                let scale = if self.shape == SteelShape::MiniPopper {
                    MINI_POPPER_SCALE
                } else {
                    1.0
                };
                let (body, base) = popper_parts(scale);
                primitives.push(Primitive::path(
                    rounded_rect_path(body, body.width() / 2.0).transformed(&transform),
                    style.clone(),
                ));
                primitives.push(Primitive::path(rect_path(base).transformed(&transform), style));
                HitRegion::Union(vec![placement.rect_region(body), placement.rect_region(base)])
            }
        };

        let local = self.local_bounds();

        if self.must_fall {
            let anchor = placement.apply(Point::new(0.0, local.min.y - 10.0));
            primitives.push(Primitive::circle(anchor, 8.0, PaintStyle::fill(BADGE_FILL)));
            let mut text = Primitive::label(anchor, BADGE_TEXT, 9.0, PaintStyle::fill(WHITE));
            if let Primitive::Text { bold, .. } = &mut text {
                *bold = true;
            }
            primitives.push(text);
        }

        if ctx.state.selected {
            let radius = local.min.length().max(local.max.length()) + RING_GAP;
            primitives.push(Primitive::circle(
                placement.apply(Point::ZERO),
                radius,
                PaintStyle::stroke(HIGHLIGHT, 1.5).dashed(&[4.0, 4.0]),
            ));
        }

        RenderOutput::new(primitives, hit_region)
    }
}
