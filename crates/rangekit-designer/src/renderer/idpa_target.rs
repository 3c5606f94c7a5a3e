use super::{
    rect_path, ElementRenderer, HitRegion, PaintStyle, Primitive, RenderContext, RenderOutput,
    Rgba, BLACK, WHITE,
};
use crate::geometry::{Bounds, Point};
use crate::model::{IdpaTarget, TargetZone};

const THREAT_FILL: Rgba = Rgba::rgb(210, 180, 140);
const HARD_COVER_FILL: Rgba = Rgba::rgba(0, 0, 0, 217);
const HEAD_CENTER: Point = Point { x: 0.0, y: -28.0 };
const HEAD_RADIUS: f64 = 10.0;

fn upper_body() -> Bounds {
    Bounds::new(Point::new(-18.0, -18.0), Point::new(18.0, 14.0))
}

fn lower_body() -> Bounds {
    Bounds::new(Point::new(-18.0, 14.0), Point::new(18.0, 40.0))
}

impl ElementRenderer for IdpaTarget {
    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        let placement = ctx.placement;
        let transform = placement.transform();
        let fill = if self.is_threat { THREAT_FILL } else { WHITE };
        let style = PaintStyle::filled_stroke(fill, BLACK, 1.5).with_interaction(ctx.state);
        let head_center = placement.apply(HEAD_CENTER);

        let mut primitives = vec![
            Primitive::circle(head_center, HEAD_RADIUS, style.clone()),
            Primitive::path(rect_path(upper_body()).transformed(&transform), style.clone()),
            Primitive::path(rect_path(lower_body()).transformed(&transform), style),
        ];

        for zone in &self.hard_cover_zones {
            let cover = PaintStyle::fill(HARD_COVER_FILL);
            primitives.push(match zone {
                TargetZone::Head => Primitive::circle(head_center, HEAD_RADIUS, cover),
                TargetZone::Body => {
                    Primitive::path(rect_path(upper_body()).transformed(&transform), cover)
                }
                TargetZone::Lower => {
                    Primitive::path(rect_path(lower_body()).transformed(&transform), cover)
                }
            });
        }

        let number = if self.is_threat {
            format!("T{}", self.target_number)
        } else {
            format!("NT{}", self.target_number)
        };
        primitives.push(Primitive::label(
            placement.apply(Point::new(0.0, 52.0)),
            number,
            12.0,
            PaintStyle::fill(BLACK),
        ));

        let body = Bounds::new(upper_body().min, lower_body().max);
        RenderOutput::new(
            primitives,
            HitRegion::Union(vec![
                HitRegion::Circle {
                    center: head_center,
                    radius: HEAD_RADIUS,
                },
                placement.rect_region(body),
            ]),
        )
    }
}
