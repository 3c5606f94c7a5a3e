use super::{
    rect_path, segments_path, ElementRenderer, Glow, PaintStyle, Primitive, RenderContext,
    RenderOutput, Rgba, BLACK, HIGHLIGHT, WHITE,
};
use crate::geometry::{clip_segment_to_rect, Bounds, Point};
use crate::model::{Cover, VisionBarrier};

/// Distance between diagonal hatch lines on hard cover.
pub const HATCH_SPACING: f64 = 20.0;
/// Pitch of the soft-cover dot grid.
pub const DOT_SPACING: f64 = 15.0;
/// Edge length of one soft-cover dot.
pub const DOT_SIZE: f64 = 3.0;

const HATCH_COLOR: Rgba = Rgba::rgb(90, 90, 90);
const DOT_COLOR: Rgba = Rgba::rgb(120, 120, 120);
const BARRIER_FILL: Rgba = Rgba::rgb(75, 85, 99);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverMaterial {
    Hard,
    Soft,
}

/// A cover rectangle together with its material, which picks the fill and
/// overlay pattern.
#[derive(Debug, Clone, Copy)]
pub struct CoverView<'a> {
    pub cover: &'a Cover,
    pub material: CoverMaterial,
}

impl<'a> CoverView<'a> {
    pub fn new(cover: &'a Cover, material: CoverMaterial) -> Self {
        Self { cover, material }
    }
}

fn local_rect(width: f64, height: f64) -> Bounds {
    Bounds::centered(Point::ZERO, width, height)
}

/// Diagonal lines every [`HATCH_SPACING`] across `width + height`, clipped to the rect.
pub(crate) fn hatch_segments(rect: Bounds) -> Vec<(Point, Point)> {
    let (w, h) = (rect.width(), rect.height());
    let mut segments = Vec::new();
    let mut offset = 0.0;
    while offset <= w + h {
        let a = Point::new(rect.min.x + offset, rect.min.y);
        let b = Point::new(rect.min.x + offset - h, rect.min.y + h);
        if let Some((ca, cb)) = clip_segment_to_rect(a, b, &rect) {
            if ca != cb {
                segments.push((ca, cb));
            }
        }
        offset += HATCH_SPACING;
    }
    segments
}

/// Top-left corners of the soft-cover dots that fit inside the rect.
pub(crate) fn dot_origins(rect: Bounds) -> Vec<Point> {
    let offset = DOT_SPACING / 2.0;
    let mut dots = Vec::new();
    let mut y = offset;
    while y + DOT_SIZE <= rect.height() {
        let mut x = offset;
        while x + DOT_SIZE <= rect.width() {
            dots.push(Point::new(rect.min.x + x, rect.min.y + y));
            x += DOT_SPACING;
        }
        y += DOT_SPACING;
    }
    dots
}

impl ElementRenderer for CoverView<'_> {
    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        let rect = local_rect(self.cover.width, self.cover.height);
        let transform = ctx.placement.transform();
        let fill = match self.material {
            CoverMaterial::Hard => BLACK,
            CoverMaterial::Soft => WHITE,
        };

        let mut body = PaintStyle::filled_stroke(fill, BLACK, 2.0).with_interaction(ctx.state);
        if ctx.state.selected {
            body.glow = Some(Glow {
                color: HIGHLIGHT,
                radius: 8.0,
            });
        }

        let mut primitives = vec![Primitive::path(rect_path(rect).transformed(&transform), body)];

        match self.material {
            CoverMaterial::Hard => {
                let hatch = segments_path(&hatch_segments(rect));
                primitives.push(Primitive::path(
                    hatch.transformed(&transform),
                    PaintStyle::stroke(HATCH_COLOR, 1.0),
                ));
            }
            CoverMaterial::Soft => {
                for origin in dot_origins(rect) {
                    let dot = Bounds::new(origin, origin + Point::new(DOT_SIZE, DOT_SIZE));
                    primitives.push(Primitive::path(
                        rect_path(dot).transformed(&transform),
                        PaintStyle::fill(DOT_COLOR),
                    ));
                }
            }
        }

        RenderOutput::new(primitives, ctx.placement.rect_region(rect))
    }
}

impl ElementRenderer for VisionBarrier {
    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        let rect = local_rect(self.width, self.height);
        let style = PaintStyle::filled_stroke(BARRIER_FILL, BLACK, 1.5).with_interaction(ctx.state);
        let path = rect_path(rect).transformed(&ctx.placement.transform());
        RenderOutput::new(
            vec![Primitive::path(path, style)],
            ctx.placement.rect_region(rect),
        )
    }
}
