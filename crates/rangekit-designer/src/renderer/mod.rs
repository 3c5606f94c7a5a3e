//! Element renderers.
//!
//! Translates element model state plus interaction state into drawable
//! primitives and a hit region. Renderers are pure: everything that affects
//! the output (selection, hover, drag) is passed in, nothing is cached.
//!
//! Shapes are built in local coordinates and then placed with a
//! `lyon::math::Transform` (rotation, then translation to the anchor).
//! Line-like variants are already in absolute coordinates and skip placement.

use lyon::math::{vector, Angle, Transform};
use lyon::path::Path;

use crate::geometry::{
    clip_segment_to_rect, distance, distance_to_segment, point_in_polygon, point_on_segment,
    rotate_point, Bounds, Point,
};
use crate::model::{ElementKind, StageElement};
use rangekit_core::constants::DEFAULT_HANDLE_RADIUS;

mod cover;
mod fault_line;
mod idpa_target;
mod markers;
mod movement_arrow;
mod steel_target;
mod wall;

pub use cover::{CoverMaterial, CoverView, HATCH_SPACING, DOT_SIZE, DOT_SPACING};
pub use fault_line::FAULT_LINE_DASH;
pub use steel_target::{MINI_POPPER_SCALE, PLATE_RADIUS};
pub use wall::GRAIN_SPACING;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
pub const HIGHLIGHT: Rgba = Rgba::rgb(59, 130, 246);
pub const HOVER: Rgba = Rgba::rgb(147, 197, 253);
pub const GRID: Rgba = Rgba::rgba(148, 163, 184, 96);
pub const NEUTRAL: Rgba = Rgba::rgb(107, 114, 128);

/// Soft halo drawn behind a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaintStyle {
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
    pub stroke_width: f64,
    /// Dash pattern (on, off, ...); empty means solid.
    pub dash: Vec<f64>,
    pub opacity: f64,
    pub glow: Option<Glow>,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            dash: Vec::new(),
            opacity: 1.0,
            glow: None,
        }
    }
}

impl PaintStyle {
    pub fn fill(color: Rgba) -> Self {
        Self {
            fill: Some(color),
            ..Default::default()
        }
    }

    pub fn stroke(color: Rgba, width: f64) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Default::default()
        }
    }

    pub fn filled_stroke(fill: Rgba, stroke: Rgba, width: f64) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            stroke_width: width,
            ..Default::default()
        }
    }

    pub fn dashed(mut self, pattern: &[f64]) -> Self {
        self.dash = pattern.to_vec();
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Applies the common selected / hovered / dragging outline treatment.
    pub fn with_interaction(mut self, state: InteractionState) -> Self {
        if state.selected {
            self.stroke = Some(HIGHLIGHT);
            self.stroke_width = self.stroke_width.max(2.0) + 1.0;
        } else if state.hovered {
            self.stroke = Some(HOVER);
        }
        if state.dragging {
            self.opacity *= 0.7;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    TopLeft,
    Center,
}

/// A single drawable item in diagram space.
#[derive(Debug, Clone)]
pub enum Primitive {
    Path {
        path: Path,
        style: PaintStyle,
    },
    Circle {
        center: Point,
        radius: f64,
        style: PaintStyle,
    },
    Text {
        anchor: Point,
        align: TextAlign,
        text: String,
        font_size: f64,
        bold: bool,
        /// Degrees, clockwise about `anchor`.
        rotation: f64,
        style: PaintStyle,
    },
}

impl Primitive {
    pub fn path(path: Path, style: PaintStyle) -> Self {
        Primitive::Path { path, style }
    }

    pub fn circle(center: Point, radius: f64, style: PaintStyle) -> Self {
        Primitive::Circle {
            center,
            radius,
            style,
        }
    }

    pub fn label(anchor: Point, text: impl Into<String>, font_size: f64, style: PaintStyle) -> Self {
        Primitive::Text {
            anchor,
            align: TextAlign::Center,
            text: text.into(),
            font_size,
            bold: false,
            rotation: 0.0,
            style,
        }
    }

    pub fn style(&self) -> &PaintStyle {
        match self {
            Primitive::Path { style, .. }
            | Primitive::Circle { style, .. }
            | Primitive::Text { style, .. } => style,
        }
    }

    /// Geometric extent; text primitives report only their anchor.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Primitive::Path { path, .. } => {
                if path.iter().next().is_none() {
                    return None;
                }
                let bb = lyon::algorithms::aabb::bounding_box(path.iter());
                Some(Bounds::new(
                    Point::new(bb.min.x as f64, bb.min.y as f64),
                    Point::new(bb.max.x as f64, bb.max.y as f64),
                ))
            }
            Primitive::Circle { center, radius, .. } => {
                Some(Bounds::centered(*center, radius * 2.0, radius * 2.0))
            }
            Primitive::Text { anchor, .. } => Some(Bounds::new(*anchor, *anchor)),
        }
    }

    /// True when every coordinate this primitive carries is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Primitive::Path { path, .. } => path.iter().all(|event| {
                let (from, to) = (event.from(), event.to());
                from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()
            }),
            Primitive::Circle { center, radius, .. } => center.is_finite() && radius.is_finite(),
            Primitive::Text {
                anchor, rotation, ..
            } => anchor.is_finite() && rotation.is_finite(),
        }
    }
}

/// Area of an element that pointer events are tested against.
#[derive(Debug, Clone, PartialEq)]
pub enum HitRegion {
    Rect(Bounds),
    Circle { center: Point, radius: f64 },
    Polygon(Vec<Point>),
    /// Stroke of the given width along a point list.
    Polyline { points: Vec<Point>, width: f64 },
    Union(Vec<HitRegion>),
}

impl HitRegion {
    pub fn empty() -> Self {
        HitRegion::Union(Vec::new())
    }

    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        match self {
            HitRegion::Rect(b) => b.expand(tolerance).contains(p),
            HitRegion::Circle { center, radius } => distance(*center, p) <= radius + tolerance,
            HitRegion::Polygon(points) => {
                point_in_polygon(p, points)
                    || (tolerance > 0.0 && polygon_edge_near(p, points, tolerance))
            }
            HitRegion::Polyline { points, width } => {
                let reach = width / 2.0 + tolerance;
                match points.as_slice() {
                    [] => false,
                    [only] => distance(*only, p) <= reach,
                    _ => points
                        .windows(2)
                        .any(|w| point_on_segment(p, w[0], w[1], reach)),
                }
            }
            HitRegion::Union(parts) => parts.iter().any(|r| r.contains(p, tolerance)),
        }
    }

    /// Whether any part of the region overlaps `rect` (edges touching count).
    pub fn intersects_rect(&self, rect: &Bounds) -> bool {
        match self {
            HitRegion::Rect(b) => b.intersects(rect),
            HitRegion::Circle { center, radius } => distance_to_rect(*center, rect) <= *radius,
            HitRegion::Polygon(points) => match points.as_slice() {
                [] => false,
                [only] => rect.contains(*only),
                _ => {
                    let n = points.len();
                    (0..n).any(|i| {
                        clip_segment_to_rect(points[i], points[(i + 1) % n], rect).is_some()
                    }) || point_in_polygon(rect.min, points)
                }
            },
            HitRegion::Polyline { points, width } => {
                let reach = width / 2.0;
                match points.as_slice() {
                    [] => false,
                    [only] => distance_to_rect(*only, rect) <= reach,
                    _ => points
                        .windows(2)
                        .any(|w| segment_to_rect_distance(w[0], w[1], rect) <= reach),
                }
            }
            HitRegion::Union(parts) => parts.iter().any(|r| r.intersects_rect(rect)),
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            HitRegion::Rect(b) => Some(*b),
            HitRegion::Circle { center, radius } => {
                Some(Bounds::centered(*center, radius * 2.0, radius * 2.0))
            }
            HitRegion::Polygon(points) => Bounds::from_points(points),
            HitRegion::Polyline { points, width } => {
                Bounds::from_points(points).map(|b| b.expand(width / 2.0))
            }
            HitRegion::Union(parts) => parts
                .iter()
                .filter_map(HitRegion::bounds)
                .reduce(|a, b| a.union(&b)),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            HitRegion::Rect(b) => b.min.is_finite() && b.max.is_finite(),
            HitRegion::Circle { center, radius } => center.is_finite() && radius.is_finite(),
            HitRegion::Polygon(points) => points.iter().all(Point::is_finite),
            HitRegion::Polyline { points, width } => {
                width.is_finite() && points.iter().all(Point::is_finite)
            }
            HitRegion::Union(parts) => parts.iter().all(HitRegion::is_finite),
        }
    }
}

fn distance_to_rect(p: Point, rect: &Bounds) -> f64 {
    let nearest = Point::new(
        p.x.clamp(rect.min.x, rect.max.x),
        p.y.clamp(rect.min.y, rect.max.y),
    );
    distance(p, nearest)
}

/// Zero when the segment touches the rectangle. Otherwise the closest pair is
/// a segment endpoint against the rectangle or a rectangle corner against the
/// segment.
fn segment_to_rect_distance(a: Point, b: Point, rect: &Bounds) -> f64 {
    if clip_segment_to_rect(a, b, rect).is_some() {
        return 0.0;
    }
    rect.corners()
        .iter()
        .map(|c| distance_to_segment(*c, a, b))
        .fold(distance_to_rect(a, rect).min(distance_to_rect(b, rect)), f64::min)
}

fn polygon_edge_near(p: Point, points: &[Point], tolerance: f64) -> bool {
    if points.is_empty() {
        return false;
    }
    let n = points.len();
    (0..n).any(|i| point_on_segment(p, points[i], points[(i + 1) % n], tolerance))
}

/// Draggable control point of a selected line-like element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlHandle {
    /// Index into the element's control points.
    pub index: usize,
    pub center: Point,
    pub radius: f64,
}

impl ControlHandle {
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        distance(self.center, p) <= self.radius + tolerance
    }
}

/// Transient visual state supplied by the editor on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub selected: bool,
    pub hovered: bool,
    pub dragging: bool,
}

#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub primitives: Vec<Primitive>,
    pub hit_region: HitRegion,
    pub handles: Vec<ControlHandle>,
}

impl RenderOutput {
    pub fn new(primitives: Vec<Primitive>, hit_region: HitRegion) -> Self {
        Self {
            primitives,
            hit_region,
            handles: Vec::new(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.primitives.iter().all(Primitive::is_finite)
            && self.hit_region.is_finite()
            && self
                .handles
                .iter()
                .all(|h| h.center.is_finite() && h.radius.is_finite())
    }
}

/// Where an anchored element sits: its anchor and clockwise rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point,
    pub rotation: f64,
}

impl Placement {
    pub fn of(element: &StageElement) -> Self {
        Self {
            position: element.position,
            rotation: element.rotation,
        }
    }

    /// Local-to-diagram transform: rotate about the local origin, then move
    /// to the anchor.
    pub fn transform(&self) -> Transform {
        let mut transform = Transform::identity();
        if self.rotation.abs() > 1e-6 {
            transform = transform.then_rotate(Angle::radians(self.rotation.to_radians() as f32));
        }
        transform.then_translate(vector(self.position.x as f32, self.position.y as f32))
    }

    /// Maps a local point into diagram space.
    pub fn apply(&self, local: Point) -> Point {
        rotate_point(local, Point::ZERO, self.rotation) + self.position
    }

    pub fn apply_all(&self, local: &[Point]) -> Vec<Point> {
        local.iter().map(|p| self.apply(*p)).collect()
    }

    /// Hit polygon for a local axis-aligned rectangle.
    pub fn rect_region(&self, local: Bounds) -> HitRegion {
        HitRegion::Polygon(self.apply_all(&local.corners()))
    }
}

/// Inputs shared by every renderer call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    pub placement: Placement,
    pub state: InteractionState,
    pub handle_radius: f64,
}

impl RenderContext {
    /// One handle per control point, only while selected.
    pub fn handles_for(&self, points: &[Point]) -> Vec<ControlHandle> {
        if !self.state.selected {
            return Vec::new();
        }
        points
            .iter()
            .enumerate()
            .map(|(index, p)| ControlHandle {
                index,
                center: *p,
                radius: self.handle_radius,
            })
            .collect()
    }

    pub fn handle_primitives(&self, handles: &[ControlHandle]) -> Vec<Primitive> {
        handles
            .iter()
            .map(|h| {
                Primitive::circle(h.center, h.radius, PaintStyle::filled_stroke(WHITE, HIGHLIGHT, 2.0))
            })
            .collect()
    }
}

/// Per-variant rendering contract.
pub trait ElementRenderer {
    fn render(&self, ctx: &RenderContext) -> RenderOutput;
}

/// Renders an element with the default handle radius.
pub fn render(element: &StageElement, state: InteractionState) -> RenderOutput {
    render_with(element, state, DEFAULT_HANDLE_RADIUS)
}

pub fn render_with(element: &StageElement, state: InteractionState, handle_radius: f64) -> RenderOutput {
    let ctx = RenderContext {
        placement: Placement::of(element),
        state,
        handle_radius,
    };
    match &element.kind {
        ElementKind::IdpaTarget(t) => t.render(&ctx),
        ElementKind::SteelTarget(t) => t.render(&ctx),
        ElementKind::HardCover(c) => CoverView::new(c, CoverMaterial::Hard).render(&ctx),
        ElementKind::SoftCover(c) => CoverView::new(c, CoverMaterial::Soft).render(&ctx),
        ElementKind::Wall(w) => w.render(&ctx),
        ElementKind::FaultLine(f) => f.render(&ctx),
        ElementKind::StartPosition(s) => s.render(&ctx),
        ElementKind::MovementArrow(a) => a.render(&ctx),
        ElementKind::VisionBarrier(b) => b.render(&ctx),
        ElementKind::Text(t) => t.render(&ctx),
        ElementKind::Opaque(o) => o.render(&ctx),
    }
}

/// Hit-region bounds of an element in its resting state.
pub fn element_bounds(element: &StageElement) -> Option<Bounds> {
    render(element, InteractionState::default()).hit_region.bounds()
}

/// Returns the element translated by `delta`. Locked elements come back unchanged.
pub fn on_drag(element: &StageElement, delta: Point) -> StageElement {
    let mut updated = element.clone();
    if !element.locked {
        updated.translate(delta);
    }
    updated
}

/// Returns the element with control point `index` replaced by `point`.
///
/// Only that point moves; the rest of the shape is untouched. Locked
/// elements and out-of-range indices come back unchanged.
pub fn on_handle_drag(element: &StageElement, index: usize, point: Point) -> StageElement {
    let mut updated = element.clone();
    if !element.locked {
        updated.move_control_point(index, point);
    }
    updated
}

pub(crate) fn rect_path(local: Bounds) -> Path {
    let mut builder = Path::builder();
    builder.add_rectangle(
        &lyon::math::Box2D::new(local.min.to_lyon(), local.max.to_lyon()),
        lyon::path::Winding::Positive,
    );
    builder.build()
}

pub(crate) fn rounded_rect_path(local: Bounds, radius: f64) -> Path {
    let mut builder = Path::builder();
    builder.add_rounded_rectangle(
        &lyon::math::Box2D::new(local.min.to_lyon(), local.max.to_lyon()),
        &lyon::path::builder::BorderRadii::new(radius as f32),
        lyon::path::Winding::Positive,
    );
    builder.build()
}

/// Path through `points`; an empty list gives an empty path.
pub(crate) fn polyline_path(points: &[Point], closed: bool) -> Path {
    let mut builder = Path::builder();
    if let Some((first, rest)) = points.split_first() {
        builder.begin(first.to_lyon());
        for p in rest {
            builder.line_to(p.to_lyon());
        }
        builder.end(closed);
    }
    builder.build()
}

/// Independent line segments collected into one path.
pub(crate) fn segments_path(segments: &[(Point, Point)]) -> Path {
    let mut builder = Path::builder();
    for (a, b) in segments {
        builder.begin(a.to_lyon());
        builder.line_to(b.to_lyon());
        builder.end(false);
    }
    builder.build()
}
