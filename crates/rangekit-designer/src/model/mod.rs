//! Stage element model.
//!
//! Every placeable object is a [`StageElement`]: shared identity and anchor
//! fields plus an [`ElementKind`] carrying the variant-specific properties.
//! Matching on `ElementKind` is exhaustive everywhere, so a new variant is a
//! compile-checked change.
//!
//! Line-like variants (wall, fault line, movement arrow) keep their geometry
//! in absolute point lists. Their `position` is only a drag anchor; any change
//! to it is folded into the points by [`settle_anchor_drag`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::geometry::{centroid, rotate_point, Point};

mod cover;
mod fault_line;
mod idpa_target;
mod movement_arrow;
mod opaque;
mod start_position;
mod steel_target;
mod text;
mod vision_barrier;
mod wall;

pub use cover::Cover;
pub use fault_line::{FaultLine, LineStyle};
pub use idpa_target::{IdpaTarget, TargetZone};
pub use movement_arrow::MovementArrow;
pub use opaque::OpaqueElement;
pub use start_position::{StartPosition, StartVariant};
pub use steel_target::{SteelShape, SteelTarget};
pub use text::{FontWeight, TextLabel};
pub use vision_barrier::VisionBarrier;
pub use wall::{Wall, DEFAULT_WALL_THICKNESS};

/// Length of the default segment laid down for new line-like elements.
pub const DEFAULT_SEGMENT_LENGTH: f64 = 100.0;

/// Minimum number of points a fault line or movement arrow keeps.
pub const MIN_LINE_POINTS: usize = 2;

/// Stable element identifier, unique within a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element discriminant, as used by placement tools and the document `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    IdpaTarget,
    SteelTarget,
    HardCover,
    SoftCover,
    Wall,
    FaultLine,
    StartPosition,
    MovementArrow,
    VisionBarrier,
    Text,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        ElementType::IdpaTarget,
        ElementType::SteelTarget,
        ElementType::HardCover,
        ElementType::SoftCover,
        ElementType::Wall,
        ElementType::FaultLine,
        ElementType::StartPosition,
        ElementType::MovementArrow,
        ElementType::VisionBarrier,
        ElementType::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::IdpaTarget => "idpa-target",
            ElementType::SteelTarget => "steel-target",
            ElementType::HardCover => "hard-cover",
            ElementType::SoftCover => "soft-cover",
            ElementType::Wall => "wall",
            ElementType::FaultLine => "fault-line",
            ElementType::StartPosition => "start-position",
            ElementType::MovementArrow => "movement-arrow",
            ElementType::VisionBarrier => "vision-barrier",
            ElementType::Text => "text",
        }
    }

    /// Fault lines and movement arrows are drawn point by point.
    pub fn is_multi_point(self) -> bool {
        matches!(self, ElementType::FaultLine | ElementType::MovementArrow)
    }

    /// Geometry lives in an absolute point list rather than around `position`.
    pub fn is_line_like(self) -> bool {
        matches!(
            self,
            ElementType::Wall | ElementType::FaultLine | ElementType::MovementArrow
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown element type: {}", s))
    }
}

/// Variant-specific element payload, tagged by the document `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "kebab-case")]
pub enum ElementKind {
    IdpaTarget(IdpaTarget),
    SteelTarget(SteelTarget),
    HardCover(Cover),
    SoftCover(Cover),
    Wall(Wall),
    FaultLine(FaultLine),
    StartPosition(StartPosition),
    MovementArrow(MovementArrow),
    VisionBarrier(VisionBarrier),
    Text(TextLabel),
    /// An element of a type this editor does not know, kept verbatim.
    #[serde(skip)]
    Opaque(OpaqueElement),
}

impl ElementKind {
    /// Default properties for a freshly placed element anchored at `position`.
    pub fn with_defaults(element_type: ElementType, position: Point) -> Self {
        let segment_end = position + Point::new(DEFAULT_SEGMENT_LENGTH, 0.0);
        match element_type {
            ElementType::IdpaTarget => ElementKind::IdpaTarget(IdpaTarget::default()),
            ElementType::SteelTarget => ElementKind::SteelTarget(SteelTarget::default()),
            ElementType::HardCover => ElementKind::HardCover(Cover::default()),
            ElementType::SoftCover => ElementKind::SoftCover(Cover::default()),
            ElementType::Wall => ElementKind::Wall(Wall::new(position, segment_end)),
            ElementType::FaultLine => {
                ElementKind::FaultLine(FaultLine::new(vec![position, segment_end]))
            }
            ElementType::StartPosition => ElementKind::StartPosition(StartPosition::default()),
            ElementType::MovementArrow => {
                ElementKind::MovementArrow(MovementArrow::new(vec![position, segment_end]))
            }
            ElementType::VisionBarrier => ElementKind::VisionBarrier(VisionBarrier::default()),
            ElementType::Text => ElementKind::Text(TextLabel::default()),
        }
    }

    /// Builds a multi-point element from a committed point list.
    ///
    /// Returns `None` for anchored types or when fewer than two points are given.
    pub fn from_points(element_type: ElementType, points: Vec<Point>) -> Option<Self> {
        if points.len() < MIN_LINE_POINTS {
            return None;
        }
        match element_type {
            ElementType::FaultLine => Some(ElementKind::FaultLine(FaultLine::new(points))),
            ElementType::MovementArrow => {
                Some(ElementKind::MovementArrow(MovementArrow::new(points)))
            }
            _ => None,
        }
    }

    /// Known discriminant, or `None` for opaque elements.
    pub fn element_type(&self) -> Option<ElementType> {
        match self {
            ElementKind::IdpaTarget(_) => Some(ElementType::IdpaTarget),
            ElementKind::SteelTarget(_) => Some(ElementType::SteelTarget),
            ElementKind::HardCover(_) => Some(ElementType::HardCover),
            ElementKind::SoftCover(_) => Some(ElementType::SoftCover),
            ElementKind::Wall(_) => Some(ElementType::Wall),
            ElementKind::FaultLine(_) => Some(ElementType::FaultLine),
            ElementKind::StartPosition(_) => Some(ElementType::StartPosition),
            ElementKind::MovementArrow(_) => Some(ElementType::MovementArrow),
            ElementKind::VisionBarrier(_) => Some(ElementType::VisionBarrier),
            ElementKind::Text(_) => Some(ElementType::Text),
            ElementKind::Opaque(_) => None,
        }
    }

    /// Document `type` string, including unknown types kept opaquely.
    pub fn type_name(&self) -> &str {
        match self {
            ElementKind::Opaque(o) => &o.type_name,
            other => other.element_type().map(ElementType::as_str).unwrap_or_default(),
        }
    }

    pub fn is_line_like(&self) -> bool {
        self.element_type().is_some_and(ElementType::is_line_like)
    }

    /// Mutable access to the absolute points of a line-like variant, in order.
    pub fn line_points_mut(&mut self) -> Vec<&mut Point> {
        match self {
            ElementKind::Wall(w) => vec![&mut w.start_point, &mut w.end_point],
            ElementKind::FaultLine(f) => f.points.iter_mut().collect(),
            ElementKind::MovementArrow(a) => a.points.iter_mut().collect(),
            ElementKind::IdpaTarget(_)
            | ElementKind::SteelTarget(_)
            | ElementKind::HardCover(_)
            | ElementKind::SoftCover(_)
            | ElementKind::StartPosition(_)
            | ElementKind::VisionBarrier(_)
            | ElementKind::Text(_)
            | ElementKind::Opaque(_) => Vec::new(),
        }
    }

    /// Editable control points: wall endpoints or polyline vertices.
    pub fn control_points(&self) -> Vec<Point> {
        match self {
            ElementKind::Wall(w) => vec![w.start_point, w.end_point],
            ElementKind::FaultLine(f) => f.points.clone(),
            ElementKind::MovementArrow(a) => a.points.clone(),
            ElementKind::IdpaTarget(_)
            | ElementKind::SteelTarget(_)
            | ElementKind::HardCover(_)
            | ElementKind::SoftCover(_)
            | ElementKind::StartPosition(_)
            | ElementKind::VisionBarrier(_)
            | ElementKind::Text(_)
            | ElementKind::Opaque(_) => Vec::new(),
        }
    }

    fn point_list_mut(&mut self) -> Option<&mut Vec<Point>> {
        match self {
            ElementKind::FaultLine(f) => Some(&mut f.points),
            ElementKind::MovementArrow(a) => Some(&mut a.points),
            _ => None,
        }
    }

    /// Variant-level validation used on import.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ElementKind::IdpaTarget(t) => t.validate(),
            ElementKind::SteelTarget(_) => Ok(()),
            ElementKind::HardCover(c) | ElementKind::SoftCover(c) => c.validate(),
            ElementKind::Wall(w) => w.validate(),
            ElementKind::FaultLine(f) => f.validate(),
            ElementKind::StartPosition(_) => Ok(()),
            ElementKind::MovementArrow(a) => a.validate(),
            ElementKind::VisionBarrier(b) => b.validate(),
            ElementKind::Text(t) => t.validate(),
            ElementKind::Opaque(_) => Ok(()),
        }
    }
}

/// Folds an anchor move into a line-like element's points.
///
/// Whatever `position` moved by since `anchor_before` is applied to every
/// point, then `position` is restored to `anchor_before`. This is the only
/// place that translation is reconciled, for walls, fault lines and arrows
/// alike.
pub fn settle_anchor_drag<'a>(
    position: &mut Point,
    anchor_before: Point,
    points: impl IntoIterator<Item = &'a mut Point>,
) {
    let delta = *position - anchor_before;
    for p in points {
        *p += delta;
    }
    *position = anchor_before;
}

/// One placed object in a stage diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct StageElement {
    pub id: ElementId,
    pub position: Point,
    /// Degrees, clockwise. Always 0 for line-like variants.
    pub rotation: f64,
    /// UI flag mirrored from the selection set; never persisted.
    pub selected: bool,
    pub locked: bool,
    pub kind: ElementKind,
}

impl StageElement {
    /// Creates an element with a fresh id.
    pub fn new(kind: ElementKind, position: Point) -> Self {
        Self::with_id(ElementId::generate(), kind, position)
    }

    pub fn with_id(id: ElementId, kind: ElementKind, position: Point) -> Self {
        Self {
            id,
            position,
            rotation: 0.0,
            selected: false,
            locked: false,
            kind,
        }
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.kind.element_type()
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    pub fn is_line_like(&self) -> bool {
        self.kind.is_line_like()
    }

    /// Translates the element. Line-like variants move their points and keep
    /// their anchor.
    pub fn translate(&mut self, delta: Point) {
        let anchor_before = self.position;
        self.position += delta;
        if self.kind.is_line_like() {
            settle_anchor_drag(&mut self.position, anchor_before, self.kind.line_points_mut());
        }
    }

    /// Rotates by `degrees` clockwise.
    ///
    /// Anchored variants accumulate `rotation` in `[0, 360)`. Line-like
    /// variants rotate their points about the points' centroid instead.
    pub fn rotate_by(&mut self, degrees: f64) {
        if self.kind.is_line_like() {
            let points = self.kind.control_points();
            if let Some(center) = centroid(&points) {
                for p in self.kind.line_points_mut() {
                    *p = rotate_point(*p, center, degrees);
                }
            }
        } else {
            self.rotation = (self.rotation + degrees).rem_euclid(360.0);
        }
    }

    pub fn control_points(&self) -> Vec<Point> {
        self.kind.control_points()
    }

    /// Replaces a single control point in place.
    pub fn move_control_point(&mut self, index: usize, point: Point) -> bool {
        match self.kind.line_points_mut().into_iter().nth(index) {
            Some(p) => {
                *p = point;
                true
            }
            None => false,
        }
    }

    /// Inserts a vertex after `after_index` on a fault line or arrow.
    pub fn insert_control_point(&mut self, after_index: usize, point: Point) -> bool {
        match self.kind.point_list_mut() {
            Some(points) if after_index < points.len() => {
                points.insert(after_index + 1, point);
                true
            }
            _ => false,
        }
    }

    /// Removes a vertex from a fault line or arrow, refusing to go below
    /// [`MIN_LINE_POINTS`].
    pub fn remove_control_point(&mut self, index: usize) -> bool {
        match self.kind.point_list_mut() {
            Some(points) if index < points.len() && points.len() > MIN_LINE_POINTS => {
                points.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Checks the shared fields and the variant payload.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().is_empty() {
            return Err("id must not be empty".to_string());
        }
        if !self.position.is_finite() {
            return Err("position must be finite".to_string());
        }
        if !self.rotation.is_finite() {
            return Err("rotation must be finite".to_string());
        }
        self.kind.validate()
    }
}

pub(crate) fn validate_points(points: &[Point], what: &str) -> Result<(), String> {
    if points.len() < MIN_LINE_POINTS {
        return Err(format!(
            "{} needs at least {} points, got {}",
            what,
            MIN_LINE_POINTS,
            points.len()
        ));
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(format!("{} has a non-finite point", what));
    }
    Ok(())
}

pub(crate) fn validate_positive(value: f64, field: &str) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be positive, got {}", field, value))
    }
}
