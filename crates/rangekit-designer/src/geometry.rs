//! Point and vector math shared by every element type.
//!
//! All functions are total: degenerate input (zero-length vectors and
//! segments, empty point lists) yields a defined, finite result instead of
//! `NaN`. A zero-length direction is treated as "no direction" and maps to
//! the zero vector.

use rangekit_core::constants::GEOMETRY_EPSILON;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A point (or vector) in diagram space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(*self, *other)
    }

    /// Length of the point interpreted as a vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub(crate) fn to_lyon(self) -> lyon::math::Point {
        lyon::math::point(self.x as f32, self.y as f32)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).length()
}

/// Unit vector in the direction of `v`; the zero vector for zero-length input.
pub fn normalize(v: Point) -> Point {
    let len = v.length();
    if len < GEOMETRY_EPSILON {
        Point::ZERO
    } else {
        v * (1.0 / len)
    }
}

/// Rotates a vector by 90 degrees (counter-clockwise in y-up terms).
pub fn rotate90(v: Point) -> Point {
    Point::new(-v.y, v.x)
}

/// Offset vector perpendicular to `v` with length `width / 2`.
///
/// Used to build the outline of thick segments such as walls. A zero-length
/// direction yields the zero vector.
pub fn perpendicular(v: Point, width: f64) -> Point {
    rotate90(normalize(v)) * (width / 2.0)
}

/// Rotates `p` about `center` by `degrees`, clockwise on a y-down screen.
pub fn rotate_point(p: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = p - center;
    Point::new(
        center.x + d.x * cos - d.y * sin,
        center.y + d.x * sin + d.y * cos,
    )
}

/// Direction of `b - a` in degrees; zero when the points coincide.
pub fn angle_degrees(a: Point, b: Point) -> f64 {
    let d = b - a;
    if d.length() < GEOMETRY_EPSILON {
        0.0
    } else {
        d.y.atan2(d.x).to_degrees()
    }
}

pub fn segment_length(a: Point, b: Point) -> f64 {
    distance(a, b)
}

/// Closest point to `p` on the segment `a..b`.
pub fn project_onto_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq < GEOMETRY_EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    distance(p, project_onto_segment(p, a, b))
}

/// True when `p` lies within `tolerance` of the segment `a..b`.
///
/// A zero-length segment degrades to a distance test against `a`.
pub fn point_on_segment(p: Point, a: Point, b: Point, tolerance: f64) -> bool {
    distance_to_segment(p, a, b) <= tolerance
}

fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

fn within_box(p: Point, a: Point, b: Point) -> bool {
    p.x >= a.x.min(b.x) - GEOMETRY_EPSILON
        && p.x <= a.x.max(b.x) + GEOMETRY_EPSILON
        && p.y >= a.y.min(b.y) - GEOMETRY_EPSILON
        && p.y <= a.y.max(b.y) + GEOMETRY_EPSILON
}

/// True when segments `a1..a2` and `b1..b2` share at least one point.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1.abs() < GEOMETRY_EPSILON && within_box(a1, b1, b2))
        || (d2.abs() < GEOMETRY_EPSILON && within_box(a2, b1, b2))
        || (d3.abs() < GEOMETRY_EPSILON && within_box(b1, a1, a2))
        || (d4.abs() < GEOMETRY_EPSILON && within_box(b2, a1, a2))
}

/// Even-odd point-in-polygon test. Polygons with fewer than 3 vertices
/// contain nothing.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = pj.x + (p.y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Point halfway along a polyline, measured by arc length.
///
/// Returns `None` for an empty list; a single point (or a polyline of zero
/// total length) yields its first point.
pub fn polyline_midpoint(points: &[Point]) -> Option<Point> {
    let first = *points.first()?;
    let half = polyline_length(points) / 2.0;
    if half < GEOMETRY_EPSILON {
        return Some(first);
    }
    let mut walked = 0.0;
    for w in points.windows(2) {
        let seg = distance(w[0], w[1]);
        if walked + seg >= half && seg > GEOMETRY_EPSILON {
            let t = (half - walked) / seg;
            return Some(w[0] + (w[1] - w[0]) * t);
        }
        walked += seg;
    }
    points.last().copied()
}

/// Arithmetic mean of a point list; `None` when empty.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Point::ZERO, |acc, p| acc + *p);
    Some(sum * (1.0 / points.len() as f64))
}

/// Clips the segment `a..b` to an axis-aligned rectangle (Liang-Barsky).
///
/// Returns `None` when the segment lies entirely outside.
pub fn clip_segment_to_rect(a: Point, b: Point, rect: &Bounds) -> Option<(Point, Point)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let checks = [
        (-d.x, a.x - rect.min.x),
        (d.x, rect.max.x - a.x),
        (-d.y, a.y - rect.min.y),
        (d.y, rect.max.y - a.y),
    ];

    for (p, q) in checks {
        if p.abs() < GEOMETRY_EPSILON {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((a + d * t0, a + d * t1))
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min: Point::new(min.x.min(max.x), min.y.min(max.y)),
            max: Point::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Box of the given size centred on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        let half = Point::new(width / 2.0, height / 2.0);
        Self::new(center - half, center + half)
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| b.include(*p)))
    }

    pub fn include(self, p: Point) -> Self {
        Self {
            min: Point::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        self.include(other.min).include(other.max)
    }

    pub fn expand(&self, margin: f64) -> Bounds {
        let m = Point::new(margin, margin);
        Bounds {
            min: self.min - m,
            max: self.max + m,
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Overlap test; touching edges count as intersecting.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }
}
