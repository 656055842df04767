//! Geometry primitives shared by the router.
//!
//! Shapes report their bounds as `(x, y, width, height)` in world space. Width and
//! height may be negative when a shape was placed by dragging up or to the left of
//! its origin, so every edge query goes through [`Rect::normalized`].

use crate::direction::Direction;

/// A point in world space or in a line's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector from `self` to `other`.
    pub fn to(self, other: Point) -> Vector {
        Vector::new(other.x - self.x, other.y - self.y)
    }

    pub fn offset(self, v: Vector) -> Point {
        Point::new(self.x + v.dx, self.y + v.dy)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A sign-bearing displacement, e.g. a line's extent from its from-anchor to its
/// to-anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub dx: f32,
    pub dy: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    pub fn is_finite(self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    /// True when the horizontal component is at least as large as the vertical one.
    pub fn horizontal_dominant(self) -> bool {
        self.dx.abs() >= self.dy.abs()
    }

    pub fn negated(self) -> Vector {
        Vector::new(-self.dx, -self.dy)
    }

    /// The point this vector reaches when applied to the local origin.
    pub fn as_point(self) -> Point {
        Point::new(self.dx, self.dy)
    }
}

/// Axis-aligned rectangle. Width and height may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-sized rectangle sitting on `p`.
    pub fn point(p: Point) -> Self {
        Self::new(p.x, p.y, 0.0, 0.0)
    }

    /// Same box with non-negative width and height.
    pub fn normalized(self) -> Rect {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Rect { x, y, width, height }
    }

    pub fn left(self) -> f32 {
        self.normalized().x
    }

    pub fn right(self) -> f32 {
        let n = self.normalized();
        n.x + n.width
    }

    pub fn top(self) -> f32 {
        self.normalized().y
    }

    pub fn bottom(self) -> f32 {
        let n = self.normalized();
        n.y + n.height
    }

    pub fn center(self) -> Point {
        let n = self.normalized();
        Point::new(n.x + n.width / 2.0, n.y + n.height / 2.0)
    }

    /// Midpoint of the side facing `direction`.
    pub fn anchor(self, direction: Direction) -> Point {
        let n = self.normalized();
        let c = n.center();
        match direction {
            Direction::North => Point::new(c.x, n.y),
            Direction::South => Point::new(c.x, n.y + n.height),
            Direction::East => Point::new(n.x + n.width, c.y),
            Direction::West => Point::new(n.x, c.y),
        }
    }

    /// Box moved by `v`. Used to re-express a world box in a line's local frame.
    pub fn translated(self, v: Vector) -> Rect {
        Rect::new(self.x + v.dx, self.y + v.dy, self.width, self.height)
    }

    /// Strict interior test; points on an edge are outside.
    pub fn contains_strict(self, p: Point) -> bool {
        p.x > self.left() && p.x < self.right() && p.y > self.top() && p.y < self.bottom()
    }

    /// Open-interval overlap of the vertical extents.
    pub fn overlaps_vertically(self, other: Rect) -> bool {
        self.top() < other.bottom() && other.top() < self.bottom()
    }

    /// Open-interval overlap of the horizontal extents.
    pub fn overlaps_horizontally(self, other: Rect) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Trait for shape geometry needed by the router.
///
/// Implement this for your own shape type to keep it in a
/// [`GeometryCache`](crate::state::GeometryCache).
pub trait ShapeGeometry {
    fn id(&self) -> i32;
    fn rect(&self) -> Rect;
}

/// Simple implementation of ShapeGeometry
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleShape {
    pub id: i32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ShapeGeometry for SimpleShape {
    fn id(&self) -> i32 { self.id }
    fn rect(&self) -> Rect { Rect::new(self.x, self.y, self.width, self.height) }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Rect::normalized() - Negative Extents
    // ========================================================================

    #[test]
    fn test_normalized_positive_is_unchanged() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.normalized(), r);
    }

    #[test]
    fn test_normalized_negative_width_and_height() {
        let r = Rect::new(100.0, 50.0, -100.0, -50.0).normalized();
        assert_eq!(r, Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_edges_read_normalized_box() {
        let r = Rect::new(100.0, 80.0, -40.0, -20.0);
        assert_eq!(r.left(), 60.0);
        assert_eq!(r.right(), 100.0);
        assert_eq!(r.top(), 60.0);
        assert_eq!(r.bottom(), 80.0);
    }

    // ========================================================================
    // Rect::anchor() - Connector Anchors
    // ========================================================================

    #[test]
    fn test_anchor_on_each_side() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r.anchor(Direction::North), Point::new(50.0, 0.0));
        assert_eq!(r.anchor(Direction::South), Point::new(50.0, 50.0));
        assert_eq!(r.anchor(Direction::East), Point::new(100.0, 25.0));
        assert_eq!(r.anchor(Direction::West), Point::new(0.0, 25.0));
    }

    #[test]
    fn test_anchor_with_negative_extent() {
        // Same box as above, described from its bottom-right corner
        let r = Rect::new(100.0, 50.0, -100.0, -50.0);
        assert_eq!(r.anchor(Direction::West), Point::new(0.0, 25.0));
        assert_eq!(r.anchor(Direction::South), Point::new(50.0, 50.0));
    }

    // ========================================================================
    // Overlap and containment
    // ========================================================================

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let b = Rect::new(0.0, 50.0, 100.0, 50.0);
        assert!(!a.overlaps_vertically(b));
        assert!(a.overlaps_horizontally(b));
    }

    #[test]
    fn test_contains_strict_excludes_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_strict(Point::new(5.0, 5.0)));
        assert!(!r.contains_strict(Point::new(0.0, 5.0)));
        assert!(!r.contains_strict(Point::new(11.0, 5.0)));
    }

    // ========================================================================
    // Vector
    // ========================================================================

    #[test]
    fn test_vector_dominance_prefers_horizontal_on_tie() {
        assert!(Vector::new(50.0, -50.0).horizontal_dominant());
        assert!(!Vector::new(10.0, -50.0).horizontal_dominant());
    }

    #[test]
    fn test_point_to_and_offset_round_trip() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(-30.0, 5.0);
        assert_eq!(a.offset(a.to(b)), b);
    }
}
