//! Orthogonal route computation.
//!
//! A route is the list of bend points between a line's from-anchor (the local
//! origin) and its to-anchor (the line's extent). Every pair of connector
//! directions is mapped onto one of four canonical cases by a [`Frame`], an axis
//! swap followed by optional axis flips:
//!
//! | Case          | Canonical pair | Pairs covered                      |
//! |---------------|----------------|------------------------------------|
//! | Opposite      | W→E            | WE, EW, NS, SN                     |
//! | Same          | E→E            | EE, WW, SS, NN                     |
//! | Perpendicular | S→E            | SE, SW, NE, NW, ES, EN, WS, WN     |
//! | Single        | E              | E, W, S, N (free end while dragging) |
//!
//! The canonical cases only ever see their own orientation, which keeps each of
//! them a handful of comparisons.

use crate::clearance::{gap_ahead, stub_clearance, DEFAULT_CLEARANCE, MIN_CLEARANCE};
use crate::direction::{Direction, RouteKind};
use crate::geometry::{Point, Rect, Vector};

/// Inputs for a single route computation, all in the line's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteContext {
    /// Vector from the from-anchor to the to-anchor
    pub extent: Vector,
    /// Bounding box of the from shape, if known
    pub from_box: Option<Rect>,
    /// Bounding box of the to shape, if attached
    pub to_box: Option<Rect>,
    /// Default stub length
    pub clearance: f32,
}

impl RouteContext {
    pub fn new(extent: Vector) -> Self {
        Self {
            extent,
            from_box: None,
            to_box: None,
            clearance: DEFAULT_CLEARANCE,
        }
    }

    pub fn with_from_box(mut self, rect: Rect) -> Self {
        self.from_box = Some(rect);
        self
    }

    pub fn with_to_box(mut self, rect: Rect) -> Self {
        self.to_box = Some(rect);
        self
    }

    /// Raised to [`MIN_CLEARANCE`] if smaller.
    pub fn with_clearance(mut self, clearance: f32) -> Self {
        self.clearance = clearance.max(MIN_CLEARANCE);
        self
    }
}

/// A computed route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Bend points between the origin and the extent, in the local frame
    pub broken_points: Vec<Point>,
    /// Direction of travel leaving the from connector
    pub arrow_begin: Direction,
    /// The to connector's direction, or for a free end the heading of the last segment
    pub arrow_end: Direction,
}

impl Route {
    /// Straight route with no bends.
    pub fn straight(arrow_begin: Direction, arrow_end: Direction) -> Self {
        Self {
            broken_points: Vec::new(),
            arrow_begin,
            arrow_end,
        }
    }

    /// Full local polyline: origin, bend points, then the to-anchor.
    pub fn polyline(&self, extent: Vector) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.broken_points.len() + 2);
        points.push(Point::ORIGIN);
        points.extend_from_slice(&self.broken_points);
        points.push(extent.as_point());
        points
    }

    /// Full polyline in world space.
    pub fn absolute_polyline(&self, origin: Point, extent: Vector) -> Vec<Point> {
        self.polyline(extent)
            .into_iter()
            .map(|p| Point::new(origin.x + p.x, origin.y + p.y))
            .collect()
    }

    /// Consecutive `(start, end)` pairs of the local polyline.
    pub fn segments(&self, extent: Vector) -> impl Iterator<Item = (Point, Point)> {
        let points = self.polyline(extent);
        (1..points.len()).map(move |i| (points[i - 1], points[i]))
    }
}

/// Compute the route for `kind` in `ctx`.
///
/// Total over every [`RouteKind`] and every sign combination of the extent.
/// A zero extent yields a straight two-point route.
pub fn route(kind: RouteKind, ctx: &RouteContext) -> Route {
    let from = kind.from_direction();

    if ctx.extent.is_zero() {
        let end = match kind {
            RouteKind::Pair(_, to) => to,
            RouteKind::Single(_) => from,
        };
        return Route::straight(from, end);
    }

    let (strategy, frame) = strategy_for(kind);
    let canonical = frame.canonical(ctx);

    let (points, heading) = match strategy {
        Strategy::Opposite => (opposite(&canonical), None),
        Strategy::Same => (same(&canonical), None),
        Strategy::Perpendicular => (perpendicular(&canonical), None),
        Strategy::Single => {
            let (points, heading) = single(&canonical);
            (points, Some(heading))
        }
    };

    let broken_points = points.into_iter().map(|p| frame.point_back(p)).collect::<Vec<_>>();
    let arrow_end = match (kind, heading) {
        (RouteKind::Pair(_, to), _) => to,
        (RouteKind::Single(_), Some(heading)) => frame.direction_back(heading),
        (RouteKind::Single(from), None) => from,
    };

    tracing::trace!(%kind, ?strategy, bends = broken_points.len(), "route computed");

    Route {
        broken_points,
        arrow_begin: from,
        arrow_end,
    }
}

/// Generate SVG path commands for an orthogonal polyline.
///
/// # Returns
/// SVG path command string (e.g., "M 0 0 L 50 0 L 50 80 L 100 80"), or an empty
/// string for fewer than two points.
pub fn generate_orthogonal_path(points: &[Point]) -> String {
    if points.len() < 2 {
        return String::new();
    }

    let mut path = format!("M {} {}", points[0].x, points[0].y);
    for p in &points[1..] {
        path.push_str(&format!(" L {} {}", p.x, p.y));
    }
    path
}

// ============================================================================
// Strategy table
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Opposite,
    Same,
    Perpendicular,
    Single,
}

/// Maps each routing case onto its canonical strategy.
fn strategy_for(kind: RouteKind) -> (Strategy, Frame) {
    use Direction::{East as E, North as N, South as S, West as W};

    const ID: Frame = Frame::new(false, false, false);
    const FX: Frame = Frame::new(false, true, false);
    const FY: Frame = Frame::new(false, false, true);
    const FXY: Frame = Frame::new(false, true, true);
    const SW: Frame = Frame::new(true, false, false);
    const SW_FX: Frame = Frame::new(true, true, false);
    const SW_FY: Frame = Frame::new(true, false, true);
    const SW_FXY: Frame = Frame::new(true, true, true);

    match kind {
        RouteKind::Pair(W, E) => (Strategy::Opposite, ID),
        RouteKind::Pair(E, W) => (Strategy::Opposite, FX),
        RouteKind::Pair(N, S) => (Strategy::Opposite, SW),
        RouteKind::Pair(S, N) => (Strategy::Opposite, SW_FX),

        RouteKind::Pair(E, E) => (Strategy::Same, ID),
        RouteKind::Pair(W, W) => (Strategy::Same, FX),
        RouteKind::Pair(S, S) => (Strategy::Same, SW),
        RouteKind::Pair(N, N) => (Strategy::Same, SW_FX),

        RouteKind::Pair(S, E) => (Strategy::Perpendicular, ID),
        RouteKind::Pair(S, W) => (Strategy::Perpendicular, FX),
        RouteKind::Pair(N, E) => (Strategy::Perpendicular, FY),
        RouteKind::Pair(N, W) => (Strategy::Perpendicular, FXY),
        RouteKind::Pair(E, S) => (Strategy::Perpendicular, SW),
        RouteKind::Pair(E, N) => (Strategy::Perpendicular, SW_FX),
        RouteKind::Pair(W, S) => (Strategy::Perpendicular, SW_FY),
        RouteKind::Pair(W, N) => (Strategy::Perpendicular, SW_FXY),

        RouteKind::Single(E) => (Strategy::Single, ID),
        RouteKind::Single(W) => (Strategy::Single, FX),
        RouteKind::Single(S) => (Strategy::Single, SW),
        RouteKind::Single(N) => (Strategy::Single, SW_FX),
    }
}

/// An element of the square's symmetry group: optional x/y swap, then optional
/// negation of each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    swap: bool,
    flip_x: bool,
    flip_y: bool,
}

/// Context after mapping into a canonical frame. Missing boxes have collapsed onto
/// their anchors.
#[derive(Debug, Clone, Copy)]
struct Canonical {
    w: f32,
    h: f32,
    from: Rect,
    to: Rect,
    clearance: f32,
}

impl Frame {
    const fn new(swap: bool, flip_x: bool, flip_y: bool) -> Self {
        Self { swap, flip_x, flip_y }
    }

    fn point(self, p: Point) -> Point {
        let (x, y) = if self.swap { (p.y, p.x) } else { (p.x, p.y) };
        Point::new(
            if self.flip_x { -x } else { x },
            if self.flip_y { -y } else { y },
        )
    }

    fn point_back(self, p: Point) -> Point {
        let x = if self.flip_x { -p.x } else { p.x };
        let y = if self.flip_y { -p.y } else { p.y };
        if self.swap {
            Point::new(y, x)
        } else {
            Point::new(x, y)
        }
    }

    fn rect(self, r: Rect) -> Rect {
        let a = self.point(Point::new(r.left(), r.top()));
        let b = self.point(Point::new(r.right(), r.bottom()));
        Rect::new(a.x.min(b.x), a.y.min(b.y), (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    fn direction_back(self, d: Direction) -> Direction {
        let u = self.point_back(d.unit().as_point());
        match (u.x.abs() >= u.y.abs(), u.x < 0.0, u.y < 0.0) {
            (true, true, _) => Direction::West,
            (true, false, _) => Direction::East,
            (false, _, true) => Direction::North,
            (false, _, false) => Direction::South,
        }
    }

    fn canonical(self, ctx: &RouteContext) -> Canonical {
        let end = self.point(ctx.extent.as_point());
        let from = ctx.from_box.unwrap_or_else(|| Rect::point(Point::ORIGIN));
        let to = ctx.to_box.unwrap_or_else(|| Rect::point(ctx.extent.as_point()));
        Canonical {
            w: end.x,
            h: end.y,
            from: self.rect(from),
            to: self.rect(to),
            clearance: ctx.clearance,
        }
    }
}

// ============================================================================
// Canonical strategies
// ============================================================================

/// W→E: the from end leaves westward, the to end is entered heading west.
fn opposite(ctx: &Canonical) -> Vec<Point> {
    let Canonical { w, h, from, to, clearance: c } = *ctx;

    if w < 0.0 {
        let x = w / 2.0;
        return vec![Point::new(x, 0.0), Point::new(x, h)];
    }

    // The to end sits behind the from end: leave both shapes and cross over.
    let gap_below = from.bottom() <= to.top();
    let gap_above = to.bottom() <= from.top();
    if gap_below || gap_above {
        let mid = if gap_below {
            (from.bottom() + to.top()) / 2.0
        } else {
            (to.bottom() + from.top()) / 2.0
        };
        let x1 = -stub_clearance(gap_ahead(Point::ORIGIN, Direction::West, to), c);
        let x2 = w + stub_clearance(gap_ahead(Point::new(w, h), Direction::East, from), c);
        return vec![
            Point::new(x1, 0.0),
            Point::new(x1, mid),
            Point::new(x2, mid),
            Point::new(x2, h),
        ];
    }

    // Vertical overlap: go around both shapes on the cheaper side.
    let x1 = from.left().min(to.left()) - c;
    let x2 = from.right().max(to.right()) + c;
    let over = from.top().min(to.top()) - c;
    let under = from.bottom().max(to.bottom()) + c;
    let detour = |y: f32| y.abs() + (h - y).abs();

    let y = if detour(over) < detour(under) {
        over
    } else if detour(under) < detour(over) {
        under
    } else if from.center().y <= to.center().y {
        over
    } else {
        under
    };
    tracing::trace!(y, "opposite ends overlap, detouring");

    vec![
        Point::new(x1, 0.0),
        Point::new(x1, y),
        Point::new(x2, y),
        Point::new(x2, h),
    ]
}

/// E→E: both ends leave eastward; meet past whichever reaches further.
///
/// When the run back to one end would pass through the other end's shape, each
/// end turns on its own stub and the connecting leg goes around both shapes.
fn same(ctx: &Canonical) -> Vec<Point> {
    let Canonical { w, h, from, to, clearance: c } = *ctx;

    let crosses_from = from.top() < h && h < from.bottom() && w < from.right();
    let crosses_to = to.top() < 0.0 && 0.0 < to.bottom() && 0.0 < to.right();
    if !crosses_from && !crosses_to {
        let x = 0f32.max(w).max(from.right()).max(to.right()) + c;
        return vec![Point::new(x, 0.0), Point::new(x, h)];
    }

    let x1 = if crosses_to {
        stub_clearance(gap_ahead(Point::ORIGIN, Direction::East, to), c)
    } else {
        0f32.max(from.right()) + c
    };
    let x2 = if crosses_from {
        w + stub_clearance(gap_ahead(Point::new(w, h), Direction::East, from), c)
    } else {
        w.max(to.right()) + c
    };

    // Both shapes straddle the leg's height; pass them on the shorter side.
    // Ties go over, which is the same choice from either end.
    let over = from.top().min(to.top()) - c;
    let under = from.bottom().max(to.bottom()) + c;
    let detour = |y: f32| y.abs() + (h - y).abs();
    let y = if detour(under) < detour(over) { under } else { over };
    tracing::trace!(y, crosses_from, crosses_to, "same-side ends blocked, detouring");

    vec![
        Point::new(x1, 0.0),
        Point::new(x1, y),
        Point::new(x2, y),
        Point::new(x2, h),
    ]
}

/// S→E: the from end leaves southward, the to end is entered heading west.
fn perpendicular(ctx: &Canonical) -> Vec<Point> {
    let Canonical { w, h, from, to, clearance: c } = *ctx;

    if w < 0.0 && h > 0.0 {
        return vec![Point::new(0.0, h)];
    }

    // Depth of the southward stub. When the run toward the to end would pass the
    // to shape, stop short of its top or drop below its bottom.
    let down = if w >= 0.0 {
        if to.top() > 0.0 {
            stub_clearance(Some(to.top()), c)
        } else {
            c.max(to.bottom() + c)
        }
    } else {
        c
    };

    // Reach of the to end's eastward stub, mirroring the above against the from shape.
    let out = if h <= 0.0 {
        let gap = from.left() - w;
        if gap > 0.0 {
            stub_clearance(Some(gap), c)
        } else {
            c.max(from.right() - w + c)
        }
    } else {
        c
    };

    let x = w + out;
    vec![Point::new(0.0, down), Point::new(x, down), Point::new(x, h)]
}

/// E with a free end. Returns the bends and the heading into the free point.
fn single(ctx: &Canonical) -> (Vec<Point>, Direction) {
    let Canonical { w, h, from, clearance: c, .. } = *ctx;

    if w > 0.0 {
        if w.abs() >= h.abs() {
            let x = w / 2.0;
            return (vec![Point::new(x, 0.0), Point::new(x, h)], Direction::East);
        }
        let heading = if h < 0.0 { Direction::North } else { Direction::South };
        return (vec![Point::new(w, 0.0)], heading);
    }

    // The free point is behind the exit side. Step out first, then come back
    // around the shape.
    let x = c;
    if h >= from.bottom() + c || h <= from.top() - c {
        return (vec![Point::new(x, 0.0), Point::new(x, h)], Direction::West);
    }

    let y = if h >= 0.0 { from.bottom() + c } else { from.top() - c };
    let heading = if h < y { Direction::North } else { Direction::South };
    (
        vec![Point::new(x, 0.0), Point::new(x, y), Point::new(w, y)],
        heading,
    )
}
