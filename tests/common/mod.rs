//! Common test utilities for integration tests.

#![allow(dead_code)]

use slint_connector_router::{
    Direction, GeometryCache, Point, Rect, RouteContext, RouteKind, StoredConnector, Vector,
};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Route `tracing` output to the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Scene setup
// ============================================================================

/// The from shape used by the scene helpers
pub const SHAPE_A: Rect = Rect { x: 0.0, y: 0.0, width: 100.0, height: 60.0 };

/// Size of the to shape used by the scene helpers
pub const SHAPE_B_SIZE: (f32, f32) = (80.0, 50.0);

/// Connector ID for `direction` on `shape_id`: shape * 10 + side (N=1, S=2, E=3, W=4).
pub fn connector_id(shape_id: i32, direction: Direction) -> i32 {
    let side = match direction {
        Direction::North => 1,
        Direction::South => 2,
        Direction::East => 3,
        Direction::West => 4,
    };
    shape_id * 10 + side
}

/// Register one side-midpoint connector per direction on `shape_id`.
pub fn add_side_connectors(cache: &mut GeometryCache, shape_id: i32) {
    for direction in Direction::ALL {
        cache.insert_connector(
            connector_id(shape_id, direction),
            StoredConnector::new(shape_id, direction),
        );
    }
}

/// Shape 1 at [`SHAPE_A`], shape 2 with its top-left at `b`, both fully connectable.
pub fn two_shape_cache(b: Point) -> GeometryCache {
    let mut cache = GeometryCache::new();
    cache.update_shape_rect(1, SHAPE_A.x, SHAPE_A.y, SHAPE_A.width, SHAPE_A.height);
    cache.update_shape_rect(2, b.x, b.y, SHAPE_B_SIZE.0, SHAPE_B_SIZE.1);
    add_side_connectors(&mut cache, 1);
    add_side_connectors(&mut cache, 2);
    cache
}

/// Positions for shape 2 around shape 1: far, near and overlapping on both axes.
pub fn placements() -> Vec<Point> {
    let xs = [-300.0, -150.0, -40.0, 40.0, 150.0, 300.0];
    let ys = [-200.0, -90.0, -30.0, 30.0, 90.0, 200.0];
    xs.iter()
        .flat_map(|&x| ys.iter().map(move |&y| Point::new(x, y)))
        .collect()
}

/// Every attached pair plus every single-direction kind.
pub fn all_kinds() -> Vec<RouteKind> {
    let mut kinds = Vec::new();
    for from in Direction::ALL {
        for to in Direction::ALL {
            kinds.push(RouteKind::Pair(from, to));
        }
        kinds.push(RouteKind::Single(from));
    }
    kinds
}

// ============================================================================
// Polyline checks
// ============================================================================

/// Every segment is horizontal or vertical (zero-length segments allowed).
pub fn is_axis_aligned(points: &[Point]) -> bool {
    points.windows(2).all(|w| w[0].x == w[1].x || w[0].y == w[1].y)
}

/// Direction of the first segment with non-zero length.
pub fn first_heading(points: &[Point]) -> Option<Direction> {
    points
        .windows(2)
        .find_map(|w| Direction::of_step(w[0].to(w[1])))
}

/// Direction of the last segment with non-zero length.
pub fn last_heading(points: &[Point]) -> Option<Direction> {
    points
        .windows(2)
        .rev()
        .find_map(|w| Direction::of_step(w[0].to(w[1])))
}

/// Whether any segment passes through the open interior of `rect`.
///
/// Segments running along an edge or ending on it do not count.
pub fn crosses_interior(points: &[Point], rect: Rect) -> bool {
    points.windows(2).any(|w| {
        let (a, b) = (w[0], w[1]);
        if a.y == b.y {
            rect.top() < a.y && a.y < rect.bottom() && a.x.max(b.x) > rect.left() && a.x.min(b.x) < rect.right()
        } else {
            rect.left() < a.x && a.x < rect.right() && a.y.max(b.y) > rect.top() && a.y.min(b.y) < rect.bottom()
        }
    })
}

/// Whether two shapes share interior area.
pub fn shapes_overlap(a: Rect, b: Rect) -> bool {
    a.overlaps_horizontally(b) && a.overlaps_vertically(b)
}

// ============================================================================
// Mirroring
// ============================================================================

/// Mirror axis for comparing a route against its reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    /// x → -x
    Horizontal,
    /// y → -y
    Vertical,
}

impl Mirror {
    /// A mirror that changes `kind`; every kind has one.
    pub fn changing(kind: RouteKind) -> Mirror {
        if Mirror::Horizontal.kind(kind) != kind {
            Mirror::Horizontal
        } else {
            Mirror::Vertical
        }
    }

    pub fn point(self, p: Point) -> Point {
        match self {
            Mirror::Horizontal => Point::new(-p.x, p.y),
            Mirror::Vertical => Point::new(p.x, -p.y),
        }
    }

    pub fn vector(self, v: Vector) -> Vector {
        match self {
            Mirror::Horizontal => Vector::new(-v.dx, v.dy),
            Mirror::Vertical => Vector::new(v.dx, -v.dy),
        }
    }

    /// Exact for integer-valued coordinates.
    pub fn rect(self, r: Rect) -> Rect {
        let n = r.normalized();
        match self {
            Mirror::Horizontal => Rect::new(-n.x - n.width, n.y, n.width, n.height),
            Mirror::Vertical => Rect::new(n.x, -n.y - n.height, n.width, n.height),
        }
    }

    pub fn direction(self, d: Direction) -> Direction {
        match (self, d) {
            (Mirror::Horizontal, Direction::East | Direction::West) => d.reverse(),
            (Mirror::Vertical, Direction::North | Direction::South) => d.reverse(),
            _ => d,
        }
    }

    pub fn kind(self, kind: RouteKind) -> RouteKind {
        match kind {
            RouteKind::Pair(from, to) => RouteKind::Pair(self.direction(from), self.direction(to)),
            RouteKind::Single(from) => RouteKind::Single(self.direction(from)),
        }
    }

    pub fn context(self, ctx: &RouteContext) -> RouteContext {
        RouteContext {
            extent: self.vector(ctx.extent),
            from_box: ctx.from_box.map(|r| self.rect(r)),
            to_box: ctx.to_box.map(|r| self.rect(r)),
            clearance: ctx.clearance,
        }
    }
}
