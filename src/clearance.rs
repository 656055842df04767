//! Stub clearance: how far a path runs straight out of a shape before turning.

use crate::direction::Direction;
use crate::geometry::{Point, Rect};

/// Default straight-out distance, in logical units.
pub const DEFAULT_CLEARANCE: f32 = 20.0;

/// Smallest clearance a route is computed with. Without a stub, a path would turn
/// on the shape's edge and run along it.
pub const MIN_CLEARANCE: f32 = 1.0;

/// Length of the stub a path travels before its first turn.
///
/// `gap` is the free distance between the stub's anchor and the opposing shape
/// along the stub, or `None` when nothing lies ahead. A gap narrower than two
/// clearances is split in half so the stub never reaches the opposing shape.
/// Touching or overlapping shapes (`gap <= 0`) leave no room to split, so the stub
/// only has to clear its own shape and keeps the default.
pub fn stub_clearance(gap: Option<f32>, default: f32) -> f32 {
    match gap {
        Some(gap) if gap > 0.0 && gap < 2.0 * default => gap / 2.0,
        _ => default,
    }
}

/// Distance from `anchor`, travelling `direction`, to the facing edge of `opposing`.
///
/// Returns `None` unless `opposing` sits in the stub's lane (straddles the anchor on
/// the perpendicular axis) and is not entirely behind the anchor. A non-positive
/// result means the anchor already sits level with or inside the opposing box.
pub fn gap_ahead(anchor: Point, direction: Direction, opposing: Rect) -> Option<f32> {
    let (in_lane, near, far) = match direction {
        Direction::East => (
            opposing.top() < anchor.y && anchor.y < opposing.bottom(),
            opposing.left() - anchor.x,
            opposing.right() - anchor.x,
        ),
        Direction::West => (
            opposing.top() < anchor.y && anchor.y < opposing.bottom(),
            anchor.x - opposing.right(),
            anchor.x - opposing.left(),
        ),
        Direction::South => (
            opposing.left() < anchor.x && anchor.x < opposing.right(),
            opposing.top() - anchor.y,
            opposing.bottom() - anchor.y,
        ),
        Direction::North => (
            opposing.left() < anchor.x && anchor.x < opposing.right(),
            anchor.y - opposing.bottom(),
            anchor.y - opposing.top(),
        ),
    };

    (in_lane && far > 0.0).then_some(near)
}
