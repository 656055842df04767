//! Placement of a new downstream shape when a dragged line is released on empty
//! canvas.

use crate::direction::Direction;
use crate::geometry::{Point, Rect, Vector};

/// Where to put the new shape, and which of its connectors receives the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rect: Rect,
    pub connector: Direction,
}

/// Position a `width` x `height` shape at the released end of a line.
///
/// The dominant axis of `extent` decides the orientation. Along it the shape is
/// pushed away from the released point in the direction of travel; across it the
/// shape is centered on the point, so the dragged connector lines up with the
/// midpoint of the new shape's facing side.
///
/// # Arguments
/// * `released` - Absolute position of the line's free end
/// * `extent` - The line's vector from its from-anchor to `released`
/// * `width`, `height` - Size of the shape about to be created (sign is ignored)
pub fn next_shape_position(released: Point, extent: Vector, width: f32, height: f32) -> Placement {
    let (w, h) = (width.abs(), height.abs());

    if extent.horizontal_dominant() {
        let (x, connector) = if extent.dx >= 0.0 {
            (released.x, Direction::West)
        } else {
            (released.x - w, Direction::East)
        };
        Placement {
            rect: Rect::new(x, released.y - h / 2.0, w, h),
            connector,
        }
    } else {
        let (y, connector) = if extent.dy >= 0.0 {
            (released.y, Direction::North)
        } else {
            (released.y - h, Direction::South)
        };
        Placement {
            rect: Rect::new(released.x - w / 2.0, y, w, h),
            connector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rightward_release() {
        let p = next_shape_position(Point::new(300.0, 200.0), Vector::new(150.0, 40.0), 100.0, 60.0);
        assert_eq!(p.rect, Rect::new(300.0, 170.0, 100.0, 60.0));
        assert_eq!(p.connector, Direction::West);
    }

    #[test]
    fn test_leftward_release() {
        let p = next_shape_position(Point::new(300.0, 200.0), Vector::new(-150.0, 40.0), 100.0, 60.0);
        assert_eq!(p.rect, Rect::new(200.0, 170.0, 100.0, 60.0));
        assert_eq!(p.connector, Direction::East);
    }

    #[test]
    fn test_downward_release() {
        let p = next_shape_position(Point::new(300.0, 200.0), Vector::new(20.0, 90.0), 100.0, 60.0);
        assert_eq!(p.rect, Rect::new(250.0, 200.0, 100.0, 60.0));
        assert_eq!(p.connector, Direction::North);
    }

    #[test]
    fn test_upward_release() {
        let p = next_shape_position(Point::new(300.0, 200.0), Vector::new(20.0, -90.0), 100.0, 60.0);
        assert_eq!(p.rect, Rect::new(250.0, 140.0, 100.0, 60.0));
        assert_eq!(p.connector, Direction::South);
    }

    #[test]
    fn test_tie_uses_horizontal_axis() {
        let p = next_shape_position(Point::new(0.0, 0.0), Vector::new(-50.0, 50.0), 40.0, 20.0);
        assert_eq!(p.connector, Direction::East);
        assert_eq!(p.rect, Rect::new(-40.0, -10.0, 40.0, 20.0));
    }

    #[test]
    fn test_connector_anchor_matches_release_point() {
        let released = Point::new(120.0, 80.0);
        for extent in [
            Vector::new(90.0, 10.0),
            Vector::new(-90.0, 10.0),
            Vector::new(10.0, 90.0),
            Vector::new(10.0, -90.0),
        ] {
            let p = next_shape_position(released, extent, 64.0, 32.0);
            assert_eq!(p.rect.anchor(p.connector), released, "extent {:?}", extent);
        }
    }

    #[test]
    fn test_negative_size_is_ignored() {
        let p = next_shape_position(Point::new(0.0, 0.0), Vector::new(10.0, 0.0), -40.0, -20.0);
        assert_eq!(p.rect, Rect::new(0.0, -10.0, 40.0, 20.0));
    }
}
