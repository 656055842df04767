use crate::geometry::Point;

/// Trait for line geometry data needed for hit-testing
pub trait LineGeometry {
    fn id(&self) -> i32;
    /// Absolute polyline, start anchor first
    fn points(&self) -> &[Point];
}

/// Trait for connector geometry data needed for hit-testing
pub trait ConnectorGeometry {
    fn id(&self) -> i32;
    fn position(&self) -> (f32, f32);
}

// === Standard Implementations ===

/// Simple implementation of LineGeometry
#[derive(Debug, Clone)]
pub struct SimpleLineGeometry {
    pub id: i32,
    pub points: Vec<Point>,
}

impl LineGeometry for SimpleLineGeometry {
    fn id(&self) -> i32 { self.id }
    fn points(&self) -> &[Point] { &self.points }
}

/// Simple implementation of ConnectorGeometry
#[derive(Debug, Clone, Copy)]
pub struct SimpleConnectorGeometry {
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

impl ConnectorGeometry for SimpleConnectorGeometry {
    fn id(&self) -> i32 { self.id }
    fn position(&self) -> (f32, f32) { (self.x, self.y) }
}

/// Calculate squared distance from a point to a line segment
fn distance_to_segment_sq(point: Point, a: Point, b: Point) -> f32 {
    let ab = (b.x - a.x, b.y - a.y);
    let ap = (point.x - a.x, point.y - a.y);

    let ab_len_sq = ab.0 * ab.0 + ab.1 * ab.1;

    if ab_len_sq < f32::EPSILON {
        // Degenerate segment (a == b)
        return ap.0 * ap.0 + ap.1 * ap.1;
    }

    // Project point onto line, clamped to segment
    let t = ((ap.0 * ab.0 + ap.1 * ab.1) / ab_len_sq).clamp(0.0, 1.0);

    let dx = point.x - (a.x + t * ab.0);
    let dy = point.y - (a.y + t * ab.1);
    dx * dx + dy * dy
}

/// Minimum distance from a point to a polyline.
///
/// Returns `f32::MAX` for an empty polyline.
pub fn distance_to_polyline(point: Point, points: &[Point]) -> f32 {
    match points {
        [] => f32::MAX,
        [only] => distance_to_segment_sq(point, *only, *only).sqrt(),
        _ => points
            .windows(2)
            .map(|s| distance_to_segment_sq(point, s[0], s[1]))
            .fold(f32::MAX, f32::min)
            .sqrt(),
    }
}

/// Find a line at the given position
///
/// Returns the ID of the closest line within hover_distance, or -1 if none.
pub fn find_line_at<L, I>(mouse_x: f32, mouse_y: f32, lines: I, hover_distance: f32) -> i32
where
    L: LineGeometry,
    I: IntoIterator<Item = L>,
{
    let mouse = Point::new(mouse_x, mouse_y);
    let mut closest_line_id: i32 = -1;
    let mut closest_distance = hover_distance;

    for line in lines {
        let distance = distance_to_polyline(mouse, line.points());
        if distance < closest_distance {
            closest_distance = distance;
            closest_line_id = line.id();
        }
    }

    closest_line_id
}

/// Find a connector at the given position
///
/// Returns the ID of the first connector within hit_radius, or 0 if none.
pub fn find_connector_at<C, I>(mouse_x: f32, mouse_y: f32, connectors: I, hit_radius: f32) -> i32
where
    C: ConnectorGeometry,
    I: IntoIterator<Item = C>,
{
    let hit_radius_sq = hit_radius * hit_radius;

    for connector in connectors {
        let (x, y) = connector.position();
        let dx = mouse_x - x;
        let dy = mouse_y - y;
        if dx * dx + dy * dy <= hit_radius_sq {
            return connector.id();
        }
    }

    0 // No connector found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape(id: i32) -> SimpleLineGeometry {
        // (0,0) -> (100,0) -> (100,100)
        SimpleLineGeometry {
            id,
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
            ],
        }
    }

    // ========================================================================
    // distance_to_polyline()
    // ========================================================================

    #[test]
    fn test_distance_on_segment_is_zero() {
        let line = l_shape(1);
        assert!(distance_to_polyline(Point::new(50.0, 0.0), &line.points) < 1e-3);
        assert!(distance_to_polyline(Point::new(100.0, 60.0), &line.points) < 1e-3);
    }

    #[test]
    fn test_distance_picks_nearest_segment() {
        let line = l_shape(1);
        // 5 below the first segment, 40 left of the second
        assert!((distance_to_polyline(Point::new(60.0, 5.0), &line.points) - 5.0).abs() < 0.001);
        // Inside the elbow, closer to the vertical leg
        assert!((distance_to_polyline(Point::new(97.0, 50.0), &line.points) - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_distance_past_end_measures_to_endpoint() {
        let line = l_shape(1);
        let d = distance_to_polyline(Point::new(100.0, 130.0), &line.points);
        assert!((d - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_distance_degenerate_inputs() {
        assert_eq!(distance_to_polyline(Point::new(1.0, 1.0), &[]), f32::MAX);
        let d = distance_to_polyline(Point::new(3.0, 4.0), &[Point::ORIGIN]);
        assert!((d - 5.0).abs() < 0.001);
    }

    // ========================================================================
    // find_line_at()
    // ========================================================================

    #[test]
    fn test_find_line_at_hit() {
        let lines = vec![l_shape(7)];
        assert_eq!(find_line_at(50.0, 3.0, lines, 6.0), 7);
    }

    #[test]
    fn test_find_line_at_miss() {
        let lines = vec![l_shape(7)];
        assert_eq!(find_line_at(50.0, 30.0, lines, 6.0), -1);
    }

    #[test]
    fn test_find_line_at_prefers_closest() {
        let mut near = l_shape(2);
        for p in &mut near.points {
            p.y += 4.0;
        }
        let lines = vec![l_shape(1), near];
        assert_eq!(find_line_at(50.0, 3.5, lines, 6.0), 2);
    }

    #[test]
    fn test_find_line_at_empty() {
        let lines: Vec<SimpleLineGeometry> = vec![];
        assert_eq!(find_line_at(0.0, 0.0, lines, 6.0), -1);
    }

    // ========================================================================
    // find_connector_at()
    // ========================================================================

    #[test]
    fn test_find_connector_at() {
        let connectors = vec![
            SimpleConnectorGeometry { id: 1001, x: 10.0, y: 10.0 },
            SimpleConnectorGeometry { id: 2001, x: 50.0, y: 50.0 },
        ];

        assert_eq!(find_connector_at(12.0, 12.0, connectors.clone(), 5.0), 1001);
        assert_eq!(find_connector_at(48.0, 52.0, connectors.clone(), 5.0), 2001);
        assert_eq!(find_connector_at(30.0, 30.0, connectors, 5.0), 0);
    }

    #[test]
    fn test_find_connector_at_boundary_is_inclusive() {
        let connectors = vec![SimpleConnectorGeometry { id: 1, x: 0.0, y: 0.0 }];
        assert_eq!(find_connector_at(5.0, 0.0, connectors, 5.0), 1);
    }
}
