use std::collections::HashMap;
use crate::direction::Direction;
use crate::error::{Result, RoutingError};
use crate::geometry::{Point, Rect, ShapeGeometry, SimpleShape};
use crate::hit_test::{find_connector_at, SimpleConnectorGeometry};

/// A connector as reported by the shape that owns it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredConnector {
    pub shape_id: i32,
    pub direction: Direction,
    /// Anchor offset from the shape's top-left corner; `None` uses the side midpoint
    pub rel: Option<(f32, f32)>,
    pub can_originate: bool,
    pub can_receive: bool,
}

impl StoredConnector {
    /// Connector on the midpoint of the `direction` side that can both start and
    /// receive lines.
    pub fn new(shape_id: i32, direction: Direction) -> Self {
        Self {
            shape_id,
            direction,
            rel: None,
            can_originate: true,
            can_receive: true,
        }
    }

    /// Place the anchor at an explicit offset within the shape.
    pub fn at(mut self, rel_x: f32, rel_y: f32) -> Self {
        self.rel = Some((rel_x, rel_y));
        self
    }

    pub fn with_flags(mut self, can_originate: bool, can_receive: bool) -> Self {
        self.can_originate = can_originate;
        self.can_receive = can_receive;
        self
    }

    /// Absolute anchor point given the owning shape's bounds.
    pub fn anchor(&self, shape: Rect) -> Point {
        match self.rel {
            Some((rx, ry)) => {
                let n = shape.normalized();
                Point::new(n.x + rx, n.y + ry)
            }
            None => shape.anchor(self.direction),
        }
    }
}

/// A connector resolved against its shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedConnector {
    pub connector_id: i32,
    pub shape_id: i32,
    pub direction: Direction,
    pub anchor: Point,
    pub shape_rect: Rect,
}

/// Read-only access to shape and connector geometry.
///
/// [`Line::recompute`](crate::line::Line::recompute) takes one of these instead of
/// reaching into a global store, so tests can hand it synthetic boxes.
pub trait GeometryProvider {
    fn shape_rect(&self, shape_id: i32) -> Option<Rect>;
    fn connector(&self, connector_id: i32) -> Option<StoredConnector>;

    /// Look up a connector and its owning shape.
    fn resolve_connector(&self, connector_id: i32) -> Result<ResolvedConnector> {
        let connector = self
            .connector(connector_id)
            .ok_or(RoutingError::MissingConnector(connector_id))?;
        let shape_rect = self
            .shape_rect(connector.shape_id)
            .ok_or(RoutingError::MissingShape(connector.shape_id))?;

        Ok(ResolvedConnector {
            connector_id,
            shape_id: connector.shape_id,
            direction: connector.direction,
            anchor: connector.anchor(shape_rect),
            shape_rect,
        })
    }
}

/// Helper struct to manage spatial state of the editor (shape rects and connectors)
///
/// Generic over S to allow using specialized shape types that implement ShapeGeometry.
pub struct GeometryCache<S = SimpleShape> {
    pub shapes: HashMap<i32, S>,
    pub connectors: HashMap<i32, StoredConnector>,
}

impl<S> Default for GeometryCache<S> {
    fn default() -> Self {
        Self {
            shapes: HashMap::new(),
            connectors: HashMap::new(),
        }
    }
}

impl<S> GeometryCache<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a connector.
    pub fn insert_connector(&mut self, connector_id: i32, connector: StoredConnector) {
        self.connectors.insert(connector_id, connector);
    }

    /// Standard handler for connector reports from Slint
    pub fn handle_connector_report(
        &mut self,
        connector_id: i32,
        shape_id: i32,
        direction: Direction,
        rel_x: f32,
        rel_y: f32,
    ) {
        let flags = self
            .connectors
            .get(&connector_id)
            .map(|c| (c.can_originate, c.can_receive))
            .unwrap_or((true, true));
        self.connectors.insert(
            connector_id,
            StoredConnector::new(shape_id, direction)
                .at(rel_x, rel_y)
                .with_flags(flags.0, flags.1),
        );
    }

    /// IDs of the connectors owned by `shape_id`.
    pub fn connectors_of(&self, shape_id: i32) -> Vec<i32> {
        self.connectors
            .iter()
            .filter(|(_, c)| c.shape_id == shape_id)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Drop a shape together with its connectors.
    ///
    /// Returns the IDs of the removed connectors.
    pub fn remove_shape(&mut self, shape_id: i32) -> Vec<i32> {
        self.shapes.remove(&shape_id);
        let removed = self.connectors_of(shape_id);
        for id in &removed {
            self.connectors.remove(id);
        }
        removed
    }
}

impl<S> GeometryCache<S>
where
    S: ShapeGeometry + Copy,
{
    /// Iterator over absolute connector anchors for hit testing
    pub fn get_absolute_connectors(&self) -> impl Iterator<Item = SimpleConnectorGeometry> + '_ {
        self.connectors.iter().filter_map(move |(&id, connector)| {
            let rect = self.shapes.get(&connector.shape_id)?.rect();
            let anchor = connector.anchor(rect);
            Some(SimpleConnectorGeometry {
                id,
                x: anchor.x,
                y: anchor.y,
            })
        })
    }

    /// Absolute anchor of a connector, if both it and its shape are known
    pub fn connector_anchor(&self, connector_id: i32) -> Option<Point> {
        self.resolve_connector(connector_id).ok().map(|c| c.anchor)
    }

    /// Find connector at position
    pub fn find_connector_at(&self, x: f32, y: f32, hit_radius: f32) -> i32 {
        find_connector_at(x, y, self.get_absolute_connectors(), hit_radius)
    }
}

impl<S> GeometryProvider for GeometryCache<S>
where
    S: ShapeGeometry + Copy,
{
    fn shape_rect(&self, shape_id: i32) -> Option<Rect> {
        self.shapes.get(&shape_id).map(|s| s.rect())
    }

    fn connector(&self, connector_id: i32) -> Option<StoredConnector> {
        self.connectors.get(&connector_id).copied()
    }
}

/// Convenience implementation for the default SimpleShape
impl GeometryCache<SimpleShape> {
    /// Update a shape's rectangle (shorthand for SimpleShape)
    pub fn update_shape_rect(&mut self, id: i32, x: f32, y: f32, width: f32, height: f32) {
        self.shapes.insert(
            id,
            SimpleShape {
                id,
                x,
                y,
                width,
                height,
            },
        );
    }

    /// Standard handler for shape rect reports from Slint (for SimpleShape)
    pub fn handle_shape_rect_report(&mut self, id: i32, x: f32, y: f32, w: f32, h: f32) {
        self.update_shape_rect(id, x, y, w, h);
    }
}
