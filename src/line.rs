//! A connector line and the logic that keeps its route in step with the shapes it
//! joins.
//!
//! A [`Line`] starts at a connector and ends either at another connector or at a
//! free point under the pointer while it is being dragged. Its route is derived
//! state: [`Line::recompute`] rebuilds it from scratch after anything that moves
//! either end, and a failed recompute leaves the previous route in place.
//!
//! ```ignore
//! let mut line = Line::new(1, from_connector);
//! line.drag_to(Point::new(x, y));
//! line.recompute(&*cache.borrow(), &config)?;
//!
//! // Dropped on a compatible connector
//! line.attach(to_connector);
//! line.recompute(&*cache.borrow(), &config)?;
//! ```

use crate::config::RoutingConfig;
use crate::direction::{Direction, RouteKind};
use crate::error::{Result, RoutingError};
use crate::geometry::{Point, Vector};
use crate::placement::{next_shape_position, Placement};
use crate::route::{generate_orthogonal_path, route, Route, RouteContext};
use crate::state::GeometryProvider;

/// The to end of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    /// Attached to a connector
    Attached(i32),
    /// Unattached point in world space
    Free(Point),
}

#[derive(Debug, Clone)]
pub struct Line {
    id: i32,
    from: i32,
    to: Endpoint,
    origin: Point,
    extent: Vector,
    from_shape: Option<i32>,
    to_shape: Option<i32>,
    route: Option<Route>,
}

impl Line {
    /// Start a line at `from_connector`. The to end starts out free at the origin
    /// until the first [`drag_to`](Self::drag_to) or [`attach`](Self::attach).
    pub fn new(id: i32, from_connector: i32) -> Self {
        Self {
            id,
            from: from_connector,
            to: Endpoint::Free(Point::ORIGIN),
            origin: Point::ORIGIN,
            extent: Vector::ZERO,
            from_shape: None,
            to_shape: None,
            route: None,
        }
    }

    /// A line joining two connectors.
    pub fn connecting(id: i32, from_connector: i32, to_connector: i32) -> Self {
        let mut line = Self::new(id, from_connector);
        line.to = Endpoint::Attached(to_connector);
        line
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn from_connector(&self) -> i32 {
        self.from
    }

    pub fn to(&self) -> Endpoint {
        self.to
    }

    /// The to connector, or `None` while the end is free.
    pub fn to_connector(&self) -> Option<i32> {
        match self.to {
            Endpoint::Attached(id) => Some(id),
            Endpoint::Free(_) => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.to, Endpoint::Attached(_))
    }

    /// World position of the from-anchor as of the last successful recompute.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Vector from the from-anchor to the to-anchor as of the last successful recompute.
    pub fn extent(&self) -> Vector {
        self.extent
    }

    pub fn from_shape(&self) -> Option<i32> {
        self.from_shape
    }

    /// Shape owning the to connector; `None` while the end is free.
    pub fn to_shape(&self) -> Option<i32> {
        self.to_shape
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Bend points in the local frame. Empty before the first recompute.
    pub fn broken_points(&self) -> &[Point] {
        self.route
            .as_ref()
            .map(|r| r.broken_points.as_slice())
            .unwrap_or(&[])
    }

    pub fn arrow_begin_direction(&self) -> Option<Direction> {
        self.route.as_ref().map(|r| r.arrow_begin)
    }

    pub fn arrow_end_direction(&self) -> Option<Direction> {
        self.route.as_ref().map(|r| r.arrow_end)
    }

    /// Full polyline in world space, or `None` before the first recompute.
    pub fn absolute_points(&self) -> Option<Vec<Point>> {
        self.route
            .as_ref()
            .map(|r| r.absolute_polyline(self.origin, self.extent))
    }

    /// SVG path commands for the current route; empty before the first recompute.
    pub fn path_commands(&self) -> String {
        self.absolute_points()
            .map(|points| generate_orthogonal_path(&points))
            .unwrap_or_default()
    }

    // === Geometry-affecting changes ===
    //
    // None of these recompute; call `recompute` afterwards.

    /// Move the free end (detaching it if it was attached).
    pub fn drag_to(&mut self, point: Point) {
        self.to = Endpoint::Free(point);
    }

    /// Let go of the to connector, leaving the end at `point`.
    pub fn detach(&mut self, point: Point) {
        self.drag_to(point);
    }

    pub fn attach(&mut self, to_connector: i32) {
        self.to = Endpoint::Attached(to_connector);
    }

    pub fn set_from(&mut self, from_connector: i32) {
        self.from = from_connector;
    }

    /// Rebuild the route from current geometry.
    ///
    /// On error nothing on the line changes, including the previous route.
    pub fn recompute<P>(&mut self, provider: &P, config: &RoutingConfig) -> Result<&Route>
    where
        P: GeometryProvider + ?Sized,
    {
        let from = provider.resolve_connector(self.from)?;
        let (end, to) = match self.to {
            Endpoint::Attached(id) => {
                let to = provider.resolve_connector(id)?;
                (to.anchor, Some(to))
            }
            Endpoint::Free(point) => (point, None),
        };

        let kind = match to {
            Some(to) => RouteKind::Pair(from.direction, to.direction),
            None => RouteKind::Single(from.direction),
        };

        let origin = from.anchor;
        let extent = origin.to(end);
        if !origin.is_finite() || !extent.is_finite() || !from.shape_rect.is_finite() {
            return Err(RoutingError::NonFiniteGeometry { kind });
        }

        let to_local = Vector::new(-origin.x, -origin.y);
        let mut ctx = RouteContext::new(extent)
            .with_from_box(from.shape_rect.translated(to_local))
            .with_clearance(config.clearance);
        if let Some(to) = to {
            if !to.shape_rect.is_finite() {
                return Err(RoutingError::NonFiniteGeometry { kind });
            }
            ctx = ctx.with_to_box(to.shape_rect.translated(to_local));
        }

        let route = route(kind, &ctx);
        tracing::debug!(
            line = self.id,
            %kind,
            bends = route.broken_points.len(),
            "line recomputed"
        );

        self.origin = origin;
        self.extent = extent;
        self.from_shape = Some(from.shape_id);
        self.to_shape = to.map(|t| t.shape_id);
        Ok(&*self.route.insert(route))
    }

    /// Where a new shape of the given size goes if the free end is released here.
    ///
    /// `None` when the line is attached. The direction of travel runs from the
    /// from-anchor of the last recompute to where the free end is now.
    pub fn next_position(&self, width: f32, height: f32) -> Option<Placement> {
        match self.to {
            Endpoint::Free(point) => Some(next_shape_position(
                point,
                self.origin.to(point),
                width,
                height,
            )),
            Endpoint::Attached(_) => None,
        }
    }

    /// What a saved diagram keeps of this line. Routes are never stored.
    pub fn record(&self) -> LineRecord {
        LineRecord {
            id: self.id,
            from: self.from,
            to: self.to,
            extent: self.extent,
        }
    }
}

/// Persisted form of a [`Line`].
///
/// Loading a record yields a line without a route; recompute it after loading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineRecord {
    pub id: i32,
    pub from: i32,
    pub to: Endpoint,
    pub extent: Vector,
}

impl From<LineRecord> for Line {
    fn from(record: LineRecord) -> Self {
        let mut line = Line::new(record.id, record.from);
        line.to = record.to;
        line.extent = record.extent;
        line
    }
}
