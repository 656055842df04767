//! Line management for connector diagrams.
//!
//! This module provides [`LineManager`], which owns the diagram's [`Line`]s,
//! recomputes their routes when geometry changes, and keeps a Slint model of
//! rendered paths in step.
//!
//! # Example
//!
//! ```ignore
//! use slint_connector_router::{GeometryCache, Line, LineManager};
//!
//! let cache = Rc::new(RefCell::new(GeometryCache::new()));
//! let mut lines = LineManager::new(cache.clone());
//!
//! lines.add(Line::connecting(1, out_connector, in_connector));
//!
//! let model = Rc::new(VecModel::<LinePath>::default());
//! lines.bind_model(model.clone(), |id, path, begin, end| LinePath {
//!     id,
//!     path_commands: path,
//!     arrow_begin: begin.to_string().into(),
//!     arrow_end: end.to_string().into(),
//! });
//! window.set_line_paths(ModelRc::from(model));
//!
//! // After a shape moved
//! lines.recompute_all();
//! ```

use crate::config::RoutingConfig;
use crate::direction::Direction;
use crate::error::RoutingError;
use crate::geometry::{ShapeGeometry, SimpleShape};
use crate::graph::GraphLogic;
use crate::hit_test::{find_line_at, SimpleLineGeometry};
use crate::line::Line;
use crate::state::GeometryCache;
use slint::{Model, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Internal trait for auto-syncing to Slint models.
trait ModelSyncer {
    fn sync(&self, paths: &[LinePath]);
}

/// Concrete implementation of ModelSyncer for a specific row type.
struct ConcreteModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> ModelSyncer for ConcreteModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(i32, SharedString, Direction, Direction) -> P,
{
    fn sync(&self, paths: &[LinePath]) {
        // Update existing rows or add new ones
        for (i, path) in paths.iter().enumerate() {
            let item = (self.constructor)(
                path.id,
                SharedString::from(path.path_commands.as_str()),
                path.arrow_begin,
                path.arrow_end,
            );
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        // Remove excess rows
        while self.model.row_count() > paths.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

/// Rendered form of one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePath {
    pub id: i32,
    /// Absolute SVG path commands
    pub path_commands: String,
    pub arrow_begin: Direction,
    pub arrow_end: Direction,
}

/// Manages lines and their rendered paths.
///
/// # Auto-Sync Mode
///
/// Use [`bind_model`](Self::bind_model) to enable automatic synchronization to a
/// Slint `VecModel`. After binding, every call to
/// [`recompute_all`](Self::recompute_all) updates the model.
///
/// # Type Parameters
///
/// - `S`: The shape geometry type used by the cache (default: `SimpleShape`)
pub struct LineManager<S = SimpleShape> {
    lines: Vec<Line>,
    cache: Rc<RefCell<GeometryCache<S>>>,
    config: RoutingConfig,
    syncer: Option<Box<dyn ModelSyncer>>,
}

impl<S> LineManager<S>
where
    S: ShapeGeometry + Copy,
{
    /// Create a new LineManager over the given geometry cache.
    pub fn new(cache: Rc<RefCell<GeometryCache<S>>>) -> Self {
        Self::with_config(cache, RoutingConfig::default())
    }

    pub fn with_config(cache: Rc<RefCell<GeometryCache<S>>>, config: RoutingConfig) -> Self {
        Self {
            lines: Vec::new(),
            cache,
            config,
            syncer: None,
        }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next recompute.
    pub fn set_config(&mut self, config: RoutingConfig) {
        self.config = config;
    }

    /// Bind to a Slint model for automatic synchronization.
    ///
    /// # Arguments
    ///
    /// * `model` - The VecModel to sync to
    /// * `constructor` - Builds a row from (id, path_commands, arrow_begin, arrow_end)
    pub fn bind_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(i32, SharedString, Direction, Direction) -> P + 'static,
    {
        self.syncer = Some(Box::new(ConcreteModelSyncer { model, constructor }));
    }

    /// Add a line. Its route is computed on the next recompute.
    pub fn add(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Remove a line by ID.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove(&mut self, id: i32) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        let removed = self.lines.len() != len_before;
        if removed {
            self.sync();
        }
        removed
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.sync();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Get an iterator over line IDs.
    pub fn ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.lines.iter().map(|l| l.id())
    }

    /// Smallest positive ID not used by any line.
    pub fn next_id(&self) -> i32 {
        self.ids().max().unwrap_or(0).max(0) + 1
    }

    pub fn find(&self, id: i32) -> Option<&Line> {
        self.lines.iter().find(|l| l.id() == id)
    }

    pub fn find_mut(&mut self, id: i32) -> Option<&mut Line> {
        self.lines.iter_mut().find(|l| l.id() == id)
    }

    /// Recompute one line. `None` if no line has this ID.
    pub fn recompute(&mut self, id: i32) -> Option<Result<(), RoutingError>> {
        let result = {
            let cache = self.cache.borrow();
            let line = self.lines.iter_mut().find(|l| l.id() == id)?;
            line.recompute(&*cache, &self.config).map(|_| ())
        };
        self.sync();
        Some(result)
    }

    /// Recompute every line from current geometry.
    ///
    /// A line whose connectors or shapes are missing keeps its previous route; the
    /// failures are returned and logged. The bound model is synced afterwards.
    pub fn recompute_all(&mut self) -> Vec<(i32, RoutingError)> {
        let mut failures = Vec::new();
        {
            let cache = self.cache.borrow();
            for line in &mut self.lines {
                let id = line.id();
                if let Err(err) = line.recompute(&*cache, &self.config) {
                    tracing::warn!(line = id, %err, "keeping previous route");
                    failures.push((id, err));
                }
            }
        }
        self.sync();
        failures
    }

    /// Remove every line touching `shape_id`, returning the removed IDs.
    ///
    /// Works before or after the shape left the cache: lines are matched through
    /// their connectors and through the shapes seen on their last recompute.
    pub fn remove_lines_for_shape(&mut self, shape_id: i32) -> Vec<i32> {
        let mut doomed =
            GraphLogic::find_lines_connected_to_shape(shape_id, &self.lines, &self.cache.borrow());
        doomed.extend(
            self.lines
                .iter()
                .filter(|l| l.from_shape() == Some(shape_id) || l.to_shape() == Some(shape_id))
                .map(|l| l.id()),
        );
        doomed.sort_unstable();
        doomed.dedup();

        self.lines.retain(|l| !doomed.contains(&l.id()));
        if !doomed.is_empty() {
            tracing::debug!(shape = shape_id, lines = ?doomed, "removed lines of deleted shape");
            self.sync();
        }
        doomed
    }

    /// Rendered paths of all lines that have a route, in insertion order.
    pub fn paths(&self) -> Vec<LinePath> {
        self.lines
            .iter()
            .filter_map(|line| {
                let route = line.route()?;
                Some(LinePath {
                    id: line.id(),
                    path_commands: line.path_commands(),
                    arrow_begin: route.arrow_begin,
                    arrow_end: route.arrow_end,
                })
            })
            .collect()
    }

    /// Absolute polylines for hit testing.
    pub fn line_geometries(&self) -> Vec<SimpleLineGeometry> {
        self.lines
            .iter()
            .filter_map(|line| {
                Some(SimpleLineGeometry {
                    id: line.id(),
                    points: line.absolute_points()?,
                })
            })
            .collect()
    }

    /// Find the line under the given position.
    ///
    /// Returns the line ID, or -1 if no line is within the configured hover distance.
    pub fn find_line_at(&self, x: f32, y: f32) -> i32 {
        find_line_at(x, y, self.line_geometries(), self.config.hover_distance)
    }

    fn sync(&self) {
        if let Some(syncer) = &self.syncer {
            syncer.sync(&self.paths());
        }
    }
}
