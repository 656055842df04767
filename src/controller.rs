//! High-level controller for connector diagrams.
//!
//! The [`ConnectorController`] reduces boilerplate by managing geometry tracking,
//! the line collection, and the drag-a-line-out-of-a-connector gesture in one
//! place.
//!
//! # Example
//!
//! ```ignore
//! use slint_connector_router::ConnectorController;
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = ConnectorController::new();
//!
//!     window.on_compute_line_path(ctrl.compute_line_path_callback());
//!
//!     // Geometry tracking
//!     window.on_shape_rect_changed({
//!         let ctrl = ctrl.clone();
//!         move |id, x, y, w, h| ctrl.handle_shape_rect(id, x, y, w, h)
//!     });
//!
//!     // Dragging a line out of a connector
//!     window.on_connector_pressed({
//!         let ctrl = ctrl.clone();
//!         move |connector| { let _ = ctrl.begin_drag(connector); }
//!     });
//!     window.on_pointer_moved({
//!         let ctrl = ctrl.clone();
//!         let w = window.as_weak();
//!         move |x, y| {
//!             if let Some(w) = w.upgrade() {
//!                 w.set_drag_path(ctrl.drag_to(x, y));
//!             }
//!         }
//!     });
//!     window.on_pointer_released({
//!         let ctrl = ctrl.clone();
//!         move |x, y| match ctrl.find_connector_at(x, y, 8.0) {
//!             0 => {
//!                 if let Some(placement) = ctrl.release(120.0, 60.0) {
//!                     // Create a shape at placement.rect, then ctrl.connect(...)
//!                 }
//!             }
//!             connector => {
//!                 if ctrl.drop_on(connector).is_err() {
//!                     ctrl.cancel_drag();
//!                 }
//!             }
//!         }
//!     });
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::config::RoutingConfig;
use crate::direction::Direction;
use crate::geometry::{Point, SimpleShape};
use crate::graph::{
    BasicConnectionValidator, CompositeValidator, ConnectionValidator, NoDuplicatesValidator,
    ValidationError,
};
use crate::line::Line;
use crate::lines::LineManager;
use crate::placement::Placement;
use crate::state::GeometryCache;
use slint::SharedString;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Validator = Box<dyn ConnectionValidator<SimpleShape, Line>>;

/// A line following the pointer.
struct DragState {
    line: Line,
    /// The committed line this drag detached, restored on cancel
    original: Option<Line>,
}

/// Controller that manages diagram state and provides callback implementations.
///
/// This provides a high-level API that handles:
/// - Geometry caching (shape rects, connector offsets)
/// - Route recomputation when shapes move
/// - The line drag lifecycle: begin, follow the pointer, drop or release
/// - Connection validation and hit testing facades
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct ConnectorController {
    cache: Rc<RefCell<GeometryCache>>,
    lines: Rc<RefCell<LineManager>>,
    drag: Rc<RefCell<Option<DragState>>>,
    validator: Rc<RefCell<Validator>>,
    /// Lowest ID not yet handed out; IDs are never reused
    next_id: Rc<Cell<i32>>,
}

impl Default for ConnectorController {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectorController {
    /// Create a new controller with default settings.
    pub fn new() -> Self {
        Self::with_config(RoutingConfig::default())
    }

    pub fn with_config(config: RoutingConfig) -> Self {
        let cache = Rc::new(RefCell::new(GeometryCache::new()));
        let lines = LineManager::with_config(cache.clone(), config);
        let validator: Validator = Box::new(
            CompositeValidator::<SimpleShape, Line>::new()
                .add(BasicConnectionValidator)
                .add(NoDuplicatesValidator),
        );
        Self {
            cache,
            lines: Rc::new(RefCell::new(lines)),
            drag: Rc::new(RefCell::new(None)),
            validator: Rc::new(RefCell::new(validator)),
            next_id: Rc::new(Cell::new(1)),
        }
    }

    /// Replace the rules applied by [`drop_on`](Self::drop_on) and [`connect`](Self::connect).
    pub fn set_validator<V>(&self, validator: V)
    where
        V: ConnectionValidator<SimpleShape, Line> + 'static,
    {
        *self.validator.borrow_mut() = Box::new(validator);
    }

    /// Set the routing configuration and reroute everything.
    pub fn set_config(&self, config: RoutingConfig) {
        self.lines.borrow_mut().set_config(config);
        self.recompute_all();
    }

    pub fn config(&self) -> RoutingConfig {
        *self.lines.borrow().config()
    }

    /// Get access to the geometry cache.
    pub fn cache(&self) -> Rc<RefCell<GeometryCache>> {
        self.cache.clone()
    }

    /// Get access to the committed lines.
    pub fn lines(&self) -> Rc<RefCell<LineManager>> {
        self.lines.clone()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.borrow().is_some()
    }

    /// Snapshot of the line being dragged, if any.
    pub fn dragged_line(&self) -> Option<Line> {
        self.drag.borrow().as_ref().map(|d| d.line.clone())
    }

    // === Callback factories ===

    /// Returns a callback for `compute-line-path`.
    pub fn compute_line_path_callback(&self) -> impl Fn(i32) -> SharedString {
        let lines = self.lines.clone();
        move |line_id| {
            lines
                .borrow()
                .find(line_id)
                .map(|l| l.path_commands())
                .unwrap_or_default()
                .into()
        }
    }

    // === Direct handlers ===

    /// Handle shape-rect-changed: update cache and reroute.
    pub fn handle_shape_rect(&self, id: i32, x: f32, y: f32, w: f32, h: f32) {
        self.cache.borrow_mut().handle_shape_rect_report(id, x, y, w, h);
        self.recompute_all();
    }

    /// Handle connector-position-changed: update cache.
    ///
    /// `rel_x`/`rel_y` are relative to the owning shape's top-left corner.
    pub fn handle_connector(
        &self,
        connector_id: i32,
        shape_id: i32,
        direction: Direction,
        rel_x: f32,
        rel_y: f32,
    ) {
        self.cache
            .borrow_mut()
            .handle_connector_report(connector_id, shape_id, direction, rel_x, rel_y);
    }

    /// Reroute every committed line and the line being dragged.
    pub fn recompute_all(&self) {
        self.lines.borrow_mut().recompute_all();
        if let Some(state) = self.drag.borrow_mut().as_mut() {
            self.recompute_line(&mut state.line);
        }
    }

    /// Delete a shape with its connectors and every line touching it.
    ///
    /// Returns the IDs of the removed lines. A drag starting at the shape is dropped.
    pub fn delete_shape(&self, shape_id: i32) -> Vec<i32> {
        let removed = self.lines.borrow_mut().remove_lines_for_shape(shape_id);
        let connectors = self.cache.borrow_mut().remove_shape(shape_id);

        let mut drag = self.drag.borrow_mut();
        let touches = drag.as_ref().is_some_and(|d| {
            connectors.contains(&d.line.from_connector())
                || d.line.to_connector().is_some_and(|c| connectors.contains(&c))
        });
        if touches {
            *drag = None;
        } else if let Some(state) = drag.as_mut() {
            // A detached original must not come back pointing at the deleted shape
            if state
                .original
                .as_ref()
                .and_then(|o| o.to_connector())
                .is_some_and(|c| connectors.contains(&c))
            {
                state.original = None;
            }
        }

        tracing::debug!(shape = shape_id, lines = removed.len(), "shape deleted");
        removed
    }

    /// Remove a committed line.
    pub fn remove_line(&self, line_id: i32) -> bool {
        self.lines.borrow_mut().remove(line_id)
    }

    // === Drag lifecycle ===

    /// Start dragging a new line out of `connector_id`.
    ///
    /// Returns the ID the line will have once committed. Replaces any drag in
    /// progress.
    pub fn begin_drag(&self, connector_id: i32) -> Result<i32, ValidationError> {
        let anchor = {
            let cache = self.cache.borrow();
            let connector = cache
                .connectors
                .get(&connector_id)
                .ok_or(ValidationError::ConnectorNotFound(connector_id))?;
            if !connector.can_originate {
                return Err(ValidationError::CannotOriginate(connector_id));
            }
            cache
                .connector_anchor(connector_id)
                .ok_or(ValidationError::ConnectorNotFound(connector_id))?
        };

        let id = self.allocate_id();
        let mut line = Line::new(id, connector_id);
        line.drag_to(anchor);
        self.recompute_line(&mut line);

        tracing::debug!(line = id, connector = connector_id, "drag started");
        self.replace_drag(DragState { line, original: None });
        Ok(id)
    }

    /// Pick up the to end of a committed line and drag it.
    ///
    /// The line leaves the collection until it is dropped; [`cancel_drag`](Self::cancel_drag)
    /// puts it back unchanged.
    pub fn begin_redrag(&self, line_id: i32) -> Result<(), ValidationError> {
        let original = self
            .lines
            .borrow()
            .find(line_id)
            .cloned()
            .ok_or(ValidationError::LineNotFound(line_id))?;

        let mut line = original.clone();
        let end = original.origin().offset(original.extent());
        line.detach(end);
        self.recompute_line(&mut line);

        self.lines.borrow_mut().remove(line_id);
        tracing::debug!(line = line_id, "line detached for dragging");
        self.replace_drag(DragState {
            line,
            original: Some(original),
        });
        Ok(())
    }

    /// Move the free end of the dragged line.
    ///
    /// Returns the preview path, or an empty string when nothing is being dragged.
    pub fn drag_to(&self, x: f32, y: f32) -> SharedString {
        let mut drag = self.drag.borrow_mut();
        match drag.as_mut() {
            Some(state) => {
                state.line.drag_to(Point::new(x, y));
                self.recompute_line(&mut state.line);
                state.line.path_commands().into()
            }
            None => SharedString::default(),
        }
    }

    /// Preview path of the dragged line.
    pub fn drag_path(&self) -> SharedString {
        self.drag
            .borrow()
            .as_ref()
            .map(|d| d.line.path_commands())
            .unwrap_or_default()
            .into()
    }

    /// Attach the dragged line to `connector_id` and commit it.
    ///
    /// On a validation error the drag stays active so the pointer can move on.
    pub fn drop_on(&self, connector_id: i32) -> Result<i32, ValidationError> {
        let from = self
            .drag
            .borrow()
            .as_ref()
            .map(|d| d.line.from_connector())
            .ok_or(ValidationError::NoActiveDrag)?;
        self.validate(from, connector_id)?;

        let state = self
            .drag
            .borrow_mut()
            .take()
            .ok_or(ValidationError::NoActiveDrag)?;
        let mut line = state.line;
        line.attach(connector_id);
        Ok(self.commit(line))
    }

    /// Release the dragged line over empty canvas.
    ///
    /// Ends the drag and returns where a new `width` x `height` shape should go so
    /// that its returned connector meets the line's end. The line itself is not
    /// committed; connect it to the new shape with [`connect`](Self::connect).
    pub fn release(&self, width: f32, height: f32) -> Option<Placement> {
        let state = self.drag.borrow_mut().take()?;
        let placement = state.line.next_position(width, height);
        tracing::debug!(line = state.line.id(), ?placement, "drag released");
        placement
    }

    /// Abandon the drag. A detached line returns to the collection.
    pub fn cancel_drag(&self) {
        let state = self.drag.borrow_mut().take();
        if let Some(original) = state.and_then(|s| s.original) {
            let id = original.id();
            let mut lines = self.lines.borrow_mut();
            lines.add(original);
            lines.recompute(id);
        }
    }

    /// Create a validated line between two connectors.
    pub fn connect(&self, from: i32, to: i32) -> Result<i32, ValidationError> {
        self.validate(from, to)?;
        let id = self.allocate_id();
        Ok(self.commit(Line::connecting(id, from, to)))
    }

    // === Queries ===

    /// Path commands of a committed line, empty if unknown or never routed.
    pub fn compute_line_path(&self, line_id: i32) -> SharedString {
        self.lines
            .borrow()
            .find(line_id)
            .map(|l| l.path_commands())
            .unwrap_or_default()
            .into()
    }

    /// Find the committed line under the given position.
    ///
    /// Returns the line ID, or -1 if no line is within the configured hover distance.
    pub fn find_line_at(&self, x: f32, y: f32) -> i32 {
        self.lines.borrow().find_line_at(x, y)
    }

    /// Find the connector under the given position.
    ///
    /// Returns the connector ID, or 0 if no connector is within `hit_radius`.
    pub fn find_connector_at(&self, x: f32, y: f32, hit_radius: f32) -> i32 {
        self.cache.borrow().find_connector_at(x, y, hit_radius)
    }

    // === Internals ===

    fn validate(&self, from: i32, to: i32) -> Result<(), ValidationError> {
        let cache = self.cache.borrow();
        let lines = self.lines.borrow();
        self.validator
            .borrow()
            .validate(from, to, &cache, lines.lines())
            .into_result()
    }

    fn commit(&self, line: Line) -> i32 {
        let id = line.id();
        let mut lines = self.lines.borrow_mut();
        lines.add(line);
        lines.recompute(id);
        tracing::debug!(line = id, "line committed");
        id
    }

    /// Hand out an ID clear of committed lines, the drag and anything issued before.
    fn allocate_id(&self) -> i32 {
        let mut id = self.next_id.get().max(self.lines.borrow().next_id());
        if let Some(state) = self.drag.borrow().as_ref() {
            let dragged = std::iter::once(&state.line).chain(state.original.as_ref());
            for line in dragged {
                id = id.max(line.id() + 1);
            }
        }
        self.next_id.set(id + 1);
        id
    }

    fn recompute_line(&self, line: &mut Line) {
        let config = self.config();
        let cache = self.cache.borrow();
        let id = line.id();
        if let Err(err) = line.recompute(&*cache, &config) {
            tracing::warn!(line = id, %err, "keeping previous route");
        }
    }

    fn replace_drag(&self, state: DragState) {
        let previous = self.drag.borrow_mut().replace(state);
        if let Some(original) = previous.and_then(|s| s.original) {
            let id = original.id();
            let mut lines = self.lines.borrow_mut();
            lines.add(original);
            lines.recompute(id);
        }
    }
}
