use crate::geometry::SimpleShape;
use crate::line::Line;
use crate::state::GeometryCache;
use std::fmt;

/// Trait for connection data to support topology queries and validation.
///
/// [`Line`] implements this; implement it for your own persisted connection type
/// to run the validators against it.
///
/// # Example
///
/// ```ignore
/// struct MyConnection {
///     id: i32,
///     from: i32,
///     to: i32,
///     label: String,  // custom field
/// }
///
/// impl LineModel for MyConnection {
///     fn id(&self) -> i32 { self.id }
///     fn from_connector_id(&self) -> i32 { self.from }
///     fn to_connector_id(&self) -> Option<i32> { Some(self.to) }
/// }
/// ```
pub trait LineModel {
    /// Unique identifier for the line
    fn id(&self) -> i32;
    /// Connector the line starts from
    fn from_connector_id(&self) -> i32;
    /// Connector the line ends at, `None` while the end is unattached
    fn to_connector_id(&self) -> Option<i32>;
}

impl LineModel for Line {
    fn id(&self) -> i32 { Line::id(self) }
    fn from_connector_id(&self) -> i32 { self.from_connector() }
    fn to_connector_id(&self) -> Option<i32> { self.to_connector() }
}

/// Simple attached connection implementing [`LineModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleConnection {
    pub id: i32,
    pub from_connector_id: i32,
    pub to_connector_id: i32,
}

impl SimpleConnection {
    pub fn new(id: i32, from_connector_id: i32, to_connector_id: i32) -> Self {
        Self { id, from_connector_id, to_connector_id }
    }
}

impl LineModel for SimpleConnection {
    fn id(&self) -> i32 { self.id }
    fn from_connector_id(&self) -> i32 { self.from_connector_id }
    fn to_connector_id(&self) -> Option<i32> { Some(self.to_connector_id) }
}

/// Helper functions for graph operations
pub struct GraphLogic;

impl GraphLogic {
    /// Find all lines touching a specific shape
    ///
    /// Lines whose connectors are no longer in the cache are not reported.
    ///
    /// # Arguments
    /// * `shape_id` - The ID of the shape being deleted/queried
    /// * `lines` - Iterator over the lines
    /// * `cache` - Geometry cache to look up connector ownership
    pub fn find_lines_connected_to_shape<'a, I, L, S>(
        shape_id: i32,
        lines: I,
        cache: &GeometryCache<S>,
    ) -> Vec<i32>
    where
        I: IntoIterator<Item = &'a L>,
        L: LineModel + 'a,
    {
        let owner = |connector: i32| cache.connectors.get(&connector).map(|c| c.shape_id);

        lines
            .into_iter()
            .filter(|line| {
                owner(line.from_connector_id()) == Some(shape_id)
                    || line.to_connector_id().and_then(owner) == Some(shape_id)
            })
            .map(|l| l.id())
            .collect()
    }

    /// Check if a connection with the given direction already exists
    ///
    /// Prevents duplicate connections between the same connectors.
    pub fn duplicate_connection_exists<'a, I, L>(from: i32, to: i32, lines: I) -> bool
    where
        I: IntoIterator<Item = &'a L>,
        L: LineModel + 'a,
    {
        lines.into_iter().any(|line| {
            line.from_connector_id() == from && line.to_connector_id() == Some(to)
        })
    }
}

// ============================================================================
// Connection Validation Framework
// ============================================================================

/// Result of connection validation with optional rejection reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Connection is valid
    Valid,
    /// Connection is invalid with a reason
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Check if the result is valid
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Combine two results (AND logic): returns first error if any
    pub fn and(self, other: ValidationResult) -> ValidationResult {
        match self {
            ValidationResult::Valid => other,
            invalid => invalid,
        }
    }

    /// Convert into a `Result` for use with `?`
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(err) => Err(err),
        }
    }
}

/// Reasons why a connection validation failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Connector does not exist in the geometry cache
    ConnectorNotFound(i32),
    /// Cannot connect a connector to itself
    SameConnector,
    /// Cannot connect two connectors of the same shape
    SameShape,
    /// Connector does not allow lines to start from it
    CannotOriginate(i32),
    /// Connector does not accept incoming lines
    CannotReceive(i32),
    /// A connection between these connectors already exists
    DuplicateConnection,
    /// No line is being dragged
    NoActiveDrag,
    /// No line with this ID exists
    LineNotFound(i32),
    /// Custom validation failure
    Custom(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectorNotFound(id) => write!(f, "Connector {} not found", id),
            Self::SameConnector => write!(f, "Cannot connect connector to itself"),
            Self::SameShape => write!(f, "Cannot connect connectors on same shape"),
            Self::CannotOriginate(id) => write!(f, "Connector {} cannot start a line", id),
            Self::CannotReceive(id) => write!(f, "Connector {} cannot receive a line", id),
            Self::DuplicateConnection => write!(f, "Connection already exists"),
            Self::NoActiveDrag => write!(f, "No line is being dragged"),
            Self::LineNotFound(id) => write!(f, "Line {} not found", id),
            Self::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trait for custom connection validation logic.
///
/// Implement this to add custom rules for connecting connectors.
/// Use with `validate_connection()` or compose with `CompositeValidator`.
///
/// The trait is generic over:
/// - `S`: The shape geometry type (defaults to `SimpleShape`)
/// - `L`: The line type for accessing existing lines (must implement `LineModel`)
pub trait ConnectionValidator<S = SimpleShape, L = Line> {
    /// Check if a line from `from` to `to` is allowed
    ///
    /// # Arguments
    /// * `from` - ID of the connector the line starts at
    /// * `to` - ID of the connector the line is dropped on
    /// * `cache` - Geometry cache for connector information
    /// * `lines` - Existing lines for duplicate/fan-out checks
    fn validate(
        &self,
        from: i32,
        to: i32,
        cache: &GeometryCache<S>,
        lines: &[L],
    ) -> ValidationResult;
}

/// Default validator: checks connector existence, ownership and flags
///
/// This validator implements the standard validation rules:
/// 1. Connectors must exist
/// 2. Connectors must differ and belong to different shapes
/// 3. The from connector can originate, the to connector can receive
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicConnectionValidator;

impl<S, L> ConnectionValidator<S, L> for BasicConnectionValidator {
    fn validate(
        &self,
        from: i32,
        to: i32,
        cache: &GeometryCache<S>,
        _lines: &[L],
    ) -> ValidationResult {
        if from == to {
            return ValidationResult::Invalid(ValidationError::SameConnector);
        }

        let from_connector = match cache.connectors.get(&from) {
            Some(c) => c,
            None => return ValidationResult::Invalid(ValidationError::ConnectorNotFound(from)),
        };
        let to_connector = match cache.connectors.get(&to) {
            Some(c) => c,
            None => return ValidationResult::Invalid(ValidationError::ConnectorNotFound(to)),
        };

        if from_connector.shape_id == to_connector.shape_id {
            return ValidationResult::Invalid(ValidationError::SameShape);
        }
        if !from_connector.can_originate {
            return ValidationResult::Invalid(ValidationError::CannotOriginate(from));
        }
        if !to_connector.can_receive {
            return ValidationResult::Invalid(ValidationError::CannotReceive(to));
        }

        ValidationResult::Valid
    }
}

/// Validator that prevents duplicate connections
#[derive(Clone, Debug, Default)]
pub struct NoDuplicatesValidator;

impl<S, L> ConnectionValidator<S, L> for NoDuplicatesValidator
where
    L: LineModel,
{
    fn validate(
        &self,
        from: i32,
        to: i32,
        _cache: &GeometryCache<S>,
        lines: &[L],
    ) -> ValidationResult {
        if GraphLogic::duplicate_connection_exists(from, to, lines) {
            ValidationResult::Invalid(ValidationError::DuplicateConnection)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Composite validator that combines multiple validators
///
/// All validators must return Valid for the connection to be valid (AND logic).
/// Returns the first error encountered (short-circuits on failure).
///
/// # Example
///
/// ```ignore
/// let validator = CompositeValidator::new()
///     .add(BasicConnectionValidator)
///     .add(NoDuplicatesValidator);
///
/// let result = validator.validate(from, to, &cache, &lines);
/// ```
pub struct CompositeValidator<S = SimpleShape, L = Line> {
    validators: Vec<Box<dyn ConnectionValidator<S, L>>>,
}

impl<S, L> Default for CompositeValidator<S, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, L> CompositeValidator<S, L> {
    /// Create a new empty composite validator
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Add a validator to the composite
    ///
    /// Validators are checked in the order they were added.
    pub fn add<V: ConnectionValidator<S, L> + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }
}

impl<S, L> ConnectionValidator<S, L> for CompositeValidator<S, L> {
    fn validate(
        &self,
        from: i32,
        to: i32,
        cache: &GeometryCache<S>,
        lines: &[L],
    ) -> ValidationResult {
        for v in &self.validators {
            let result = v.validate(from, to, cache, lines);
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}

/// Convenience function to validate a connection with any validator
///
/// # Example
///
/// ```ignore
/// match validate_connection(from, to, &cache, &lines, &BasicConnectionValidator) {
///     ValidationResult::Valid => { /* attach the line */ }
///     ValidationResult::Invalid(err) => eprintln!("Cannot connect: {}", err),
/// }
/// ```
pub fn validate_connection<V, S, L>(
    from: i32,
    to: i32,
    cache: &GeometryCache<S>,
    lines: &[L],
    validator: &V,
) -> ValidationResult
where
    V: ConnectionValidator<S, L>,
{
    validator.validate(from, to, cache, lines)
}

// ============================================================================
// Tests
// ============================================================================
