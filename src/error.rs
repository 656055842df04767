use crate::direction::RouteKind;

pub type Result<T> = std::result::Result<T, RoutingError>;

/// Reasons a line could not be recomputed.
///
/// All of them leave the line's previous route in place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    #[error("shape {0} not found")]
    MissingShape(i32),

    #[error("connector {0} not found")]
    MissingConnector(i32),

    #[error("non-finite geometry while routing {kind}")]
    NonFiniteGeometry { kind: RouteKind },
}
