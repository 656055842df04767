//! Routing configuration.

use crate::clearance::{DEFAULT_CLEARANCE, MIN_CLEARANCE};

/// Tunables for route computation and hit testing.
///
/// The defaults match the editor's stock look; override them with the builder-style
/// setters.
///
/// ```ignore
/// let config = RoutingConfig::default().with_clearance(12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingConfig {
    /// Straight-out distance before a path may turn (default: 20.0)
    pub clearance: f32,
    /// Maximum pointer distance for hitting a line (default: 6.0)
    pub hover_distance: f32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            clearance: DEFAULT_CLEARANCE,
            hover_distance: 6.0,
        }
    }
}

impl RoutingConfig {
    /// Values below [`MIN_CLEARANCE`] are raised to it. A deserialized config is
    /// taken as is; routing applies the same floor.
    pub fn with_clearance(mut self, clearance: f32) -> Self {
        self.clearance = clearance.max(MIN_CLEARANCE);
        self
    }

    pub fn with_hover_distance(mut self, hover_distance: f32) -> Self {
        self.hover_distance = hover_distance.max(0.0);
        self
    }
}
