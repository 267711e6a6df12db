//! Error types for island map generation

use std::fmt;

/// Errors that can occur during map generation or queries
#[derive(Debug, Clone)]
pub enum MapError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// The mesh geometry is degenerate (collinear corners, too few points)
    ///
    /// Not retried automatically: the generation parameters (point density,
    /// map size) are incompatible and the whole mesh must be rebuilt with
    /// different settings.
    Geometry(String),
    /// Adjacency or landmass bookkeeping broke an internal invariant
    InvariantViolation(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            MapError::Geometry(msg) => write!(f, "geometry error: {}", msg),
            MapError::InvariantViolation(msg) => write!(f, "invariant violation: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}

/// Result type alias for map operations
pub type Result<T> = std::result::Result<T, MapError>;
