//! Error types for physarum operations.
//!
//! Configuration and structural problems are detected when a run starts and
//! reported before any pheromone is touched. Agents that wander into a dead
//! end are not errors; their walk simply ends early.

use thiserror::Error;

/// Result type for physarum operations.
pub type Result<T> = std::result::Result<T, PhysarumError>;

/// Errors that can occur during physarum operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysarumError {
    /// Configuration errors.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Graph-related errors.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// I/O errors (wrapped).
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for PhysarumError {
    fn from(e: std::io::Error) -> Self {
        PhysarumError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for PhysarumError {
    fn from(e: serde_json::Error) -> Self {
        PhysarumError::Serialization(e.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid value.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Out of range. `max` is exclusive.
    #[error("{field} out of range: {value} (must be in [{min}, {max}))")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Graph-related errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(u64),

    /// Negative or NaN edge length.
    #[error("Invalid distance on edge {from} -> {to}: {distance}")]
    InvalidDistance { from: u64, to: u64, distance: f64 },

    /// Not enough nodes to pick distinct start and goal nodes.
    #[error("Graph has {found} node(s); at least 2 are needed to pick distinct endpoints")]
    TooFewNodes { found: usize },

    /// Start and goal of a route are the same node.
    #[error("Start and goal are the same node: {0}")]
    SameEndpoints(u64),
}

// Convenience constructors
impl PhysarumError {
    pub fn node_not_found(id: u64) -> Self {
        PhysarumError::Graph(GraphError::NodeNotFound(id))
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        PhysarumError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PhysarumError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    /// Whether this error stems from the run's configuration rather than the graph.
    pub fn is_config(&self) -> bool {
        matches!(self, PhysarumError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_the_field() {
        let err = PhysarumError::out_of_range("evaporation_rate", 0.0, 1.0, 1.5);
        assert_eq!(
            err.to_string(),
            "Config error: evaporation_rate out of range: 1.5 (must be in [0, 1))"
        );
        assert!(err.is_config());
    }

    #[test]
    fn graph_errors_convert() {
        let err: PhysarumError = GraphError::TooFewNodes { found: 1 }.into();
        assert!(!err.is_config());
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: PhysarumError = io.into();
        assert!(matches!(err, PhysarumError::Io(msg) if msg.contains("missing.json")));
    }
}
