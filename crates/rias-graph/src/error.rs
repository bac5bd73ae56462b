//! Error types for graph construction.

use rias_core::EngineError;
use thiserror::Error;

/// Errors arising from graph construction.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GraphError {
    /// Attempted to construct a graph with zero vertices.
    #[error("graph must have at least one vertex")]
    EmptyGraph,

    /// An edge endpoint is not a vertex of the graph.
    #[error("vertex {vertex} out of range for graph with {count} vertices")]
    VertexOutOfRange {
        /// The offending index.
        vertex: usize,
        /// Number of vertices in the graph.
        count: usize,
    },

    /// Edge weights are delays and must be finite and strictly positive.
    #[error("edge {source_vertex} -> {target} has invalid weight {weight}")]
    InvalidWeight {
        /// Edge source.
        source_vertex: usize,
        /// Edge target.
        target: usize,
        /// The rejected weight.
        weight: f64,
    },

    /// The adjacency already holds an entry for this vertex pair.
    #[error("edge {source_vertex} -> {target} already exists")]
    DuplicateEdge {
        /// Edge source.
        source_vertex: usize,
        /// Edge target.
        target: usize,
    },

    /// A generator range is empty or inverted.
    #[error("invalid range for {what}")]
    InvalidRange {
        /// Which range is invalid.
        what: &'static str,
    },
}

impl From<GraphError> for EngineError {
    fn from(e: GraphError) -> Self {
        EngineError::config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_configuration_error() {
        let e: EngineError = GraphError::VertexOutOfRange { vertex: 7, count: 3 }.into();
        assert_eq!(
            e,
            EngineError::config("vertex 7 out of range for graph with 3 vertices")
        );
    }
}
