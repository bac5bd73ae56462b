//! Error type shared by the operator builder and the update engine.
//!
//! Every variant is a configuration or programming fault. Nothing here is
//! transient, so callers never retry; they fix the input and try again.

use thiserror::Error;

use crate::id::PropertyKey;

/// Errors from operator construction and from `advance()`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// Malformed dt/weight relationship, empty graph, zero maximum lag,
    /// or an otherwise invalid configuration value.
    #[error("configuration error: {reason}")]
    Configuration {
        /// Human-readable description of what is wrong.
        reason: String,
    },

    /// A state vector's length differs from the graph's vertex count.
    #[error("property '{property}' has {actual} values, expected {expected}")]
    DimensionMismatch {
        /// The offending property.
        property: PropertyKey,
        /// The graph's vertex count.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// A lag was requested that the history buffer does not hold yet.
    #[error("property '{property}' history holds {depth} snapshots, lag {lag} requested")]
    HistoryUnderflow {
        /// The property whose history was read.
        property: PropertyKey,
        /// The requested lag.
        lag: usize,
        /// Number of snapshots currently retained.
        depth: usize,
    },

    /// A rule, kernel, or query names a property the simulation does not have.
    #[error("unknown property '{name}'")]
    UnknownProperty {
        /// The name that failed to resolve.
        name: String,
    },

    /// A tick produced NaN or infinity; the tick was not committed.
    #[error("non-finite value in property '{property}' at vertex {vertex}")]
    NonFinite {
        /// The property holding the bad value.
        property: PropertyKey,
        /// Index of the first non-finite vertex.
        vertex: usize,
    },
}

impl EngineError {
    /// Shorthand for [`EngineError::Configuration`].
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`EngineError::UnknownProperty`].
    pub fn unknown(name: impl AsRef<str>) -> Self {
        Self::UnknownProperty {
            name: name.as_ref().to_string(),
        }
    }
}
