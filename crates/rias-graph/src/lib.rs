//! Graph topologies for Rias simulations.
//!
//! This crate defines the [`Topology`] trait, the boundary through which the
//! update engine sees a graph: vertex count, weighted adjacency, and degree
//! queries. Edge weights are propagation delays, not costs.
//!
//! # Backends
//!
//! - [`WeightedGraph`]: adjacency-list graph, directed or undirected
//! - [`lattice`]: ring, line and 2D grid presets with configurable [`EdgeBehavior`]
//! - [`random`]: seeded random directed graphs

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod error;
pub mod lattice;
pub mod random;
pub mod topology;
pub mod weighted;

pub use edge::EdgeBehavior;
pub use error::GraphError;
pub use random::{random_graph, RandomGraphSpec};
pub use topology::{Edge, Topology};
pub use weighted::WeightedGraph;
