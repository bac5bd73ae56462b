//! Rias: a graph spatiotemporal update engine.
//!
//! Properties live on the vertices of a weighted graph whose edge weights
//! are propagation delays. Each `(target, source)` property pair gets a
//! space kernel and a time kernel, which are compiled into a sparse lagged
//! operator. Every tick convolves each source's history through its
//! operator and commits all properties together.
//!
//! This is the facade crate; it re-exports the sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use rias::prelude::*;
//!
//! let mut heat = vec![0.0; 10];
//! heat[0] = 100.0;
//! let config = SimulationConfig::new(lattice::ring(10, 1.0).unwrap(), 1.0)
//!     .with_property("heat", heat)
//!     .with_rule(("heat", "heat", 0, -1.0))
//!     .with_kernel("heat", "heat", KernelPair::laplacian())
//!     .with_alpha_gain(0.1);
//!
//! let mut engine = UpdateEngine::new(config).unwrap();
//! engine.run(3).unwrap();
//! assert_eq!(engine.timestep(), TickId(3));
//!
//! let total: f64 = engine.current_state("heat").unwrap().iter().sum();
//! assert!((total - 100.0 * 0.8f64.powi(3)).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rias-core` | Property keys, tick IDs, coupling rules, errors |
//! | [`graph`] | `rias-graph` | `Topology` trait, weighted graphs, lattices |
//! | [`kernel`] | `rias-kernel` | Space and time kernels |
//! | [`operator`] | `rias-operator` | Tensor builder and sparse operators |
//! | [`engine`] | `rias-engine` | Configuration, history and the update engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`rias-core`).
pub use rias_core as types;

/// Graph topologies (`rias-graph`).
///
/// Implement [`graph::Topology`] for a custom graph, or use
/// [`graph::WeightedGraph`] and the [`graph::lattice`] presets.
pub use rias_graph as graph;

/// Response kernels (`rias-kernel`).
pub use rias_kernel as kernel;

/// Operator construction (`rias-operator`).
///
/// [`operator::TensorBuilder`] turns a graph and a
/// [`kernel::KernelPair`] into a [`operator::SparseOperator`].
pub use rias_operator as operator;

/// The update engine (`rias-engine`).
pub use rias_engine as engine;

/// Common imports for typical Rias usage.
///
/// ```rust
/// use rias::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use rias_core::{CouplingRule, EngineError, PropertyKey, TickId};

    // Graph
    pub use rias_graph::{lattice, EdgeBehavior, GraphError, Topology, WeightedGraph};

    // Kernels
    pub use rias_kernel::{Identity, Kernel, KernelPair, Laplacian, Scaled, Table, Zero};

    // Operators
    pub use rias_operator::{OperatorSet, SparseOperator, TensorBuilder};

    // Engine
    pub use rias_engine::{
        AdvanceMetrics, AdvanceReport, HistoryFill, SimulationConfig, UpdateEngine,
    };
}
