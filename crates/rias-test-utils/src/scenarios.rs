//! Standard experiment configurations.
//!
//! Each function returns an unbuilt [`SimulationConfig`]; callers
//! can still chain `with_*` overrides before building the engine.

use rias_graph::{lattice, random_graph, RandomGraphSpec};
use rias_kernel::KernelPair;
use rias_engine::SimulationConfig;

use crate::fixtures::spike;

/// Heat diffusion on a unit-delay ring: a single `position` property
/// starting with a spike of 100 at vertex 0, rule `(position, position,
/// 0, -1)`, Laplacian kernels, `alpha_gain = 0.1`.
///
/// # Panics
///
/// Panics if `len == 0`.
pub fn heat_ring(len: usize) -> SimulationConfig {
    let ring = lattice::ring(len, 1.0).expect("ring length must be nonzero");
    SimulationConfig::new(ring, 1.0)
        .with_property("position", spike(len, 0, 100.0))
        .with_rule(("position", "position", 0, -1.0))
        .with_kernel("position", "position", KernelPair::laplacian())
        .with_alpha_gain(0.1)
}

/// Wave propagation on a unit-delay ring: `velocity` is driven by the
/// Laplacian of `position` and chained back into it once per tick.
/// `position` starts with a unit spike at vertex 0, `alpha_gain = 0.2`.
///
/// # Panics
///
/// Panics if `len == 0`.
pub fn wave_ring(len: usize) -> SimulationConfig {
    let ring = lattice::ring(len, 1.0).expect("ring length must be nonzero");
    SimulationConfig::new(ring, 1.0)
        .with_property("position", spike(len, 0, 1.0))
        .with_property("velocity", vec![0.0; len])
        .with_rule(("velocity", "position", 1, -1.0))
        .with_kernel("velocity", "position", KernelPair::laplacian())
        .with_alpha_gain(0.2)
}

/// Diffusion on a seeded random directed graph with unit delays.
///
/// The spike sits at vertex 0 with value 1, `alpha_gain = 0.05`.
///
/// # Panics
///
/// Panics if the default random graph spec fails to generate, which it
/// cannot for the built-in ranges.
pub fn random_diffusion(seed: u64) -> SimulationConfig {
    let graph = random_graph(&RandomGraphSpec::default(), seed)
        .expect("default random graph spec is valid");
    let len = rias_graph::Topology::vertex_count(&graph);
    SimulationConfig::new(graph, 1.0)
        .with_property("position", spike(len, 0, 1.0))
        .with_rule(("position", "position", 0, -1.0))
        .with_kernel("position", "position", KernelPair::laplacian())
        .with_alpha_gain(0.05)
}
