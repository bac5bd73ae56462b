//! Benchmark profiles for the Rias graph simulator.
//!
//! - [`ring_profile`]: heat diffusion on a unit-delay ring
//! - [`grid_profile`]: heat diffusion on a square 4-connected grid
//! - [`delayed_ring_profile`]: wave coupling on a ring whose edges span
//!   several ticks, so every tick convolves a deep history

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rias_engine::SimulationConfig;
use rias_graph::{lattice, EdgeBehavior};
use rias_kernel::{KernelPair, Laplacian, Table};

/// Deterministic bumpy initial state: `sin(v * 0.1)` shifted to be
/// non-negative.
pub fn initial_profile(len: usize) -> Vec<f64> {
    (0..len).map(|v| 1.0 + (v as f64 * 0.1).sin()).collect()
}

/// Heat diffusion on a ring of `len` vertices, `alpha_gain = 0.1`.
///
/// # Panics
///
/// Panics if `len == 0`.
pub fn ring_profile(len: usize) -> SimulationConfig {
    let ring = lattice::ring(len, 1.0).unwrap();
    SimulationConfig::new(ring, 1.0)
        .with_property("heat", initial_profile(len))
        .with_rule(("heat", "heat", 0, -1.0))
        .with_kernel("heat", "heat", KernelPair::laplacian())
        .with_alpha_gain(0.1)
}

/// Heat diffusion on a `side x side` grid with absorbing edges.
///
/// # Panics
///
/// Panics if `side == 0`.
pub fn grid_profile(side: usize) -> SimulationConfig {
    let grid = lattice::grid4(side, side, 1.0, EdgeBehavior::Absorb).unwrap();
    SimulationConfig::new(grid, 1.0)
        .with_property("heat", initial_profile(side * side))
        .with_rule(("heat", "heat", 0, -1.0))
        .with_kernel("heat", "heat", KernelPair::laplacian())
        .with_alpha_gain(0.05)
}

/// Wave coupling on a ring whose edges are `delay` ticks long.
///
/// The time kernel decays geometrically so every lag slice holds entries.
///
/// # Panics
///
/// Panics if `len == 0` or `delay == 0`.
pub fn delayed_ring_profile(len: usize, delay: usize) -> SimulationConfig {
    let ring = lattice::ring(len, delay as f64).unwrap();
    let time: Vec<f64> = (0..delay).map(|k| 0.5f64.powi(k as i32)).collect();
    SimulationConfig::new(ring, 1.0)
        .with_property("position", initial_profile(len))
        .with_property("velocity", vec![0.0; len])
        .with_rule(("velocity", "position", 1, -1.0))
        .with_kernel(
            "velocity",
            "position",
            KernelPair::new(Laplacian, Table::new(time)),
        )
        .with_alpha_gain(0.01)
}
