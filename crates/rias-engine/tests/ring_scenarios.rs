//! Integration tests: end-to-end scenarios on periodic rings.
//!
//! Covers the diffusion spike on a 10-vertex ring, the velocity/position
//! antiderivative chain on a 5-vertex ring, and identity-kernel
//! passthrough with delayed edges.

use rias_core::TickId;
use rias_engine::{SimulationConfig, UpdateEngine};
use rias_graph::lattice;
use rias_kernel::{Identity, KernelPair, Zero};

fn spike(n: usize, at: usize, value: f64) -> Vec<f64> {
    let mut v = vec![0.0; n];
    v[at] = value;
    v
}

fn diffusion_engine(alpha: f64) -> UpdateEngine {
    let config = SimulationConfig::new(lattice::ring(10, 1.0).unwrap(), 1.0)
        .with_property("position", spike(10, 0, 100.0))
        .with_rule(("position", "position", 0, -1.0))
        .with_kernel("position", "position", KernelPair::laplacian())
        .with_alpha_gain(alpha);
    UpdateEngine::new(config).unwrap()
}

// ── Diffusion on a 10-ring ─────────────────────────────────────────

#[test]
fn spike_reaches_both_neighbours_after_one_tick() {
    let alpha = 0.1;
    let mut engine = diffusion_engine(alpha);

    // The operator's contribution at the neighbours is -1/2 * 100.
    let op = engine.operator("position", "position").unwrap();
    let mut delta = vec![0.0; 10];
    op.apply(0, engine.current_state("position").unwrap(), &mut delta);
    assert_eq!(delta[1], -50.0);
    assert_eq!(delta[9], -50.0);
    assert_eq!(delta[0], 300.0);
    assert_eq!(delta[5], 0.0);

    engine.advance().unwrap();
    let x = engine.current_state("position").unwrap();
    // new = old + c * alpha * delta, with c = -1.
    assert!((x[1] - 5.0).abs() < 1e-12);
    assert!((x[9] - 5.0).abs() < 1e-12);
    assert!((x[0] - 70.0).abs() < 1e-12);
    assert_eq!(x[1], x[9]);
    for v in 2..=8 {
        assert_eq!(x[v], 0.0, "vertex {v}");
    }
}

#[test]
fn spike_settles_into_uniform_profile() {
    let alpha = 0.1;
    let mut engine = diffusion_engine(alpha);
    let ticks = 400;
    engine.run(ticks).unwrap();

    let x = engine.current_state("position").unwrap();
    let sum: f64 = x.iter().sum();
    // Each column of the operator sums to 3 - 2 * 0.5 = 2, so the total
    // scales by (1 - 2 * alpha) per tick.
    let expected = 100.0 * (1.0 - 2.0 * alpha).powi(ticks as i32);
    assert!(((sum - expected) / expected).abs() < 1e-9);

    for (v, &xi) in x.iter().enumerate() {
        let share = xi / sum;
        assert!((share - 0.1).abs() < 1e-3, "vertex {v} share {share}");
    }
}

#[test]
fn profile_stays_symmetric() {
    let mut engine = diffusion_engine(0.05);
    engine.run(25).unwrap();
    let x = engine.current_state("position").unwrap();
    for k in 1..5 {
        assert!((x[k] - x[10 - k]).abs() < 1e-9, "k = {k}");
    }
}

// ── Antiderivative chain on a 5-ring ─────────────────────────────────

fn wave_engine(alpha: f64) -> UpdateEngine {
    let config = SimulationConfig::new(lattice::ring(5, 1.0).unwrap(), 1.0)
        .with_property("position", spike(5, 0, 1.0))
        .with_property("velocity", vec![0.0; 5])
        .with_rule(("velocity", "position", 1, -1.0))
        .with_kernel("velocity", "position", KernelPair::laplacian())
        .with_alpha_gain(alpha);
    UpdateEngine::new(config).unwrap()
}

#[test]
fn velocity_is_driven_by_position_laplacian() {
    let alpha = 0.2;
    let mut engine = wave_engine(alpha);
    engine.advance().unwrap();

    // Laplacian delta of the spike: 3 at the spike, -1/2 at neighbours.
    let v = engine.current_state("velocity").unwrap();
    let expected = [-3.0 * alpha, 0.5 * alpha, 0.0, 0.0, 0.5 * alpha];
    for (got, want) in v.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn position_integrates_new_velocity_exactly_once() {
    let mut engine = wave_engine(0.2);
    let mut before = engine.current_state("position").unwrap().to_vec();
    for _ in 0..3 {
        engine.advance().unwrap();
        let v = engine.current_state("velocity").unwrap().to_vec();
        let p = engine.current_state("position").unwrap();
        for i in 0..5 {
            assert!((p[i] - (before[i] + v[i])).abs() < 1e-12, "vertex {i}");
        }
        before = p.to_vec();
    }
}

#[test]
fn second_order_chain_integrates_velocity_twice() {
    let config = SimulationConfig::new(lattice::ring(5, 1.0).unwrap(), 1.0)
        .with_property("position", spike(5, 0, 1.0))
        .with_property("velocity", vec![0.0; 5])
        .with_rule(("velocity", "position", 2, -1.0))
        .with_kernel("velocity", "position", KernelPair::laplacian())
        .with_alpha_gain(0.2);
    let mut engine = UpdateEngine::new(config).unwrap();

    let mut before = engine.current_state("position").unwrap().to_vec();
    for _ in 0..3 {
        engine.advance().unwrap();
        let v = engine.current_state("velocity").unwrap().to_vec();
        let p = engine.current_state("position").unwrap();
        for i in 0..5 {
            assert!(
                (p[i] - (before[i] + 2.0 * v[i])).abs() < 1e-12,
                "vertex {i}"
            );
        }
        before = p.to_vec();
    }
}

#[test]
fn wave_conserves_total_position_and_velocity() {
    // Column sums of the Laplacian operator cancel the c = -1 delta
    // against the degree term, so velocity sum changes by -2 * alpha * P.
    let alpha = 0.2;
    let mut engine = wave_engine(alpha);
    let p0: f64 = engine.current_state("position").unwrap().iter().sum();
    engine.advance().unwrap();
    let v1: f64 = engine.current_state("velocity").unwrap().iter().sum();
    let p1: f64 = engine.current_state("position").unwrap().iter().sum();
    assert!((v1 - (-2.0 * alpha * p0)).abs() < 1e-12);
    assert!((p1 - (p0 + v1)).abs() < 1e-12);
}

// ── Passthrough and isolation ──────────────────────────────────────

#[test]
fn identity_kernels_do_not_mix_vertices() {
    // Weight-2 edges land at lag 1 where the single-tick time kernel is
    // zero, so only the self term survives.
    let initial: Vec<f64> = (0..8).map(|v| v as f64).collect();
    let config = SimulationConfig::new(lattice::ring(8, 2.0).unwrap(), 1.0)
        .with_property("x", initial.clone())
        .with_rule(("x", "x", 0, 1.0))
        .with_kernel("x", "x", KernelPair::new(Identity, Identity))
        .with_alpha_gain(0.5);
    let mut engine = UpdateEngine::new(config).unwrap();
    assert_eq!(engine.max_history(), 2);

    engine.advance().unwrap();
    let x = engine.current_state("x").unwrap();
    for (i, (&got, &was)) in x.iter().zip(&initial).enumerate() {
        assert_eq!(got, 1.5 * was, "vertex {i}");
    }
}

#[test]
fn zero_pair_leaves_target_untouched() {
    let config = SimulationConfig::new(lattice::ring(6, 1.0).unwrap(), 1.0)
        .with_property("a", spike(6, 2, 9.0))
        .with_property("b", vec![1.0; 6])
        .with_rule(("b", "a", 0, 1.0))
        .with_kernel("b", "a", KernelPair::new(Zero, Zero));
    let mut engine = UpdateEngine::new(config).unwrap();
    engine.run(10).unwrap();
    assert_eq!(engine.current_state("b").unwrap(), &[1.0; 6]);
    assert_eq!(engine.current_state("a").unwrap(), &spike(6, 2, 9.0)[..]);
    assert_eq!(engine.timestep(), TickId(10));
}
