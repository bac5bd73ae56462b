//! Integration tests: tick atomicity, history bounds, clock, and
//! reconfiguration between ticks.

use proptest::prelude::*;
use rias_core::{EngineError, TickId};
use rias_engine::{EngineState, HistoryFill, SimulationConfig, UpdateEngine};
use rias_graph::lattice;
use rias_kernel::{KernelPair, Laplacian, Table};

fn delayed_ring_config(fill: HistoryFill) -> SimulationConfig {
    // Weight-2 edges put neighbour coupling at lag 1.
    SimulationConfig::new(lattice::ring(6, 2.0).unwrap(), 1.0)
        .with_property("x", vec![0.0, 0.0, 6.0, 0.0, 0.0, 0.0])
        .with_rule(("x", "x", 0, -1.0))
        .with_kernel("x", "x", KernelPair::new(Laplacian, Table::new(vec![1.0, 0.5])))
        .with_alpha_gain(0.1)
        .with_history_fill(fill)
}

// ── Rollback ───────────────────────────────────────────────────────

#[test]
fn strict_fill_rejects_tick_without_side_effects() {
    let mut engine = UpdateEngine::new(delayed_ring_config(HistoryFill::Strict)).unwrap();
    let before = engine.current_state("x").unwrap().to_vec();

    let err = engine.advance().unwrap_err();
    assert_eq!(
        err,
        EngineError::HistoryUnderflow {
            property: "x".into(),
            lag: 1,
            depth: 1,
        }
    );
    assert_eq!(engine.current_state("x").unwrap(), &before[..]);
    assert_eq!(engine.timestep(), TickId(0));
    assert_eq!(engine.history_len("x").unwrap(), 1);
    assert_eq!(engine.state(), EngineState::Ready);
}

#[test]
fn fill_policies_differ_only_while_history_is_short() {
    let mut repeat = UpdateEngine::new(delayed_ring_config(HistoryFill::RepeatOldest)).unwrap();
    let mut zero = UpdateEngine::new(delayed_ring_config(HistoryFill::Zero)).unwrap();

    repeat.advance().unwrap();
    zero.advance().unwrap();
    let r = repeat.current_state("x").unwrap();
    let z = zero.current_state("x").unwrap();
    // Lag 1 read the initial state under RepeatOldest and nothing under Zero.
    // At the spike the lag-1 diagonal is degree * time(1) = 2 * 0.5 = 1.
    assert!((z[2] - (6.0 - 0.1 * 6.0)).abs() < 1e-12);
    assert!((r[2] - (6.0 - 0.1 * (6.0 + 6.0))).abs() < 1e-12);
    // Neighbours only see the spike through lag 1.
    assert_eq!(z[1], 0.0);
    assert!((r[1] - 0.1 * 0.25 * 6.0).abs() < 1e-12);

    // Once history is full, both read real snapshots.
    assert_eq!(repeat.history_len("x").unwrap(), 2);
    assert_eq!(zero.history_len("x").unwrap(), 2);
}

#[test]
fn non_finite_tick_is_rolled_back() {
    let config = SimulationConfig::new(lattice::ring(4, 1.0).unwrap(), 1.0)
        .with_property("x", vec![1e300, 0.0, 0.0, 0.0])
        .with_rule(("x", "x", 0, -1.0))
        .with_kernel("x", "x", KernelPair::laplacian())
        .with_alpha_gain(1e10);
    let mut engine = UpdateEngine::new(config).unwrap();

    let err = engine.advance().unwrap_err();
    assert!(matches!(err, EngineError::NonFinite { vertex: 0, .. }));
    assert_eq!(engine.current_state("x").unwrap()[0], 1e300);
    assert_eq!(engine.timestep(), TickId(0));

    engine.set_alpha_gain(1e-3).unwrap();
    engine.advance().unwrap();
    assert_eq!(engine.timestep(), TickId(1));
    assert!(engine.current_state("x").unwrap()[0].is_finite());
}

#[test]
fn run_stops_at_first_error() {
    let mut engine = UpdateEngine::new(delayed_ring_config(HistoryFill::Strict)).unwrap();
    assert!(engine.run(10).is_err());
    assert_eq!(engine.timestep(), TickId(0));
}

// ── Reconfiguration ────────────────────────────────────────────────

#[test]
fn set_kernel_matches_fresh_engine() {
    let pair = || KernelPair::new(Laplacian, Table::new(vec![0.5]));
    let base = || {
        SimulationConfig::new(lattice::ring(7, 1.0).unwrap(), 1.0)
            .with_property("x", (0..7).map(|v| (v * v) as f64).collect())
            .with_rule(("x", "x", 0, -1.0))
            .with_alpha_gain(0.1)
    };

    let mut rebuilt = UpdateEngine::new(base().with_kernel("x", "x", KernelPair::laplacian())).unwrap();
    rebuilt.set_kernel("x", "x", pair()).unwrap();
    let mut fresh = UpdateEngine::new(base().with_kernel("x", "x", pair())).unwrap();

    assert_eq!(
        **rebuilt.operator("x", "x").unwrap(),
        **fresh.operator("x", "x").unwrap()
    );
    rebuilt.run(3).unwrap();
    fresh.run(3).unwrap();
    assert_eq!(
        rebuilt.current_state("x").unwrap(),
        fresh.current_state("x").unwrap()
    );
}

#[test]
fn reset_replays_identically() {
    let mut engine = UpdateEngine::new(delayed_ring_config(HistoryFill::RepeatOldest)).unwrap();
    let initial = engine.current_state("x").unwrap().to_vec();
    engine.run(7).unwrap();
    let first = engine.current_state("x").unwrap().to_vec();

    engine.reset();
    assert_eq!(engine.timestep(), TickId(0));
    assert_eq!(engine.time(), 0.0);
    assert_eq!(engine.current_state("x").unwrap(), &initial[..]);
    assert_eq!(engine.history_len("x").unwrap(), 1);
    assert_eq!(engine.last_metrics().entries_applied, 0);

    engine.run(7).unwrap();
    assert_eq!(engine.current_state("x").unwrap(), &first[..]);
}

#[test]
fn rules_on_one_target_accumulate() {
    let config = SimulationConfig::new(lattice::ring(4, 1.0).unwrap(), 1.0)
        .with_property("x", vec![4.0, 0.0, 0.0, 0.0])
        .with_property("source", vec![1.0, 2.0, 3.0, 4.0])
        .with_rule(("x", "x", 0, -1.0))
        .with_rule(("x", "source", 0, 2.0))
        .with_kernel("x", "x", KernelPair::laplacian())
        .with_kernel("x", "source", KernelPair::new(rias_kernel::Identity, rias_kernel::Zero))
        .with_alpha_gain(0.5);
    let mut engine = UpdateEngine::new(config).unwrap();
    engine.advance().unwrap();

    // Laplacian delta of x: [12, -2, 0, -2]; identity delta of source.
    let x = engine.current_state("x").unwrap();
    let expected = [
        4.0 - 0.5 * 12.0 + 1.0 * 1.0,
        0.0 + 0.5 * 2.0 + 1.0 * 2.0,
        0.0 + 1.0 * 3.0,
        0.0 + 0.5 * 2.0 + 1.0 * 4.0,
    ];
    for (got, want) in x.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12);
    }
    // The source has no rule targeting it.
    assert_eq!(engine.current_state("source").unwrap(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn unknown_property_queries_fail() {
    let engine = UpdateEngine::new(delayed_ring_config(HistoryFill::Zero)).unwrap();
    assert_eq!(
        engine.current_state("y").unwrap_err(),
        EngineError::unknown("y")
    );
    assert!(engine.history_len("y").is_err());
    assert!(engine.operator("x", "y").is_err());
}

// ── Properties ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn history_depth_tracks_timestep(delay in 1u32..6, ticks in 0u64..20) {
        let config = SimulationConfig::new(lattice::ring(5, delay as f64).unwrap(), 1.0)
            .with_property("x", vec![1.0, 0.0, 0.0, 0.0, 0.0])
            .with_rule(("x", "x", 0, -1.0))
            .with_kernel("x", "x", KernelPair::laplacian())
            .with_alpha_gain(0.01);
        let mut engine = UpdateEngine::new(config).unwrap();
        let max_history = engine.max_history();
        prop_assert_eq!(max_history, delay as usize);

        for t in 1..=ticks {
            engine.advance().unwrap();
            let len = engine.history_len("x").unwrap();
            prop_assert!(len <= max_history);
            prop_assert_eq!(len, ((t + 1) as usize).min(max_history));
        }
    }

    #[test]
    fn clock_advances_by_exactly_one_tick(ticks in 1u64..25, dt_tenths in 1u32..10) {
        let dt = dt_tenths as f64 / 10.0;
        // One edge per direction with a delay of exactly one dt.
        let config = SimulationConfig::new(lattice::ring(4, dt).unwrap(), dt)
            .with_property("x", vec![1.0, 2.0, 3.0, 4.0])
            .with_rule(("x", "x", 0, -1.0))
            .with_kernel("x", "x", KernelPair::laplacian())
            .with_alpha_gain(0.01);
        let mut engine = UpdateEngine::new(config).unwrap();

        let mut last = engine.timestep();
        for _ in 0..ticks {
            let report = engine.advance().unwrap();
            prop_assert_eq!(report.tick.0, last.0 + 1);
            prop_assert_eq!(engine.time(), report.tick.0 as f64 * dt);
            last = report.tick;
        }
        prop_assert_eq!(engine.timestep(), TickId(ticks));
    }
}
