//! Diffuse a heat spike around a 10-vertex ring and print the state.
//!
//! Run with `RUST_LOG=rias_engine=trace` to see per-tick spans.

use rias_engine::{SimulationConfig, UpdateEngine};
use rias_graph::lattice;
use rias_kernel::KernelPair;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rias_engine=debug"));
    fmt().with_env_filter(filter).with_target(false).init();

    let mut initial = vec![0.0; 10];
    initial[0] = 100.0;
    let config = SimulationConfig::new(lattice::ring(10, 1.0)?, 1.0)
        .with_property("temperature", initial)
        .with_rule(("temperature", "temperature", 0, -1.0))
        .with_kernel("temperature", "temperature", KernelPair::laplacian())
        .with_alpha_gain(0.1);

    let mut engine = UpdateEngine::new(config)?;
    for _ in 0..20 {
        let report = engine.advance()?;
        let state = engine.current_state("temperature")?;
        let cells: Vec<String> = state.iter().map(|v| format!("{v:7.3}")).collect();
        println!("t={:>5.1} [{}]", report.time, cells.join(" "));
    }
    Ok(())
}
