//! Per-tick metrics.
//!
//! [`AdvanceMetrics`] captures timing and work counts for a single tick.
//! [`AdvanceReport`] is what a successful `advance()` returns.

use rias_core::TickId;

/// Timing and work counts collected during one tick.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdvanceMetrics {
    /// Wall-clock time for the entire tick.
    pub total_us: u64,
    /// Time spent convolving history through the operators.
    pub delta_us: u64,
    /// Time spent staging deltas and applying antiderivative chains.
    pub chain_us: u64,
    /// Time spent validating, swapping state, and pushing history.
    pub commit_us: u64,
    /// Number of stored operator entries multiplied this tick.
    pub entries_applied: usize,
}

/// Result of a successful tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvanceReport {
    /// The tick that was just committed.
    pub tick: TickId,
    /// Simulation time after the tick.
    pub time: f64,
    /// Metrics for this tick.
    pub metrics: AdvanceMetrics,
}
