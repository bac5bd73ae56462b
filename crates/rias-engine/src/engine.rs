//! The update engine: staged, all-or-nothing ticks.
//!
//! [`UpdateEngine`] owns the operators, the current state of every
//! property, and their history. Each [`advance()`](UpdateEngine::advance)
//! computes every rule's delta from history, stages the new values,
//! applies antiderivative chains, and only then commits state and
//! history together. A failed tick leaves the engine untouched.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use rias_core::{CouplingRule, EngineError, PropertyKey, TickId};
use rias_graph::Topology;
use rias_kernel::KernelPair;
use rias_operator::{OperatorSet, SparseOperator};
use tracing::{debug, info, instrument, trace, warn};

use crate::config::{check_state, HistoryFill, SimulationConfig};
use crate::history::HistoryStore;
use crate::metrics::{AdvanceMetrics, AdvanceReport};

// ── EngineState ──────────────────────────────────────────────────

/// Lifecycle state. `Advancing` is only ever observed from inside
/// [`UpdateEngine::advance`]; callers always see `Ready`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Between ticks.
    Ready,
    /// A tick is in progress.
    Advancing,
}

/// A rule with its property names resolved to positions.
#[derive(Clone, Copy, Debug)]
struct ResolvedRule {
    target: usize,
    source: usize,
    order: u32,
    constant: f64,
}

// ── UpdateEngine ─────────────────────────────────────────────────

/// Time-stepping engine for properties on a graph.
///
/// # Examples
///
/// ```
/// use rias_engine::{SimulationConfig, UpdateEngine};
/// use rias_graph::lattice;
/// use rias_kernel::KernelPair;
///
/// let mut initial = vec![0.0; 10];
/// initial[0] = 100.0;
/// let config = SimulationConfig::new(lattice::ring(10, 1.0).unwrap(), 1.0)
///     .with_property("position", initial)
///     .with_rule(("position", "position", 0, -1.0))
///     .with_kernel("position", "position", KernelPair::laplacian())
///     .with_alpha_gain(0.1);
///
/// let mut engine = UpdateEngine::new(config).unwrap();
/// engine.advance().unwrap();
///
/// let x = engine.current_state("position").unwrap();
/// assert!((x[1] - 5.0).abs() < 1e-12);
/// assert_eq!(engine.timestep().0, 1);
/// ```
pub struct UpdateEngine {
    topology: Box<dyn Topology>,
    properties: Vec<PropertyKey>,
    operators: OperatorSet,
    history: HistoryStore,
    rules: Vec<CouplingRule>,
    resolved: Vec<ResolvedRule>,
    states: Vec<Vec<f64>>,
    initial: Vec<Vec<f64>>,
    /// Scratch: next state per property.
    staged: Vec<Vec<f64>>,
    /// Scratch: delta per rule.
    deltas: Vec<Vec<f64>>,
    dt: f64,
    alpha_gain: f64,
    history_fill: HistoryFill,
    timestep: TickId,
    state: EngineState,
    last_metrics: AdvanceMetrics,
}

impl UpdateEngine {
    /// Validate `config`, build every operator, and seed history with the
    /// initial state.
    ///
    /// # Errors
    ///
    /// Anything [`SimulationConfig::validate`] or
    /// [`OperatorSet::build`] reports.
    pub fn new(config: SimulationConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let SimulationConfig {
            topology,
            initial_state,
            rules,
            kernels,
            dt,
            alpha_gain,
            history_fill,
        } = config;

        let properties: Vec<PropertyKey> = initial_state.keys().cloned().collect();
        let operators = OperatorSet::build(
            &*topology,
            dt,
            properties.iter().cloned(),
            kernels.into_iter().map(|((t, s), k)| (t, s, k)),
        )?;

        let resolved = rules
            .iter()
            .map(|rule| resolve(&operators, rule))
            .collect::<Result<Vec<_>, _>>()?;

        let initial: Vec<Vec<f64>> = initial_state.into_values().collect();
        let mut history = HistoryStore::new(operators.max_lag(), properties.iter().cloned());
        for (p, values) in initial.iter().enumerate() {
            history.ring_at_mut(p).push(values);
        }

        let vertices = operators.vertex_count();
        let engine = Self {
            topology,
            deltas: vec![vec![0.0; vertices]; resolved.len()],
            staged: initial.clone(),
            states: initial.clone(),
            initial,
            properties,
            operators,
            history,
            rules,
            resolved,
            dt,
            alpha_gain,
            history_fill,
            timestep: TickId::default(),
            state: EngineState::Ready,
            last_metrics: AdvanceMetrics::default(),
        };
        info!(
            vertices,
            properties = engine.properties.len(),
            rules = engine.rules.len(),
            max_history = engine.max_history(),
            dt,
            alpha_gain,
            "update engine created"
        );
        for rule in &engine.rules {
            engine.warn_if_inert(rule);
        }
        Ok(engine)
    }

    /// Advance the clock by one tick.
    ///
    /// # Errors
    ///
    /// - [`EngineError::HistoryUnderflow`] under [`HistoryFill::Strict`]
    ///   when an operator reads a lag the history does not hold yet.
    /// - [`EngineError::DimensionMismatch`] if a staged vector has the
    ///   wrong length.
    /// - [`EngineError::NonFinite`] if the tick produced NaN or infinity.
    ///
    /// On error, state, history and clock are unchanged.
    #[instrument(skip(self), fields(tick = self.timestep.0))]
    pub fn advance(&mut self) -> Result<AdvanceReport, EngineError> {
        self.state = EngineState::Advancing;
        let result = self.step();
        self.state = EngineState::Ready;
        if let Err(e) = &result {
            debug!(error = %e, "tick rolled back");
        }
        result
    }

    fn step(&mut self) -> Result<AdvanceReport, EngineError> {
        let tick_start = Instant::now();
        trace!("tick start");

        // 1. Deltas from history only.
        let delta_start = Instant::now();
        let mut entries_applied = 0;
        for (r, rule) in self.resolved.iter().enumerate() {
            let delta = &mut self.deltas[r];
            delta.fill(0.0);
            let op = self.operators.get_by_index(rule.target, rule.source);
            let ring = self.history.ring_at(rule.source);
            for lag in 0..op.lag_count() {
                let nnz = op.lag_nnz(lag);
                if nnz == 0 {
                    continue;
                }
                let x = match ring.get(lag) {
                    Some(x) => x,
                    None => match self.history_fill {
                        HistoryFill::RepeatOldest => match ring.oldest() {
                            Some(x) => x,
                            None => continue,
                        },
                        HistoryFill::Zero => continue,
                        HistoryFill::Strict => {
                            return Err(EngineError::HistoryUnderflow {
                                property: self.properties[rule.source].clone(),
                                lag,
                                depth: ring.len(),
                            });
                        }
                    },
                };
                op.apply(lag, x, delta);
                entries_applied += nnz;
            }
        }
        let delta_us = delta_start.elapsed().as_micros() as u64;

        // 2. Stage target += c * alpha * delta, accumulating per target.
        let chain_start = Instant::now();
        for (staged, state) in self.staged.iter_mut().zip(&self.states) {
            staged.clear();
            staged.extend_from_slice(state);
        }
        for (r, rule) in self.resolved.iter().enumerate() {
            let scale = rule.constant * self.alpha_gain;
            for (t, d) in self.staged[rule.target].iter_mut().zip(&self.deltas[r]) {
                *t += scale * d;
            }
        }

        // 3. Antiderivative chains read the already-staged target.
        for rule in self.resolved.iter().filter(|r| r.order > 0) {
            for _ in 0..rule.order {
                add_into(&mut self.staged, rule.target, rule.source);
            }
        }
        let chain_us = chain_start.elapsed().as_micros() as u64;

        // 4. Validate everything before touching committed state.
        let commit_start = Instant::now();
        let vertices = self.operators.vertex_count();
        for (key, staged) in self.properties.iter().zip(&self.staged) {
            check_state(key, staged, vertices)?;
        }

        // 5. Commit.
        for (p, staged) in self.staged.iter_mut().enumerate() {
            std::mem::swap(&mut self.states[p], staged);
            self.history.ring_at_mut(p).push(&self.states[p]);
        }
        let commit_us = commit_start.elapsed().as_micros() as u64;

        // 6. Clock.
        self.timestep = self.timestep.next();

        let metrics = AdvanceMetrics {
            total_us: tick_start.elapsed().as_micros() as u64,
            delta_us,
            chain_us,
            commit_us,
            entries_applied,
        };
        self.last_metrics = metrics.clone();
        trace!(entries_applied, "tick complete");

        Ok(AdvanceReport {
            tick: self.timestep,
            time: self.time(),
            metrics,
        })
    }

    /// Advance `ticks` times, stopping at the first error.
    ///
    /// Returns the timestep reached.
    pub fn run(&mut self, ticks: u64) -> Result<TickId, EngineError> {
        for _ in 0..ticks {
            self.advance()?;
        }
        Ok(self.timestep)
    }

    /// Restore the initial state, reseed history, and zero the clock.
    ///
    /// Kernels and alpha gain keep their current values.
    pub fn reset(&mut self) {
        self.history.clear();
        for (p, (state, initial)) in self.states.iter_mut().zip(&self.initial).enumerate() {
            state.clear();
            state.extend_from_slice(initial);
            self.history.ring_at_mut(p).push(initial);
        }
        self.timestep = TickId::default();
        self.last_metrics = AdvanceMetrics::default();
        info!("engine reset");
    }

    /// Overwrite the current state of `property`.
    ///
    /// The newest history snapshot is replaced as well, so lag 0 keeps
    /// matching the current state and the history depth is unchanged.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownProperty`], [`EngineError::DimensionMismatch`]
    /// or [`EngineError::NonFinite`]; the state is untouched on error.
    pub fn set_state(&mut self, property: &str, values: Vec<f64>) -> Result<(), EngineError> {
        let p = self.index_of(property)?;
        check_state(&self.properties[p], &values, self.vertex_count())?;
        self.history.ring_at_mut(p).overwrite_latest(&values);
        self.states[p] = values;
        debug!(property, "state overwritten");
        Ok(())
    }

    /// Set the global gain used by the next `advance()`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Configuration`] if `value` is not finite.
    pub fn set_alpha_gain(&mut self, value: f64) -> Result<(), EngineError> {
        if !value.is_finite() {
            return Err(EngineError::config(format!(
                "alpha_gain must be finite, got {value}"
            )));
        }
        debug!(from = self.alpha_gain, to = value, "alpha gain changed");
        self.alpha_gain = value;
        Ok(())
    }

    /// Replace the kernels of `(target, source)` and rebuild that operator
    /// now, so the next `advance()` uses it.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownProperty`] if either name is not a property.
    pub fn set_kernel(
        &mut self,
        target: &str,
        source: &str,
        pair: KernelPair,
    ) -> Result<(), EngineError> {
        self.operators.rebuild_pair(target, source, pair)?;
        for rule in self
            .rules
            .iter()
            .filter(|r| r.target.as_str() == target && r.source.as_str() == source)
        {
            self.warn_if_inert(rule);
        }
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Current state vector of `property`.
    pub fn current_state(&self, property: &str) -> Result<&[f64], EngineError> {
        Ok(&self.states[self.index_of(property)?])
    }

    /// Ticks committed since construction or the last reset.
    pub fn timestep(&self) -> TickId {
        self.timestep
    }

    /// Simulation time, `timestep * dt`.
    pub fn time(&self) -> f64 {
        self.timestep.0 as f64 * self.dt
    }

    /// The timestep.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Current global gain.
    pub fn alpha_gain(&self) -> f64 {
        self.alpha_gain
    }

    /// Lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> &[PropertyKey] {
        &self.properties
    }

    /// Coupling rules in application order.
    pub fn rules(&self) -> &[CouplingRule] {
        &self.rules
    }

    /// Number of graph vertices.
    pub fn vertex_count(&self) -> usize {
        self.operators.vertex_count()
    }

    /// History depth per property, equal to every operator's lag count.
    pub fn max_history(&self) -> usize {
        self.operators.max_lag()
    }

    /// The early-tick history policy.
    pub fn history_fill(&self) -> HistoryFill {
        self.history_fill
    }

    /// The operator currently used for `(target, source)`.
    pub fn operator(&self, target: &str, source: &str) -> Result<&Arc<SparseOperator>, EngineError> {
        self.operators.get(target, source)
    }

    /// The kernels currently installed for `(target, source)`.
    pub fn kernel(&self, target: &str, source: &str) -> Result<&KernelPair, EngineError> {
        self.operators.kernel(target, source)
    }

    /// Read access to every property's history.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Number of snapshots retained for `property`.
    pub fn history_len(&self, property: &str) -> Result<usize, EngineError> {
        self.history.len(property)
    }

    /// Metrics from the most recent successful tick.
    pub fn last_metrics(&self) -> &AdvanceMetrics {
        &self.last_metrics
    }

    /// The graph.
    pub fn topology(&self) -> &dyn Topology {
        self.topology.as_ref()
    }

    fn index_of(&self, property: &str) -> Result<usize, EngineError> {
        self.operators
            .property_index(property)
            .ok_or_else(|| EngineError::unknown(property))
    }

    fn warn_if_inert(&self, rule: &CouplingRule) {
        let inert = self
            .operators
            .get(rule.target.as_str(), rule.source.as_str())
            .is_ok_and(|op| op.is_empty());
        if inert {
            warn!(
                target_property = %rule.target,
                source_property = %rule.source,
                "rule has an empty operator and will never change its target"
            );
        }
    }
}

impl fmt::Debug for UpdateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateEngine")
            .field("vertices", &self.vertex_count())
            .field("properties", &self.properties)
            .field("rules", &self.rules)
            .field("max_history", &self.max_history())
            .field("timestep", &self.timestep)
            .field("dt", &self.dt)
            .field("alpha_gain", &self.alpha_gain)
            .field("state", &self.state)
            .finish()
    }
}

fn resolve(operators: &OperatorSet, rule: &CouplingRule) -> Result<ResolvedRule, EngineError> {
    let index = |key: &PropertyKey| {
        operators
            .property_index(key.as_str())
            .ok_or_else(|| EngineError::unknown(key))
    };
    Ok(ResolvedRule {
        target: index(&rule.target)?,
        source: index(&rule.source)?,
        order: rule.antiderivative_order,
        constant: rule.constant,
    })
}

/// `bufs[to] += bufs[from]`, elementwise. `from == to` doubles the buffer.
fn add_into(bufs: &mut [Vec<f64>], from: usize, to: usize) {
    if from == to {
        for v in &mut bufs[to] {
            *v += *v;
        }
        return;
    }
    let (src, dst) = if from < to {
        let (lo, hi) = bufs.split_at_mut(to);
        (&lo[from], &mut hi[0])
    } else {
        let (lo, hi) = bufs.split_at_mut(from);
        (&hi[0], &mut lo[to])
    };
    for (d, s) in dst.iter_mut().zip(src) {
        *d += s;
    }
}
