//! Simulation configuration and validation.
//!
//! [`SimulationConfig`] is the constructor input for
//! [`UpdateEngine`](crate::UpdateEngine). [`validate()`](SimulationConfig::validate)
//! checks everything that can be checked without building operators; the
//! graph's weight/dt relationship is checked by the operator builder.

use std::fmt;

use indexmap::IndexMap;
use rias_core::{CouplingRule, EngineError, PropertyKey};
use rias_graph::Topology;
use rias_kernel::KernelPair;

// ── HistoryFill ────────────────────────────────────────────────────

/// What a lag beyond the retained history reads as.
///
/// Only matters during the first `max_history - 1` ticks, before every
/// ring is full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HistoryFill {
    /// Read the oldest retained snapshot (the initial state, early on).
    #[default]
    RepeatOldest,
    /// Contribute nothing.
    Zero,
    /// Fail the tick with [`EngineError::HistoryUnderflow`].
    ///
    /// A failed tick does not grow history, so if any operator has entries
    /// at a lag of 1 or more, every tick fails. Use this only to assert
    /// that a configuration has no delayed coupling.
    Strict,
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Complete configuration for constructing an [`UpdateEngine`](crate::UpdateEngine).
pub struct SimulationConfig {
    /// Graph the properties live on.
    pub topology: Box<dyn Topology>,
    /// Initial state per property. Insertion order fixes property order.
    pub initial_state: IndexMap<PropertyKey, Vec<f64>>,
    /// Coupling rules, applied in this order.
    pub rules: Vec<CouplingRule>,
    /// Kernel pair per `(target, source)`. Missing pairs use
    /// [`KernelPair::zero()`].
    pub kernels: IndexMap<(PropertyKey, PropertyKey), KernelPair>,
    /// Simulation timestep. Edge weights must be whole multiples of it.
    pub dt: f64,
    /// Global gain applied to every rule's delta. Default: 1.0.
    pub alpha_gain: f64,
    /// Early-tick history policy.
    pub history_fill: HistoryFill,
}

impl SimulationConfig {
    /// A configuration with no properties, rules or kernels, `alpha_gain`
    /// of 1.0, and the default fill policy.
    pub fn new(topology: impl Topology, dt: f64) -> Self {
        Self {
            topology: Box::new(topology),
            initial_state: IndexMap::new(),
            rules: Vec::new(),
            kernels: IndexMap::new(),
            dt,
            alpha_gain: 1.0,
            history_fill: HistoryFill::default(),
        }
    }

    /// Add a property with its initial state.
    pub fn with_property(mut self, name: impl Into<PropertyKey>, values: Vec<f64>) -> Self {
        self.initial_state.insert(name.into(), values);
        self
    }

    /// Append a coupling rule.
    pub fn with_rule(mut self, rule: impl Into<CouplingRule>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Set the kernel pair for `(target, source)`.
    pub fn with_kernel(
        mut self,
        target: impl Into<PropertyKey>,
        source: impl Into<PropertyKey>,
        pair: KernelPair,
    ) -> Self {
        self.kernels.insert((target.into(), source.into()), pair);
        self
    }

    /// Set the global gain.
    pub fn with_alpha_gain(mut self, alpha_gain: f64) -> Self {
        self.alpha_gain = alpha_gain;
        self
    }

    /// Set the early-tick history policy.
    pub fn with_history_fill(mut self, fill: HistoryFill) -> Self {
        self.history_fill = fill;
        self
    }

    /// Validate all structural invariants.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Configuration`]: no properties, an empty graph,
    ///   non-finite or non-positive `dt`, non-finite `alpha_gain`, or a
    ///   rule with a non-finite constant.
    /// - [`EngineError::DimensionMismatch`]: an initial state whose length
    ///   is not the vertex count.
    /// - [`EngineError::NonFinite`]: NaN or infinity in an initial state.
    /// - [`EngineError::UnknownProperty`]: a rule or kernel naming a
    ///   property with no initial state.
    pub fn validate(&self) -> Result<(), EngineError> {
        // 1. Graph and clock.
        let vertices = self.topology.vertex_count();
        if vertices == 0 {
            return Err(EngineError::config("graph has no vertices"));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(EngineError::config(format!(
                "dt must be finite and positive, got {}",
                self.dt
            )));
        }
        if !self.alpha_gain.is_finite() {
            return Err(EngineError::config(format!(
                "alpha_gain must be finite, got {}",
                self.alpha_gain
            )));
        }
        // 2. Properties and their initial states.
        if self.initial_state.is_empty() {
            return Err(EngineError::config("no properties configured"));
        }
        for (key, values) in &self.initial_state {
            check_state(key, values, vertices)?;
        }
        // 3. Rules reference known properties.
        for rule in &self.rules {
            rule.validate()?;
            self.require(&rule.target)?;
            self.require(&rule.source)?;
        }
        // 4. Kernels reference known properties.
        for (target, source) in self.kernels.keys() {
            self.require(target)?;
            self.require(source)?;
        }
        Ok(())
    }

    fn require(&self, key: &PropertyKey) -> Result<(), EngineError> {
        if self.initial_state.contains_key(key) {
            Ok(())
        } else {
            Err(EngineError::unknown(key))
        }
    }
}

impl fmt::Debug for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationConfig")
            .field("vertices", &self.topology.vertex_count())
            .field("properties", &self.initial_state.keys().collect::<Vec<_>>())
            .field("rules", &self.rules)
            .field("kernels", &self.kernels)
            .field("dt", &self.dt)
            .field("alpha_gain", &self.alpha_gain)
            .field("history_fill", &self.history_fill)
            .finish()
    }
}

/// Length and finiteness check shared by construction and `set_state`.
pub(crate) fn check_state(
    key: &PropertyKey,
    values: &[f64],
    vertices: usize,
) -> Result<(), EngineError> {
    if values.len() != vertices {
        return Err(EngineError::DimensionMismatch {
            property: key.clone(),
            expected: vertices,
            actual: values.len(),
        });
    }
    if let Some(vertex) = values.iter().position(|v| !v.is_finite()) {
        return Err(EngineError::NonFinite {
            property: key.clone(),
            vertex,
        });
    }
    Ok(())
}
