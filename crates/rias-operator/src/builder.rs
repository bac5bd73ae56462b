//! Operator construction from a graph and a kernel pair.

use rias_core::EngineError;
use rias_graph::Topology;
use rias_kernel::KernelPair;
use tracing::{debug, info, instrument};

use crate::sparse::{CooBuilder, SparseOperator};

/// Relative tolerance when checking that an edge weight is a whole number
/// of timesteps.
const LAG_TOLERANCE: f64 = 1e-9;

/// Longest edge delay accepted, in timesteps. Every property keeps this
/// many history snapshots at most, and every operator this many lag slices.
pub const MAX_LAG: usize = 1 << 16;

/// An adjacency entry with its weight already converted to a lag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LaggedEntry {
    lag: usize,
    target: usize,
    source: usize,
}

/// Converts one graph into update operators, one kernel pair at a time.
///
/// Construction validates the graph against `dt` once and caches the
/// lag of every adjacency entry together with the per-lag degree counts.
/// [`build`](Self::build) then only evaluates kernels.
///
/// # Layout
///
/// For a kernel pair `(space, time)` the operator holds:
///
/// - `[0][i][i] += space(0)` for every vertex `i`
/// - `[lag][i][j] += space(1) * time(lag)` for every entry `j -> i`,
///   where `lag = round(weight / dt) - 1`
/// - `[k][i][i] += degree_k(i) * time(k)`, where `degree_k(i)` counts the
///   entries feeding `i` whose lag is `k`
///
/// # Examples
///
/// ```
/// use rias_graph::lattice;
/// use rias_kernel::KernelPair;
/// use rias_operator::TensorBuilder;
///
/// let ring = lattice::ring(10, 1.0).unwrap();
/// let builder = TensorBuilder::new(&ring, 1.0).unwrap();
/// let op = builder.build(&KernelPair::laplacian());
///
/// assert_eq!(op.shape(), (1, 10, 10));
/// assert_eq!(op.get(0, 3, 3), 3.0);
/// assert_eq!(op.get(0, 3, 4), -0.5);
/// assert_eq!(op.nnz(), 30);
/// ```
#[derive(Clone, Debug)]
pub struct TensorBuilder {
    vertices: usize,
    dt: f64,
    max_lag: usize,
    entries: Vec<LaggedEntry>,
    /// `(lag, vertex, degree)` with `degree > 0`.
    degrees: Vec<(usize, usize, usize)>,
}

impl TensorBuilder {
    /// Validate `topology` against `dt` and index its entries by lag.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] if `dt` is not finite and
    /// positive, the graph has no vertices or no edges, or an edge weight
    /// is shorter than `dt`, longer than [`MAX_LAG`] timesteps, or not a
    /// whole multiple of `dt`.
    pub fn new(topology: &dyn Topology, dt: f64) -> Result<Self, EngineError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(EngineError::config(format!(
                "dt must be finite and positive, got {dt}"
            )));
        }
        let vertices = topology.vertex_count();
        if vertices == 0 {
            return Err(EngineError::config("graph has no vertices"));
        }
        let time_dilation = 1.0 / dt;

        let edges = topology.edges();
        let mut entries = Vec::with_capacity(edges.len());
        let mut max_lag = 0;
        for e in &edges {
            let lag = weight_to_lag(e.weight, time_dilation).map_err(|reason| {
                EngineError::config(format!(
                    "edge {} -> {} with weight {}: {reason}",
                    e.source, e.target, e.weight
                ))
            })?;
            max_lag = max_lag.max(lag + 1);
            entries.push(LaggedEntry {
                lag,
                target: e.target,
                source: e.source,
            });
        }
        if max_lag == 0 {
            return Err(EngineError::config(
                "graph has no edges, so the maximum lag is zero",
            ));
        }

        let mut lags_present: Vec<usize> = entries.iter().map(|e| e.lag).collect();
        lags_present.sort_unstable();
        lags_present.dedup();

        let mut degrees = Vec::new();
        for &k in &lags_present {
            let at_lag = |w: f64| weight_to_lag(w, time_dilation).ok() == Some(k);
            for v in 0..vertices {
                let d = topology.filtered_degree(v, &at_lag);
                if d > 0 {
                    degrees.push((k, v, d));
                }
            }
        }

        info!(
            vertices,
            entries = entries.len(),
            max_lag,
            dt,
            "tensor builder ready"
        );
        Ok(Self {
            vertices,
            dt,
            max_lag,
            entries,
            degrees,
        })
    }

    /// Number of lag slices in every operator this builder produces. This
    /// is also the history depth the engine keeps.
    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// Vertex count of the graph.
    pub fn vertex_count(&self) -> usize {
        self.vertices
    }

    /// The timestep the builder was validated against.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Build the operator for one kernel pair.
    #[instrument(skip_all, fields(space = pair.space.name(), time = pair.time.name()))]
    pub fn build(&self, pair: &KernelPair) -> SparseOperator {
        if pair.is_zero() {
            debug!("zero kernel pair, empty operator");
            return SparseOperator::empty(self.max_lag, self.vertices);
        }

        let space_self = pair.space.weight(0);
        let space_neighbour = pair.space.weight(1);
        let time: Vec<f64> = (0..self.max_lag).map(|k| pair.time.weight(k)).collect();

        let mut coo = CooBuilder::new(self.max_lag, self.vertices);
        for i in 0..self.vertices {
            coo.add(0, i, i, space_self);
        }
        for e in &self.entries {
            coo.add(e.lag, e.target, e.source, space_neighbour * time[e.lag]);
        }
        for &(k, v, d) in &self.degrees {
            coo.add(k, v, v, d as f64 * time[k]);
        }

        let op = coo.build();
        debug!(nnz = op.nnz(), "operator built");
        op
    }
}

/// `round(weight * time_dilation) - 1`, rejecting weights that are not a
/// positive whole number of timesteps.
fn weight_to_lag(weight: f64, time_dilation: f64) -> Result<usize, String> {
    let ticks = weight * time_dilation;
    if !ticks.is_finite() {
        return Err("weight is not finite".into());
    }
    if ticks < 1.0 - LAG_TOLERANCE {
        return Err("shorter than one timestep".into());
    }
    if ticks > MAX_LAG as f64 + 0.5 {
        return Err(format!(
            "delay of {ticks} timesteps exceeds the maximum of {MAX_LAG}"
        ));
    }
    let rounded = ticks.round();
    if (ticks - rounded).abs() > LAG_TOLERANCE * ticks.max(1.0) {
        return Err(format!("not an integer multiple of dt ({ticks} timesteps)"));
    }
    Ok(rounded as usize - 1)
}
