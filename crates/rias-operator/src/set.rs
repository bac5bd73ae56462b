//! One operator per ordered property pair.

use std::sync::Arc;

use indexmap::IndexSet;
use rias_core::{EngineError, PropertyKey};
use rias_graph::Topology;
use rias_kernel::KernelPair;
use tracing::{debug, info};

use crate::builder::TensorBuilder;
use crate::sparse::SparseOperator;

/// The operators of a simulation, indexed by `(target, source)`.
///
/// Every ordered pair of properties has an operator. Pairs with no
/// configured kernel use [`KernelPair::zero()`] and hold an empty
/// operator. Operators sit behind `Arc` so readers can keep one across a
/// rebuild; a rebuild always installs a fresh operator.
#[derive(Clone, Debug)]
pub struct OperatorSet {
    builder: TensorBuilder,
    properties: IndexSet<PropertyKey>,
    /// Row-major `target * P + source`.
    kernels: Vec<KernelPair>,
    operators: Vec<Arc<SparseOperator>>,
}

impl OperatorSet {
    /// Validate the graph and build every pair's operator.
    ///
    /// `kernels` lists `(target, source, pair)`; a later entry for the
    /// same pair replaces an earlier one.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Configuration`] from [`TensorBuilder::new`], or for
    ///   a repeated property name.
    /// - [`EngineError::UnknownProperty`] if a kernel names a property not
    ///   in `properties`.
    pub fn build(
        topology: &dyn Topology,
        dt: f64,
        properties: impl IntoIterator<Item = PropertyKey>,
        kernels: impl IntoIterator<Item = (PropertyKey, PropertyKey, KernelPair)>,
    ) -> Result<Self, EngineError> {
        let builder = TensorBuilder::new(topology, dt)?;

        let mut set = IndexSet::new();
        for key in properties {
            if !set.insert(key.clone()) {
                return Err(EngineError::config(format!(
                    "property '{key}' declared twice"
                )));
            }
        }
        let p = set.len();

        let mut pairs = vec![KernelPair::zero(); p * p];
        for (target, source, pair) in kernels {
            let t = index_of(&set, target.as_str())?;
            let s = index_of(&set, source.as_str())?;
            pairs[t * p + s] = pair;
        }

        let operators = pairs.iter().map(|k| Arc::new(builder.build(k))).collect();
        let this = Self {
            builder,
            properties: set,
            kernels: pairs,
            operators,
        };
        info!(
            properties = p,
            nnz = this.operators.iter().map(|op| op.nnz()).sum::<usize>(),
            "operator set built"
        );
        Ok(this)
    }

    /// Replace the kernel pair for `(target, source)` and rebuild its
    /// operator immediately.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownProperty`] if either name is not a property.
    pub fn rebuild_pair(
        &mut self,
        target: &str,
        source: &str,
        pair: KernelPair,
    ) -> Result<(), EngineError> {
        let idx = self.pair_index(target, source)?;
        let op = self.builder.build(&pair);
        debug!(
            target_property = target,
            source_property = source,
            ?pair,
            nnz = op.nnz(),
            "operator rebuilt"
        );
        self.operators[idx] = Arc::new(op);
        self.kernels[idx] = pair;
        Ok(())
    }

    /// The operator for `(target, source)`.
    pub fn get(&self, target: &str, source: &str) -> Result<&Arc<SparseOperator>, EngineError> {
        let idx = self.pair_index(target, source)?;
        Ok(&self.operators[idx])
    }

    /// Operator by property positions, as returned by
    /// [`property_index`](Self::property_index).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get_by_index(&self, target: usize, source: usize) -> &Arc<SparseOperator> {
        &self.operators[target * self.properties.len() + source]
    }

    /// The kernel pair currently installed for `(target, source)`.
    pub fn kernel(&self, target: &str, source: &str) -> Result<&KernelPair, EngineError> {
        let idx = self.pair_index(target, source)?;
        Ok(&self.kernels[idx])
    }

    /// Position of a property in declaration order.
    pub fn property_index(&self, name: &str) -> Option<usize> {
        self.properties.get_index_of(name)
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &PropertyKey> {
        self.properties.iter()
    }

    /// Number of properties.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Lag slices per operator, equal to the history depth.
    pub fn max_lag(&self) -> usize {
        self.builder.max_lag()
    }

    /// Vertex count of the graph.
    pub fn vertex_count(&self) -> usize {
        self.builder.vertex_count()
    }

    /// The timestep the operators were built for.
    pub fn dt(&self) -> f64 {
        self.builder.dt()
    }

    fn pair_index(&self, target: &str, source: &str) -> Result<usize, EngineError> {
        let t = index_of(&self.properties, target)?;
        let s = index_of(&self.properties, source)?;
        Ok(t * self.properties.len() + s)
    }
}

fn index_of(set: &IndexSet<PropertyKey>, name: &str) -> Result<usize, EngineError> {
    set.get_index_of(name).ok_or_else(|| EngineError::unknown(name))
}
