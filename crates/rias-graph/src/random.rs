//! Seeded random directed graphs.

use std::ops::{Range, RangeInclusive};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GraphError;
use crate::weighted::WeightedGraph;

/// Parameters for [`random_graph`].
///
/// Vertex and edge counts are drawn uniformly from their ranges; each edge
/// gets an integer weight from `weights`, so the graph is always compatible
/// with `dt = 1`.
#[derive(Clone, Debug)]
pub struct RandomGraphSpec {
    /// Vertex count range (half-open).
    pub vertices: Range<usize>,
    /// Number of edge draws (half-open). Repeated pairs are drawn again
    /// but only added once, so the final edge count may be lower.
    pub edges: Range<usize>,
    /// Integer delay range for edge weights.
    pub weights: RangeInclusive<u32>,
    /// Whether edges are one-way.
    pub directed: bool,
}

impl Default for RandomGraphSpec {
    fn default() -> Self {
        Self {
            vertices: 8..16,
            edges: 16..32,
            weights: 1..=1,
            directed: true,
        }
    }
}

/// Generate a random graph. The same `spec` and `seed` always produce the
/// same graph.
///
/// ```
/// use rias_graph::{random_graph, RandomGraphSpec, Topology};
///
/// let spec = RandomGraphSpec { vertices: 10..11, ..Default::default() };
/// let g = random_graph(&spec, 7).unwrap();
/// assert_eq!(g.vertex_count(), 10);
/// ```
pub fn random_graph(spec: &RandomGraphSpec, seed: u64) -> Result<WeightedGraph, GraphError> {
    if spec.vertices.is_empty() || spec.vertices.start == 0 {
        return Err(GraphError::InvalidRange { what: "vertices" });
    }
    if spec.edges.is_empty() {
        return Err(GraphError::InvalidRange { what: "edges" });
    }
    if spec.weights.is_empty() || *spec.weights.start() == 0 {
        return Err(GraphError::InvalidRange { what: "weights" });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let vertex_count = rng.random_range(spec.vertices.clone());
    let edge_draws = rng.random_range(spec.edges.clone());

    let mut g = WeightedGraph::new(vertex_count, spec.directed)?;
    for _ in 0..edge_draws {
        let source = rng.random_range(0..vertex_count);
        let target = rng.random_range(0..vertex_count);
        let weight = rng.random_range(spec.weights.clone());
        g.connect_once(source, target, weight as f64)?;
    }
    Ok(g)
}
