//! Adjacency-list weighted graph.

use crate::error::GraphError;
use crate::topology::{Edge, Topology};
use smallvec::SmallVec;

/// Incoming entries of one vertex: `(source, weight)` in insertion order.
type Incoming = SmallVec<[(usize, f64); 8]>;

/// A weighted graph stored as per-vertex incoming adjacency lists.
///
/// Vertices are plain indices; there is no pointer graph. Each ordered
/// vertex pair holds at most one entry, so the adjacency is a matrix in
/// all but storage. An undirected edge between distinct vertices adds one
/// entry per direction; an undirected self-loop adds a single entry.
///
/// # Examples
///
/// ```
/// use rias_graph::{Topology, WeightedGraph};
///
/// let mut g = WeightedGraph::new(3, false).unwrap();
/// g.add_edge(0, 1, 2.0).unwrap();
/// g.add_edge(1, 2, 1.0).unwrap();
///
/// assert_eq!(g.weight(1, 0), 2.0);
/// assert_eq!(g.weight(0, 1), 2.0);
/// assert_eq!(g.weight(2, 0), 0.0);
/// assert_eq!(g.total_degree(1), 2);
/// assert_eq!(g.max_weight(), 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct WeightedGraph {
    directed: bool,
    incoming: Vec<Incoming>,
}

impl WeightedGraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    ///
    /// Returns `Err(GraphError::EmptyGraph)` if `vertex_count == 0`.
    pub fn new(vertex_count: usize, directed: bool) -> Result<Self, GraphError> {
        if vertex_count == 0 {
            return Err(GraphError::EmptyGraph);
        }
        Ok(Self {
            directed,
            incoming: vec![Incoming::new(); vertex_count],
        })
    }

    /// Build a graph from `(source, target, weight)` triples.
    pub fn from_edges(
        vertex_count: usize,
        directed: bool,
        edges: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, GraphError> {
        let mut g = Self::new(vertex_count, directed)?;
        for (source, target, weight) in edges {
            g.add_edge(source, target, weight)?;
        }
        Ok(g)
    }

    /// Add an edge `source -> target` (both directions when undirected).
    ///
    /// The weight is a delay and must be finite and strictly positive.
    pub fn add_edge(&mut self, source: usize, target: usize, weight: f64) -> Result<(), GraphError> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;
        if !(weight.is_finite() && weight > 0.0) {
            return Err(GraphError::InvalidWeight {
                source_vertex: source,
                target,
                weight,
            });
        }
        if self.has_edge(source, target) {
            return Err(GraphError::DuplicateEdge {
                source_vertex: source,
                target,
            });
        }
        self.incoming[target].push((source, weight));
        if !self.directed && source != target {
            self.incoming[source].push((target, weight));
        }
        Ok(())
    }

    /// Add an edge unless the pair is already connected.
    ///
    /// Lattice presets use this so that tiny periodic lattices (where both
    /// neighbours of a vertex coincide) do not produce duplicate entries.
    pub(crate) fn connect_once(
        &mut self,
        source: usize,
        target: usize,
        weight: f64,
    ) -> Result<(), GraphError> {
        if self.has_edge(source, target) {
            return Ok(());
        }
        self.add_edge(source, target, weight)
    }

    /// Whether an entry `source -> target` exists.
    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.incoming
            .get(target)
            .is_some_and(|inc| inc.iter().any(|&(s, _)| s == source))
    }

    /// Number of adjacency entries.
    pub fn entry_count(&self) -> usize {
        self.incoming.iter().map(|inc| inc.len()).sum()
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex >= self.incoming.len() {
            return Err(GraphError::VertexOutOfRange {
                vertex,
                count: self.incoming.len(),
            });
        }
        Ok(())
    }
}

impl Topology for WeightedGraph {
    fn vertex_count(&self) -> usize {
        self.incoming.len()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn weight(&self, target: usize, source: usize) -> f64 {
        self.incoming
            .get(target)
            .and_then(|inc| inc.iter().find(|&&(s, _)| s == source))
            .map_or(0.0, |&(_, w)| w)
    }

    fn edges(&self) -> Vec<Edge> {
        let mut out = Vec::with_capacity(self.entry_count());
        for (target, inc) in self.incoming.iter().enumerate() {
            for &(source, weight) in inc {
                out.push(Edge {
                    source,
                    target,
                    weight,
                });
            }
        }
        out
    }

    fn filtered_degree(&self, vertex: usize, keep: &dyn Fn(f64) -> bool) -> usize {
        self.incoming
            .get(vertex)
            .map_or(0, |inc| inc.iter().filter(|&&(_, w)| keep(w)).count())
    }

    fn max_weight(&self) -> f64 {
        self.incoming
            .iter()
            .flat_map(|inc| inc.iter().map(|&(_, w)| w))
            .fold(0.0, f64::max)
    }
}
