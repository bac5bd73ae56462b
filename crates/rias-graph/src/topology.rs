//! The core `Topology` trait.

/// One adjacency entry: `source` feeds `target` after a delay of `weight`.
///
/// Undirected graphs report each edge once per direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Vertex whose value is transmitted.
    pub source: usize,
    /// Vertex that receives it.
    pub target: usize,
    /// Transmission delay, in simulation time units.
    pub weight: f64,
}

/// The view of a graph the operator builder consumes.
///
/// Vertices are indices `0..vertex_count()`. Adjacency is expressed as
/// directed entries (see [`Edge`]); a weight of `0.0` from
/// [`weight`](Self::weight) means "no edge".
///
/// # Thread Safety
///
/// `Send + Sync` so an engine holding `Box<dyn Topology>` can be moved
/// between threads by a driver, even though a single engine is never
/// advanced concurrently.
pub trait Topology: Send + Sync + 'static {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Whether edges were added as one-way links.
    fn is_directed(&self) -> bool;

    /// Delay of the adjacency entry `source -> target`, or `0.0` if absent.
    fn weight(&self, target: usize, source: usize) -> f64;

    /// Every adjacency entry, in a deterministic order.
    fn edges(&self) -> Vec<Edge>;

    /// Number of adjacency entries whose weight satisfies `keep` and that
    /// feed `vertex`.
    fn filtered_degree(&self, vertex: usize, keep: &dyn Fn(f64) -> bool) -> usize;

    /// Number of adjacency entries feeding `vertex`. For undirected graphs
    /// this is the ordinary degree.
    fn total_degree(&self, vertex: usize) -> usize {
        self.filtered_degree(vertex, &|_| true)
    }

    /// Largest edge weight, or `0.0` for a graph without edges.
    fn max_weight(&self) -> f64 {
        self.edges()
            .iter()
            .map(|e| e.weight)
            .fold(0.0, f64::max)
    }
}
