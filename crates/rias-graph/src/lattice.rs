//! Lattice presets: 1D rings and lines, 2D 4- and 8-connected grids.
//!
//! All presets are undirected and give every edge the same weight. Vertex
//! `(row, col)` of a grid has index `row * cols + col`.

use crate::edge::EdgeBehavior;
use crate::error::GraphError;
use crate::weighted::WeightedGraph;

const OFFSETS_4: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const OFFSETS_8: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A periodic 1D lattice of `len` vertices.
///
/// ```
/// use rias_graph::{lattice, Topology};
///
/// let ring = lattice::ring(10, 1.0).unwrap();
/// assert_eq!(ring.vertex_count(), 10);
/// assert_eq!(ring.weight(9, 0), 1.0);
/// assert!((0..10).all(|v| ring.total_degree(v) == 2));
/// ```
pub fn ring(len: usize, weight: f64) -> Result<WeightedGraph, GraphError> {
    line(len, weight, EdgeBehavior::Wrap)
}

/// A 1D lattice of `len` vertices with the given boundary wiring.
pub fn line(len: usize, weight: f64, edge: EdgeBehavior) -> Result<WeightedGraph, GraphError> {
    grid(1, len, weight, edge, &[(0, -1), (0, 1)])
}

/// A 2D grid with north/south/east/west neighbours.
pub fn grid4(
    rows: usize,
    cols: usize,
    weight: f64,
    edge: EdgeBehavior,
) -> Result<WeightedGraph, GraphError> {
    grid(rows, cols, weight, edge, &OFFSETS_4)
}

/// A 2D grid that also links the four diagonal neighbours.
pub fn grid8(
    rows: usize,
    cols: usize,
    weight: f64,
    edge: EdgeBehavior,
) -> Result<WeightedGraph, GraphError> {
    grid(rows, cols, weight, edge, &OFFSETS_8)
}

fn grid(
    rows: usize,
    cols: usize,
    weight: f64,
    edge: EdgeBehavior,
    offsets: &[(i64, i64)],
) -> Result<WeightedGraph, GraphError> {
    if rows == 0 || cols == 0 {
        return Err(GraphError::EmptyGraph);
    }
    let mut g = WeightedGraph::new(rows * cols, false)?;
    let (rows_i, cols_i) = (rows as i64, cols as i64);
    for r in 0..rows_i {
        for c in 0..cols_i {
            let v = (r * cols_i + c) as usize;
            for &(dr, dc) in offsets {
                // A degenerate axis (length 1) has no neighbours along it.
                if (dr != 0 && rows == 1) || (dc != 0 && cols == 1) {
                    continue;
                }
                let nr = edge.resolve_axis(r + dr, rows_i);
                let nc = edge.resolve_axis(c + dc, cols_i);
                if let (Some(nr), Some(nc)) = (nr, nc) {
                    let nb = (nr * cols_i + nc) as usize;
                    g.connect_once(v, nb, weight)?;
                }
            }
        }
    }
    Ok(g)
}
