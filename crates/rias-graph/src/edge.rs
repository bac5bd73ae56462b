//! Boundary wiring for lattice presets.

/// How a lattice preset wires the vertices on its boundary.
///
/// # Examples
///
/// ```
/// use rias_graph::{lattice, EdgeBehavior, Topology};
///
/// // Absorb: end vertices of a line have a single neighbour.
/// let line = lattice::line(5, 1.0, EdgeBehavior::Absorb).unwrap();
/// assert_eq!(line.total_degree(0), 1);
/// assert_eq!(line.total_degree(2), 2);
///
/// // Wrap: every vertex has two neighbours (ring).
/// let ring = lattice::line(5, 1.0, EdgeBehavior::Wrap).unwrap();
/// assert_eq!(ring.total_degree(0), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// The out-of-range neighbour maps back onto the boundary vertex
    /// (a self-loop).
    Clamp,
    /// The out-of-range neighbour wraps to the opposite side (periodic).
    Wrap,
    /// The out-of-range neighbour is omitted.
    Absorb,
}

impl EdgeBehavior {
    /// Resolve a single axis coordinate. Returns `None` for an omitted
    /// neighbour under [`EdgeBehavior::Absorb`].
    pub(crate) fn resolve_axis(self, val: i64, len: i64) -> Option<i64> {
        if val >= 0 && val < len {
            return Some(val);
        }
        match self {
            Self::Absorb => None,
            Self::Clamp => Some(val.clamp(0, len - 1)),
            Self::Wrap => Some(((val % len) + len) % len),
        }
    }
}
