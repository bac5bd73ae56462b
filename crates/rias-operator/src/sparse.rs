//! Sparse storage: a coordinate accumulator and a per-lag CSR operator.

use std::fmt;

/// Coordinate-list accumulator for one operator.
///
/// Entries may be added repeatedly at the same position; [`build`](Self::build)
/// merges them by summation and drops positions whose sum is exactly zero.
#[derive(Clone, Debug)]
pub struct CooBuilder {
    lags: usize,
    vertices: usize,
    entries: Vec<(usize, usize, usize, f64)>,
}

impl CooBuilder {
    /// Empty accumulator for shape `(lags, vertices, vertices)`.
    pub fn new(lags: usize, vertices: usize) -> Self {
        Self {
            lags,
            vertices,
            entries: Vec::new(),
        }
    }

    /// Add `value` at `[lag][row][col]`.
    ///
    /// # Panics
    ///
    /// Panics if any index is outside the shape. Callers derive indices
    /// from a validated graph, so an out-of-range index is a bug.
    pub fn add(&mut self, lag: usize, row: usize, col: usize, value: f64) {
        assert!(
            lag < self.lags && row < self.vertices && col < self.vertices,
            "coordinate [{lag}][{row}][{col}] outside shape ({}, {}, {})",
            self.lags,
            self.vertices,
            self.vertices,
        );
        if value != 0.0 {
            self.entries.push((lag, row, col, value));
        }
    }

    /// Number of raw (unmerged) entries.
    pub fn raw_len(&self) -> usize {
        self.entries.len()
    }

    /// Merge duplicates, drop zeros, and compress each lag to CSR.
    pub fn build(mut self) -> SparseOperator {
        self.entries
            .sort_unstable_by_key(|&(lag, row, col, _)| (lag, row, col));

        let mut merged: Vec<(usize, usize, usize, f64)> = Vec::with_capacity(self.entries.len());
        for (lag, row, col, value) in self.entries {
            match merged.last_mut() {
                Some(last) if (last.0, last.1, last.2) == (lag, row, col) => last.3 += value,
                _ => merged.push((lag, row, col, value)),
            }
        }
        merged.retain(|e| e.3 != 0.0);

        let mut buckets: Vec<LagMatrix> = (0..self.lags)
            .map(|_| LagMatrix::empty(self.vertices))
            .collect();
        for &(lag, row, _, _) in &merged {
            buckets[lag].row_ptr[row + 1] += 1;
        }
        for bucket in &mut buckets {
            for i in 1..=self.vertices {
                bucket.row_ptr[i] += bucket.row_ptr[i - 1];
            }
        }
        // Sorted by (lag, row, col), so pushing in order fills each row
        // contiguously with ascending columns.
        for (lag, _, col, value) in merged {
            buckets[lag].col_indices.push(col);
            buckets[lag].values.push(value);
        }

        SparseOperator {
            vertices: self.vertices,
            lags: buckets,
        }
    }
}

/// One lag slice in compressed sparse row form.
///
/// Row `i` spans `row_ptr[i]..row_ptr[i + 1]` in `col_indices`/`values`,
/// with columns ascending.
#[derive(Clone, Debug, PartialEq)]
struct LagMatrix {
    row_ptr: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<f64>,
}

impl LagMatrix {
    fn empty(vertices: usize) -> Self {
        Self {
            row_ptr: vec![0; vertices + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.row_ptr[row]..self.row_ptr[row + 1];
        self.col_indices[span.clone()]
            .iter()
            .copied()
            .zip(self.values[span].iter().copied())
    }
}

/// Sparse `(max_lag, V, V)` update operator, immutable once built.
///
/// # Examples
///
/// ```
/// use rias_operator::CooBuilder;
///
/// let mut coo = CooBuilder::new(2, 3);
/// coo.add(0, 0, 0, 1.0);
/// coo.add(0, 0, 0, 2.0);
/// coo.add(1, 2, 0, -0.5);
/// coo.add(1, 1, 1, 0.25);
/// coo.add(1, 1, 1, -0.25);
/// let op = coo.build();
///
/// assert_eq!(op.shape(), (2, 3, 3));
/// assert_eq!(op.nnz(), 2);
/// assert_eq!(op.get(0, 0, 0), 3.0);
/// assert_eq!(op.get(1, 1, 1), 0.0);
///
/// let mut out = vec![0.0; 3];
/// op.apply(1, &[4.0, 0.0, 0.0], &mut out);
/// assert_eq!(out, vec![0.0, 0.0, -2.0]);
/// ```
#[derive(Clone, PartialEq)]
pub struct SparseOperator {
    vertices: usize,
    lags: Vec<LagMatrix>,
}

impl SparseOperator {
    /// An operator with no stored entries.
    pub fn empty(lags: usize, vertices: usize) -> Self {
        CooBuilder::new(lags, vertices).build()
    }

    /// `(max_lag, V, V)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.lags.len(), self.vertices, self.vertices)
    }

    /// Number of lag slices.
    pub fn lag_count(&self) -> usize {
        self.lags.len()
    }

    /// Total stored entries across all lags.
    pub fn nnz(&self) -> usize {
        self.lags.iter().map(LagMatrix::nnz).sum()
    }

    /// Stored entries in one lag slice; `0` for a lag outside the shape.
    pub fn lag_nnz(&self, lag: usize) -> usize {
        self.lags.get(lag).map_or(0, LagMatrix::nnz)
    }

    /// Whether no entry is stored at all.
    pub fn is_empty(&self) -> bool {
        self.nnz() == 0
    }

    /// Value at `[lag][row][col]`; `0.0` when not stored or out of shape.
    pub fn get(&self, lag: usize, row: usize, col: usize) -> f64 {
        let Some(m) = self.lags.get(lag) else {
            return 0.0;
        };
        if row >= self.vertices {
            return 0.0;
        }
        let span = m.row_ptr[row]..m.row_ptr[row + 1];
        match m.col_indices[span.clone()].binary_search(&col) {
            Ok(k) => m.values[span.start + k],
            Err(_) => 0.0,
        }
    }

    /// Every stored entry as `(lag, row, col, value)`, ordered by lag, then
    /// row, then column.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize, f64)> + '_ {
        self.lags.iter().enumerate().flat_map(move |(lag, m)| {
            (0..self.vertices)
                .flat_map(move |row| m.row(row).map(move |(col, v)| (lag, row, col, v)))
        })
    }

    /// Accumulate the lag slice times `x` into `out`: `out[i] += Σ_j A[lag][i][j] x[j]`.
    ///
    /// A lag outside the shape contributes nothing.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `out` is shorter than the vertex count.
    pub fn apply(&self, lag: usize, x: &[f64], out: &mut [f64]) {
        let Some(m) = self.lags.get(lag) else {
            return;
        };
        assert!(
            x.len() >= self.vertices && out.len() >= self.vertices,
            "apply: x.len()={} out.len()={} vertices={}",
            x.len(),
            out.len(),
            self.vertices,
        );
        for (i, slot) in out.iter_mut().enumerate().take(self.vertices) {
            let mut sum = 0.0;
            for (col, v) in m.row(i) {
                sum += v * x[col];
            }
            *slot += sum;
        }
    }
}

impl fmt::Debug for SparseOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseOperator")
            .field("shape", &self.shape())
            .field("nnz", &self.nnz())
            .finish()
    }
}
