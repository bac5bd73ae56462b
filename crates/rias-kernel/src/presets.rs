//! Preset kernels.

use crate::kernel::Kernel;

/// Discrete second-difference stencil: `1` at `r = 0`, `-1/2` at `r = 1`,
/// `0` beyond.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Laplacian;

impl Kernel for Laplacian {
    fn weight(&self, r: usize) -> f64 {
        match r {
            0 => 1.0,
            1 => -0.5,
            _ => 0.0,
        }
    }

    fn name(&self) -> &str {
        "laplacian"
    }
}

/// `1` at `r = 0`, else `0`: no coupling beyond the vertex itself, or
/// beyond the most recent tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl Kernel for Identity {
    fn weight(&self, r: usize) -> f64 {
        if r == 0 {
            1.0
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Constant `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Zero;

impl Kernel for Zero {
    fn weight(&self, _r: usize) -> f64 {
        0.0
    }

    fn name(&self) -> &str {
        "zero"
    }

    fn is_identically_zero(&self) -> bool {
        true
    }
}

/// Explicit coefficients: `weight(r)` is `coefficients[r]`, and `0` past
/// the end.
///
/// ```
/// use rias_kernel::{Kernel, Table};
///
/// let k = Table::new(vec![1.0, -0.25, -0.25]);
/// assert_eq!(k.weight(2), -0.25);
/// assert_eq!(k.weight(3), 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    coefficients: Vec<f64>,
}

impl Table {
    /// Build a table kernel.
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// The stored coefficients.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl Kernel for Table {
    fn weight(&self, r: usize) -> f64 {
        self.coefficients.get(r).copied().unwrap_or(0.0)
    }

    fn name(&self) -> &str {
        "table"
    }

    fn is_identically_zero(&self) -> bool {
        self.coefficients.iter().all(|&c| c == 0.0)
    }
}

/// Another kernel multiplied by a constant factor.
#[derive(Clone, Debug, PartialEq)]
pub struct Scaled<K> {
    inner: K,
    factor: f64,
}

impl<K: Kernel> Scaled<K> {
    /// Wrap `inner`, scaling every coefficient by `factor`.
    pub fn new(inner: K, factor: f64) -> Self {
        Self { inner, factor }
    }
}

impl<K: Kernel> Kernel for Scaled<K> {
    fn weight(&self, r: usize) -> f64 {
        self.factor * self.inner.weight(r)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_identically_zero(&self) -> bool {
        self.factor == 0.0 || self.inner.is_identically_zero()
    }
}
