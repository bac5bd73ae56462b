//! Reusable state vectors and kernels.
//!
//! - [`spike`]: zeros with one nonzero vertex.
//! - [`ramp`]: `0, 1, 2, ...`.
//! - [`CountingKernel`]: wraps a kernel and counts evaluations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rias_kernel::Kernel;

pub fn spike(len: usize, at: usize, value: f64) -> Vec<f64> {
    let mut v = vec![0.0; len];
    v[at] = value;
    v
}

pub fn ramp(len: usize) -> Vec<f64> {
    (0..len).map(|v| v as f64).collect()
}

pub fn total(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Delegates to an inner kernel and counts calls to [`Kernel::weight`].
///
/// The counter is shared, so a clone of [`counter`](Self::counter) taken
/// before the kernel is moved into a `KernelPair` keeps observing it.
/// Useful for checking when operators are (re)built.
pub struct CountingKernel<K> {
    inner: K,
    calls: Arc<AtomicUsize>,
}

impl<K: Kernel> CountingKernel<K> {
    pub fn new(inner: K) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the evaluation counter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Evaluations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<K: Kernel> Kernel for CountingKernel<K> {
    fn weight(&self, r: usize) -> f64 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.weight(r)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_identically_zero(&self) -> bool {
        self.inner.is_identically_zero()
    }
}
