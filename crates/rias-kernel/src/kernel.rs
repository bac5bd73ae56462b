//! The [`Kernel`] trait and the [`KernelPair`] bundle.

use std::fmt;
use std::sync::Arc;

use crate::presets::{Identity, Laplacian, Zero};

/// A response coefficient as a function of distance or lag.
///
/// # Contract
///
/// - `weight()` MUST be deterministic and side-effect free. Operator
///   construction evaluates it repeatedly and may cache the results.
/// - No bounds are enforced on the returned value.
///
/// # Examples
///
/// Closures are kernels:
///
/// ```
/// use rias_kernel::Kernel;
///
/// let decay = |lag: usize| 0.5f64.powi(lag as i32);
/// assert_eq!(decay.weight(0), 1.0);
/// assert_eq!(decay.weight(2), 0.25);
/// ```
pub trait Kernel: Send + Sync + 'static {
    /// Coefficient at distance or lag `r`.
    fn weight(&self, r: usize) -> f64;

    /// Short label for logs and `Debug` output.
    fn name(&self) -> &str {
        "custom"
    }

    /// Returns `true` only if `weight(r) == 0.0` for every `r`.
    ///
    /// Conservative: the default is `false`.
    fn is_identically_zero(&self) -> bool {
        false
    }
}

impl<F> Kernel for F
where
    F: Fn(usize) -> f64 + Send + Sync + 'static,
{
    fn weight(&self, r: usize) -> f64 {
        self(r)
    }
}

/// A kernel stored as a value and shared between operator rebuilds.
pub type SharedKernel = Arc<dyn Kernel>;

/// The space and time kernels for one `(target, source)` property pair.
#[derive(Clone)]
pub struct KernelPair {
    /// Kernel over graph hop distance.
    pub space: SharedKernel,
    /// Kernel over lag in ticks.
    pub time: SharedKernel,
}

impl KernelPair {
    /// Pair two kernels.
    pub fn new(space: impl Kernel, time: impl Kernel) -> Self {
        Self {
            space: Arc::new(space),
            time: Arc::new(time),
        }
    }

    /// Pair two already-shared kernels.
    pub fn from_shared(space: SharedKernel, time: SharedKernel) -> Self {
        Self { space, time }
    }

    /// Laplacian in space, single tick in time. The diffusion and wave
    /// presets use this pairing.
    pub fn laplacian() -> Self {
        Self::new(Laplacian, Identity)
    }

    /// Identity in space and time: each vertex sees only its own latest
    /// value.
    pub fn identity() -> Self {
        Self::new(Identity, Identity)
    }

    /// Zero in space and time: the pair contributes nothing.
    pub fn zero() -> Self {
        Self::new(Zero, Zero)
    }

    /// Whether the pair is guaranteed to build an empty operator.
    pub fn is_zero(&self) -> bool {
        self.space.is_identically_zero() && self.time.is_identically_zero()
    }
}

impl Default for KernelPair {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for KernelPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelPair")
            .field("space", &self.space.name())
            .field("time", &self.time.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_kernel_is_not_assumed_zero() {
        let k = |_r: usize| 0.0;
        assert!(!k.is_identically_zero());
        assert_eq!(k.name(), "custom");
    }

    #[test]
    fn zero_pair_is_zero() {
        assert!(KernelPair::zero().is_zero());
        assert!(KernelPair::default().is_zero());
        assert!(!KernelPair::laplacian().is_zero());
        // Space zero alone still leaves the degree term driven by time.
        assert!(!KernelPair::new(Zero, Identity).is_zero());
    }

    #[test]
    fn debug_shows_kernel_names() {
        let s = format!("{:?}", KernelPair::laplacian());
        assert!(s.contains("laplacian"));
        assert!(s.contains("identity"));
    }
}
