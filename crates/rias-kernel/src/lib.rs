//! Space and time response kernels.
//!
//! A kernel maps a non-negative integer (a hop distance, or a lag in ticks)
//! to a coefficient. Operator construction pairs a space kernel with a time
//! kernel for every ordered property pair; see [`KernelPair`].
//!
//! # Presets
//!
//! - [`Laplacian`]: discrete second-difference stencil
//! - [`Identity`]: self only
//! - [`Zero`]: disables a pairing
//! - [`Table`] and [`Scaled`]: data-driven and rescaled custom kernels
//!
//! Any `Fn(usize) -> f64 + Send + Sync` closure is a kernel too.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod kernel;
pub mod presets;

pub use kernel::{Kernel, KernelPair, SharedKernel};
pub use presets::{Identity, Laplacian, Scaled, Table, Zero};
