//! Sparse update operators for Rias.
//!
//! An update operator couples a source property to a target property. It
//! has shape `(max_lag, V, V)`: entry `[lag][i][j]` weights source vertex
//! `j`'s value from `lag` ticks ago in target vertex `i`'s update.
//!
//! - [`TensorBuilder`] turns a graph and a [`KernelPair`](rias_kernel::KernelPair)
//!   into a [`SparseOperator`].
//! - [`OperatorSet`] owns one operator per ordered property pair and
//!   rebuilds individual pairs on kernel changes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod set;
pub mod sparse;

pub use builder::{TensorBuilder, MAX_LAG};
pub use set::OperatorSet;
pub use sparse::{CooBuilder, SparseOperator};
