//! Test utilities for Rias development.
//!
//! [`fixtures`] holds small building blocks (state vectors, an
//! instrumented kernel). [`scenarios`] holds ready-made configurations
//! for the standard ring experiments, shared by integration tests and
//! benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod scenarios;

pub use fixtures::{ramp, spike, total, CountingKernel};
pub use scenarios::{heat_ring, random_diffusion, wave_ring};
