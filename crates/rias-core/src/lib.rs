//! Core types for the Rias graph simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other crate in the workspace: property keys,
//! the tick counter, coupling rules, and the engine error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod rule;

pub use error::EngineError;
pub use id::{PropertyKey, TickId};
pub use rule::CouplingRule;
