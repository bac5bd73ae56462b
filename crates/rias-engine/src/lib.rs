//! Time-stepping engine for Rias simulations.
//!
//! [`UpdateEngine`] advances every property of a [`SimulationConfig`] one
//! tick at a time. Each tick reads only history, stages all new values,
//! and commits state and history together, so a failed tick has no
//! effect.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod history;
pub mod metrics;

pub use config::{HistoryFill, SimulationConfig};
pub use engine::{EngineState, UpdateEngine};
pub use history::{HistoryRing, HistoryStore};
pub use metrics::{AdvanceMetrics, AdvanceReport};
