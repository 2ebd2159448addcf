//! Shared types and models for the Shrimp Traceability Platform
//!
//! This crate contains the processing-order classification core shared
//! between the backend, frontend (via WASM), and other components of the
//! system.

pub mod aggregate;
pub mod classifier;
pub mod models;
pub mod sheet;
pub mod types;
pub mod validation;

pub use aggregate::*;
pub use classifier::*;
pub use models::*;
pub use sheet::*;
pub use types::*;
pub use validation::*;
