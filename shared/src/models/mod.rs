//! Domain models for the Shrimp Traceability Platform

mod catalog;
mod classification;

pub use catalog::*;
pub use classification::*;
