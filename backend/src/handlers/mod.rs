//! HTTP handlers for the Shrimp Traceability Platform

mod catalog;
mod classification;
mod health;

pub use catalog::*;
pub use classification::*;
pub use health::*;
