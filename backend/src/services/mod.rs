//! Business logic services for the Shrimp Traceability Platform

pub mod catalog;
pub mod classification;
