//! # Domain Layer
//!
//! Record queries, node substitution and attestation checks with no I/O.
//! This is the inner layer of the hexagonal architecture.

pub mod entities;
pub mod errors;
pub mod proof;
pub mod query;
pub mod substitution;
