//! # Shared Types Crate
//!
//! Name primitives used across the name-service crates.
//!
//! ## Design Principles
//!
//! - **Derived, never stored**: a `Node` is always recomputed from its `Name`.
//! - **Validated on construction**: a `Name` with an empty or oversized label
//!   cannot exist, so the DNS wire encoder is infallible.
//! - **Wire exactness**: `Name::to_dns_wire` emits the length-prefixed label
//!   format resolvers expect and `Name::from_dns_wire` accepts nothing else.

pub mod dns_wire;
pub mod entities;
pub mod errors;

pub use alloy_primitives::{Address, Bytes, B256};
pub use entities::*;
pub use errors::*;
