//! # Quantum-Chain Name Service Test Suite
//!
//! End-to-end flows through the public `NameResolutionApi`, wired over the
//! in-memory ledger, resolver stubs and scripted gateways.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # Shared world setup
//! └── integration/
//!     ├── wildcard_flows.rs    # Authority walk + wire/direct dispatch
//!     ├── offchain_flows.rs    # Gateway lookups and attestation checks
//!     ├── batch_flows.rs       # Reverse resolution + batched calls
//!     └── registry_contract_flows.rs  # Registry read through contract ABI
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qc-tests
//! cargo test -p qc-tests integration::offchain_flows
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

pub mod fixtures;
pub mod integration;
