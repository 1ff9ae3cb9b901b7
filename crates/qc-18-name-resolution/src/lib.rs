//! # Name Resolution Subsystem (QC-18)
//!
//! Resolves hierarchical names (`foo.bar.eth`) to records held by resolver
//! contracts on the ledger.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Queries, node substitution and attestation checks, no I/O
//! - **Ports Layer** (`ports/`): Inbound API plus the registry, ledger and gateway it depends on
//! - **Service Layer** (`service/`): Authority walk, dispatch, off-chain lookups, batches
//! - **Adapters** (`adapters/`): In-memory ledger and contract stubs, registry over a ledger,
//!   JSON-RPC ledger and HTTP gateway (feature `rpc`)
//!
//! ## Resolution Flow
//!
//! ```text
//! name ──► walk authorities (most specific first) ──► resolver
//!                                                        │
//!                 supportsInterface(0x9061b923)? ◄───────┘
//!                   │ yes                      │ no / revert
//!        resolve(dnsName, calldata)       calldata as-is
//!                   │
//!        OffchainLookup? ──► gateway ──► signer == owner(node)?
//! ```
//!
//! ## Security Notes
//!
//! - Off-chain values are only returned when signed by the node's current owner
//! - High-S (malleable) attestation signatures are rejected
//! - The authority walk is bounded by the name's label count

pub mod abi;
pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::ResolutionConfig;
pub use domain::entities::{
    BatchCall, BatchResponse, CallKind, CallResult, RawResolution, RecordSource, Resolution,
    ResolverCapability, ResolverLocation,
};
pub use domain::errors::{DescriptorError, ProofError, ResolutionError};
pub use domain::proof::{attestation_digest, sign_attestation, verify_attestation, Attestation};
pub use domain::query::{RecordQuery, RecordValue};
pub use domain::substitution::{substitute_node, validate_offsets, NODE_LEN};
pub use ports::inbound::NameResolutionApi;
pub use ports::outbound::{
    GatewayError, GatewayMethod, GatewayRequest, Ledger, LedgerError, OffchainGateway, Registry,
};
pub use service::NameResolutionService;
pub use shared_types::{Address, Bytes, Name, NameError, Node, B256};
