//! # Adapters Module
//!
//! Infrastructure adapters implementing the outbound ports.
//!
//! - `memory`: in-memory ledger and registry for tests and local use
//! - `stubs`: resolver contracts the in-memory ledger can host
//! - `memory_gateway`: scripted off-chain gateway
//! - `contract_registry`: registry port over ABI calls to a registry contract
//! - `json_rpc` / `http_gateway` (feature `rpc`): live ledger and gateways

pub mod contract_registry;
pub mod memory;
pub mod memory_gateway;
pub mod stubs;

#[cfg(feature = "rpc")]
pub mod http_gateway;
#[cfg(feature = "rpc")]
pub mod json_rpc;

pub use contract_registry::ContractRegistry;
pub use memory::{ContractStub, InMemoryLedger, RegistryRecord};
pub use memory_gateway::{GatewayBehavior, InMemoryGateway};
pub use stubs::{OffchainResolverStub, PublicResolverStub, TokenOwnerStub, WildcardResolverStub};

#[cfg(feature = "rpc")]
pub use http_gateway::HttpGateway;
#[cfg(feature = "rpc")]
pub use json_rpc::JsonRpcLedger;
