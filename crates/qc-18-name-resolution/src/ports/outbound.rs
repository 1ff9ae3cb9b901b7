//! # Outbound Ports (Driven Ports / SPI)
//!
//! The registry and ledger are external collaborators: this subsystem only
//! reads them. Gateways are untrusted; their answers are verified before use.

use alloy_primitives::hex;
use async_trait::async_trait;
use shared_types::{Address, Bytes, Node};
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// LEDGER
// =============================================================================

/// Error from a read-only contract call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The call reverted; carries the revert data (possibly empty)
    #[error("Call reverted ({} bytes of revert data)", .0.len())]
    Reverted(Bytes),

    /// The ledger could not be reached
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    /// The ledger answered with something that is not call output
    #[error("Invalid ledger response: {0}")]
    InvalidResponse(String),
}

/// Read-only contract calls against current state.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Execute `data` against `target` without a transaction.
    ///
    /// Calling an address with no code succeeds with empty output.
    async fn call(&self, target: Address, data: Bytes) -> Result<Bytes, LedgerError>;
}

#[async_trait]
impl<T: Ledger + ?Sized> Ledger for Arc<T> {
    async fn call(&self, target: Address, data: Bytes) -> Result<Bytes, LedgerError> {
        (**self).call(target, data).await
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Owner, resolver and TTL per node.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Current owner; the zero address when unowned.
    async fn owner_of(&self, node: Node) -> Result<Address, LedgerError>;

    /// Resolver set for exactly this node. Unset is `None`, not zero.
    async fn resolver_of(&self, node: Node) -> Result<Option<Address>, LedgerError>;

    async fn ttl_of(&self, node: Node) -> Result<u64, LedgerError>;
}

#[async_trait]
impl<T: Registry + ?Sized> Registry for Arc<T> {
    async fn owner_of(&self, node: Node) -> Result<Address, LedgerError> {
        (**self).owner_of(node).await
    }

    async fn resolver_of(&self, node: Node) -> Result<Option<Address>, LedgerError> {
        (**self).resolver_of(node).await
    }

    async fn ttl_of(&self, node: Node) -> Result<u64, LedgerError> {
        (**self).ttl_of(node).await
    }
}

// =============================================================================
// OFF-CHAIN GATEWAY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMethod {
    Get,
    /// JSON body `{"data": "0x..", "sender": "0x.."}`
    Post,
}

/// One attempt against one gateway URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    /// URL template as published by the resolver
    pub template: String,
    /// Template with `{sender}` and `{data}` filled in
    pub url: String,
    pub method: GatewayMethod,
    pub sender: Address,
    pub call_data: Bytes,
}

impl GatewayRequest {
    /// Expand `template`. Templates mentioning `{data}` are fetched with GET,
    /// the rest with POST.
    pub fn new(template: &str, sender: Address, call_data: Bytes) -> Self {
        let sender_hex = hex::encode_prefixed(sender.as_slice());
        let data_hex = hex::encode_prefixed(&call_data);
        let method = if template.contains("{data}") {
            GatewayMethod::Get
        } else {
            GatewayMethod::Post
        };
        Self {
            template: template.to_owned(),
            url: template
                .replace("{sender}", &sender_hex)
                .replace("{data}", &data_hex),
            method,
            sender,
            call_data,
        }
    }
}

/// Error from a gateway fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Non-success HTTP status
    #[error("Gateway returned status {status}")]
    Status { status: u16, body: String },

    /// Connection, TLS or I/O failure
    #[error("Gateway transport error: {0}")]
    Transport(String),

    /// Body was not `{"data": "0x.."}`
    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),
}

/// Fetches the response body for an off-chain lookup.
#[async_trait]
pub trait OffchainGateway: Send + Sync {
    /// Returns the decoded `data` field of the gateway's JSON answer.
    async fn fetch(&self, request: &GatewayRequest) -> Result<Bytes, GatewayError>;
}

#[async_trait]
impl<T: OffchainGateway + ?Sized> OffchainGateway for Arc<T> {
    async fn fetch(&self, request: &GatewayRequest) -> Result<Bytes, GatewayError> {
        (**self).fetch(request).await
    }
}
