//! # Name Resolution Service
//!
//! Application service implementing `NameResolutionApi`.
//!
//! - `walker`: nearest ancestor with a resolver
//! - `dispatcher`: capability probe and the wire/direct call paths
//! - `offchain`: gateway iteration and attestation checks
//! - `batch`: node substitution and ordered batch execution
//! - `reverse`: address to primary name

mod batch;
mod dispatcher;
mod offchain;
mod reverse;
mod walker;

use crate::config::ResolutionConfig;
use crate::domain::entities::{BatchCall, BatchResponse, RawResolution, Resolution, ResolverLocation};
use crate::domain::errors::ResolutionError;
use crate::domain::query::RecordQuery;
use crate::ports::inbound::NameResolutionApi;
use crate::ports::outbound::{LedgerError, Ledger, OffchainGateway, Registry};
use async_trait::async_trait;
use shared_types::{Address, Name, Node};

/// Name resolution service.
///
/// Generic over the registry it walks, the ledger resolvers run on and the
/// gateway off-chain records are fetched from. The service holds no mutable
/// state; concurrent calls are independent.
pub struct NameResolutionService<R: Registry, L: Ledger, G: OffchainGateway> {
    registry: R,
    ledger: L,
    gateway: G,
    config: ResolutionConfig,
}

impl<R: Registry, L: Ledger, G: OffchainGateway> NameResolutionService<R, L, G> {
    pub fn new(registry: R, ledger: L, gateway: G, config: ResolutionConfig) -> Self {
        Self {
            registry,
            ledger,
            gateway,
            config,
        }
    }
}

fn registry_error(node: Node, err: LedgerError) -> ResolutionError {
    ResolutionError::Registry {
        node,
        detail: err.to_string(),
    }
}

#[async_trait]
impl<R: Registry, L: Ledger, G: OffchainGateway> NameResolutionApi
    for NameResolutionService<R, L, G>
{
    async fn find_resolver(
        &self,
        name: &Name,
    ) -> Result<Option<ResolverLocation>, ResolutionError> {
        NameResolutionService::find_resolver(self, name).await
    }

    async fn resolve(
        &self,
        name: &Name,
        query: &RecordQuery,
    ) -> Result<Option<Resolution>, ResolutionError> {
        NameResolutionService::resolve(self, name, query).await
    }

    async fn resolve_calldata(
        &self,
        name: &Name,
        calldata: &[u8],
    ) -> Result<Option<RawResolution>, ResolutionError> {
        NameResolutionService::resolve_calldata(self, name, calldata).await
    }

    async fn name_of(&self, address: Address) -> Result<Option<Name>, ResolutionError> {
        NameResolutionService::name_of(self, address).await
    }

    async fn reverse_and_batch(
        &self,
        address: Address,
        calls: &[BatchCall],
    ) -> Result<BatchResponse, ResolutionError> {
        NameResolutionService::reverse_and_batch(self, address, calls).await
    }

    async fn reverse_encoded(
        &self,
        reverse_name: &[u8],
        calls: &[BatchCall],
    ) -> Result<BatchResponse, ResolutionError> {
        NameResolutionService::reverse_encoded(self, reverse_name, calls).await
    }
}
