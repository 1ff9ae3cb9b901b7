//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{BatchCall, BatchResponse, RawResolution, Resolution, ResolverLocation};
use crate::domain::errors::ResolutionError;
use crate::domain::query::RecordQuery;
use async_trait::async_trait;
use shared_types::{Address, Name};

/// Primary Name Resolution API.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait NameResolutionApi: Send + Sync {
    /// Find the resolver responsible for `name`, walking from the name toward
    /// the root. `None` when no non-root ancestor has a resolver.
    async fn find_resolver(&self, name: &Name)
        -> Result<Option<ResolverLocation>, ResolutionError>;

    /// Resolve a typed record. `None` when the name has no resolver.
    async fn resolve(
        &self,
        name: &Name,
        query: &RecordQuery,
    ) -> Result<Option<Resolution>, ResolutionError>;

    /// Resolve arbitrary resolver calldata, returning the raw ABI answer.
    async fn resolve_calldata(
        &self,
        name: &Name,
        calldata: &[u8],
    ) -> Result<Option<RawResolution>, ResolutionError>;

    /// Primary name of `address`. `None` when no reverse record is set.
    async fn name_of(&self, address: Address) -> Result<Option<Name>, ResolutionError>;

    /// Reverse-resolve `address`, then run `calls` against the name's node.
    ///
    /// Results are positionally aligned with `calls`; one failing slot does
    /// not fail the batch.
    async fn reverse_and_batch(
        &self,
        address: Address,
        calls: &[BatchCall],
    ) -> Result<BatchResponse, ResolutionError>;

    /// As [`reverse_and_batch`](Self::reverse_and_batch), starting from a
    /// DNS-wire encoded reverse name.
    async fn reverse_encoded(
        &self,
        reverse_name: &[u8],
        calls: &[BatchCall],
    ) -> Result<BatchResponse, ResolutionError>;
}
