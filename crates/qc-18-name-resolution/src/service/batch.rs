//! Batched calls against a reverse-resolved name.
//!
//! Slots run with bounded concurrency but results are collected in input
//! order, and a failing slot never aborts its siblings.

use super::NameResolutionService;
use crate::abi::IUniversalResolver;
use crate::domain::entities::{BatchCall, BatchResponse, CallKind, CallResult};
use crate::domain::errors::ResolutionError;
use crate::domain::substitution::{substitute_node, validate_offsets};
use crate::ports::outbound::{Ledger, OffchainGateway, Registry};
use alloy_sol_types::SolCall;
use futures::stream::{self, StreamExt};
use quantum_telemetry::BATCH_CALLS;
use shared_types::{Address, Bytes, Name};
use tracing::{debug, instrument};

impl<R: Registry, L: Ledger, G: OffchainGateway> NameResolutionService<R, L, G> {
    /// Reverse-resolve `address`, then run `calls` with its node substituted.
    #[instrument(skip_all, fields(address = %address, calls = calls.len()))]
    pub async fn reverse_and_batch(
        &self,
        address: Address,
        calls: &[BatchCall],
    ) -> Result<BatchResponse, ResolutionError> {
        let name = self.name_of(address).await?;
        Ok(self.batch(name, calls).await)
    }

    /// As [`reverse_and_batch`](Self::reverse_and_batch), from a DNS-wire
    /// encoded reverse name.
    #[instrument(skip_all, fields(calls = calls.len()))]
    pub async fn reverse_encoded(
        &self,
        reverse_name: &[u8],
        calls: &[BatchCall],
    ) -> Result<BatchResponse, ResolutionError> {
        let reverse = Name::from_dns_wire(reverse_name)?;
        let name = self.name_for_reverse_name(&reverse).await?;
        Ok(self.batch(name, calls).await)
    }

    /// Run `calls` against `name`. With no name, slots that need one are
    /// [`CallResult::Empty`].
    pub async fn batch(&self, name: Option<Name>, calls: &[BatchCall]) -> BatchResponse {
        // Futures are built eagerly so the stream owns them outright.
        let slots: Vec<_> = calls
            .iter()
            .enumerate()
            .map(|(index, call)| self.run_slot(index, call, name.as_ref()))
            .collect();
        let results = stream::iter(slots)
            .buffered(self.config.max_concurrent_calls.max(1))
            .collect::<Vec<_>>()
            .await;

        debug!(
            name = name.as_ref().map(|n| n.to_string()).unwrap_or_default(),
            slots = results.len(),
            "Batch complete"
        );
        BatchResponse { name, results }
    }

    async fn run_slot(&self, index: usize, call: &BatchCall, name: Option<&Name>) -> CallResult {
        let result = self.execute_slot(index, call, name).await;
        BATCH_CALLS
            .with_label_values(&[call.kind.as_str(), result.outcome()])
            .inc();
        if let CallResult::Failed(err) = &result {
            debug!(index, target = %call.target, error = %err, "Batch slot failed");
        }
        result
    }

    async fn execute_slot(&self, index: usize, call: &BatchCall, name: Option<&Name>) -> CallResult {
        if let Err(reason) = validate_offsets(call.payload.len(), &call.name_offsets) {
            return CallResult::Failed(ResolutionError::MalformedDescriptor { index, reason });
        }

        let payload = match name {
            Some(name) => match substitute_node(&call.payload, &call.name_offsets, &name.node()) {
                Ok(payload) => Bytes::from(payload),
                Err(reason) => {
                    return CallResult::Failed(ResolutionError::MalformedDescriptor {
                        index,
                        reason,
                    })
                }
            },
            None if !call.name_offsets.is_empty() => return CallResult::Empty,
            None => call.payload.clone(),
        };

        match call.kind {
            CallKind::UniversalResolver => {
                let Some(name) = name else {
                    return CallResult::Empty;
                };
                match self.resolve_calldata(name, &payload).await {
                    Ok(Some(raw)) => CallResult::Success(
                        IUniversalResolver::resolveCall::abi_encode_returns(&(
                            raw.data,
                            raw.location.resolver,
                        ))
                        .into(),
                    ),
                    Ok(None) => CallResult::Empty,
                    Err(err) => CallResult::Failed(err),
                }
            }
            CallKind::Direct => match self.ledger.call(call.target, payload).await {
                Ok(data) => CallResult::Success(data),
                Err(err) => CallResult::Failed(ResolutionError::ResolverError {
                    resolver: call.target,
                    detail: err.to_string(),
                }),
            },
        }
    }
}
