//! Resolution dispatch: probe the resolver once, then call it the way it
//! asks to be called.

use super::NameResolutionService;
use crate::abi::{
    selector_of, IExtendedResolver, OffchainLookup, IERC165, EXTENDED_RESOLVER_INTERFACE_ID,
};
use crate::domain::entities::{
    RawResolution, RecordSource, Resolution, ResolverCapability, ResolverLocation,
};
use crate::domain::errors::ResolutionError;
use crate::domain::query::RecordQuery;
use crate::ports::outbound::{Ledger, LedgerError, OffchainGateway, Registry};
use alloy_sol_types::{SolCall, SolError};
use quantum_telemetry::{time_histogram, RESOLUTIONS, RESOLUTION_DURATION};
use shared_types::{Address, Bytes, Name};
use tracing::{debug, instrument};

impl<R: Registry, L: Ledger, G: OffchainGateway> NameResolutionService<R, L, G> {
    /// Resolve a typed record for `name`.
    #[instrument(skip_all, fields(name = %name, record = query.kind()))]
    pub async fn resolve(
        &self,
        name: &Name,
        query: &RecordQuery,
    ) -> Result<Option<Resolution>, ResolutionError> {
        let _timer = time_histogram!(RESOLUTION_DURATION);

        let calldata = query.calldata(name.node());
        let Some(raw) = self.resolve_calldata(name, &calldata).await? else {
            return Ok(None);
        };
        let value = query.decode(&raw.data)?;
        Ok(Some(Resolution {
            location: raw.location,
            value,
            source: raw.source,
        }))
    }

    /// Resolve arbitrary resolver calldata for `name`.
    ///
    /// The calldata goes unmodified to the resolver. On the wire path it is
    /// wrapped in `resolve(dnsName, calldata)` with the full queried name, so
    /// a wildcard authority sees which subname was asked for.
    pub async fn resolve_calldata(
        &self,
        name: &Name,
        calldata: &[u8],
    ) -> Result<Option<RawResolution>, ResolutionError> {
        let Some(location) = self.find_resolver(name).await? else {
            RESOLUTIONS.with_label_values(&["none", "not_found"]).inc();
            return Ok(None);
        };

        let capability = self.probe_capability(location.resolver).await?;
        let outcome = match capability {
            ResolverCapability::WireResolve => self.call_wire(name, &location, calldata).await,
            ResolverCapability::DirectTyped => self.call_direct(name, &location, calldata).await,
        };

        let label = if outcome.is_ok() { "found" } else { "error" };
        RESOLUTIONS
            .with_label_values(&[capability.as_str(), label])
            .inc();

        let (data, source) = outcome?;
        Ok(Some(RawResolution {
            location,
            capability,
            data,
            source,
        }))
    }

    /// `supportsInterface(0x9061b923)`. A revert or an unparseable answer
    /// means the resolver is called directly.
    async fn probe_capability(
        &self,
        resolver: Address,
    ) -> Result<ResolverCapability, ResolutionError> {
        let probe = IERC165::supportsInterfaceCall {
            interfaceId: EXTENDED_RESOLVER_INTERFACE_ID.into(),
        };
        let wire = match self.ledger.call(resolver, probe.abi_encode().into()).await {
            Ok(ret) => IERC165::supportsInterfaceCall::abi_decode_returns(&ret, true)
                .map(|r| r._0)
                .unwrap_or(false),
            Err(LedgerError::Reverted(_)) => false,
            Err(err) => {
                return Err(ResolutionError::ResolverError {
                    resolver,
                    detail: err.to_string(),
                })
            }
        };

        let capability = if wire {
            ResolverCapability::WireResolve
        } else {
            ResolverCapability::DirectTyped
        };
        debug!(resolver = %resolver, capability = capability.as_str(), "Probed resolver");
        Ok(capability)
    }

    async fn call_wire(
        &self,
        name: &Name,
        location: &ResolverLocation,
        calldata: &[u8],
    ) -> Result<(Bytes, RecordSource), ResolutionError> {
        let request = IExtendedResolver::resolveCall {
            name: name.to_dns_wire().into(),
            data: Bytes::copy_from_slice(calldata),
        };
        match self
            .ledger
            .call(location.resolver, request.abi_encode().into())
            .await
        {
            Ok(ret) => {
                let data = IExtendedResolver::resolveCall::abi_decode_returns(&ret, true)
                    .map_err(|e| ResolutionError::decode("resolve(bytes,bytes) output", e))?
                    ._0;
                Ok((data, RecordSource::Onchain))
            }
            Err(err) => self.on_call_failure(name, location.resolver, err).await,
        }
    }

    async fn call_direct(
        &self,
        name: &Name,
        location: &ResolverLocation,
        calldata: &[u8],
    ) -> Result<(Bytes, RecordSource), ResolutionError> {
        match self
            .ledger
            .call(location.resolver, Bytes::copy_from_slice(calldata))
            .await
        {
            Ok(data) => Ok((data, RecordSource::Onchain)),
            Err(err) => self.on_call_failure(name, location.resolver, err).await,
        }
    }

    /// An `OffchainLookup` revert moves resolution to the gateway; anything
    /// else is a resolver failure.
    async fn on_call_failure(
        &self,
        name: &Name,
        resolver: Address,
        err: LedgerError,
    ) -> Result<(Bytes, RecordSource), ResolutionError> {
        if let LedgerError::Reverted(data) = &err {
            if selector_of(data) == Some(OffchainLookup::SELECTOR) {
                let lookup = OffchainLookup::abi_decode(data, true)
                    .map_err(|e| ResolutionError::decode("OffchainLookup", e))?;
                return self.resolve_offchain(name, resolver, lookup).await;
            }
        }
        Err(ResolutionError::ResolverError {
            resolver,
            detail: err.to_string(),
        })
    }
}
