//! Off-chain lookups: fetch from the resolver's gateways in order, then
//! accept the answer only if the node's owner signed it.

use super::{registry_error, NameResolutionService};
use crate::abi::OffchainLookup;
use crate::domain::entities::RecordSource;
use crate::domain::errors::ResolutionError;
use crate::domain::proof::{verify_attestation, Attestation};
use crate::ports::outbound::{GatewayError, GatewayRequest, Ledger, OffchainGateway, Registry};
use alloy_primitives::hex;
use quantum_telemetry::{GATEWAY_REQUESTS, PROOF_FAILURES};
use shared_types::{Address, Bytes, Name, Node};
use tracing::{debug, warn};

enum LastFailure {
    Timeout(String),
    Other,
}

impl<R: Registry, L: Ledger, G: OffchainGateway> NameResolutionService<R, L, G> {
    pub(super) async fn resolve_offchain(
        &self,
        name: &Name,
        resolver: Address,
        lookup: OffchainLookup,
    ) -> Result<(Bytes, RecordSource), ResolutionError> {
        if lookup.sender != resolver {
            warn!(resolver = %resolver, sender = %lookup.sender, "OffchainLookup from foreign sender");
            return Err(ResolutionError::ResolverError {
                resolver,
                detail: format!("OffchainLookup sender {} is not the resolver", lookup.sender),
            });
        }

        debug!(
            name = %name,
            urls = lookup.urls.len(),
            callback = %hex::encode_prefixed(lookup.callbackFunction),
            extra_data_len = lookup.extraData.len(),
            "Deferring to gateway"
        );

        let (url, body) = self
            .fetch_from_gateways(resolver, &lookup.urls, lookup.callData)
            .await?;
        let value = self.verify_offchain(name.node(), &body).await?;
        Ok((value, RecordSource::Offchain { gateway: url }))
    }

    /// Verify a gateway body for `node` against the node's current owner.
    pub async fn verify_offchain(&self, node: Node, body: &[u8]) -> Result<Bytes, ResolutionError> {
        let verdict = match Attestation::decode(node, body) {
            Ok(attestation) => {
                let owner = self
                    .registry
                    .owner_of(node)
                    .await
                    .map_err(|e| registry_error(node, e))?;
                verify_attestation(&attestation, owner)
            }
            Err(reason) => Err(reason),
        };

        verdict.map_err(|reason| {
            PROOF_FAILURES.inc();
            warn!(node = %node, reason = %reason, "Attestation rejected");
            ResolutionError::InvalidProof { node, reason }
        })
    }

    /// Try each URL in order with its own timeout. A 4xx stops the
    /// iteration; anything else moves on to the next URL.
    async fn fetch_from_gateways(
        &self,
        sender: Address,
        templates: &[String],
        call_data: Bytes,
    ) -> Result<(String, Bytes), ResolutionError> {
        let mut tried = Vec::with_capacity(templates.len());
        let mut failures = Vec::new();
        let mut last = LastFailure::Other;

        for template in templates {
            let request = GatewayRequest::new(template, sender, call_data.clone());
            tried.push(request.url.clone());

            match tokio::time::timeout(self.config.gateway_timeout, self.gateway.fetch(&request))
                .await
            {
                Ok(Ok(body)) => {
                    GATEWAY_REQUESTS.with_label_values(&["ok"]).inc();
                    return Ok((request.url, body));
                }
                Ok(Err(GatewayError::Status { status, body })) if (400..500).contains(&status) => {
                    GATEWAY_REQUESTS.with_label_values(&["rejected"]).inc();
                    warn!(url = %request.url, status, body = %body, "Gateway rejected lookup");
                    return Err(ResolutionError::GatewayRejected {
                        url: request.url,
                        status,
                    });
                }
                Ok(Err(err)) => {
                    GATEWAY_REQUESTS.with_label_values(&["failed"]).inc();
                    warn!(url = %request.url, error = %err, "Gateway failed, trying next");
                    failures.push(format!("{}: {err}", request.url));
                    last = LastFailure::Other;
                }
                Err(_) => {
                    GATEWAY_REQUESTS.with_label_values(&["timeout"]).inc();
                    warn!(
                        url = %request.url,
                        timeout_ms = self.config.gateway_timeout.as_millis() as u64,
                        "Gateway timed out, trying next"
                    );
                    failures.push(format!("{}: timed out", request.url));
                    last = LastFailure::Timeout(request.url);
                }
            }
        }

        match last {
            LastFailure::Timeout(url) => Err(ResolutionError::GatewayTimeout { url }),
            LastFailure::Other if failures.is_empty() => Err(ResolutionError::GatewayUnreachable {
                urls: tried,
                detail: "no gateway URLs".to_string(),
            }),
            LastFailure::Other => Err(ResolutionError::GatewayUnreachable {
                urls: tried,
                detail: failures.join("; "),
            }),
        }
    }
}
