//! # Resolution Entities
//!
//! What the authority walk finds, what dispatch returns, and the shape of
//! batched calls.

use crate::domain::errors::ResolutionError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Bytes, Name, Node};

use super::query::RecordValue;

/// Where a name's records live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverLocation {
    /// Resolver contract answering for the name
    pub resolver: Address,
    /// Nearest ancestor (or the name itself) with a resolver set
    pub authority: Name,
    pub authority_node: Node,
    /// True when `authority` is a strict ancestor of the queried name
    pub wildcard: bool,
    /// TTL recorded against the authority
    pub ttl: u64,
}

/// How a resolver wants to be called, as learned from its capability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverCapability {
    /// `resolve(dnsName, calldata)`; may defer to a gateway
    WireResolve,
    /// Plain typed calls carrying the node
    DirectTyped,
}

impl ResolverCapability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WireResolve => "wire",
            Self::DirectTyped => "direct",
        }
    }
}

/// Where a value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RecordSource {
    Onchain,
    /// Verified attestation from the gateway at `gateway`
    Offchain { gateway: String },
}

/// Undecoded resolver answer for arbitrary calldata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawResolution {
    pub location: ResolverLocation,
    pub capability: ResolverCapability,
    /// ABI return data of the inner call
    pub data: Bytes,
    pub source: RecordSource,
}

/// Decoded answer for a typed record query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub location: ResolverLocation,
    pub value: RecordValue,
    pub source: RecordSource,
}

/// How a batch slot is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    /// Payload is resolver calldata; resolved through the name's authority
    /// and answered as `abi.encode(bytes result, address resolver)`
    UniversalResolver,
    /// Payload is sent verbatim to `target`
    Direct,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UniversalResolver => "universal",
            Self::Direct => "direct",
        }
    }
}

/// One slot of a batch: a payload with byte offsets where the resolved
/// name's node is written before execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCall {
    pub target: Address,
    pub payload: Bytes,
    pub kind: CallKind,
    #[serde(default)]
    pub name_offsets: Vec<usize>,
}

impl BatchCall {
    pub fn universal(target: Address, payload: impl Into<Bytes>, name_offsets: Vec<usize>) -> Self {
        Self {
            target,
            payload: payload.into(),
            kind: CallKind::UniversalResolver,
            name_offsets,
        }
    }

    pub fn direct(target: Address, payload: impl Into<Bytes>, name_offsets: Vec<usize>) -> Self {
        Self {
            target,
            payload: payload.into(),
            kind: CallKind::Direct,
            name_offsets,
        }
    }
}

/// Outcome of a single batch slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult {
    Success(Bytes),
    /// Nothing to run: the slot needed a name and there was none, or the
    /// name had no resolver
    Empty,
    Failed(ResolutionError),
}

impl CallResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn data(&self) -> Option<&Bytes> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Empty => "empty",
            Self::Failed(_) => "failed",
        }
    }
}

/// Reverse-resolved name plus one result per input call, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResponse {
    pub name: Option<Name>,
    pub results: Vec<CallResult>,
}
