//! # Resolution Errors
//!
//! Absence is not an error: a name without a resolver or an address without
//! a reverse record resolves to `Ok(None)`. Everything below is a failure.

use shared_crypto::CryptoError;
use shared_types::{Address, NameError, Node};
use thiserror::Error;

/// A batch descriptor whose node offsets cannot be applied to its payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Node at offset {offset} does not fit a payload of {len} bytes")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("Node offsets {first} and {second} overlap")]
    OverlappingOffsets { first: usize, second: usize },
}

/// Why an off-chain attestation was not accepted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProofError {
    /// Gateway response is not an encoded `SignedRecord`
    #[error("Malformed attestation: {0}")]
    Malformed(String),

    /// Signature could not be parsed or recovered (includes high-S)
    #[error("Bad signature: {0}")]
    Signature(#[from] CryptoError),

    /// Node has no owner, so no signer can be trusted
    #[error("Node has no owner")]
    Unowned,

    /// Recovered signer is not the node's owner
    #[error("Signer mismatch: expected {expected}, got {actual}")]
    SignerMismatch { expected: Address, actual: Address },
}

/// Errors that can occur while resolving a name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    /// Name exceeds the configured label bound
    #[error("Name has {labels} labels, limit is {max}")]
    NameTooDeep { labels: usize, max: usize },

    /// Registry could not be read
    #[error("Registry read failed for node {node}: {detail}")]
    Registry { node: Node, detail: String },

    /// Resolver reverted or could not be reached
    #[error("Resolver {resolver} failed: {detail}")]
    ResolverError { resolver: Address, detail: String },

    /// Returned data did not match the expected ABI shape
    #[error("Failed to decode {what}: {detail}")]
    DecodeError { what: String, detail: String },

    /// Off-chain value was found but is not trusted
    #[error("Invalid proof for node {node}: {reason}")]
    InvalidProof { node: Node, reason: ProofError },

    /// Batch descriptor rejected before execution
    #[error("Malformed descriptor at index {index}: {reason}")]
    MalformedDescriptor {
        index: usize,
        reason: DescriptorError,
    },

    /// The last gateway tried did not answer in time
    #[error("Gateway {url} timed out")]
    GatewayTimeout { url: String },

    /// Every gateway failed without a definitive rejection
    #[error("No gateway answered: {detail}")]
    GatewayUnreachable { urls: Vec<String>, detail: String },

    /// A gateway answered with a client error (4xx)
    #[error("Gateway {url} rejected the request with status {status}")]
    GatewayRejected { url: String, status: u16 },
}

impl ResolutionError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "invalid_name",
            Self::NameTooDeep { .. } => "name_too_deep",
            Self::Registry { .. } => "registry",
            Self::ResolverError { .. } => "resolver",
            Self::DecodeError { .. } => "decode",
            Self::InvalidProof { .. } => "invalid_proof",
            Self::MalformedDescriptor { .. } => "malformed_descriptor",
            Self::GatewayTimeout { .. } => "gateway_timeout",
            Self::GatewayUnreachable { .. } => "gateway_unreachable",
            Self::GatewayRejected { .. } => "gateway_rejected",
        }
    }

    pub(crate) fn decode(what: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::DecodeError {
            what: what.into(),
            detail: err.to_string(),
        }
    }
}
