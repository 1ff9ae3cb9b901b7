//! # Record Queries
//!
//! Typed record reads and the resolver calldata they turn into. Queries are
//! encoded against the node of the name being resolved, never the node of
//! the authority that answered.

use crate::abi::{IAddrResolver, IContentHashResolver, INameResolver, ITextResolver};
use crate::domain::errors::ResolutionError;
use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Bytes, Node};

/// A record to read from a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "record", content = "key")]
pub enum RecordQuery {
    Addr,
    Text(String),
    ContentHash,
    /// Primary name, read from reverse records
    Name,
}

/// Decoded value of a [`RecordQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "record", content = "value")]
pub enum RecordValue {
    Addr(Address),
    Text(String),
    ContentHash(Bytes),
    Name(String),
}

impl RecordQuery {
    /// Resolver calldata for this query against `node`.
    pub fn calldata(&self, node: Node) -> Vec<u8> {
        match self {
            Self::Addr => IAddrResolver::addrCall { node }.abi_encode(),
            Self::Text(key) => ITextResolver::textCall {
                node,
                key: key.clone(),
            }
            .abi_encode(),
            Self::ContentHash => IContentHashResolver::contenthashCall { node }.abi_encode(),
            Self::Name => INameResolver::nameCall { node }.abi_encode(),
        }
    }

    /// Decode a resolver's return data for this query.
    pub fn decode(&self, data: &[u8]) -> Result<RecordValue, ResolutionError> {
        let err = |e: alloy_sol_types::Error| ResolutionError::decode(self.kind(), e);
        Ok(match self {
            Self::Addr => {
                RecordValue::Addr(IAddrResolver::addrCall::abi_decode_returns(data, true).map_err(err)?._0)
            }
            Self::Text(_) => {
                RecordValue::Text(ITextResolver::textCall::abi_decode_returns(data, true).map_err(err)?._0)
            }
            Self::ContentHash => RecordValue::ContentHash(
                IContentHashResolver::contenthashCall::abi_decode_returns(data, true)
                    .map_err(err)?
                    ._0,
            ),
            Self::Name => {
                RecordValue::Name(INameResolver::nameCall::abi_decode_returns(data, true).map_err(err)?._0)
            }
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Addr => "addr",
            Self::Text(_) => "text",
            Self::ContentHash => "contenthash",
            Self::Name => "name",
        }
    }
}

impl RecordValue {
    /// Whether the value is the resolver's "unset" default.
    pub fn is_unset(&self) -> bool {
        match self {
            Self::Addr(a) => a.is_zero(),
            Self::Text(s) | Self::Name(s) => s.is_empty(),
            Self::ContentHash(b) => b.is_empty(),
        }
    }
}
