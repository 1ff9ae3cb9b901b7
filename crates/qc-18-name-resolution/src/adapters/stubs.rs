//! # Resolver Stubs
//!
//! Contracts hosted by `InMemoryLedger`, answering the same ABI a deployed
//! resolver would.
//!
//! | Stub | Probe (0x9061b923) | Behaviour |
//! |------|--------------------|-----------|
//! | `PublicResolverStub` | false | typed records + multicall |
//! | `WildcardResolverStub` | true | answers any subname from its base node |
//! | `OffchainResolverStub` | true | reverts with `OffchainLookup` |
//! | `TokenOwnerStub` | - | `ownerOf(uint256)` keyed by node |

use super::memory::ContractStub;
use crate::abi::{
    selector_of, IAddrResolver, IContentHashResolver, IERC165, IExtendedResolver, IMulticallable,
    INameResolver, IOwnerOf, ITextResolver, OffchainLookup, ERC165_INTERFACE_ID,
    EXTENDED_RESOLVER_INTERFACE_ID,
};
use crate::ports::outbound::LedgerError;
use alloy_sol_types::{SolCall, SolError};
use parking_lot::{Mutex, RwLock};
use shared_types::{Address, Bytes, Node, B256};
use std::collections::HashMap;

/// Selector of `resolveWithProof(bytes,bytes)`, the usual gateway callback.
const RESOLVE_WITH_PROOF: [u8; 4] = [0xf4, 0xd4, 0xd2, 0xf8];

fn revert() -> LedgerError {
    LedgerError::Reverted(Bytes::new())
}

fn decode<C: SolCall>(data: &[u8]) -> Result<C, LedgerError> {
    C::abi_decode(data, true).map_err(|_| revert())
}

fn supports(data: &[u8], ids: &[[u8; 4]]) -> Result<Bytes, LedgerError> {
    let call: IERC165::supportsInterfaceCall = decode(data)?;
    let supported = ids.contains(&call.interfaceId.0);
    Ok(IERC165::supportsInterfaceCall::abi_encode_returns(&(supported,)).into())
}

// =============================================================================
// PUBLIC RESOLVER
// =============================================================================

#[derive(Default)]
struct Records {
    addrs: HashMap<Node, Address>,
    texts: HashMap<(Node, String), String>,
    contenthashes: HashMap<Node, Bytes>,
    names: HashMap<Node, String>,
}

/// Direct-style resolver holding typed records per node.
#[derive(Default)]
pub struct PublicResolverStub {
    records: RwLock<Records>,
}

impl PublicResolverStub {
    const INTERFACES: [[u8; 4]; 6] = [
        ERC165_INTERFACE_ID,
        IAddrResolver::addrCall::SELECTOR,
        ITextResolver::textCall::SELECTOR,
        IContentHashResolver::contenthashCall::SELECTOR,
        INameResolver::nameCall::SELECTOR,
        IMulticallable::multicallCall::SELECTOR,
    ];

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_addr(&self, node: Node, addr: Address) {
        self.records.write().addrs.insert(node, addr);
    }

    pub fn set_text(&self, node: Node, key: &str, value: &str) {
        self.records
            .write()
            .texts
            .insert((node, key.to_owned()), value.to_owned());
    }

    pub fn set_contenthash(&self, node: Node, hash: impl Into<Bytes>) {
        self.records.write().contenthashes.insert(node, hash.into());
    }

    pub fn set_name(&self, node: Node, name: &str) {
        self.records.write().names.insert(node, name.to_owned());
    }
}

impl ContractStub for PublicResolverStub {
    fn call(&self, data: &[u8]) -> Result<Bytes, LedgerError> {
        let out = match selector_of(data).ok_or_else(revert)? {
            IERC165::supportsInterfaceCall::SELECTOR => return supports(data, &Self::INTERFACES),
            IAddrResolver::addrCall::SELECTOR => {
                let call: IAddrResolver::addrCall = decode(data)?;
                let addr = self.records.read().addrs.get(&call.node).copied();
                IAddrResolver::addrCall::abi_encode_returns(&(addr.unwrap_or(Address::ZERO),))
            }
            ITextResolver::textCall::SELECTOR => {
                let call: ITextResolver::textCall = decode(data)?;
                let text = self
                    .records
                    .read()
                    .texts
                    .get(&(call.node, call.key))
                    .cloned()
                    .unwrap_or_default();
                ITextResolver::textCall::abi_encode_returns(&(text,))
            }
            IContentHashResolver::contenthashCall::SELECTOR => {
                let call: IContentHashResolver::contenthashCall = decode(data)?;
                let hash = self
                    .records
                    .read()
                    .contenthashes
                    .get(&call.node)
                    .cloned()
                    .unwrap_or_default();
                IContentHashResolver::contenthashCall::abi_encode_returns(&(hash,))
            }
            INameResolver::nameCall::SELECTOR => {
                let call: INameResolver::nameCall = decode(data)?;
                let name = self
                    .records
                    .read()
                    .names
                    .get(&call.node)
                    .cloned()
                    .unwrap_or_default();
                INameResolver::nameCall::abi_encode_returns(&(name,))
            }
            IMulticallable::multicallCall::SELECTOR => {
                let call: IMulticallable::multicallCall = decode(data)?;
                let results = call
                    .data
                    .iter()
                    .map(|inner| self.call(inner))
                    .collect::<Result<Vec<_>, _>>()?;
                IMulticallable::multicallCall::abi_encode_returns(&(results,))
            }
            _ => return Err(revert()),
        };
        Ok(out.into())
    }
}

// =============================================================================
// WILDCARD RESOLVER
// =============================================================================

/// Wire-style resolver that answers every subname with the records of its
/// base node, recording each DNS-encoded name it is asked about.
pub struct WildcardResolverStub {
    base_node: Node,
    records: PublicResolverStub,
    received_names: Mutex<Vec<Bytes>>,
}

impl WildcardResolverStub {
    pub fn new(base_node: Node) -> Self {
        Self {
            base_node,
            records: PublicResolverStub::new(),
            received_names: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> &PublicResolverStub {
        &self.records
    }

    pub fn received_names(&self) -> Vec<Bytes> {
        self.received_names.lock().clone()
    }
}

impl ContractStub for WildcardResolverStub {
    fn call(&self, data: &[u8]) -> Result<Bytes, LedgerError> {
        match selector_of(data).ok_or_else(revert)? {
            IERC165::supportsInterfaceCall::SELECTOR => {
                supports(data, &[ERC165_INTERFACE_ID, EXTENDED_RESOLVER_INTERFACE_ID])
            }
            IExtendedResolver::resolveCall::SELECTOR => {
                let call: IExtendedResolver::resolveCall = decode(data)?;
                self.received_names.lock().push(call.name);

                let mut inner = call.data.to_vec();
                if let Some(node) = inner.get_mut(4..36) {
                    node.copy_from_slice(self.base_node.as_slice());
                }
                let answer = self.records.call(&inner)?;
                Ok(IExtendedResolver::resolveCall::abi_encode_returns(&(answer,)).into())
            }
            _ => self.records.call(data),
        }
    }
}

// =============================================================================
// OFF-CHAIN RESOLVER
// =============================================================================

/// Wire-style resolver whose records live behind gateways.
pub struct OffchainResolverStub {
    sender: Address,
    urls: Vec<String>,
}

impl OffchainResolverStub {
    /// `sender` is the address written into `OffchainLookup`; a well-behaved
    /// resolver uses its own address.
    pub fn new(sender: Address, urls: Vec<String>) -> Self {
        Self { sender, urls }
    }
}

impl ContractStub for OffchainResolverStub {
    fn call(&self, data: &[u8]) -> Result<Bytes, LedgerError> {
        if selector_of(data) == Some(IERC165::supportsInterfaceCall::SELECTOR) {
            return supports(data, &[ERC165_INTERFACE_ID, EXTENDED_RESOLVER_INTERFACE_ID]);
        }
        let lookup = OffchainLookup {
            sender: self.sender,
            urls: self.urls.clone(),
            callData: Bytes::copy_from_slice(data),
            callbackFunction: RESOLVE_WITH_PROOF.into(),
            extraData: Bytes::copy_from_slice(data),
        };
        Err(LedgerError::Reverted(lookup.abi_encode().into()))
    }
}

// =============================================================================
// TOKEN OWNER
// =============================================================================

/// `ownerOf(uint256)` keyed by node, reverting for unknown tokens.
#[derive(Default)]
pub struct TokenOwnerStub {
    owners: RwLock<HashMap<B256, Address>>,
}

impl TokenOwnerStub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_owner(&self, token: B256, owner: Address) {
        self.owners.write().insert(token, owner);
    }
}

impl ContractStub for TokenOwnerStub {
    fn call(&self, data: &[u8]) -> Result<Bytes, LedgerError> {
        if selector_of(data) != Some(IOwnerOf::ownerOfCall::SELECTOR) {
            return Err(revert());
        }
        let call: IOwnerOf::ownerOfCall = decode(data)?;
        let owner = self
            .owners
            .read()
            .get(&B256::from(call.tokenId))
            .copied()
            .ok_or_else(revert)?;
        Ok(IOwnerOf::ownerOfCall::abi_encode_returns(&(owner,)).into())
    }
}
