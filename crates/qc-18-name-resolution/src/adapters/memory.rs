//! # In-Memory Ledger
//!
//! Hosts registry records and contract stubs in process. Implements both
//! `Registry` and `Ledger`; optionally answers registry ABI calls at a fixed
//! address so `ContractRegistry` can run against it.

use crate::abi::{selector_of, IRegistry};
use crate::ports::outbound::{Ledger, LedgerError, Registry};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::{child_node, label_hash, Address, Bytes, Node};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// A contract the in-memory ledger can host.
pub trait ContractStub: Send + Sync {
    /// Execute calldata. Reverts are `LedgerError::Reverted`.
    fn call(&self, data: &[u8]) -> Result<Bytes, LedgerError>;
}

/// Registry entry for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryRecord {
    pub owner: Address,
    pub resolver: Option<Address>,
    pub ttl: u64,
}

/// In-memory registry plus contract host.
#[derive(Default)]
pub struct InMemoryLedger {
    records: RwLock<HashMap<Node, RegistryRecord>>,
    contracts: RwLock<HashMap<Address, Arc<dyn ContractStub>>>,
    registry_address: RwLock<Option<Address>>,
    call_log: Mutex<Vec<(Address, Bytes)>>,
    resolver_lookups: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_record(&self, node: Node, record: RegistryRecord) {
        self.records.write().insert(node, record);
    }

    pub fn set_owner(&self, node: Node, owner: Address) {
        self.records.write().entry(node).or_default().owner = owner;
    }

    pub fn set_resolver(&self, node: Node, resolver: Option<Address>) {
        self.records.write().entry(node).or_default().resolver = resolver;
    }

    pub fn set_ttl(&self, node: Node, ttl: u64) {
        self.records.write().entry(node).or_default().ttl = ttl;
    }

    /// Create `label.<parent>` owned by `owner`; returns the new node.
    pub fn set_subnode_owner(&self, parent: Node, label: &str, owner: Address) -> Node {
        let node = child_node(parent, label_hash(label));
        self.set_owner(node, owner);
        node
    }

    pub fn record(&self, node: Node) -> Option<RegistryRecord> {
        self.records.read().get(&node).cloned()
    }

    /// Host `stub` at `address`.
    pub fn deploy(&self, address: Address, stub: Arc<dyn ContractStub>) {
        self.contracts.write().insert(address, stub);
    }

    /// Answer `IRegistry` calls at `address` from the records held here.
    pub fn expose_registry_at(&self, address: Address) {
        *self.registry_address.write() = Some(address);
    }

    /// Every contract call made so far, in order.
    pub fn calls(&self) -> Vec<(Address, Bytes)> {
        self.call_log.lock().clone()
    }

    pub fn calls_to(&self, target: Address) -> Vec<Bytes> {
        self.call_log
            .lock()
            .iter()
            .filter(|(to, _)| *to == target)
            .map(|(_, data)| data.clone())
            .collect()
    }

    /// Number of `resolver_of` reads served.
    pub fn resolver_lookups(&self) -> usize {
        self.resolver_lookups.load(Ordering::Relaxed)
    }

    /// Simulate an unreachable ledger.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    fn check_available(&self) -> Result<(), LedgerError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(LedgerError::Unavailable("in-memory ledger offline".into()));
        }
        Ok(())
    }

    fn entry(&self, node: &Node) -> RegistryRecord {
        self.records.read().get(node).cloned().unwrap_or_default()
    }

    fn registry_call(&self, data: &[u8]) -> Result<Bytes, LedgerError> {
        let reverted = || LedgerError::Reverted(Bytes::new());
        let encoded = match selector_of(data).ok_or_else(reverted)? {
            IRegistry::ownerCall::SELECTOR => {
                let call = IRegistry::ownerCall::abi_decode(data, true).map_err(|_| reverted())?;
                IRegistry::ownerCall::abi_encode_returns(&(self.entry(&call.node).owner,))
            }
            IRegistry::resolverCall::SELECTOR => {
                let call =
                    IRegistry::resolverCall::abi_decode(data, true).map_err(|_| reverted())?;
                let resolver = self.entry(&call.node).resolver.unwrap_or(Address::ZERO);
                IRegistry::resolverCall::abi_encode_returns(&(resolver,))
            }
            IRegistry::ttlCall::SELECTOR => {
                let call = IRegistry::ttlCall::abi_decode(data, true).map_err(|_| reverted())?;
                IRegistry::ttlCall::abi_encode_returns(&(self.entry(&call.node).ttl,))
            }
            _ => return Err(reverted()),
        };
        Ok(encoded.into())
    }
}

#[async_trait]
impl Registry for InMemoryLedger {
    async fn owner_of(&self, node: Node) -> Result<Address, LedgerError> {
        self.check_available()?;
        Ok(self.entry(&node).owner)
    }

    async fn resolver_of(&self, node: Node) -> Result<Option<Address>, LedgerError> {
        self.check_available()?;
        self.resolver_lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.entry(&node).resolver.filter(|r| !r.is_zero()))
    }

    async fn ttl_of(&self, node: Node) -> Result<u64, LedgerError> {
        self.check_available()?;
        Ok(self.entry(&node).ttl)
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn call(&self, target: Address, data: Bytes) -> Result<Bytes, LedgerError> {
        self.check_available()?;
        self.call_log.lock().push((target, data.clone()));

        if *self.registry_address.read() == Some(target) {
            return self.registry_call(&data);
        }

        let stub = self.contracts.read().get(&target).cloned();
        match stub {
            Some(stub) => stub.call(&data),
            // No code at the address.
            None => Ok(Bytes::new()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
