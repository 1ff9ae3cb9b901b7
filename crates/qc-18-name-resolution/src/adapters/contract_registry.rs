//! Registry port over ABI calls to a deployed registry contract.

use crate::abi::IRegistry;
use crate::ports::outbound::{Ledger, LedgerError, Registry};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use shared_types::{Address, Node};

/// Reads `owner`, `resolver` and `ttl` from the registry at `address`.
pub struct ContractRegistry<L: Ledger> {
    ledger: L,
    address: Address,
}

impl<L: Ledger> ContractRegistry<L> {
    pub fn new(ledger: L, address: Address) -> Self {
        Self { ledger, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    async fn read<C: SolCall>(&self, call: C) -> Result<C::Return, LedgerError> {
        let out = self.ledger.call(self.address, call.abi_encode().into()).await?;
        C::abi_decode_returns(&out, true).map_err(|e| {
            LedgerError::InvalidResponse(format!("registry {}: {e}", C::SIGNATURE))
        })
    }
}

#[async_trait]
impl<L: Ledger> Registry for ContractRegistry<L> {
    async fn owner_of(&self, node: Node) -> Result<Address, LedgerError> {
        Ok(self.read(IRegistry::ownerCall { node }).await?._0)
    }

    async fn resolver_of(&self, node: Node) -> Result<Option<Address>, LedgerError> {
        let resolver = self.read(IRegistry::resolverCall { node }).await?._0;
        Ok((!resolver.is_zero()).then_some(resolver))
    }

    async fn ttl_of(&self, node: Node) -> Result<u64, LedgerError> {
        Ok(self.read(IRegistry::ttlCall { node }).await?._0)
    }
}
