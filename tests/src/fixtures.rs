//! Shared setup for end-to-end flows and benchmarks.

use std::sync::Arc;

use qc_18_name_resolution::adapters::{
    InMemoryGateway, InMemoryLedger, PublicResolverStub, WildcardResolverStub,
};
use qc_18_name_resolution::{NameResolutionService, ResolutionConfig};
use shared_types::{Address, Name};

pub type MemoryService =
    NameResolutionService<Arc<InMemoryLedger>, Arc<InMemoryLedger>, Arc<InMemoryGateway>>;

/// A ledger, a gateway and a service reading from both.
pub struct World {
    pub ledger: Arc<InMemoryLedger>,
    pub gateway: Arc<InMemoryGateway>,
    pub service: MemoryService,
}

impl World {
    pub fn new() -> Self {
        Self::with_config(ResolutionConfig::default())
    }

    pub fn with_config(config: ResolutionConfig) -> Self {
        let ledger = Arc::new(InMemoryLedger::new());
        let gateway = Arc::new(InMemoryGateway::new());
        let service = NameResolutionService::new(
            Arc::clone(&ledger),
            Arc::clone(&ledger),
            Arc::clone(&gateway),
            config,
        );
        Self {
            ledger,
            gateway,
            service,
        }
    }

    /// Deploy a typed-record resolver at `address` and set it for `name`.
    pub fn public_resolver(&self, name: &Name, address: Address) -> Arc<PublicResolverStub> {
        let stub = Arc::new(PublicResolverStub::new());
        self.ledger.deploy(address, stub.clone());
        self.ledger.set_resolver(name.node(), Some(address));
        stub
    }

    /// Deploy a wire-style resolver at `address` answering every subname of
    /// `name` from `name`'s own records.
    pub fn wildcard_resolver(&self, name: &Name, address: Address) -> Arc<WildcardResolverStub> {
        let stub = Arc::new(WildcardResolverStub::new(name.node()));
        self.ledger.deploy(address, stub.clone());
        self.ledger.set_resolver(name.node(), Some(address));
        stub
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a name known to be valid.
pub fn name(s: &str) -> Name {
    match Name::parse(s) {
        Ok(name) => name,
        Err(e) => panic!("invalid fixture name {s:?}: {e}"),
    }
}
