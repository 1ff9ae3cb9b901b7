//! # Registry Contract Flows
//!
//! The service wired the way the binary wires it: registry reads go through
//! `ContractRegistry`, i.e. ABI calls on the ledger, instead of the
//! in-memory registry port.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::fixtures::name;
    use qc_18_name_resolution::adapters::{
        ContractRegistry, InMemoryGateway, InMemoryLedger, PublicResolverStub, RegistryRecord,
        WildcardResolverStub,
    };
    use qc_18_name_resolution::{
        NameResolutionService, RecordQuery, RecordValue, ResolutionConfig, ResolutionError,
    };
    use shared_types::{Address, Name};

    const REGISTRY: Address = Address::repeat_byte(0xEE);
    const RESOLVER: Address = Address::repeat_byte(0xA1);

    type ContractService = NameResolutionService<
        ContractRegistry<Arc<InMemoryLedger>>,
        Arc<InMemoryLedger>,
        Arc<InMemoryGateway>,
    >;

    fn contract_service(ledger: &Arc<InMemoryLedger>, registry: Address) -> ContractService {
        NameResolutionService::new(
            ContractRegistry::new(Arc::clone(ledger), registry),
            Arc::clone(ledger),
            Arc::new(InMemoryGateway::new()),
            ResolutionConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_walk_reads_registry_contract() {
        let ledger = Arc::new(InMemoryLedger::new());
        ledger.expose_registry_at(REGISTRY);
        let eth = name("eth");
        let stub = Arc::new(WildcardResolverStub::new(eth.node()));
        stub.records().set_addr(eth.node(), Address::repeat_byte(0x42));
        ledger.deploy(RESOLVER, stub);
        ledger.set_record(
            eth.node(),
            RegistryRecord {
                owner: Address::repeat_byte(0x01),
                resolver: Some(RESOLVER),
                ttl: 600,
            },
        );
        let service = contract_service(&ledger, REGISTRY);

        let resolution = service
            .resolve(&name("foo.bar.eth"), &RecordQuery::Addr)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolution.value, RecordValue::Addr(Address::repeat_byte(0x42)));
        assert_eq!(resolution.location.ttl, 600);
        assert_eq!(resolution.location.authority, eth);

        // resolver() for foo.bar.eth, bar.eth, eth, then ttl() for eth.
        assert_eq!(ledger.calls_to(REGISTRY).len(), 4);
    }

    #[tokio::test]
    async fn test_reverse_through_registry_contract() {
        let ledger = Arc::new(InMemoryLedger::new());
        ledger.expose_registry_at(REGISTRY);
        let user = Address::repeat_byte(0xAB);
        let reverse = Name::reverse(&user, &Name::default_reverse_suffix());
        let stub = Arc::new(PublicResolverStub::new());
        stub.set_name(reverse.node(), "alice.eth");
        ledger.deploy(RESOLVER, stub);
        ledger.set_resolver(reverse.node(), Some(RESOLVER));
        let service = contract_service(&ledger, REGISTRY);

        assert_eq!(service.name_of(user).await.unwrap(), Some(name("alice.eth")));
        assert_eq!(service.name_of(Address::repeat_byte(0x01)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_registry_contract_is_registry_error() {
        let ledger = Arc::new(InMemoryLedger::new());
        // Nothing deployed at the configured address: empty return data.
        let service = contract_service(&ledger, REGISTRY);
        let target = name("test.eth");

        let err = service.find_resolver(&target).await.unwrap_err();
        match err {
            ResolutionError::Registry { node, detail } => {
                assert_eq!(node, target.node());
                assert!(detail.contains("registry"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
