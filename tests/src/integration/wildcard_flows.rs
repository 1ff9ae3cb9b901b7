//! # Wildcard Delegation Flows
//!
//! Authority walk and resolver dispatch as seen from the public API:
//!
//! 1. **Wire-style ancestor**: the resolver receives the full DNS-encoded name
//! 2. **Closest authority wins** over more distant ancestors
//! 3. **Delegation invariant**: a name and its authority reach the same resolver

#[cfg(test)]
mod tests {
    use crate::fixtures::{name, World};
    use proptest::prelude::*;
    use qc_18_name_resolution::{
        RecordQuery, RecordSource, RecordValue, ResolutionConfig, ResolutionError,
        ResolverCapability,
    };
    use shared_types::{Address, Bytes, Name};

    const ETH_RESOLVER: Address = Address::repeat_byte(0xE0);
    const BAR_RESOLVER: Address = Address::repeat_byte(0xB0);

    // =============================================================================
    // WIRE-STYLE ANCESTOR
    // =============================================================================

    #[tokio::test]
    async fn test_subname_reaches_ancestor_with_full_wire_name() {
        let world = World::new();
        let eth = name("eth");
        let stub = world.wildcard_resolver(&eth, ETH_RESOLVER);
        stub.records().set_addr(eth.node(), Address::repeat_byte(0x42));

        let target = name("foo.bar.eth");
        let resolution = world
            .service
            .resolve(&target, &RecordQuery::Addr)
            .await
            .unwrap()
            .expect("eth resolver should answer");

        assert_eq!(stub.received_names(), vec![Bytes::from(target.to_dns_wire())]);
        assert_eq!(resolution.value, RecordValue::Addr(Address::repeat_byte(0x42)));
        assert_eq!(resolution.source, RecordSource::Onchain);
        assert_eq!(resolution.location.resolver, ETH_RESOLVER);
        assert_eq!(resolution.location.authority, eth);
        assert!(resolution.location.wildcard);
    }

    #[tokio::test]
    async fn test_text_record_through_wire_resolver() {
        let world = World::new();
        let eth = name("eth");
        let stub = world.wildcard_resolver(&eth, ETH_RESOLVER);
        stub.records().set_text(eth.node(), "url", "https://example.eth");

        let resolution = world
            .service
            .resolve(&name("docs.eth"), &RecordQuery::Text("url".into()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            resolution.value,
            RecordValue::Text("https://example.eth".into())
        );
    }

    // =============================================================================
    // CLOSEST AUTHORITY
    // =============================================================================

    #[tokio::test]
    async fn test_closest_ancestor_shadows_distant_one() {
        let world = World::new();
        world.wildcard_resolver(&name("eth"), ETH_RESOLVER);
        let bar = world.public_resolver(&name("bar.eth"), BAR_RESOLVER);
        let target = name("foo.bar.eth");
        bar.set_addr(target.node(), Address::repeat_byte(0x07));

        let location = world
            .service
            .find_resolver(&target)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(location.resolver, BAR_RESOLVER);
        assert_eq!(location.authority.to_string(), "bar.eth");

        // Direct resolvers are asked about the queried node, not the authority's.
        let raw = world
            .service
            .resolve_calldata(&target, &RecordQuery::Addr.calldata(target.node()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw.capability, ResolverCapability::DirectTyped);
        assert_eq!(
            RecordQuery::Addr.decode(&raw.data).unwrap(),
            RecordValue::Addr(Address::repeat_byte(0x07))
        );
    }

    #[tokio::test]
    async fn test_unregistered_tree_resolves_to_nothing() {
        let world = World::new();
        world.public_resolver(&name("other.eth"), BAR_RESOLVER);

        let outcome = world
            .service
            .resolve(&name("foo.bar.eth"), &RecordQuery::Addr)
            .await
            .unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn test_depth_bound_applies_before_registry_reads() {
        let world = World::with_config(ResolutionConfig::default().with_max_labels(2));

        let err = world
            .service
            .resolve(&name("a.b.c"), &RecordQuery::Addr)
            .await
            .unwrap_err();
        assert_eq!(err, ResolutionError::NameTooDeep { labels: 3, max: 2 });
        assert_eq!(world.ledger.resolver_lookups(), 0);
    }

    // =============================================================================
    // DELEGATION INVARIANT
    // =============================================================================

    fn label() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,12}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_name_and_authority_reach_same_resolver(
            prefix in prop::collection::vec(label(), 0..4),
            authority in prop::collection::vec(label(), 1..3),
            wire in any::<bool>(),
        ) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                let world = World::new();
                let authority = Name::from_labels(authority).unwrap();
                if wire {
                    world.wildcard_resolver(&authority, ETH_RESOLVER);
                } else {
                    world.public_resolver(&authority, ETH_RESOLVER);
                }

                let full = Name::from_labels(
                    prefix.iter().chain(authority.labels()).cloned(),
                )
                .unwrap();

                let from_name = world.service.resolve(&full, &RecordQuery::Addr).await.unwrap();
                let from_authority =
                    world.service.resolve(&authority, &RecordQuery::Addr).await.unwrap();

                let from_name = from_name.unwrap().location;
                let from_authority = from_authority.unwrap().location;
                prop_assert_eq!(from_name.resolver, from_authority.resolver);
                prop_assert_eq!(&from_name.authority, &authority);
                prop_assert_eq!(from_name.wildcard, !prefix.is_empty());
                Ok(())
            })?;
        }
    }
}
