//! # Off-chain Lookup Flows
//!
//! Resolvers that revert with `OffchainLookup` hand the query to gateways.
//! A gateway answer is only accepted when it carries a signature by the
//! registry owner of the queried node over exactly that node and value.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::fixtures::{name, World};
    use alloy_sol_types::SolCall;
    use proptest::prelude::*;
    use qc_18_name_resolution::abi::IAddrResolver;
    use qc_18_name_resolution::adapters::{GatewayBehavior, OffchainResolverStub};
    use qc_18_name_resolution::{
        sign_attestation, verify_attestation, Attestation, GatewayError, GatewayMethod, ProofError,
        RecordQuery, RecordSource, RecordValue, ResolutionConfig, ResolutionError,
    };
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::{Address, Bytes, Name, B256};

    const RESOLVER: Address = Address::repeat_byte(0xC1);

    fn owner_key() -> Secp256k1KeyPair {
        Secp256k1KeyPair::from_bytes([0x51; 32]).unwrap()
    }

    fn stranger_key() -> Secp256k1KeyPair {
        Secp256k1KeyPair::from_bytes([0x52; 32]).unwrap()
    }

    /// `gw.eth` served by an off-chain resolver publishing `urls`, owned by
    /// `owner_key()`.
    fn offchain_world(urls: &[&str]) -> (World, Name) {
        let world = World::with_config(
            ResolutionConfig::default().with_gateway_timeout(Duration::from_millis(50)),
        );
        let gw = name("gw.eth");
        world.ledger.set_owner(gw.node(), owner_key().address());
        world.ledger.set_resolver(gw.node(), Some(RESOLVER));
        world.ledger.deploy(
            RESOLVER,
            Arc::new(OffchainResolverStub::new(
                RESOLVER,
                urls.iter().map(|u| u.to_string()).collect(),
            )),
        );
        (world, gw)
    }

    fn addr_value(addr: Address) -> Vec<u8> {
        IAddrResolver::addrCall::abi_encode_returns(&(addr,))
    }

    // =============================================================================
    // GATEWAY SELECTION
    // =============================================================================

    #[tokio::test]
    async fn test_post_gateway_answer_is_verified_and_returned() {
        let (world, gw) = offchain_world(&["https://gateway.example/lookup"]);
        let attestation =
            sign_attestation(&owner_key(), gw.node(), addr_value(Address::repeat_byte(0x99)))
                .unwrap();
        world.gateway.route(
            "https://gateway.example/lookup",
            GatewayBehavior::Respond(attestation.encode()),
        );

        let resolution = world
            .service
            .resolve(&gw, &RecordQuery::Addr)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolution.value, RecordValue::Addr(Address::repeat_byte(0x99)));
        assert_eq!(
            resolution.source,
            RecordSource::Offchain {
                gateway: "https://gateway.example/lookup".into()
            }
        );

        let requests = world.gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, GatewayMethod::Post);
        assert_eq!(requests[0].sender, RESOLVER);
    }

    #[tokio::test]
    async fn test_timeout_then_next_gateway_answers() {
        let (world, gw) = offchain_world(&["https://slow.example/", "https://fast.example/"]);
        let attestation =
            sign_attestation(&owner_key(), gw.node(), addr_value(Address::repeat_byte(0x01)))
                .unwrap();
        world
            .gateway
            .route("https://slow.example/", GatewayBehavior::Hang);
        world.gateway.route(
            "https://fast.example/",
            GatewayBehavior::Respond(attestation.encode()),
        );

        let resolution = world
            .service
            .resolve(&gw, &RecordQuery::Addr)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            resolution.source,
            RecordSource::Offchain {
                gateway: "https://fast.example/".into()
            }
        );
        assert_eq!(world.gateway.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_every_gateway_hanging_reports_timeout() {
        let (world, gw) = offchain_world(&["https://a.example/", "https://b.example/"]);
        world.gateway.route("https://a.example/", GatewayBehavior::Hang);
        world.gateway.route("https://b.example/", GatewayBehavior::Hang);

        assert_eq!(
            world.service.resolve(&gw, &RecordQuery::Addr).await,
            Err(ResolutionError::GatewayTimeout {
                url: "https://b.example/".into()
            })
        );
    }

    #[tokio::test]
    async fn test_server_errors_everywhere_is_unreachable() {
        let (world, gw) = offchain_world(&["https://a.example/", "https://b.example/"]);
        for url in ["https://a.example/", "https://b.example/"] {
            world.gateway.route(
                url,
                GatewayBehavior::Fail(GatewayError::Status {
                    status: 503,
                    body: "busy".into(),
                }),
            );
        }

        let err = world.service.resolve(&gw, &RecordQuery::Addr).await.unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::GatewayUnreachable { ref urls, .. } if urls.len() == 2
        ));
    }

    #[tokio::test]
    async fn test_client_error_is_final() {
        let (world, gw) = offchain_world(&["https://a.example/", "https://b.example/"]);
        world.gateway.route(
            "https://a.example/",
            GatewayBehavior::Fail(GatewayError::Status {
                status: 404,
                body: "unknown name".into(),
            }),
        );

        assert_eq!(
            world.service.resolve(&gw, &RecordQuery::Addr).await,
            Err(ResolutionError::GatewayRejected {
                url: "https://a.example/".into(),
                status: 404
            })
        );
        assert_eq!(world.gateway.requests().len(), 1);
    }

    // =============================================================================
    // ATTESTATION CHECKS
    // =============================================================================

    #[tokio::test]
    async fn test_stranger_signature_rejected() {
        let (world, gw) = offchain_world(&["https://gateway.example/"]);
        let forged =
            sign_attestation(&stranger_key(), gw.node(), addr_value(Address::repeat_byte(0x66)))
                .unwrap();
        world.gateway.route(
            "https://gateway.example/",
            GatewayBehavior::Respond(forged.encode()),
        );

        let err = world.service.resolve(&gw, &RecordQuery::Addr).await.unwrap_err();
        assert_eq!(
            err,
            ResolutionError::InvalidProof {
                node: gw.node(),
                reason: ProofError::SignerMismatch {
                    expected: owner_key().address(),
                    actual: stranger_key().address(),
                },
            }
        );
    }

    #[tokio::test]
    async fn test_subname_without_owner_is_unowned() {
        let (world, _) = offchain_world(&["https://gateway.example/"]);
        let sub = name("alice.gw.eth");
        // Signed by the parent's owner, but nobody owns the subname itself.
        let attestation =
            sign_attestation(&owner_key(), sub.node(), addr_value(Address::repeat_byte(0x02)))
                .unwrap();
        world.gateway.route(
            "https://gateway.example/",
            GatewayBehavior::Respond(attestation.encode()),
        );

        let err = world.service.resolve(&sub, &RecordQuery::Addr).await.unwrap_err();
        assert_eq!(
            err,
            ResolutionError::InvalidProof {
                node: sub.node(),
                reason: ProofError::Unowned,
            }
        );
    }

    #[tokio::test]
    async fn test_subname_owner_signature_accepted() {
        let (world, _) = offchain_world(&["https://gateway.example/"]);
        let sub = name("alice.gw.eth");
        let alice = stranger_key();
        world.ledger.set_owner(sub.node(), alice.address());
        let attestation =
            sign_attestation(&alice, sub.node(), addr_value(Address::repeat_byte(0x03))).unwrap();
        world.gateway.route(
            "https://gateway.example/",
            GatewayBehavior::Respond(attestation.encode()),
        );

        let resolution = world
            .service
            .resolve(&sub, &RecordQuery::Addr)
            .await
            .unwrap()
            .unwrap();
        assert!(resolution.location.wildcard);
        assert_eq!(resolution.value, RecordValue::Addr(Address::repeat_byte(0x03)));
    }

    #[tokio::test]
    async fn test_verify_offchain_checks_current_owner() {
        let (world, gw) = offchain_world(&[]);
        let body = sign_attestation(&owner_key(), gw.node(), b"value".to_vec())
            .unwrap()
            .encode();

        assert_eq!(
            world.service.verify_offchain(gw.node(), &body).await.unwrap(),
            Bytes::from_static(b"value")
        );

        world.ledger.set_owner(gw.node(), Address::repeat_byte(0x77));
        assert!(matches!(
            world.service.verify_offchain(gw.node(), &body).await,
            Err(ResolutionError::InvalidProof {
                reason: ProofError::SignerMismatch { .. },
                ..
            })
        ));
    }

    // =============================================================================
    // SIGNATURE BINDING
    // =============================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_attestation_binds_node_and_value(
            node in any::<[u8; 32]>(),
            other_node in any::<[u8; 32]>(),
            value in prop::collection::vec(any::<u8>(), 0..96),
            other_value in prop::collection::vec(any::<u8>(), 0..96),
        ) {
            let owner = owner_key();
            let node = B256::from(node);
            let attestation = sign_attestation(&owner, node, value.clone()).unwrap();

            prop_assert_eq!(
                verify_attestation(&attestation, owner.address()).unwrap(),
                Bytes::from(value.clone())
            );
            prop_assert!(verify_attestation(&attestation, stranger_key().address()).is_err());

            let other_node = B256::from(other_node);
            if other_node != node {
                let moved = Attestation {
                    node: other_node,
                    ..attestation.clone()
                };
                prop_assert!(verify_attestation(&moved, owner.address()).is_err());
            }
            if other_value != value {
                let altered = Attestation {
                    value: Bytes::from(other_value),
                    ..attestation
                };
                prop_assert!(verify_attestation(&altered, owner.address()).is_err());
            }
        }
    }
}
