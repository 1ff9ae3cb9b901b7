//! # Name Resolution Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Namehash, 4 labels | < 10μs |
//! | DNS wire encode + decode | < 5μs |
//! | Node substitution, 3 offsets | < 1μs |
//! | Attestation verify (ECDSA recover) | < 1ms |
//! | In-memory wildcard resolve | < 100μs |
//! | Batch of 64 direct slots | < 5ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;

use qc_18_name_resolution::adapters::TokenOwnerStub;
use qc_18_name_resolution::{
    sign_attestation, substitute_node, verify_attestation, BatchCall, RecordQuery,
};
use qc_tests::fixtures::{name, World};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{Address, Name, B256};

fn bench_namehash(c: &mut Criterion) {
    let mut group = c.benchmark_group("namehash");

    for depth in [1usize, 4, 16] {
        let labels: Vec<String> = (0..depth).map(|i| format!("label{i}")).collect();
        let name = Name::from_labels(labels).unwrap();
        group.bench_with_input(BenchmarkId::new("node", depth), &name, |b, name| {
            b.iter(|| black_box(name.node()))
        });
    }

    let name = name("foo.bar.baz.eth");
    group.bench_function("dns_wire_round_trip", |b| {
        b.iter(|| {
            let wire = black_box(&name).to_dns_wire();
            black_box(Name::from_dns_wire(&wire).unwrap())
        })
    });
    group.finish();
}

fn bench_substitution(c: &mut Criterion) {
    let payload = vec![0u8; 4 + 32 * 6];
    let node = name("test.eth").node();
    let offsets = [4usize, 68, 132];

    c.bench_function("substitute_node_3_offsets", |b| {
        b.iter(|| black_box(substitute_node(&payload, &offsets, &node).unwrap()))
    });
}

fn bench_attestation(c: &mut Criterion) {
    let mut group = c.benchmark_group("attestation");
    group.measurement_time(Duration::from_secs(10));

    let key = Secp256k1KeyPair::from_bytes([0x42; 32]).unwrap();
    let node = name("gw.eth").node();
    let attestation = sign_attestation(&key, node, vec![0xAB; 32]).unwrap();
    let owner = key.address();

    group.bench_function("verify", |b| {
        b.iter(|| black_box(verify_attestation(&attestation, owner).unwrap()))
    });
    group.bench_function("sign", |b| {
        b.iter(|| black_box(sign_attestation(&key, node, vec![0xAB; 32]).unwrap()))
    });
    group.finish();
}

fn bench_service(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("service");

    let world = World::new();
    let eth = name("eth");
    let stub = world.wildcard_resolver(&eth, Address::repeat_byte(0xE0));
    stub.records().set_addr(eth.node(), Address::repeat_byte(0x42));
    let deep = name("a.b.c.d.eth");

    group.bench_function("wildcard_resolve_addr", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(
                world
                    .service
                    .resolve(&deep, &RecordQuery::Addr)
                    .await
                    .unwrap(),
            )
        })
    });

    let registrar = Address::repeat_byte(0x0B);
    let owners = Arc::new(TokenOwnerStub::new());
    let target = name("test.eth");
    owners.set_owner(target.node(), Address::repeat_byte(0x77));
    world.ledger.deploy(registrar, owners);

    for size in [8usize, 64] {
        let calls: Vec<BatchCall> = (0..size)
            .map(|_| {
                let mut payload = vec![0x63, 0x52, 0x21, 0x1e];
                payload.extend_from_slice(B256::ZERO.as_slice());
                BatchCall::direct(registrar, payload, vec![4])
            })
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch_direct", size), &calls, |b, calls| {
            b.to_async(&runtime).iter(|| async {
                black_box(world.service.batch(Some(target.clone()), calls).await)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_namehash,
    bench_substitution,
    bench_attestation,
    bench_service
);
criterion_main!(benches);
