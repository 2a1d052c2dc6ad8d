use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tempfile::TempDir;

use marquee_kv::{KVError, KVStore, KVTxn, MemoryStore, RedbStore, transact};

/// Read a counter, bump it and write an edge key, all in one transaction.
fn bump(kv: &dyn KVStore, i: u64) {
    let edge = format!("bench:edge:m1:{}", i % 64);
    let result: Result<(), KVError> = transact(kv, |txn: &mut dyn KVTxn| {
        let n = txn
            .get("bench:counter:m1")?
            .map(|v| v.len())
            .unwrap_or(0);
        if txn.delete(&edge)? {
            txn.set("bench:counter:m1", &vec![0u8; n.saturating_sub(1)])?;
        } else {
            txn.set(&edge, b"1")?;
            txn.set("bench:counter:m1", &vec![0u8; n + 1])?;
        }
        Ok(())
    });
    result.unwrap();
}

fn bench_redb_transact(c: &mut Criterion) {
    let tmp = TempDir::new().unwrap();
    let store = RedbStore::open(&tmp.path().join("bench.redb")).unwrap();

    c.bench_function("redb_transact_toggle", |b| {
        let mut i = 0u64;
        b.iter(|| {
            bump(&store, black_box(i));
            i += 1;
        });
    });
}

fn bench_memory_transact(c: &mut Criterion) {
    let store = MemoryStore::new();

    c.bench_function("memory_transact_toggle", |b| {
        let mut i = 0u64;
        b.iter(|| {
            bump(&store, black_box(i));
            i += 1;
        });
    });
}

fn bench_redb_scan(c: &mut Criterion) {
    let tmp = TempDir::new().unwrap();
    let store = RedbStore::open(&tmp.path().join("bench.redb")).unwrap();

    for i in 0..1000 {
        let key = format!("bench:edge:m1:{:04}", i);
        store.set(&key, b"1").unwrap();
    }

    c.bench_function("redb_scan_1000", |b| {
        b.iter(|| {
            let results = store.scan(black_box("bench:edge:m1:")).unwrap();
            assert_eq!(results.len(), 1000);
        });
    });
}

criterion_group!(
    benches,
    bench_redb_transact,
    bench_memory_transact,
    bench_redb_scan
);
criterion_main!(benches);
