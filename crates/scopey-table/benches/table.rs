//! Benchmarks for the symbol table hot paths.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use scopey_table::{HashStore, SymbolTable};

fn bench_store_insert(c: &mut Criterion) {
    c.bench_function("store_insert_1k", |b| {
        b.iter(|| {
            let mut store = HashStore::new();
            for i in 0..1000u32 {
                let name = format!("ident_{i}");
                store.insert(black_box(&name), i, 0);
            }
            store
        })
    });
}

fn bench_store_search(c: &mut Criterion) {
    let mut store = HashStore::new();
    for i in 0..1000u32 {
        store.insert(&format!("ident_{i}"), i, 0);
    }

    c.bench_function("store_search_hit", |b| {
        b.iter(|| store.search(black_box("ident_500")))
    });
    c.bench_function("store_search_miss", |b| {
        b.iter(|| store.search(black_box("missing")))
    });
}

fn bench_scope_cycle(c: &mut Criterion) {
    c.bench_function("scope_cycle_16x8", |b| {
        b.iter(|| {
            let mut table = SymbolTable::new();
            for level in 0..16u32 {
                table.enter_scope();
                for i in 0..8u32 {
                    let name = format!("v{level}_{i}");
                    table.declare(black_box(&name), i).unwrap();
                }
            }
            for _ in 0..16 {
                table.exit_scope().unwrap();
            }
            table
        })
    });
}

criterion_group!(
    benches,
    bench_store_insert,
    bench_store_search,
    bench_scope_cycle
);
criterion_main!(benches);
