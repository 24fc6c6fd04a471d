use archetype_resource::{Headless, Loader, MemoryOpener, RawId, RawInfo};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn create_test_loader(count: u32) -> Loader<Headless> {
    let mut opener = MemoryOpener::new();
    for i in 0..count {
        opener.insert(format!("resource_{i}.bin"), vec![0u8; 1024]);
    }
    let loader = Loader::new(Headless, opener);
    loader.raw_registry().assign(
        (0..count).map(|i| (RawId(i), RawInfo::new(format!("resource_{i}.bin")))),
    );
    loader
}

fn bench_cold_load_100_raw(c: &mut Criterion) {
    c.bench_function("cold_load_100_raw", |b| {
        b.iter(|| {
            let loader = create_test_loader(100);
            for i in 0..100 {
                black_box(loader.load_raw(RawId(i)).unwrap());
            }
        })
    });
}

fn bench_cached_load_raw(c: &mut Criterion) {
    let loader = create_test_loader(100);
    for i in 0..100 {
        loader.load_raw(RawId(i)).unwrap();
    }

    c.bench_function("cached_load_raw", |b| {
        let mut i = 0;
        b.iter(|| {
            black_box(loader.load_raw(RawId(i % 100)).unwrap());
            i += 1;
        })
    });
}

fn bench_preload_100_raw(c: &mut Criterion) {
    let ids: Vec<RawId> = (0..100).map(RawId).collect();
    c.bench_function("preload_100_raw", |b| {
        b.iter(|| {
            let loader = create_test_loader(100);
            loader.preload(&ids, Loader::load_raw).unwrap();
            black_box(loader);
        })
    });
}

criterion_group!(
    benches,
    bench_cold_load_100_raw,
    bench_cached_load_raw,
    bench_preload_100_raw
);
criterion_main!(benches);
