use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lrucache::LruCache;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit_knuth", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        for key in 0..1000u32 {
            cache.put(key, key).unwrap();
        }

        let mut counter = 0u32;
        b.iter(|| {
            black_box(cache.get(&(counter % 1000)).unwrap());
            counter = counter.wrapping_add(1);
        });
    });

    group.bench_function("get_hit_ahash", |b| {
        let mut cache = LruCache::with_hasher(1000, ahash::RandomState::new()).unwrap();
        for key in 0..1000u32 {
            cache.put(key, key).unwrap();
        }

        let mut counter = 0u32;
        b.iter(|| {
            black_box(cache.get(&(counter % 1000)).unwrap());
            counter = counter.wrapping_add(1);
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    for capacity in [16usize, 1024, 65_536] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            let mut cache = LruCache::new(capacity).unwrap();
            let key_space = (capacity * 2) as u64;

            let mut counter = 0u64;
            b.iter(|| {
                let key = counter.wrapping_mul(2_654_435_761) % key_space;
                if counter % 2 == 0 {
                    black_box(cache.get(&key).unwrap());
                } else {
                    black_box(cache.put(key, counter).unwrap());
                }
                counter += 1;
            });
        });
    }

    group.finish();
}

fn bench_evicting_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("evicting_put");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_always_evicts", |b| {
        let mut cache = LruCache::new(10).unwrap();
        let mut key = 0u64;

        b.iter(|| {
            black_box(cache.put(key, key).unwrap());
            key += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cached_get, bench_mixed_50_50, bench_evicting_put);
criterion_main!(benches);
