use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sponsored_ranking_service::{elite_first_stable_sort, rank, RankableItem, RotationSeed, Tier};

fn candidates(count: usize) -> Vec<RankableItem<i64>> {
    (0..count)
        .map(|i| {
            let tier = match i % 7 {
                0 => Tier::Elite,
                1 | 2 => Tier::Premium,
                _ => Tier::Basic,
            };
            RankableItem::new(format!("event-{}", i), tier, ((i * 37) % 1440) as i64)
        })
        .collect()
}

/// Carousel-sized lists up to a full day of listings
fn bench_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("sponsored_rotation");

    for count in [10, 50, 500].iter() {
        let items = candidates(*count);

        group.bench_with_input(BenchmarkId::new("fair_rotation", count), &items, |b, items| {
            b.iter(|| rank(black_box(items), RotationSeed::new(black_box(3))));
        });

        group.bench_with_input(BenchmarkId::new("elite_first", count), &items, |b, items| {
            b.iter(|| elite_first_stable_sort(black_box(items)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rotation);
criterion_main!(benches);
