use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minegrid_core::*;

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for (name, level) in [
        ("tiny", Level::Tiny),
        ("easy", Level::Easy),
        ("medium", Level::Medium),
        ("hard", Level::Hard),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| MineEngine::new(black_box(42), level).unwrap())
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // no mines, a single click opens the whole board
    let engine = MineEngine::new_custom(7, Level::Custom, 256, 256, 0).unwrap();
    c.bench_function("flood_fill_256x256", |b| {
        b.iter_batched(
            || engine.clone(),
            |mut engine| engine.click_at(black_box(128), black_box(128)),
            BatchSize::LargeInput,
        )
    });
}

fn bench_dyn_array(c: &mut Criterion) {
    c.bench_function("dyn_array_add_remove_4096", |b| {
        b.iter(|| {
            let mut arr = DynArray::new();
            for i in 0..4096u32 {
                arr.add(black_box(i)).unwrap();
            }
            while !arr.is_empty() {
                arr.remove(0).unwrap();
            }
            arr
        })
    });
}

criterion_group!(benches, bench_build, bench_flood_fill, bench_dyn_array);
criterion_main!(benches);
