use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plc_feeder::MemoryBlock;

fn bench_block_codec(c: &mut Criterion) {
    c.bench_function("block_set_f32", |b| {
        let mut block = MemoryBlock::new();
        b.iter(|| block.set_f32_at(black_box(4), black_box(750.25)).unwrap());
    });

    c.bench_function("block_get_f32", |b| {
        let mut block = MemoryBlock::new();
        block.set_f32_at(0, 750.25).unwrap();
        b.iter(|| block.f32_at(black_box(0)).unwrap());
    });
}

criterion_group!(benches, bench_block_codec);
criterion_main!(benches);
