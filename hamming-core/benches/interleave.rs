use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hamming_core::interleave::{block_deinterleave, block_interleave};
use hamming_core::{Jammer, NoiseConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_interleave(c: &mut Criterion) {
    let mut group = c.benchmark_group("interleave");

    for groups in [2usize, 8, 32] {
        let frame = vec![0xA5u8; 9 * groups];

        group.throughput(Throughput::Bytes(frame.len() as u64));
        group.bench_with_input(BenchmarkId::new("forward", groups), &frame, |b, frame| {
            b.iter(|| block_interleave(black_box(frame), groups).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("inverse", groups), &frame, |b, frame| {
            b.iter(|| block_deinterleave(black_box(frame), groups).unwrap());
        });
    }

    group.finish();
}

fn bench_jammer(c: &mut Criterion) {
    let mut group = c.benchmark_group("jammer");
    let buf = vec![0u8; 16 * 1024];

    for (name, config) in [
        ("independent", NoiseConfig::independent(0.01)),
        ("burst_8", NoiseConfig::burst(0.01, 8)),
    ] {
        let mut jammer = Jammer::new(config, StdRng::seed_from_u64(1)).unwrap();

        group.throughput(Throughput::Bytes(buf.len() as u64));
        group.bench_function(name, |b| {
            b.iter_batched(
                || buf.clone(),
                |mut data| jammer.distort_buffer(&mut data),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_interleave, bench_jammer);
criterion_main!(benches);
