//! Benchmarks for block generation and dot placement.
//!
//! Run:
//! - cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use psychostim::config::{NumerosityConfig, WhitesConfig};
use psychostim::design::pairs::PairDesign;
use psychostim::design::triads::TriadDesign;
use psychostim::stim::dots::place_dots;
use rand::SeedableRng;
use rand::rngs::StdRng;

const DOT_COUNTS: [usize; 3] = [5, 30, 60];

fn bench_blocks(c: &mut Criterion) {
    let triads = TriadDesign::from_config(&NumerosityConfig::default());
    let pairs = PairDesign::from_config(&WhitesConfig::default());
    let mut group = c.benchmark_group("block");
    group.bench_function("triads_84", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| black_box(triads.block(1, &mut rng)));
    });
    group.bench_function("pairs_91", |b| {
        let mut rng = StdRng::seed_from_u64(2);
        b.iter(|| black_box(pairs.block(1, &mut rng)));
    });
    group.finish();
}

fn bench_place_dots(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_dots");
    for n in DOT_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = StdRng::seed_from_u64(n as u64);
            b.iter(|| black_box(place_dots(&mut rng, n, 0.125, 10_000)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_blocks, bench_place_dots);
criterion_main!(benches);
