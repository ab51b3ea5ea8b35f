/// Convolution pass benchmarks
///
/// Measures the forward and backward kernels over a small table of
/// layer geometries, from the USPS-sized stack up to a deeper
/// volumetric layer, to keep an eye on the parallel-dispatch overhead
/// for small volumes.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tenvolve_core::{ConvolveEngine, Volume};

struct BenchConfig {
    name: &'static str,
    bottom: (usize, usize, usize),
    neurons: usize,
    filter: (usize, usize, usize),
}

const CONFIGS: &[BenchConfig] = &[
    BenchConfig {
        name: "usps_16x16_n10_f4",
        bottom: (1, 16, 16),
        neurons: 10,
        filter: (1, 4, 4),
    },
    BenchConfig {
        name: "mid_32x32_n16_f5",
        bottom: (1, 32, 32),
        neurons: 16,
        filter: (1, 5, 5),
    },
    BenchConfig {
        name: "deep_8x64x64_n32_f3",
        bottom: (8, 64, 64),
        neurons: 32,
        filter: (8, 3, 3),
    },
];

fn build_case(config: &BenchConfig) -> (ConvolveEngine, Volume, Volume) {
    let (bd, bw, bh) = config.bottom;
    let (fd, fw, fh) = config.filter;

    let mut engine = ConvolveEngine::new(config.neurons, fd, fw, fh).unwrap();
    let weights: Vec<f32> = (0..engine.filters().len())
        .map(|i| ((i as f32) * 0.37).sin())
        .collect();
    engine.filters_mut().set_weights(&weights).unwrap();

    let bottom_data: Vec<f32> = (0..bd * bw * bh).map(|i| ((i as f32) * 0.11).cos()).collect();
    let bottom = Volume::from_vec(bottom_data, bd, bw, bh).unwrap();
    let top = Volume::new(config.neurons, bw - fw + 1, bh - fh + 1).unwrap();

    (engine, bottom, top)
}

fn bench_pass_up(c: &mut Criterion) {
    let mut group = c.benchmark_group("pass_up");
    for config in CONFIGS {
        let (engine, bottom, mut top) = build_case(config);
        group.bench_function(BenchmarkId::from_parameter(config.name), |b| {
            b.iter(|| {
                engine.pass_up(black_box(&bottom), &mut top).unwrap();
            })
        });
    }
    group.finish();
}

fn bench_pass_down(c: &mut Criterion) {
    let mut group = c.benchmark_group("pass_down");
    for config in CONFIGS {
        let (engine, mut bottom, top) = build_case(config);
        group.bench_function(BenchmarkId::from_parameter(config.name), |b| {
            b.iter(|| {
                engine.pass_down(black_box(&top), &mut bottom).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pass_up, bench_pass_down);
criterion_main!(benches);
