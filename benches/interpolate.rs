//! Interpolation benchmarks: 100 taps, up 10/20, 1/4 threads

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustfft::num_complex::Complex64;
use upfirlerp::UpfirLerp;

const T_SEC: f64 = 0.01;
const NUM_TAPS: usize = 100;

fn benchmark_interpolate(c: &mut Criterion, input_len: usize) {
    let mut rng = StdRng::seed_from_u64(1);
    let input: Vec<Complex64> = (0..input_len)
        .map(|_| Complex64::new(rng.r#gen::<f64>(), rng.r#gen::<f64>()))
        .collect();
    let taps: Vec<f64> = (0..NUM_TAPS).map(|_| rng.r#gen::<f64>()).collect();
    let t: Vec<f64> = (0..input_len * 2).map(|i| i as f64 * T_SEC / 100.0).collect();

    let mut group = c.benchmark_group(format!("interpolate_in{}_out{}", input_len, t.len()));
    group.sample_size(10);
    for (up, threads) in [(10, 1), (20, 1), (10, 4), (20, 4)] {
        let mut ufl = UpfirLerp::<f64>::new();
        ufl.set_up_taps(&taps)
            .unwrap()
            .set_up_rate(up)
            .unwrap()
            .set_threads(threads)
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new(format!("up{}", up), format!("{}threads", threads)),
            &ufl,
            |b, ufl| b.iter(|| black_box(ufl.interpolate(&input, T_SEC, &t).unwrap())),
        );
    }
    group.finish();
}

fn benchmark_small(c: &mut Criterion) {
    benchmark_interpolate(c, 10_000);
}

fn benchmark_large(c: &mut Criterion) {
    benchmark_interpolate(c, 100_000);
}

criterion_group!(benches, benchmark_small, benchmark_large);
criterion_main!(benches);
