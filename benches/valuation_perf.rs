use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use homeval::config::StudyConfig;
use homeval::montecarlo::simulate;
use homeval::params::Params;
use homeval::valuation::present_value;

fn bench_present_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("present_value");
    for &horizon in &[10u32, 55, 120] {
        let params = Params::new(100_000.0, 0.06, 0.106, horizon);
        group.bench_with_input(BenchmarkId::from_parameter(horizon), &params, |b, p| {
            b.iter(|| present_value(black_box(p)).unwrap())
        });
    }
    group.finish();
}

fn bench_simulate(c: &mut Criterion) {
    let config = StudyConfig::canonical();
    let base = config.base_params().expect("canonical tables must derive");

    let mut group = c.benchmark_group("simulate");
    group.sample_size(10);
    for &iterations in &[1_000usize, 10_000] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &iterations,
            |b, &n| b.iter(|| simulate(&base, &config.mc_params, n, config.seed).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_present_value, bench_simulate);
criterion_main!(benches);
