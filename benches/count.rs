use criterion::{criterion_group, criterion_main};
use criterion::{AxisScale, BatchSize, BenchmarkId, Criterion, PlotConfiguration, Throughput};
use genome_fmi::Index;

mod common;

fn prepare(n: usize, m: usize, pattern_len: usize) -> (Index, Vec<Vec<u8>>) {
    let path = common::random_genome_fasta(n, 1);
    let index = Index::build(&path, false, m).unwrap();
    let patterns = common::random_patterns(&path, 8, pattern_len, 2);
    (index, patterns)
}

pub fn bench(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    let mut group = c.benchmark_group("count");
    let n = 50_000;
    let pattern_len = 20;
    group.plot_config(plot_config);
    group.throughput(Throughput::Elements(8));
    for &m in [1usize, 8, 32, 128].iter() {
        group.bench_with_input(BenchmarkId::new("Index::search", m), &m, |b, &m| {
            b.iter_batched(
                || prepare(n, m, pattern_len),
                |(index, patterns)| {
                    for pattern in &patterns {
                        index.search(pattern).unwrap();
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, bench);
criterion_main!(benches);
