use criterion::{criterion_group, criterion_main};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput};
use genome_fmi::Index;

mod common;

fn prepare_multi(n: usize, m: usize, pattern_len: usize) -> (Index, Vec<Vec<u8>>) {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::io::Write;

    const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];
    let mut rng: StdRng = SeedableRng::seed_from_u64(3);
    let r0: String = (0..n).map(|_| BASES[rng.gen_range(0..4)] as char).collect();
    let r1: String = (0..n).map(|_| BASES[rng.gen_range(0..4)] as char).collect();

    let mut file = tempfile::Builder::new().suffix(".fasta").tempfile().unwrap();
    writeln!(file, ">R0 d\n{r0}\n>R1 d\n{r1}").unwrap();
    let path = file.into_temp_path();

    let index = Index::build(&path, true, m).unwrap();
    let reversed: Vec<u8> = r1.bytes().rev().collect();
    let patterns = (0..8)
        .map(|i| {
            let start = i * pattern_len;
            reversed[start..start + pattern_len].to_vec()
        })
        .collect();
    (index, patterns)
}

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    let n = 20_000;
    let pattern_len = 30;
    group.throughput(Throughput::Elements(8));
    for &m in [1usize, 8, 32].iter() {
        group.bench_with_input(BenchmarkId::new("Index::region_search", m), &m, |b, &m| {
            b.iter_batched(
                || prepare_multi(n, m, pattern_len),
                |(index, patterns)| {
                    for pattern in &patterns {
                        let _ = index.region_search(pattern, 0);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, bench);
criterion_main!(benches);
