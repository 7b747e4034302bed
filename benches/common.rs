use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Write a random single-record FASTA file of `len` ACGT bases and return its path.
/// The caller owns the returned `TempPath`'s lifetime.
pub fn random_genome_fasta(len: usize, seed: u64) -> tempfile::TempPath {
    let mut rng: StdRng = SeedableRng::seed_from_u64(seed);
    const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];
    let seq: String = (0..len)
        .map(|_| BASES[rng.gen_range(0..4)] as char)
        .collect();

    use std::io::Write;
    let mut file = tempfile::Builder::new().suffix(".fasta").tempfile().unwrap();
    writeln!(file, ">g benchmark genome").unwrap();
    writeln!(file, "{seq}").unwrap();
    file.into_temp_path()
}

#[allow(dead_code)]
pub fn random_patterns(path: impl AsRef<Path>, count: usize, len: usize, seed: u64) -> Vec<Vec<u8>> {
    let contents = std::fs::read_to_string(path).unwrap();
    let seq: String = contents.lines().skip(1).collect();
    let bytes = seq.as_bytes();
    let mut rng: StdRng = SeedableRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let start = rng.gen_range(0..bytes.len() - len + 1);
            bytes[start..start + len].to_vec()
        })
        .collect()
}
