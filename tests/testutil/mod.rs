//! Shared helpers for integration tests: FASTA fixture writers and a naive
//! substring-counting oracle to check `Index::search` against.

use std::io::Write;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::Rng;

/// Write `contents` to a fresh `.fasta` temp file and return its path.
pub fn write_fasta(contents: &str) -> tempfile::TempPath {
    let mut file = tempfile::Builder::new().suffix(".fasta").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.into_temp_path()
}

/// Write `contents` to `<dir>/name.fasta` (for tests that need a stable,
/// non-auto-deleted path, e.g. persistence round trips).
pub fn write_fasta_in(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(format!("{name}.fasta"));
    std::fs::write(&path, contents).unwrap();
    path
}

/// A random single-record ACGT sequence of `len` bases.
pub fn random_acgt_record(rng: &mut StdRng, len: usize) -> String {
    const BASES: [char; 4] = ['A', 'C', 'G', 'T'];
    (0..len).map(|_| BASES[rng.gen_range(0..4)]).collect()
}

/// Count occurrences of `pattern` in `text`, including overlapping ones.
pub fn naive_count(text: &[u8], pattern: &[u8]) -> usize {
    if pattern.is_empty() || pattern.len() > text.len() {
        return 0;
    }
    (0..=text.len() - pattern.len())
        .filter(|&i| &text[i..i + pattern.len()] == pattern)
        .count()
}
