//! Build a multi-record index and resolve a read back to its source sequence.

use std::io::Write;

use genome_fmi::Index;

fn main() {
    let mut file = tempfile::Builder::new().suffix(".fasta").tempfile().unwrap();
    writeln!(file, ">R0 first replicon").unwrap();
    writeln!(file, "AAAAACCCCC").unwrap();
    writeln!(file, ">R1 second replicon").unwrap();
    writeln!(file, "GGGGGTTTTT").unwrap();
    let path = file.into_temp_path();

    let index = Index::build(&path, true, 4).unwrap();

    let hits = index.test_search(b"AAAAA");
    for (&id, positions) in &hits {
        println!(
            "AAAAA -> {} at {:?}",
            index.genome_id(id as usize),
            positions
        );
    }
    assert!(hits.contains_key(&0));
    assert!(!hits.contains_key(&1));

    // The separator between records prevents a read from matching across them.
    assert!(index.test_search(b"CCGG").is_empty());
}
