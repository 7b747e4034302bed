//! Persist an index to disk and reload it, checking `search` agrees afterward.

use std::io::Write;

use genome_fmi::{Index, SaveOption};

fn main() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("genome.fasta");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, ">R0 first replicon").unwrap();
    writeln!(file, "AAAAACCCCC").unwrap();
    writeln!(file, ">R1 second replicon").unwrap();
    writeln!(file, "GGGGGTTTTT").unwrap();
    drop(file);

    let index = Index::build(&path, true, 32).unwrap();
    index.save(SaveOption::SuffixArrayAndSeq).unwrap();

    let fmi_dir = format!("{}.fmi", path.display());
    let loaded = Index::load(&fmi_dir).unwrap();

    for query in [&b"AAAAA"[..], b"CCCCC", b"GGGGG", b"TTTTT"] {
        let before = index.search(query).unwrap();
        let after = loaded.search(query).unwrap();
        println!("{:?}: {before:?} == {after:?}", std::str::from_utf8(query).unwrap());
        assert_eq!(before, after);
    }
}
