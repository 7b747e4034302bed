// tests that exercise the public API end to end: build, search, save, load.

mod testutil;

use genome_fmi::{Error, Index, SaveOption};

#[test]
fn build_search_save_load_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let path = testutil::write_fasta_in(
        tmp.path(),
        "genome",
        ">R0 first replicon\nACGTACGTACGT\n>R1 second replicon\nTTTTAAAACCCC\n",
    );

    let index = Index::build(&path, true, 4).unwrap();
    assert_eq!(index.len(), 12 + 12 + 1 + 1); // two 12bp records + separator + sentinel
    assert!(index.is_multi());
    assert_eq!(index.num_records(), 2);
    assert_eq!(index.genome_id(0), "R0");
    assert_eq!(index.genome_id(1), "R1");

    let (sp, ep) = index.search(b"ACGT").unwrap();
    assert!(sp <= ep);

    index.save(SaveOption::SuffixArrayAndSeq).unwrap();
    let loaded = Index::load(format!("{}.fmi", path.display())).unwrap();
    assert_eq!(index.search(b"ACGT").unwrap(), loaded.search(b"ACGT").unwrap());
    assert_eq!(loaded.genome_id(0), "R0");
    assert_eq!(loaded.genome_des(1), "second replicon");
}

#[test]
fn search_on_unknown_symbol_is_an_error() {
    let path = testutil::write_fasta(">r0 d\nACGT\n");
    let index = Index::build(&path, false, 4).unwrap();
    assert!(matches!(index.search(b"N"), Err(Error::UnknownSymbol(b'N'))));
}

#[test]
fn build_rejects_non_fasta_extension() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    use std::io::Write;
    file.write_all(b">r0 d\nACGT\n").unwrap();
    let path = file.into_temp_path();
    assert!(matches!(
        Index::build(&path, false, 4),
        Err(Error::InputFormat(_))
    ));
}
