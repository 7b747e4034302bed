//! Build a single-record index and run exact-match searches against it.

use std::io::Write;

use genome_fmi::Index;

fn main() {
    let mut file = tempfile::Builder::new().suffix(".fasta").tempfile().unwrap();
    writeln!(file, ">chr1 a tiny single-record genome").unwrap();
    writeln!(file, "ACGTACGTACGTACGTACGT").unwrap();
    let path = file.into_temp_path();

    let index = Index::build(&path, false, 4).unwrap();

    // "CGT" occurs 5 times in the record above.
    let (sp, ep) = index.search(b"CGT").unwrap();
    println!("CGT matches {} suffixes ([{}, {}])", ep - sp + 1, sp, ep);
    assert_eq!(ep - sp + 1, 5);

    // A byte never seen in the text fails fast with UnknownSymbol.
    match index.search(b"N") {
        Err(e) => println!("expected failure on an unknown symbol: {e}"),
        Ok(_) => unreachable!("N does not occur in the indexed text"),
    }
}
