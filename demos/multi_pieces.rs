//! Locate a read pair against a multi-record genome within an insert-size bound.

use std::io::Write;

use genome_fmi::Index;

fn main() {
    let r0: String = "ACGTACGTAC".repeat(100);
    let r1: String = "TGCATGCATG".repeat(100);

    let mut file = tempfile::Builder::new().suffix(".fasta").tempfile().unwrap();
    writeln!(file, ">R0 first replicon").unwrap();
    writeln!(file, "{r0}").unwrap();
    writeln!(file, ">R1 second replicon").unwrap();
    writeln!(file, "{r1}").unwrap();
    let path = file.into_temp_path();

    let index = Index::build(&path, true, 4).unwrap();

    let bytes = r1.as_bytes();
    let q1 = &bytes[100..130];
    let q2 = &bytes[130..160]; // 30bp downstream of q1 in R1

    let hit = index.find_genome_d(q1, q2, 50);
    println!("pair accepted within insert 50: {hit:?}");
    assert_eq!(hit.get(&1), Some(&1));

    let miss = index.find_genome_d(q1, q2, 10);
    println!("pair accepted within insert 10: {miss:?}");
    assert!(miss.is_empty());
}
