//! A compressed FM-index over FASTA genome collections.
//!
//! Builds the suffix array, BWT, count tables, and sampled occurrence table for a
//! concatenated, reversed, sentinel-terminated FASTA text, then answers backward
//! searches and paired-read locate queries against them.

pub mod error;
pub mod fasta;
pub mod index;
pub mod locate;
pub mod persist;
pub mod suffix_array;

pub use error::Error;
pub use index::Index;
pub use locate::RegionHit;
pub use persist::SaveOption;
