//! Index assembly and the FM-index backward-search primitive.
//!
//! Builds `BWT`, the dense count tables `C`/`EP`/`Freq`, the sampled occurrence
//! table `OCC`, and (in multi-record mode) the per-row sequence-ID array `SSA`
//! from a text and its suffix array, then answers `occ`/`search` queries against
//! them.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::fasta::{read_fasta, ParsedText};
use crate::suffix_array::build_sa;

/// The in-memory FM-index over a FASTA text.
///
/// All arrays are plain owned buffers; an `Index` is `Send + Sync` and may be
/// shared across concurrent readers via `&Index`.
pub struct Index {
    pub(crate) seq: Option<Vec<u8>>,
    pub(crate) sa: Option<Vec<i64>>,
    pub(crate) bwt: Vec<u8>,
    pub(crate) end_pos: i64,
    /// Dense, full 256-entry tables indexed directly by byte value (not only by
    /// the symbols actually occurring in the text): absent bytes carry `freq = 0`
    /// and a `C`/`EP` pair that yields an empty search interval by construction.
    pub(crate) freq: [i64; 256],
    pub(crate) c: [i64; 256],
    pub(crate) ep: [i64; 256],
    /// Ascending distinct bytes occurring in `seq`; defines `OCC`/persistence order.
    pub(crate) symbols: Vec<u8>,
    pub(crate) m: usize,
    /// Sampled checkpoints, one entry per symbol in `symbols`; absent for every
    /// other byte value (`occ` never consults those, since `freq == 0` there).
    pub(crate) occ: Vec<Vec<i64>>,
    pub(crate) ssa: Option<Vec<u16>>,
    pub(crate) lens: Vec<i64>,
    pub(crate) genome_id: Vec<String>,
    pub(crate) genome_des: Vec<String>,
    pub(crate) multi: bool,
    pub(crate) len: i64,
    pub(crate) source_path: PathBuf,
}

impl Index {
    /// Build an index from a FASTA file.
    ///
    /// `multiple` enables construction of `SSA` (required by `region_search` and
    /// everything built on it); `m` is the `OCC` sampling stride, `m >= 1`.
    pub fn build(path: impl AsRef<Path>, multiple: bool, m: usize) -> Result<Index, Error> {
        assert!(m >= 1, "sampling stride must be at least 1");
        let path = path.as_ref();
        let ParsedText {
            seq,
            lens,
            genome_id,
            genome_des,
            record_id_at_pos,
        } = read_fasta(path, multiple)?;

        let n = seq.len();
        let sa = build_sa(&seq);
        if sa.len() != n {
            return Err(Error::Invariant(
                "suffix array length does not match text length".to_string(),
            ));
        }

        let mut bwt = vec![0u8; n];
        let mut end_pos = 0i64;
        for (i, &row) in sa.iter().enumerate() {
            let b = if row > 0 { seq[row - 1] } else { seq[n - 1] };
            bwt[i] = b;
            if b == b'$' {
                end_pos = i as i64;
            }
        }

        let mut freq = [0i64; 256];
        for &b in &seq {
            freq[b as usize] += 1;
        }
        if freq.iter().sum::<i64>() != n as i64 {
            return Err(Error::Invariant(
                "symbol frequencies do not sum to the text length".to_string(),
            ));
        }

        let mut c = [0i64; 256];
        let mut ep = [0i64; 256];
        let mut running = 0i64;
        for b in 0..256usize {
            c[b] = running;
            running += freq[b];
            ep[b] = c[b] + freq[b] - 1;
        }

        let symbols: Vec<u8> = (0..=255u8).filter(|&b| freq[b as usize] > 0).collect();

        let occ_len = n.div_ceil(m) + 1;
        let mut occ: Vec<Vec<i64>> = vec![Vec::new(); 256];
        for &s in &symbols {
            occ[s as usize] = vec![0i64; occ_len];
        }
        let mut cnt = [0i64; 256];
        for (j, &b) in bwt.iter().enumerate() {
            cnt[b as usize] += 1;
            if j % m == 0 {
                let idx = j / m;
                for &s in &symbols {
                    occ[s as usize][idx] = cnt[s as usize];
                }
            }
        }
        let last = occ_len - 1;
        for &s in &symbols {
            occ[s as usize][last] = freq[s as usize];
        }

        let ssa = record_id_at_pos.map(|ids_by_pos| {
            sa.iter().map(|&row| ids_by_pos[row]).collect::<Vec<u16>>()
        });

        let sa: Vec<i64> = sa.into_iter().map(|x| x as i64).collect();

        Ok(Index {
            seq: Some(seq),
            sa: Some(sa),
            bwt,
            end_pos,
            freq,
            c,
            ep,
            symbols,
            m,
            occ,
            ssa,
            lens,
            genome_id,
            genome_des,
            multi: multiple,
            len: n as i64,
            source_path: path.to_path_buf(),
        })
    }

    /// Number of occurrences of `c` in `BWT[0..=p]`. `p < 0` is treated as `0`.
    pub(crate) fn occ(&self, c: u8, p: i64) -> i64 {
        if p < 0 {
            return 0;
        }
        if self.freq[c as usize] == 0 {
            return 0;
        }
        let m = self.m as i64;
        let k = p / m;
        let km = k * m;
        let mut count = self.occ[c as usize][k as usize];
        for j in (km + 1)..=p {
            if self.bwt[j as usize] == c {
                count += 1;
            }
        }
        count
    }

    /// Backward-search the suffix interval matching `query`.
    ///
    /// Fails with [`Error::UnknownSymbol`] when any byte of `query` never
    /// occurs in the indexed text, not only the first.
    pub fn search(&self, query: &[u8]) -> Result<(i64, i64), Error> {
        if query.is_empty() {
            return Ok((0, self.len - 1));
        }
        let c0 = query[0];
        if self.freq[c0 as usize] == 0 {
            return Err(Error::UnknownSymbol(c0));
        }
        let mut sp = self.c[c0 as usize];
        let mut ep = self.ep[c0 as usize];
        for &ch in &query[1..] {
            if self.freq[ch as usize] == 0 {
                return Err(Error::UnknownSymbol(ch));
            }
            if sp > ep {
                break;
            }
            sp = self.c[ch as usize] + self.occ(ch, sp - 1);
            ep = self.c[ch as usize] + self.occ(ch, ep) - 1;
        }
        Ok((sp, ep))
    }

    pub fn len(&self) -> i64 {
        self.len
    }

    pub fn is_multi(&self) -> bool {
        self.multi
    }

    /// Number of source FASTA records this index was built from.
    pub fn num_records(&self) -> usize {
        self.lens.len()
    }

    /// The header id token of record `id`, in 0-based input order.
    pub fn genome_id(&self, id: usize) -> &str {
        &self.genome_id[id]
    }

    /// The header description of record `id`, in 0-based input order.
    pub fn genome_des(&self, id: usize) -> &str {
        &self.genome_des[id]
    }

    /// The pre-reversal, pre-separator length of record `id`.
    pub fn genome_len(&self, id: usize) -> i64 {
        self.lens[id]
    }
}
