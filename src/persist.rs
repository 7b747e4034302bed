//! Binary persistence of an [`Index`] to a `<input>.fmi/` directory.
//!
//! Save and load are each a fixed set of per-file tasks joined by a barrier,
//! built directly on `std::thread::scope`: the index's arrays are immutable
//! once built, so scoped threads can borrow them without any synchronization
//! beyond the join at the end of the scope.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::index::Index;

/// Which artifacts [`Index::save`] writes to disk, beyond the always-present
/// `BWT`, `OCC`, count tables, and `genome_lengths`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOption {
    /// Neither `SA` nor `SEQ`; the index can still be reloaded for `search`,
    /// but not for anything that locates a `SEQ` position from a suffix row.
    None,
    /// `SA` only.
    SuffixArray,
    /// `SA` and `SEQ`, enough to fully reconstruct a build-time index.
    SuffixArrayAndSeq,
}

impl SaveOption {
    fn code(self) -> u8 {
        match self {
            SaveOption::None => 0,
            SaveOption::SuffixArray => 1,
            SaveOption::SuffixArrayAndSeq => 2,
        }
    }

    fn from_code(code: u8) -> Result<SaveOption, Error> {
        match code {
            0 => Ok(SaveOption::None),
            1 => Ok(SaveOption::SuffixArray),
            2 => Ok(SaveOption::SuffixArrayAndSeq),
            other => Err(Error::Invariant(format!("unknown save_option code {other}"))),
        }
    }
}

impl Index {
    fn fmi_dir(&self) -> PathBuf {
        let mut name = self.source_path.clone().into_os_string();
        name.push(".fmi");
        PathBuf::from(name)
    }

    /// Write this index to `<source path>.fmi/`. On any I/O failure, the
    /// partial directory is removed before the error is returned.
    pub fn save(&self, save_option: SaveOption) -> Result<(), Error> {
        let dir = self.fmi_dir();
        std::fs::create_dir_all(&dir)?;
        match self.save_into(&dir, save_option) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = std::fs::remove_dir_all(&dir);
                Err(e)
            }
        }
    }

    fn save_into(&self, dir: &Path, save_option: SaveOption) -> Result<(), Error> {
        let occ_len = (self.len as usize).div_ceil(self.m) + 1;

        std::thread::scope(|scope| -> Result<(), Error> {
            let bwt_h = scope.spawn(|| write_bytes(dir, "bwt", &self.bwt));

            let ssa_h = self
                .ssa
                .as_ref()
                .map(|ssa| scope.spawn(|| write_packed_u16(dir, "ssa", ssa)));

            let sa_h = matches!(save_option, SaveOption::SuffixArray | SaveOption::SuffixArrayAndSeq)
                .then(|| {
                    let sa = self.sa.as_ref().expect("SA resident for this save option");
                    scope.spawn(|| write_packed_i64(dir, "sa", sa))
                });

            let seq_h = matches!(save_option, SaveOption::SuffixArrayAndSeq).then(|| {
                let seq = self.seq.as_ref().expect("SEQ resident for this save option");
                scope.spawn(|| write_bytes(dir, "seq", seq))
            });

            let occ_hs: Vec<_> = self
                .symbols
                .iter()
                .map(|&c| {
                    let occ_c = &self.occ[c as usize];
                    scope.spawn(move || write_packed_i64(dir, &format!("occ.{}", c as char), occ_c))
                })
                .collect();

            let others_h = scope.spawn(|| self.write_others(dir, occ_len, save_option));
            let lengths_h = scope.spawn(|| self.write_genome_lengths(dir));

            bwt_h.join().unwrap()?;
            if let Some(h) = ssa_h {
                h.join().unwrap()?;
            }
            if let Some(h) = sa_h {
                h.join().unwrap()?;
            }
            if let Some(h) = seq_h {
                h.join().unwrap()?;
            }
            for h in occ_hs {
                h.join().unwrap()?;
            }
            others_h.join().unwrap()?;
            lengths_h.join().unwrap()?;
            Ok(())
        })
    }

    fn write_others(&self, dir: &Path, occ_len: usize, save_option: SaveOption) -> Result<(), Error> {
        let mut out = format!(
            "{} {} {} {} {} {}\n",
            self.len, occ_len, self.end_pos, self.m, self.multi, save_option.code()
        );
        for &s in &self.symbols {
            out.push_str(&format!(
                "{} {} {} {}\n",
                s as char, self.freq[s as usize], self.c[s as usize], self.ep[s as usize]
            ));
        }
        std::fs::write(dir.join("others"), out).map_err(Error::from)
    }

    fn write_genome_lengths(&self, dir: &Path) -> Result<(), Error> {
        let mut out = String::new();
        for r in 0..self.lens.len() {
            out.push_str(&format!(
                "{} {} {}\n",
                self.lens[r], self.genome_id[r], self.genome_des[r]
            ));
        }
        std::fs::write(dir.join("genome_lengths"), out).map_err(Error::from)
    }

    /// Reconstruct an index previously written by [`Index::save`].
    pub fn load(dir: impl AsRef<Path>) -> Result<Index, Error> {
        let dir = dir.as_ref();

        let others = std::fs::read_to_string(dir.join("others"))?;
        let mut lines = others.lines();
        let header = lines
            .next()
            .ok_or_else(|| Error::Invariant("others file has no header line".to_string()))?;
        let mut header_fields = header.split_whitespace();
        let len: i64 = parse_field(&mut header_fields, "LEN")?;
        let _occ_len: usize = parse_field(&mut header_fields, "OCC_SIZE")?;
        let end_pos: i64 = parse_field(&mut header_fields, "END_POS")?;
        let m: usize = parse_field(&mut header_fields, "M")?;
        let multi: bool = header_fields
            .next()
            .ok_or_else(|| Error::Invariant("others header missing Multiple".to_string()))?
            == "true";
        let save_option_code: u8 = parse_field(&mut header_fields, "save_option")?;
        let save_option = SaveOption::from_code(save_option_code)?;

        let mut freq = [0i64; 256];
        let mut c = [0i64; 256];
        let mut ep = [0i64; 256];
        let mut symbols = Vec::new();
        for line in lines {
            let mut fields = line.split_whitespace();
            let symbol = fields
                .next()
                .and_then(|s| s.chars().next())
                .ok_or_else(|| Error::Invariant("others symbol row missing symbol".to_string()))?
                as u8;
            let f: i64 = parse_field(&mut fields, "freq")?;
            let cc: i64 = parse_field(&mut fields, "C")?;
            let e: i64 = parse_field(&mut fields, "EP")?;
            freq[symbol as usize] = f;
            c[symbol as usize] = cc;
            ep[symbol as usize] = e;
            symbols.push(symbol);
        }

        let (bwt, ssa, sa, seq, occ) = std::thread::scope(|scope| -> Result<_, Error> {
            let bwt_h = scope.spawn(|| read_bytes(dir, "bwt"));
            let ssa_h = multi.then(|| scope.spawn(|| read_packed_u16(dir, "ssa")));
            let sa_h = matches!(save_option, SaveOption::SuffixArray | SaveOption::SuffixArrayAndSeq)
                .then(|| scope.spawn(|| read_packed_i64(dir, "sa")));
            let seq_h =
                matches!(save_option, SaveOption::SuffixArrayAndSeq).then(|| scope.spawn(|| read_bytes(dir, "seq")));
            let occ_hs: Vec<_> = symbols
                .iter()
                .map(|&s| scope.spawn(move || read_packed_i64(dir, &format!("occ.{}", s as char)).map(|v| (s, v))))
                .collect();

            let bwt = bwt_h.join().unwrap()?;
            let ssa = ssa_h.map(|h| h.join().unwrap()).transpose()?;
            let sa = sa_h.map(|h| h.join().unwrap()).transpose()?;
            let seq = seq_h.map(|h| h.join().unwrap()).transpose()?;
            let mut occ = vec![Vec::new(); 256];
            for h in occ_hs {
                let (s, v) = h.join().unwrap()?;
                occ[s as usize] = v;
            }
            Ok((bwt, ssa, sa, seq, occ))
        })?;

        let genome_lengths = std::fs::read_to_string(dir.join("genome_lengths"))?;
        let mut lens = Vec::new();
        let mut genome_id = Vec::new();
        let mut genome_des = Vec::new();
        for line in genome_lengths.lines() {
            let mut fields = line.splitn(3, ' ');
            let length: i64 = fields
                .next()
                .ok_or_else(|| Error::Invariant("genome_lengths row missing length".to_string()))?
                .parse()
                .map_err(|_| Error::Invariant("genome_lengths length is not an integer".to_string()))?;
            let id = fields
                .next()
                .ok_or_else(|| Error::Invariant("genome_lengths row missing id".to_string()))?
                .to_string();
            let des = fields.next().unwrap_or("").to_string();
            lens.push(length);
            genome_id.push(id);
            genome_des.push(des);
        }

        let source_path = {
            let raw = dir.to_string_lossy();
            match raw.strip_suffix(".fmi") {
                Some(stripped) => PathBuf::from(stripped),
                None => dir.to_path_buf(),
            }
        };

        Ok(Index {
            seq,
            sa,
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
            multi,
            len,
            source_path,
        })
    }
}

fn parse_field<'a, T: std::str::FromStr>(
    fields: &mut impl Iterator<Item = &'a str>,
    name: &str,
) -> Result<T, Error> {
    fields
        .next()
        .ok_or_else(|| Error::Invariant(format!("others header missing {name}")))?
        .parse()
        .map_err(|_| Error::Invariant(format!("others header field {name} is malformed")))
}

fn write_bytes(dir: &Path, name: &str, data: &[u8]) -> Result<(), Error> {
    std::fs::write(dir.join(name), data).map_err(Error::from)
}

fn write_packed_u16(dir: &Path, name: &str, data: &[u16]) -> Result<(), Error> {
    let mut buf = Vec::with_capacity(data.len() * 2);
    for &v in data {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    std::fs::write(dir.join(name), buf).map_err(Error::from)
}

fn write_packed_i64(dir: &Path, name: &str, data: &[i64]) -> Result<(), Error> {
    let mut buf = Vec::with_capacity(data.len() * 8);
    for &v in data {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    std::fs::write(dir.join(name), buf).map_err(Error::from)
}

fn read_bytes(dir: &Path, name: &str) -> Result<Vec<u8>, Error> {
    std::fs::read(dir.join(name)).map_err(Error::from)
}

fn read_packed_u16(dir: &Path, name: &str) -> Result<Vec<u16>, Error> {
    let raw = std::fs::read(dir.join(name))?;
    Ok(raw.chunks_exact(2).map(|b| u16::from_le_bytes([b[0], b[1]])).collect())
}

fn read_packed_i64(dir: &Path, name: &str) -> Result<Vec<i64>, Error> {
    let raw = std::fs::read(dir.join(name))?;
    Ok(raw
        .chunks_exact(8)
        .map(|b| i64::from_le_bytes(b.try_into().unwrap()))
        .collect())
}
