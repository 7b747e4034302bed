//! FASTA parsing and text construction.
//!
//! Builds the reversed, sentinel-terminated text that the rest of the index is
//! constructed over, plus the per-record metadata needed to resolve search hits
//! back to their source sequence.

use std::io::BufRead;
use std::path::Path;

use crate::error::Error;

/// A single parsed FASTA record, in input order.
struct Record {
    id: String,
    description: String,
    sequence: Vec<u8>,
}

/// The text and per-record metadata produced by the text builder.
pub struct ParsedText {
    /// The concatenated, reversed, `$`-terminated byte text. Length `n`.
    pub seq: Vec<u8>,
    /// `lens[r]` is the length of record `r`, before reversal and separator insertion.
    pub lens: Vec<i64>,
    /// The first whitespace-separated token of each record's header, in input order.
    pub genome_id: Vec<String>,
    /// The remainder of each record's header line, in input order.
    pub genome_des: Vec<String>,
    /// `record_id_at_pos[i]` is the 0-based input-order record id owning `seq[i]`.
    /// Only populated when `multiple` is requested.
    pub record_id_at_pos: Option<Vec<u16>>,
}

/// Parse a `.fasta` file into a [`ParsedText`].
///
/// Records are delimited by header lines beginning with `>`; the header's first
/// whitespace-separated token becomes the record id, the remainder its description.
/// Sequence lines are concatenated with surrounding whitespace trimmed. The entire
/// concatenation (records joined by a single `|` separator) is reversed and a `$`
/// sentinel is appended.
pub fn read_fasta(path: impl AsRef<Path>, multiple: bool) -> Result<ParsedText, Error> {
    let path = path.as_ref();
    if path.extension().and_then(|e| e.to_str()) != Some("fasta") {
        return Err(Error::InputFormat(format!(
            "{}: is not a .fasta file",
            path.display(),
        )));
    }

    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);

    let mut records: Vec<Record> = Vec::new();
    let mut cur_seq: Vec<u8> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim_matches(|c| c == '\n' || c == '\r' || c == ' ');
        if trimmed.is_empty() {
            continue;
        }
        let bytes = trimmed.as_bytes();
        if bytes[0] != b'>' {
            cur_seq.extend_from_slice(bytes);
        } else {
            if let Some(last) = records.last_mut() {
                last.sequence = std::mem::take(&mut cur_seq);
            } else if !cur_seq.is_empty() {
                return Err(Error::InputFormat(
                    "sequence data before the first header".to_string(),
                ));
            }
            let header = &trimmed[1..];
            let space = header.find(' ').ok_or_else(|| {
                Error::InputFormat(format!("header {:?} has no whitespace-separated id", header))
            })?;
            records.push(Record {
                id: header[..space].to_string(),
                description: header[space + 1..].to_string(),
                sequence: Vec::new(),
            });
        }
    }
    if let Some(last) = records.last_mut() {
        last.sequence = cur_seq;
    }

    if records.is_empty() {
        return Err(Error::InputFormat("empty FASTA input".to_string()));
    }

    let num_records = records.len();
    let lens = records.iter().map(|r| r.sequence.len() as i64).collect();
    let genome_id = records.iter().map(|r| r.id.clone()).collect();
    let genome_des = records.iter().map(|r| r.description.clone()).collect();

    let total_len: usize = records.iter().map(|r| r.sequence.len()).sum::<usize>()
        + num_records.saturating_sub(1)
        + 1;
    let mut seq = Vec::with_capacity(total_len);
    let mut record_id_at_pos = if multiple {
        Some(Vec::with_capacity(total_len))
    } else {
        None
    };

    for r in (0..num_records).rev() {
        for &b in records[r].sequence.iter().rev() {
            seq.push(b);
            if let Some(ids) = record_id_at_pos.as_mut() {
                ids.push(r as u16);
            }
        }
        if r != 0 {
            seq.push(b'|');
            if let Some(ids) = record_id_at_pos.as_mut() {
                ids.push(r as u16);
            }
        }
    }
    seq.push(b'$');
    if let Some(ids) = record_id_at_pos.as_mut() {
        ids.push(0);
    }

    Ok(ParsedText {
        seq,
        lens,
        genome_id,
        genome_des,
        record_id_at_pos,
    })
}
