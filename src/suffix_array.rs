//! Suffix array construction.
//!
//! Suffix array construction is treated as a pluggable primitive: any algorithm
//! that is deterministic, does not mutate the input, and produces a correct
//! suffix array for a text whose last byte is the unique lexicographic minimum
//! is acceptable. This module builds one by prefix doubling with a bucket (rank)
//! sort, generalizing the bucket-counting vocabulary of a classic SA-IS bucket
//! layout (`count_symbols`/`bucket_start_positions`) to a simpler,
//! easy-to-verify construction.

/// Count occurrences of each byte value in `text`.
fn count_symbols(text: &[u8]) -> [usize; 256] {
    let mut counts = [0usize; 256];
    for &b in text {
        counts[b as usize] += 1;
    }
    counts
}

/// Build a suffix array for `text`, whose last byte must be the unique
/// lexicographically smallest byte in the text (the sentinel).
///
/// Returns a permutation `sa` of `[0, text.len())` such that
/// `text[sa[0]..] < text[sa[1]..] < ...` lexicographically. Deterministic; does
/// not mutate `text`. Runs in `O(n log^2 n)`.
pub fn build_sa(text: &[u8]) -> Vec<usize> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![0];
    }

    let counts = count_symbols(text);
    let mut rank: Vec<u32> = {
        let mut bucket_of = [0u32; 256];
        let mut next = 0u32;
        for (c, &count) in counts.iter().enumerate() {
            if count > 0 {
                bucket_of[c] = next;
                next += 1;
            }
        }
        text.iter().map(|&b| bucket_of[b as usize]).collect()
    };

    let mut sa: Vec<usize> = (0..n).collect();
    let mut tmp: Vec<u32> = vec![0; n];
    let mut k = 1usize;

    while {
        let key = |i: &usize| -> (u32, u32) {
            let i = *i;
            let a = rank[i];
            let b = if i + k < n { rank[i + k] } else { 0 };
            (a, b)
        };
        sa.sort_by_key(key);

        tmp[sa[0]] = 0;
        for i in 1..n {
            let prev = sa[i - 1];
            let cur = sa[i];
            let same = key(&prev) == key(&cur);
            tmp[cur] = tmp[prev] + if same { 0 } else { 1 };
        }
        rank.copy_from_slice(&tmp);

        (rank[sa[n - 1]] as usize) != n - 1 && k < n
    } {
        k *= 2;
    }

    sa
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_sa(text: &[u8]) -> Vec<usize> {
        let n = text.len();
        let mut sa: Vec<usize> = (0..n).collect();
        sa.sort_by_key(|&i| &text[i..]);
        sa
    }

    #[test]
    fn matches_naive_on_small_texts() {
        let texts: &[&[u8]] = &[
            b"$",
            b"AAAA$",
            b"ACGTACGT$",
            b"banana$",
            b"mmiissiissiippii$",
            b"AAAAACCCCC|GGGGGTTTTT$",
        ];
        for &text in texts {
            assert_eq!(build_sa(text), naive_sa(text), "text = {:?}", text);
        }
    }

    #[test]
    fn is_a_permutation() {
        let text = b"the quick brown fox jumps over the lazy dog$";
        let sa = build_sa(text);
        let mut seen = sa.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..text.len()).collect::<Vec<_>>());
    }

    #[test]
    fn orders_suffixes_lexicographically() {
        let text = b"ACGTACGT$";
        let sa = build_sa(text);
        for w in sa.windows(2) {
            assert!(text[w[0]..] < text[w[1]..]);
        }
    }
}
