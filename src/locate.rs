//! Read-locating algorithms built on the FM primitive: single-read region
//! search and the deterministic and randomized paired-read locators.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;

use crate::index::Index;

/// The outcome of [`Index::region_search`].
///
/// `id`/`pos` are `-1` when the walk did not converge on a single source
/// sequence; `candidates` is the (at most one) snapshot taken along the way,
/// mapping source-sequence id to a matched position.
pub struct RegionHit {
    pub id: i32,
    pub pos: i64,
    pub candidates: HashMap<u16, i64>,
}

impl RegionHit {
    fn none() -> RegionHit {
        RegionHit {
            id: -1,
            pos: -1,
            candidates: HashMap::new(),
        }
    }
}

impl Index {
    /// Locate the source sequence containing `query`, walking from `start`.
    ///
    /// The interval `(sp, ep)` is maintained exactly as in [`Index::search`].
    /// The first time it shrinks to 10 or fewer rows, every row is snapshotted
    /// into `candidates` (keyed by `SSA`); if that snapshot is a single id, it
    /// is returned immediately. Otherwise the walk continues to the end of the
    /// query; a final singleton interval is returned as the unique hit. An
    /// unknown symbol or an exhausted (empty) interval yields the "no hit"
    /// sentinel, carrying whatever `candidates` were gathered so far. A
    /// single-record (`multiple = false`) index has no `SA`/`SSA` to walk and
    /// also yields the "no hit" sentinel.
    pub fn region_search(&self, query: &[u8], start: usize) -> RegionHit {
        if !self.multi {
            return RegionHit::none();
        }
        let (sa, ssa) = match (self.sa.as_ref(), self.ssa.as_ref()) {
            (Some(sa), Some(ssa)) => (sa, ssa),
            _ => return RegionHit::none(),
        };

        let mut candidates: HashMap<u16, i64> = HashMap::new();
        if start >= query.len() {
            return RegionHit::none();
        }

        let c0 = query[start];
        if self.freq[c0 as usize] == 0 {
            return RegionHit::none();
        }
        let mut sp = self.c[c0 as usize];
        let mut ep = self.ep[c0 as usize];
        let mut snapshotted = false;
        let mut idx = start + 1;

        loop {
            if sp > ep {
                return RegionHit {
                    id: -1,
                    pos: -1,
                    candidates,
                };
            }
            if !snapshotted && ep - sp <= 10 {
                snapshotted = true;
                for i in sp..=ep {
                    candidates.insert(ssa[i as usize], sa[i as usize]);
                }
                if candidates.len() == 1 {
                    let (&id, &pos) = candidates.iter().next().unwrap();
                    return RegionHit {
                        id: id as i32,
                        pos,
                        candidates,
                    };
                }
            }
            if idx >= query.len() {
                if sp == ep {
                    return RegionHit {
                        id: ssa[sp as usize] as i32,
                        pos: sa[sp as usize],
                        candidates,
                    };
                }
                return RegionHit {
                    id: -1,
                    pos: -1,
                    candidates,
                };
            }
            let c = query[idx];
            idx += 1;
            if self.freq[c as usize] == 0 {
                return RegionHit {
                    id: -1,
                    pos: -1,
                    candidates,
                };
            }
            sp = self.c[c as usize] + self.occ(c, sp - 1);
            ep = self.c[c as usize] + self.occ(c, ep) - 1;
        }
    }

    /// Locate every source sequence whose suffix-array rows match `query`,
    /// walking left to right exactly like [`Index::region_search`], but taking
    /// a single snapshot the first time the interval shrinks to `ep - sp <= 1`
    /// (rather than collapsing to a unique id) and recording every
    /// `(id, position)` pair seen in that window. An unknown symbol mid-walk
    /// returns whatever was accumulated so far rather than failing. A
    /// single-record (`multiple = false`) index has no `SA`/`SSA` to walk and
    /// yields the empty map.
    pub fn test_search(&self, query: &[u8]) -> HashMap<u16, Vec<i64>> {
        let mut result: HashMap<u16, Vec<i64>> = HashMap::new();
        if !self.multi {
            return result;
        }
        let (sa, ssa) = match (self.sa.as_ref(), self.ssa.as_ref()) {
            (Some(sa), Some(ssa)) => (sa, ssa),
            _ => return result,
        };

        if query.is_empty() {
            return result;
        }
        let c0 = query[0];
        if self.freq[c0 as usize] == 0 {
            return result;
        }
        let mut sp = self.c[c0 as usize];
        let mut ep = self.ep[c0 as usize];
        let mut snapshotted = false;
        let mut idx = 1;

        loop {
            if sp > ep {
                return result;
            }
            if !snapshotted && ep - sp <= 1 {
                snapshotted = true;
                for i in sp..=ep {
                    result.entry(ssa[i as usize]).or_default().push(sa[i as usize]);
                }
            }
            if idx >= query.len() {
                return result;
            }
            let c = query[idx];
            idx += 1;
            if self.freq[c as usize] == 0 {
                return result;
            }
            sp = self.c[c as usize] + self.occ(c, sp - 1);
            ep = self.c[c as usize] + self.occ(c, ep) - 1;
        }
    }

    /// Accept a read pair `(q1, q2)` as originating from the same source
    /// sequence within `max_insert` of each other.
    ///
    /// Fast path: both reads uniquely locate to the same id within
    /// `max_insert`; result is `{id: 1}`. Otherwise every id present in both
    /// reads' region-search candidate snapshots, with positions within
    /// `max_insert`, is included. Returns the empty map when neither path
    /// yields a result.
    pub fn find_genome_d(&self, q1: &[u8], q2: &[u8], max_insert: i64) -> HashMap<u16, i32> {
        let r1 = self.region_search(q1, 0);
        let r2 = self.region_search(q2, 0);
        fast_path(&r1, &r2, max_insert).unwrap_or_else(|| slow_path(&r1, &r2, max_insert))
    }

    /// Randomized variant of [`Index::find_genome_d`].
    ///
    /// Round 0 starts both reads at position 0. Each unsuccessful round draws
    /// new start offsets `k1 in [0, |q1|-20)` and `k2 in [0, |q2|-20)` from
    /// `rng` (callers must supply reads of at least 21 bytes). Returns the
    /// empty map after `rounds` unsuccessful rounds.
    pub fn find_genome_r(
        &self,
        q1: &[u8],
        q2: &[u8],
        max_insert: i64,
        rounds: u32,
        rng: &mut StdRng,
    ) -> HashMap<u16, i32> {
        let mut k1 = 0usize;
        let mut k2 = 0usize;
        for _ in 0..rounds {
            let r1 = self.region_search(q1, k1);
            let r2 = self.region_search(q2, k2);
            if let Some(hit) = fast_path(&r1, &r2, max_insert) {
                return hit;
            }
            let matched = slow_path(&r1, &r2, max_insert);
            if matched.len() == 1 {
                return matched;
            }
            k1 = rng.gen_range(0..q1.len() - 20);
            k2 = rng.gen_range(0..q2.len() - 20);
        }
        HashMap::new()
    }
}

fn fast_path(r1: &RegionHit, r2: &RegionHit, max_insert: i64) -> Option<HashMap<u16, i32>> {
    if r1.id != -1 && r1.id == r2.id && (r1.pos - r2.pos).abs() <= max_insert {
        let mut hit = HashMap::new();
        hit.insert(r1.id as u16, 1);
        return Some(hit);
    }
    None
}

fn slow_path(r1: &RegionHit, r2: &RegionHit, max_insert: i64) -> HashMap<u16, i32> {
    let mut result = HashMap::new();
    for (&id, &p1) in &r1.candidates {
        if let Some(&p2) = r2.candidates.get(&id) {
            if (p1 - p2).abs() <= max_insert {
                result.insert(id, 1);
            }
        }
    }
    result
}
