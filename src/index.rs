//! The built index and its query surface (§4.5, §6).

extern crate alloc;
use alloc::vec::Vec;

use crate::bitvec::BitVector;
use crate::bwt::build_tables;
use crate::error::BuildError;
use crate::rank::RankMap;
use crate::saca::build_suffix_array;

/// A built FM-index over a sequence and its rank map. `R` is kept by value
/// rather than boxed: queries need it to translate a query byte to a rank
/// before consulting `c_table`/`occ`, and the crate stays `no_std`-clean
/// without an allocator-backed trait object.
pub struct Index<R: RankMap> {
    pub(crate) n: u64,
    pub(crate) k: u64,
    pub(crate) sample_rate: u64,
    pub(crate) primary_index: u64,
    pub(crate) c_table: Vec<u64>,
    pub(crate) occ: Vec<u64>,
    pub(crate) locate_table: Vec<(u64, u64)>,
    pub(crate) marked: BitVector,
    pub(crate) bwt: Vec<u8>,
    pub(crate) rank_map: R,
}

impl<R: RankMap> Index<R> {
    /// Build an index over `sequence` under `rank_map`, sampling occurrence
    /// and locate checkpoints every `sample_rate` positions. See §6 for the
    /// full precondition/error list.
    pub fn build(sequence: &[u8], rank_map: R, sample_rate: u64) -> Result<Index<R>, BuildError> {
        if sample_rate == 0 || !sample_rate.is_power_of_two() {
            return Err(BuildError::InvalidSampleRate);
        }
        if sequence.len() < 2 {
            return Err(BuildError::SequenceTooShort);
        }

        let n = sequence.len();
        let mut ranks = Vec::with_capacity(n);
        for &byte in sequence {
            match rank_map.rank(byte) {
                Some(r) => ranks.push(r as u32),
                None => return Err(BuildError::UnknownSymbol),
            }
        }
        if ranks[n - 1] != 0 || ranks[..n - 1].iter().any(|&r| r == 0) {
            return Err(BuildError::InvalidSentinel);
        }

        let k = rank_map.alphabet_size();
        let mut sa = alloc::vec![0u32; n];
        build_suffix_array(&ranks, k, &mut sa);

        let tables = build_tables(sequence, &rank_map, &sa, sample_rate);

        Ok(Index {
            n: n as u64,
            k: k as u64,
            sample_rate,
            primary_index: tables.primary_index,
            c_table: tables.c_table,
            occ: tables.occ,
            locate_table: tables.locate,
            marked: tables.marked,
            bwt: tables.bwt,
            rank_map,
        })
    }

    /// Reassemble an `Index` from tables already validated by `load`'s
    /// deserialization checks — the wire format carries no rank map, so
    /// the caller supplies the same one passed to `build`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        n: u64,
        k: u64,
        sample_rate: u64,
        primary_index: u64,
        c_table: Vec<u64>,
        occ: Vec<u64>,
        locate_table: Vec<(u64, u64)>,
        marked: BitVector,
        bwt: Vec<u8>,
        rank_map: R,
    ) -> Index<R> {
        Index {
            n,
            k,
            sample_rate,
            primary_index,
            c_table,
            occ,
            locate_table,
            marked,
            bwt,
            rank_map,
        }
    }

    #[inline]
    fn occ_row(&self, row: u64, r: usize) -> u64 {
        self.occ[(row * self.k) as usize + r]
    }

    /// LF-mapping (§4.5): the position in the first column reached by
    /// stepping one character to the left from BWT position `i` via `c`.
    /// Picks the nearer checkpoint, scanning forward from it or backward
    /// from the next one, rather than always walking from the last
    /// checkpoint.
    pub fn lf_mapping(&self, i: u64, c: u8) -> u64 {
        let r = self
            .rank_map
            .rank(c)
            .expect("c must be a symbol of the index's alphabet");
        let s = self.sample_rate;
        let lo = i / s;
        let hi = lo + 1;
        let delta = i % s;
        let occ_rows = self.occ.len() as u64 / self.k;

        let count = if hi >= occ_rows || delta * 2 <= s {
            let mut cnt = self.occ_row(lo, r);
            for j in (lo * s)..i {
                if j != self.primary_index && self.bwt[j as usize] == c {
                    cnt += 1;
                }
            }
            cnt
        } else {
            let mut cnt = self.occ_row(hi, r);
            for j in i..(hi * s) {
                if j != self.primary_index && self.bwt[j as usize] == c {
                    cnt -= 1;
                }
            }
            cnt
        };

        self.c_table[r] + count
    }

    /// Locate (§4.5): the text offset of the suffix/rotation at BWT
    /// position `i`. Walks LF until a sampled checkpoint is reached, then
    /// reconstructs the answer from the checkpoint's known text offset and
    /// the number of steps taken.
    pub fn locate(&self, i: u64) -> u64 {
        let mut cur = i;
        let mut steps = 0u64;
        while !self.marked.get(cur as usize) {
            let c = self.bwt[cur as usize];
            cur = self.lf_mapping(cur, c);
            steps += 1;
        }
        let idx = self
            .locate_table
            .binary_search_by_key(&cur, |&(bwt_pos, _)| bwt_pos)
            .expect("a marked BWT position must have a locate_table entry");
        (self.locate_table[idx].1 + steps) % self.n
    }

    pub fn len(&self) -> u64 {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn alphabet_size(&self) -> u64 {
        self.k
    }

    pub fn sample_rate(&self) -> u64 {
        self.sample_rate
    }

    pub fn primary_index(&self) -> u64 {
        self.primary_index
    }

    pub fn bwt(&self) -> &[u8] {
        &self.bwt
    }

    pub fn rank_map(&self) -> &R {
        &self.rank_map
    }
}
