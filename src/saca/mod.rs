//! Linear-time suffix array construction: the SACA-K / SA-IS core (§4.3).
//!
//! `build_suffix_array` is the single entry point, called once at level 0
//! over the caller's rank-mapped byte alphabet. Level 0 uses an external
//! O(n) `Types` bitmap and an O(k) [`Buckets`] table, since the caller's
//! alphabet is whatever width the rank map gives it and a dense
//! reduced-alphabet trick doesn't apply yet. Every recursive (level ≥ 1)
//! call, over the dense `u32` name alphabet [`naming`] produces, instead
//! routes through [`inplace::sacak_inplace`], which carries no bitmap or
//! bucket table of its own: each bucket's single reserved cell lives at
//! the index equal to its own character value inside the suffix-array
//! workspace itself (the head-as-counter / borrowing scheme of §4.3/§9).
//! See [`inplace`] for the induction passes themselves and DESIGN.md for
//! why level 0 keeps the external tables instead of also switching over.

pub mod inplace;
pub mod naming;

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::bucket::Buckets;
use crate::typing::{SacSymbol, Types};
use naming::Named;

/// Sentinel marking an unwritten SA cell before induction fills it.
pub const EMPTY: u32 = 0xffff_ffff;

/// Largest sequence length this builder accepts.
pub const MAX_LENGTH: usize = 0xffff_fffe;

#[inline]
pub fn is_empty(x: u32) -> bool {
    x == EMPTY
}

/// Build the suffix array of `s` (length `n`, alphabet size `k`, with
/// `s[n-1]` the rank-0 terminal symbol) into `sa` (length `n`).
pub fn build_suffix_array<T: SacSymbol>(s: &[T], k: usize, sa: &mut [u32]) {
    assert!(s.len() <= MAX_LENGTH, "sequence exceeds MAX_LENGTH");
    assert_eq!(s.len(), sa.len(), "sa must have the same length as s");
    sacak(s, k, sa);
}

fn sacak<T: SacSymbol>(s: &[T], k: usize, sa: &mut [u32]) {
    let n = s.len();
    if n == 1 {
        sa[0] = 0;
        return;
    }

    let types = Types::calculate(s);

    for x in sa.iter_mut() {
        *x = EMPTY;
    }
    let mut bkt = Buckets::compute(s, k);

    for i in (1..n - 1).rev() {
        if types.is_lms(i) {
            let c = s[i].to_usize();
            bkt[c].push_back(sa, i as u32);
        }
    }
    bkt[0].push_back(sa, (n - 1) as u32);

    induce(s, &types, &mut bkt, sa);

    // Compact the now LMS-substring-sorted positions to a prefix,
    // scanning left to right over the induced order so relative order is
    // preserved.
    let mut n1 = 0;
    for i in 0..n {
        let v = sa[i];
        if types.is_lms(v as usize) {
            sa[n1] = v;
            n1 += 1;
        }
    }
    let sorted_lms: Vec<u32> = sa[..n1].to_vec();

    let sa1: Vec<u32> = match naming::name_lms_substrings(s, &types, &sorted_lms) {
        Named::AllUnique(sa1) => sa1,
        Named::Recurse { s1, lms_positions } => {
            let mut sa1 = vec![0u32; n1];
            inplace::sacak_inplace(&s1, &mut sa1);
            for slot in sa1.iter_mut() {
                *slot = lms_positions[*slot as usize];
            }
            sa1
        }
    };

    // Stage 3: expand SA(S1) back to SA(S). Seed the now fully-sorted LMS
    // suffixes into bucket tails, in reverse so induce refills correctly,
    // then re-induce.
    for x in sa.iter_mut() {
        *x = EMPTY;
    }
    bkt = Buckets::compute(s, k);
    for &pos in sa1.iter().rev() {
        let c = s[pos as usize].to_usize();
        bkt[c].push_back(sa, pos);
    }
    induce(s, &types, &mut bkt, sa);

    debug_assert!(
        sa.iter().all(|&x| !is_empty(x)),
        "induction must fill every SA cell"
    );
}

/// One induced-sort pass: induce L-type positions left to right from
/// whatever is currently seeded at bucket tails, then induce S-type
/// positions right to left from the freshly-placed L-type positions.
/// Used both to discover the relative order of LMS-substrings (stage 1,
/// fed with only LMS seeds) and to produce the final suffix array (stage
/// 3, fed with the fully-sorted LMS suffixes): the same scan is correct
/// for both, since induction only ever depends on buckets being seeded
/// validly, not on the seed being the final answer.
///
/// Differs from the textbook bucket-offset-by-one convention (which
/// reserves index 0 for a virtual sentinel so every bucket's cursors stay
/// `>= 1`): our sentinel is explicit and real, so bucket 0 can legally
/// start at index 0. The S-pass below therefore checks the loop bound
/// before decrementing (`while i > bound { i -= 1; ... }`) rather than
/// after, so it never underflows when a bucket's `j` cursor reaches 0.
fn induce<T: SacSymbol>(s: &[T], types: &Types, bkt: &mut Buckets, sa: &mut [u32]) {
    let k = bkt.len();

    // Induce L-type positions.
    for c0 in 0..k {
        let mut i = bkt[c0].head;
        while i < bkt[c0].i {
            let j = sa[i as usize];
            if j > 0 && !types.is_s((j - 1) as usize) {
                let c = s[(j - 1) as usize].to_usize();
                bkt[c].push_front(sa, j - 1);
            }
            i += 1;
        }
        // The tail region still holds the original LMS seeds. Every LMS
        // position's predecessor is L-type by definition (that's what
        // makes it leftmost-S), so no type check is needed here, unlike
        // the head region above.
        i = bkt[c0].j;
        while i < bkt[c0].tail {
            let j = sa[i as usize];
            if j > 0 {
                let c = s[(j - 1) as usize].to_usize();
                bkt[c].push_front(sa, j - 1);
            }
            i += 1;
        }
    }
    for c0 in 0..k {
        bkt[c0].reset_back();
    }

    // Induce S-type positions.
    for c0 in (0..k).rev() {
        let mut i = bkt[c0].tail;
        while i > bkt[c0].j {
            i -= 1;
            let j = sa[i as usize];
            if j > 0 && types.is_s((j - 1) as usize) {
                let c = s[(j - 1) as usize].to_usize();
                bkt[c].push_back(sa, j - 1);
            }
        }
        i = bkt[c0].i;
        while i > bkt[c0].head {
            i -= 1;
            let j = sa[i as usize];
            if j > 0 && types.is_s((j - 1) as usize) {
                let c = s[(j - 1) as usize].to_usize();
                bkt[c].push_back(sa, j - 1);
            }
        }
    }
    for c0 in 0..k {
        bkt[c0].reset();
    }
}
