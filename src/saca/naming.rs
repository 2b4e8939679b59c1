//! Stage 2 of the SACA-K builder: name LMS-substrings and lay out the
//! reduced problem S1 (§4.3 stage 2).

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::typing::{for_each_lms, lms_substr_eq, SacSymbol, Types};

/// Outcome of naming: either the reduced alphabet's own suffix array
/// (when every name was already unique, so S1's suffix array is the
/// identity permutation by rank) or a request to recurse.
pub enum Named {
    /// All LMS-substrings got distinct names; `sa1[r]` is the LMS position
    /// (index into the original text-order LMS list) whose name is `r`.
    AllUnique(Vec<u32>),
    /// Some names repeated; the reduced sequence must be sorted
    /// recursively. `lms_positions[i]` is the i-th LMS position in text
    /// order; `s1[i]` is its name. The reduced alphabet is dense (every
    /// name in `0..s1.len()`), so the recursive solver needs no separate
    /// alphabet-size parameter.
    Recurse {
        s1: Vec<u32>,
        lms_positions: Vec<u32>,
    },
}

/// `sorted_lms` holds every LMS position of `s`, in the order produced by
/// stage 1's induced sort (i.e. LMS-substring-sorted order, not text
/// order). Assigns names by walking that order and bumping the name
/// whenever consecutive LMS-substrings differ.
pub fn name_lms_substrings<T: SacSymbol>(s: &[T], types: &Types, sorted_lms: &[u32]) -> Named {
    let n = s.len();
    let mut name_at = vec![u32::MAX; n];
    let mut name = 0u32;
    let mut prev: Option<usize> = None;
    for &p in sorted_lms {
        let p = p as usize;
        if let Some(pp) = prev {
            if !lms_substr_eq(s, types, pp, p) {
                name += 1;
            }
        }
        name_at[p] = name;
        prev = Some(p);
    }
    let alphabet_size = (name as usize) + 1;
    let n1 = sorted_lms.len();

    let mut lms_positions = Vec::with_capacity(n1);
    lms_positions.push((n - 1) as u32);
    for_each_lms(s, |pos, _| lms_positions.push(pos as u32));
    lms_positions.reverse();
    debug_assert_eq!(lms_positions.len(), n1);

    if alphabet_size == n1 {
        // Every name is unique, so each name already encodes its own rank:
        // SA1[name] = index (in lms_positions) of the LMS position with
        // that name.
        let mut sa1 = vec![0u32; n1];
        for (idx, &pos) in lms_positions.iter().enumerate() {
            sa1[name_at[pos as usize] as usize] = idx as u32;
        }
        Named::AllUnique(sa1)
    } else {
        let s1: Vec<u32> = lms_positions.iter().map(|&p| name_at[p as usize]).collect();
        Named::Recurse { s1, lms_positions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saca::build_suffix_array;

    #[test]
    fn distinct_names_need_no_recursion() {
        // "banana" with an appended sentinel: ranks $=0 a=1 b=2 n=3. The
        // sentinel must be a unique rank-0 symbol distinct from any real
        // occurrence of 'a' in the text, or bucket 0 stops being a
        // singleton and the induction passes below lose track of it.
        let ranks: Vec<u8> = b"banana"
            .iter()
            .map(|&c| match c {
                b'a' => 1,
                b'b' => 2,
                b'n' => 3,
                _ => unreachable!(),
            })
            .chain(core::iter::once(0))
            .collect();
        let mut sa = vec![0u32; ranks.len()];
        build_suffix_array(&ranks, 4, &mut sa);
        let sa: Vec<u32> = sa;
        assert_eq!(sa, vec![6, 5, 3, 1, 0, 4, 2]);
    }
}
