//! # sacak-fm
//!
//! Linear-time suffix array construction (SACA-K / SA-IS) and FM-index
//! queries over small-alphabet sequences, such as DNA with a sentinel.
//!
//! The heavy lifting is index *construction*: typing each position as
//! L-type/S-type/LMS (`typing`), bucket arithmetic (`bucket`), the
//! recursive induced-sort suffix array builder (`saca`), and the BWT +
//! sampled-table post-pass (`bwt`). `index` exposes the built query
//! surface; `serialize` persists it.
//!
//! ## Example
//!
//! ```
//! use sacak_fm::index::Index;
//! use sacak_fm::rank::ByteRankMap;
//!
//! let phi = ByteRankMap::from_ordered_alphabet(b"$ACGT");
//! let index = Index::build(b"ACGTACGT$", phi, 4).unwrap();
//!
//! // locate(i) returns the text offset of the i-th suffix in sorted order.
//! let first = index.locate(0);
//! assert_eq!(first, 8); // the sentinel's own suffix sorts first
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bitvec;
pub mod bucket;
pub mod bwt;
pub mod error;
pub mod index;
pub mod rank;
pub mod saca;
#[cfg(feature = "std")]
pub mod serialize;
pub mod typing;

pub use error::{BuildError, LoadError};
pub use index::Index;
pub use rank::{ByteRankMap, RankMap};
