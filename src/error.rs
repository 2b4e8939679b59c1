//! Closed error taxonomy for construction and (de)serialization.
//!
//! Split into `BuildError` and `LoadError` rather than one enum: a caller
//! matching on `build()` should never need to handle `CorruptIndex`, and a
//! caller matching on `load()` should never need to handle `InvalidSentinel`.

use core::fmt;

/// Failure raised by [`crate::index::Index::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// `sample_rate` was zero or not a power of two.
    InvalidSampleRate,
    /// The sequence's terminal sentinel was missing, duplicated elsewhere in
    /// the sequence, or did not map to rank 0 under the supplied rank map.
    InvalidSentinel,
    /// `sequence.len() < 2`.
    SequenceTooShort,
    /// The rank map has no entry for some symbol present in the sequence.
    UnknownSymbol,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            BuildError::InvalidSampleRate => "sample rate must be a positive power of two",
            BuildError::InvalidSentinel => {
                "sequence must end with a unique sentinel mapped to rank 0"
            }
            BuildError::SequenceTooShort => "sequence must contain at least two symbols",
            BuildError::UnknownSymbol => "sequence contains a symbol outside the rank map",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BuildError {}

/// Failure raised by [`crate::index::Index::load`].
#[derive(Debug)]
pub enum LoadError {
    /// Magic, version, recorded lengths, or the invariants of the data
    /// model (e.g. monotonicity of the locate table) did not check out.
    CorruptIndex,
    /// The backing reader/writer failed.
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::CorruptIndex => f.write_str("index failed invariant checks on load"),
            #[cfg(feature = "std")]
            LoadError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::CorruptIndex => None,
            LoadError::Io(e) => Some(e),
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}
