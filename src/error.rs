//! Error taxonomy shared by construction, cursors and views.

/// Failures reported by the map, its builder and its cursors.
///
/// Every condition is local and deterministic. Construction either succeeds
/// completely or reports one of the invalid-argument variants before any
/// table is allocated.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("length mismatch: keys={keys}, values={values}")]
    LengthMismatch { keys: usize, values: usize },
    #[error("load factor must lie strictly between 0 and 1, got {0}")]
    LoadFactor(f32),
    #[error("range {offset}..{offset}+{length} is out of bounds for arrays of length {len}")]
    RangeOutOfBounds {
        offset: usize,
        length: usize,
        len: usize,
    },
    #[error("table for {expected} entries exceeds the maximum capacity")]
    CapacityOverflow { expected: usize },
    #[error("map is empty")]
    Empty,
    #[error("key not found")]
    NotFound,
    #[error("cursor exhausted")]
    Exhausted,
}

impl Error {
    /// True for the variants caused by malformed construction input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::LengthMismatch { .. }
                | Error::LoadFactor(_)
                | Error::RangeOutOfBounds { .. }
                | Error::CapacityOverflow { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, Error>;
