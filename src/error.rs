//! Error types returned by fallible [`crate::RoaringContainer`] operations.

use thiserror::Error;

/// Everything that can go wrong while building, mutating, or combining a
/// [`crate::RoaringContainer`].
///
/// The only *runtime* failure a container can hit is allocator exhaustion; the other
/// variants guard API boundaries against malformed import bytes and aliased operation
/// destinations rather than leaving either as undefined behavior.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoaringError {
    /// Growing the backing buffer, allocating conversion scratch space, or expanding an
    /// intersection destination failed.
    #[error("allocation failed")]
    Alloc,

    /// `import` was handed a byte slice whose length is inconsistent with what its own
    /// header word implies.
    #[error("malformed container bytes: {0}")]
    Malformed(String),

    /// `intersection` or `invert` was asked to write into a destination that is also one
    /// of the sources.
    #[error("destination aliases a source container")]
    AliasedDestination,
}
