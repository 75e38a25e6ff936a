#![forbid(unsafe_code)]

//! `roaring16`: an adaptive 16-bit ordered integer set.
//!
//! A [`RoaringContainer`] holds a subset of `0..=65535` in whichever of three physical
//! encodings suits its current cardinality best: a sorted array of present items, a
//! dense bitset, or (once nearly full) a sorted array of the items that are *absent*.
//! The container switches encodings on its own as items are added; callers only ever
//! see the logical set.
//!
//! This is the single-container building block a full Roaring Bitmap shards a wider
//! integer universe into by high 16 bits. Building that sharding layer is out of scope
//! here, see the crate's design notes for what this crate does and doesn't cover.

pub mod array;
pub mod bitset;
mod container;
mod convert;
pub mod error;
mod inverted;
mod ops;
pub mod representation;

pub use container::RoaringContainer;
pub use error::RoaringError;

/// Re-exports the names most callers need.
pub mod prelude {
    pub use crate::container::RoaringContainer;
    pub use crate::error::RoaringError;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    /// End-to-end smoke test exercising all three encodings, serialization, and both
    /// set operations in one pass.
    #[test]
    fn lifecycle_across_every_encoding() {
        let mut set = RoaringContainer::new();
        assert_eq!(set.cardinality(), 0);

        for item in [10u16, 20, 30] {
            assert!(set.add(item).unwrap());
        }
        assert_eq!(set.cardinality(), 3);

        // 0..4096 subsumes {10, 20, 30}, so cardinality becomes exactly 4096, still an
        // array at its upper edge.
        for item in 0u32..4096 {
            set.add(item as u16).unwrap();
        }
        assert_eq!(set.cardinality(), 4096);

        // One more item tips it into the bitset encoding.
        for item in 4096u32..61441 {
            set.add(item as u16).unwrap();
        }
        assert_eq!(set.cardinality(), 61441);

        let bytes = set.as_bytes();
        let restored = RoaringContainer::import(&bytes).unwrap();
        assert_eq!(set, restored);

        let mut complement = RoaringContainer::new();
        set.invert(&mut complement).unwrap();
        assert_eq!(complement.cardinality(), 65536 - set.cardinality());

        let mut back = RoaringContainer::new();
        complement.invert(&mut back).unwrap();
        assert_eq!(set, back);

        let probe = RoaringContainer::from_items([20u16, 500, 61440]).unwrap();
        let mut overlap = RoaringContainer::new();
        RoaringContainer::intersection(&set, &probe, &mut overlap).unwrap();
        assert!(overlap.contains(20));
        assert!(overlap.contains(61440));
    }

    #[test]
    fn malformed_import_is_an_error() {
        let err = RoaringContainer::import(&[]).unwrap_err();
        assert!(matches!(err, RoaringError::Malformed(_)));
    }
}
