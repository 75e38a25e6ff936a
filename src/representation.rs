//! The header classifier.
//!
//! A container's physical encoding is entirely determined by the 16-bit cardinality
//! header (and, for the empty sentinel, the word right after it). This module is the
//! single place that turns those raw words into a [`Representation`]; every other
//! module asks the classifier instead of re-deriving the cutoff bands inline.

/// Total number of representable items, 0..=65535.
pub const UNIVERSE_SIZE: u32 = 1 << 16;

/// Boundary at which array switches to bitset.
pub const LOW_CUTOFF: u32 = 1 << 12;

/// Boundary at which bitset switches to inverted array.
pub const HIGH_CUTOFF: u32 = UNIVERSE_SIZE - LOW_CUTOFF;

/// Number of `u16` words used by the bitset payload (4096 words = 65536 bits).
pub const BITSET_WORDS: usize = LOW_CUTOFF as usize;

/// Header value reused to mean "empty", disambiguated by [`EMPTY_MARKER_B`] in slot 1.
pub const EMPTY_MARKER_A: u16 = (HIGH_CUTOFF + 1) as u16;

/// Slot-1 value that, paired with [`EMPTY_MARKER_A`] in the header, means "empty".
///
/// This combination can never arise from a genuine inverted array with 4095 absences:
/// such an array's first (smallest) absence can't be the universe maximum while 4094
/// more ascending absences remain below it.
pub const EMPTY_MARKER_B: u16 = (UNIVERSE_SIZE - 1) as u16;

/// The physical encoding a container is in, derived purely from its header word(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Cardinality 0.
    Empty,
    /// Cardinality 65536 (every possible item present).
    Full,
    /// Sorted array of `n` present items, 1 <= n <= 4096.
    Array(u16),
    /// Bitset of all 65536 possible items.
    Bitset,
    /// Sorted array of `absences` absent items, 1 <= absences <= 4095.
    InvertedArray(u16),
}

impl Representation {
    /// Classify a container from its header word (`slot[0]`) and the word right after it
    /// (`slot[1]`), which only matters to disambiguate the empty sentinel.
    pub fn classify(header: u16, slot1: u16) -> Representation {
        if header == 0 {
            return Representation::Full;
        }
        if header == EMPTY_MARKER_A && slot1 == EMPTY_MARKER_B {
            return Representation::Empty;
        }
        let n = header as u32;
        if n <= LOW_CUTOFF {
            Representation::Array(header)
        } else if n <= HIGH_CUTOFF {
            Representation::Bitset
        } else {
            Representation::InvertedArray((UNIVERSE_SIZE - n) as u16)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_full() {
        assert_eq!(Representation::classify(0, 0), Representation::Full);
    }

    #[test]
    fn classifies_empty() {
        assert_eq!(
            Representation::classify(EMPTY_MARKER_A, EMPTY_MARKER_B),
            Representation::Empty
        );
    }

    #[test]
    fn classifies_array_band_edges() {
        assert_eq!(Representation::classify(1, 0), Representation::Array(1));
        assert_eq!(
            Representation::classify(LOW_CUTOFF as u16, 0),
            Representation::Array(LOW_CUTOFF as u16)
        );
    }

    #[test]
    fn classifies_bitset_band_edges() {
        assert_eq!(
            Representation::classify((LOW_CUTOFF + 1) as u16, 0),
            Representation::Bitset
        );
        assert_eq!(
            Representation::classify(HIGH_CUTOFF as u16, 0),
            Representation::Bitset
        );
    }

    #[test]
    fn classifies_inverted_array_band_edges() {
        assert_eq!(
            Representation::classify((HIGH_CUTOFF + 1) as u16, 0),
            Representation::InvertedArray(LOW_CUTOFF as u16 - 1)
        );
        assert_eq!(
            Representation::classify(65535, 0),
            Representation::InvertedArray(1)
        );
    }

    #[test]
    fn empty_marker_a_alone_is_inverted_array_not_empty() {
        // The (header, slot1) pair matters: EMPTY_MARKER_A with a *different* slot1 is a
        // real inverted array with 4095 absences, not the empty sentinel.
        match Representation::classify(EMPTY_MARKER_A, 0) {
            Representation::InvertedArray(4095) => {}
            other => panic!("expected InvertedArray(4095), got {:?}", other),
        }
    }
}
