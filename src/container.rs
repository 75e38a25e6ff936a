//! [`RoaringContainer`]: the adaptive 16-bit set.

use crate::array;
use crate::bitset;
use crate::convert;
use crate::error::RoaringError;
use crate::inverted;
use crate::representation::{
    Representation, BITSET_WORDS, EMPTY_MARKER_A, EMPTY_MARKER_B, HIGH_CUTOFF, LOW_CUTOFF,
    UNIVERSE_SIZE,
};
use byteorder::{ByteOrder, LittleEndian};
use fehler::{throw, throws};

const DEFAULT_CAPACITY: usize = 8;
const GROWTH_FACTOR: usize = 2;
const MAX_CAPACITY: usize = BITSET_WORDS;

/// An adaptive, in-memory, ordered set of 16-bit unsigned integers.
///
/// Internally the set is one of three encodings (a sorted array, a dense bitset, or a
/// sorted array of absences), chosen automatically from the set's cardinality. See the
/// crate-level docs for the full state machine.
#[derive(Clone)]
pub struct RoaringContainer {
    buffer: Vec<u16>,
}

impl Default for RoaringContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl RoaringContainer {
    /// Create a new, empty container with the default starting capacity.
    pub fn new() -> Self {
        let mut buffer = vec![0u16; 1 + DEFAULT_CAPACITY];
        buffer[0] = EMPTY_MARKER_A;
        buffer[1] = EMPTY_MARKER_B;
        RoaringContainer { buffer }
    }

    /// Build a container from a sequence of items, in any order, equivalent to calling
    /// [`RoaringContainer::add`] once per item. Convenient for tests and the CLI.
    #[throws(RoaringError)]
    pub fn from_items<I: IntoIterator<Item = u16>>(items: I) -> Self {
        let mut set = RoaringContainer::new();
        for item in items {
            set.add(item)?;
        }
        set
    }

    pub(crate) fn representation(&self) -> Representation {
        Representation::classify(self.buffer[0], self.buffer[1])
    }

    /// The number of items currently in the set, 0..=65536.
    pub fn cardinality(&self) -> u32 {
        match self.representation() {
            Representation::Empty => 0,
            Representation::Full => UNIVERSE_SIZE,
            Representation::Array(n) => n as u32,
            Representation::Bitset => self.buffer[0] as u32,
            Representation::InvertedArray(absences) => UNIVERSE_SIZE - absences as u32,
        }
    }

    /// Number of payload words (excluding the header) this cardinality serializes to.
    fn payload_words_for(cardinality: u32) -> usize {
        if cardinality == 0 {
            1
        } else if cardinality >= HIGH_CUTOFF {
            (UNIVERSE_SIZE - cardinality) as usize
        } else if cardinality > LOW_CUTOFF {
            BITSET_WORDS
        } else {
            cardinality as usize
        }
    }

    /// Total serialized length in bytes: `2 + 2*payload_words`.
    pub fn length(&self) -> usize {
        2 + 2 * Self::payload_words_for(self.cardinality())
    }

    /// Reset to the empty set.
    pub fn truncate(&mut self) {
        self.buffer[0] = EMPTY_MARKER_A;
        self.buffer[1] = EMPTY_MARKER_B;
    }

    /// Reset to the full set (every possible item present).
    pub fn fill(&mut self) {
        self.buffer[0] = 0;
    }

    /// `true` if `item` is a member of the set.
    pub fn contains(&self, item: u16) -> bool {
        match self.representation() {
            Representation::Empty => false,
            Representation::Full => true,
            Representation::Array(n) => array::contains(&self.buffer[1..1 + n as usize], item),
            Representation::Bitset => bitset::contains(&self.buffer[1..1 + BITSET_WORDS], item),
            Representation::InvertedArray(absences) => {
                inverted::contains(&self.buffer[1..1 + absences as usize], item)
            }
        }
    }

    #[throws(RoaringError)]
    fn ensure_capacity(&mut self, needed: usize) {
        let capacity = self.buffer.len() - 1;
        if capacity >= needed {
            return;
        }
        let mut new_capacity = capacity.max(1);
        while new_capacity < needed {
            new_capacity = (new_capacity * GROWTH_FACTOR).min(MAX_CAPACITY);
            if new_capacity == capacity {
                // Growth saturated below what's needed: allocator-exhaustion analogue.
                throw!(RoaringError::Alloc);
            }
        }
        self.buffer
            .try_reserve(new_capacity - capacity)
            .map_err(|_| RoaringError::Alloc)?;
        self.buffer.resize(1 + new_capacity, 0);
    }

    /// Insert `item` into the set.
    ///
    /// Returns `true` if `item` was newly inserted, `false` if it was already present
    /// (including when the set is already full); both are success. The only error is
    /// allocator exhaustion, which leaves the set in its prior valid state.
    #[throws(RoaringError)]
    pub fn add(&mut self, item: u16) -> bool {
        match self.representation() {
            Representation::Full => false,
            Representation::Empty => {
                self.ensure_capacity(1)?;
                self.buffer[0] = 1;
                self.buffer[1] = item;
                true
            }
            Representation::Array(n) => self.add_to_array(n as usize, item)?,
            Representation::Bitset => self.add_to_bitset(item)?,
            Representation::InvertedArray(absences) => {
                self.add_to_inverted_array(absences as usize, item)?
            }
        }
    }

    #[throws(RoaringError)]
    fn add_to_array(&mut self, n: usize, item: u16) -> bool {
        if n as u32 == LOW_CUTOFF {
            if array::contains(&self.buffer[1..1 + n], item) {
                return false;
            }
            convert::array_to_bitset(&mut self.buffer)?;
            return self.add_to_bitset(item)?;
        }
        self.ensure_capacity(n + 1)?;
        let inserted = array::insert(&mut self.buffer[1..], n, item);
        if inserted {
            self.buffer[0] += 1;
        }
        inserted
    }

    #[throws(RoaringError)]
    fn add_to_bitset(&mut self, item: u16) -> bool {
        if self.buffer[0] as u32 == HIGH_CUTOFF {
            if bitset::contains(&self.buffer[1..1 + BITSET_WORDS], item) {
                return false;
            }
            convert::bitset_to_inverted_array(&mut self.buffer)?;
            return self.add_to_inverted_array((UNIVERSE_SIZE - HIGH_CUTOFF) as usize, item)?;
        }
        let inserted = bitset::insert(&mut self.buffer[1..1 + BITSET_WORDS], item);
        if inserted {
            self.buffer[0] += 1;
        }
        inserted
    }

    #[throws(RoaringError)]
    fn add_to_inverted_array(&mut self, absences: usize, item: u16) -> bool {
        if absences == 1 {
            // Removing the last absence promotes straight to Full (header 65536 would
            // overflow u16, so the transition target is the Full sentinel itself).
            if self.buffer[1] == item {
                self.buffer[0] = 0;
                return true;
            }
            return false;
        }
        let inserted = inverted::insert(&mut self.buffer[1..], absences, item);
        if inserted {
            self.buffer[0] += 1;
        }
        inserted
    }

    /// The serialized payload words (header excluded), truncated to the logical length
    /// implied by the current cardinality.
    pub(crate) fn payload(&self) -> &[u16] {
        &self.buffer[1..1 + Self::payload_words_for(self.cardinality())]
    }

    #[throws(RoaringError)]
    pub(crate) fn grow_to_capacity(&mut self, capacity: usize) {
        self.ensure_capacity(capacity)?;
    }

    #[throws(RoaringError)]
    pub(crate) fn copy_from(&mut self, other: &RoaringContainer) {
        self.grow_to_capacity(other.buffer.len() - 1)?;
        let len = other.buffer.len();
        self.buffer[..len].copy_from_slice(&other.buffer);
    }

    /// Serialize the container to its little-endian byte form: header word followed by
    /// the payload, exactly `length()` bytes.
    pub fn as_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.length()];
        LittleEndian::write_u16(&mut out[0..2], self.buffer[0]);
        for (i, word) in self.payload().iter().enumerate() {
            LittleEndian::write_u16(&mut out[2 + 2 * i..4 + 2 * i], *word);
        }
        out
    }

    /// Reconstruct a container from bytes previously produced by [`RoaringContainer::as_bytes`].
    ///
    /// Validates that `bytes` is long enough to hold the header-implied payload
    /// (rejecting anything shorter with [`RoaringError::Malformed`] rather than reading
    /// out of bounds), and that an array or inverted-array payload is strictly ascending.
    /// Everything else a malformed buffer could get wrong (duplicate items, a bitset
    /// popcount that disagrees with the header) is still the caller's responsibility per
    /// the container's contract; this is a defensive spot check, not full validation.
    #[throws(RoaringError)]
    pub fn import(bytes: &[u8]) -> Self {
        if bytes.len() < 2 {
            throw!(RoaringError::Malformed(format!(
                "expected at least 2 bytes for the header, got {}",
                bytes.len()
            )));
        }
        let header = LittleEndian::read_u16(&bytes[0..2]);
        let slot1_word = if bytes.len() >= 4 {
            LittleEndian::read_u16(&bytes[2..4])
        } else {
            0
        };
        let representation = Representation::classify(header, slot1_word);
        let cardinality = match representation {
            Representation::Empty => 0,
            Representation::Full => UNIVERSE_SIZE,
            Representation::Array(n) => n as u32,
            Representation::Bitset => header as u32,
            Representation::InvertedArray(absences) => UNIVERSE_SIZE - absences as u32,
        };
        let expected_payload_words = Self::payload_words_for(cardinality);
        let expected_len = 2 + 2 * expected_payload_words;
        if bytes.len() != expected_len {
            throw!(RoaringError::Malformed(format!(
                "header implies {} bytes but input has {}",
                expected_len,
                bytes.len()
            )));
        }

        let capacity = expected_payload_words.max(1).min(MAX_CAPACITY);
        let mut buffer = vec![0u16; 1 + capacity];
        buffer[0] = header;
        for i in 0..expected_payload_words {
            buffer[1 + i] = LittleEndian::read_u16(&bytes[2 + 2 * i..4 + 2 * i]);
        }
        if matches!(
            representation,
            Representation::Array(_) | Representation::InvertedArray(_)
        ) && !array::is_strictly_ascending(&buffer[1..1 + expected_payload_words])
        {
            throw!(RoaringError::Malformed(
                "array payload is not strictly ascending".to_string(),
            ));
        }
        RoaringContainer { buffer }
    }

    /// Complement `self` into `dst`. `dst` must not alias `self`.
    #[throws(RoaringError)]
    pub fn invert(&self, dst: &mut RoaringContainer) {
        if std::ptr::eq(self, dst) {
            throw!(RoaringError::AliasedDestination);
        }
        match self.representation() {
            Representation::Empty => dst.fill(),
            Representation::Full => dst.truncate(),
            repr => crate::ops::invert(self, repr, dst)?,
        }
    }

    /// Intersect `a` and `b` into `dst`. `dst` must not alias either source.
    #[throws(RoaringError)]
    pub fn intersection(a: &RoaringContainer, b: &RoaringContainer, dst: &mut RoaringContainer) {
        if std::ptr::eq(a, dst) || std::ptr::eq(b, dst) {
            throw!(RoaringError::AliasedDestination);
        }
        crate::ops::intersection(a, b, dst)?;
    }

    pub(crate) fn buffer(&self) -> &[u16] {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut Vec<u16> {
        &mut self.buffer
    }
}

impl PartialEq for RoaringContainer {
    fn eq(&self, other: &Self) -> bool {
        let cardinality = self.cardinality();
        if cardinality != other.cardinality() {
            return false;
        }
        self.payload() == other.payload()
    }
}

impl Eq for RoaringContainer {}

impl std::fmt::Debug for RoaringContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoaringContainer")
            .field("cardinality", &self.cardinality())
            .field("representation", &self.representation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let set = RoaringContainer::new();
        assert_eq!(set.cardinality(), 0);
        assert_eq!(set.length(), 4);
    }

    #[test]
    fn scenario_1_ascending_small_array() {
        let mut set = RoaringContainer::new();
        for item in [1000u16, 2000, 3000] {
            assert!(set.add(item).unwrap());
        }
        assert_eq!(set.cardinality(), 3);
        assert_eq!(set.length(), 8);
        let bytes = set.as_bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(LittleEndian::read_u16(&bytes[0..2]), 3);
        assert_eq!(LittleEndian::read_u16(&bytes[2..4]), 1000);
        assert_eq!(LittleEndian::read_u16(&bytes[4..6]), 2000);
        assert_eq!(LittleEndian::read_u16(&bytes[6..8]), 3000);
    }

    #[test]
    fn scenario_2_fill_via_ascending_then_descending() {
        let mut set = RoaringContainer::new();
        for item in 0u32..=31999 {
            assert!(set.add(item as u16).unwrap());
        }
        for item in (32000u32..=65535).rev() {
            assert!(set.add(item as u16).unwrap());
        }
        assert_eq!(set.cardinality(), 65536);
        assert_eq!(set.length(), 2);
    }

    #[test]
    fn scenario_3_even_values_are_bitset() {
        let mut set = RoaringContainer::new();
        for item in (0u32..65536).step_by(2) {
            assert!(set.add(item as u16).unwrap());
        }
        assert_eq!(set.cardinality(), 32768);
        assert!(matches!(set.representation(), Representation::Bitset));
        assert!(set.buffer[1..].iter().all(|&w| w == 0x5555));
        assert_eq!(set.length(), 2 + 8192);
    }

    #[test]
    fn scenario_4_inverted_array_band() {
        let mut set = RoaringContainer::new();
        for item in 0u32..=61440 {
            assert!(set.add(item as u16).unwrap());
        }
        match set.representation() {
            Representation::InvertedArray(absences) => assert_eq!(absences, 4095),
            other => panic!("expected InvertedArray, got {:?}", other),
        }
        let payload = set.payload();
        assert_eq!(payload.len(), 4095);
        for (i, &v) in payload.iter().enumerate() {
            assert_eq!(v as u32, 61441 + i as u32);
        }
        assert_eq!(set.length(), 2 + 8190);
    }

    #[test]
    fn scenario_5_intersection() {
        let mut a = RoaringContainer::new();
        for item in (0u16..100).step_by(2) {
            a.add(item).unwrap();
        }
        let mut b = RoaringContainer::new();
        for item in 0u16..10 {
            b.add(item).unwrap();
        }
        let mut result = RoaringContainer::new();
        RoaringContainer::intersection(&a, &b, &mut result).unwrap();
        assert_eq!(result.cardinality(), 5);
        for item in [0u16, 2, 4, 6, 8] {
            assert!(result.contains(item));
        }
    }

    #[test]
    fn scenario_6_invert_involution() {
        let mut s = RoaringContainer::new();
        for item in 4u32..65536 {
            s.add(item as u16).unwrap();
        }
        let mut inverted = RoaringContainer::new();
        s.invert(&mut inverted).unwrap();
        assert_eq!(inverted.cardinality(), 4);
        for item in 0u16..4 {
            assert!(inverted.contains(item));
        }
        let mut inverted_twice = RoaringContainer::new();
        inverted.invert(&mut inverted_twice).unwrap();
        assert_eq!(s, inverted_twice);
    }

    #[test]
    fn add_is_idempotent() {
        let mut set = RoaringContainer::new();
        assert!(set.add(42).unwrap());
        assert!(!set.add(42).unwrap());
        assert_eq!(set.cardinality(), 1);
    }

    #[test]
    fn contains_tracks_add() {
        let mut set = RoaringContainer::new();
        assert!(!set.contains(7));
        set.add(7).unwrap();
        assert!(set.contains(7));
    }

    #[test]
    fn full_add_is_noop() {
        let mut set = RoaringContainer::new();
        set.fill();
        assert!(!set.add(5).unwrap());
        assert_eq!(set.cardinality(), UNIVERSE_SIZE);
    }

    #[test]
    fn roundtrip_through_bytes() {
        let mut set = RoaringContainer::new();
        for item in [5u16, 10, 15, 9999] {
            set.add(item).unwrap();
        }
        let bytes = set.as_bytes();
        assert_eq!(bytes.len(), set.length());
        let restored = RoaringContainer::import(&bytes).unwrap();
        assert_eq!(set, restored);
    }

    #[test]
    fn roundtrip_empty_and_full() {
        let empty = RoaringContainer::new();
        let restored = RoaringContainer::import(&empty.as_bytes()).unwrap();
        assert_eq!(empty, restored);

        let mut full = RoaringContainer::new();
        full.fill();
        let restored = RoaringContainer::import(&full.as_bytes()).unwrap();
        assert_eq!(full, restored);
    }

    #[test]
    fn import_rejects_truncated_bytes() {
        let mut set = RoaringContainer::new();
        set.add(1).unwrap();
        set.add(2).unwrap();
        let mut bytes = set.as_bytes();
        bytes.pop();
        assert!(matches!(
            RoaringContainer::import(&bytes),
            Err(RoaringError::Malformed(_))
        ));
    }

    #[test]
    fn import_rejects_out_of_order_array_payload() {
        let mut set = RoaringContainer::new();
        set.add(1).unwrap();
        set.add(2).unwrap();
        let mut bytes = set.as_bytes();
        // Header (cardinality 2) and length both stay valid; only the ordering breaks.
        let a = LittleEndian::read_u16(&bytes[2..4]);
        let b = LittleEndian::read_u16(&bytes[4..6]);
        LittleEndian::write_u16(&mut bytes[2..4], b);
        LittleEndian::write_u16(&mut bytes[4..6], a);
        assert!(matches!(
            RoaringContainer::import(&bytes),
            Err(RoaringError::Malformed(_))
        ));
    }

    // `RoaringContainer::intersection(&x, &y, &mut x)` and `x.invert(&mut x)` are both
    // rejected by the borrow checker before they ever reach `AliasedDestination`, the
    // ownership model makes aliasing a compile error, not just a runtime one. The
    // `std::ptr::eq` check in `invert`/`intersection` is a defensive backstop for any
    // future caller shape (e.g. behind a trait object) that might weaken that guarantee.
}
