//! Operations on the bitset-encoding payload: a flat 4096-word array, one bit per
//! possible item. Item `x` maps to word `x >> 4`, bit `x & 0xF`.

use crate::representation::BITSET_WORDS;

/// `true` if bit `x` is set in `payload`.
pub fn contains(payload: &[u16], x: u16) -> bool {
    let word = (x >> 4) as usize;
    let bit = 1u16 << (x & 0xF);
    payload[word] & bit != 0
}

/// Set bit `x` in `payload`. Returns `true` if the bit was newly set, `false` if it was
/// already set.
pub fn insert(payload: &mut [u16], x: u16) -> bool {
    let word = (x >> 4) as usize;
    let bit = 1u16 << (x & 0xF);
    if payload[word] & bit != 0 {
        return false;
    }
    payload[word] |= bit;
    true
}

/// Sum of set bits across all `BITSET_WORDS` words.
pub fn popcount(payload: &[u16]) -> u32 {
    payload.iter().map(|w| w.count_ones()).sum()
}

/// Build a bitset from a sorted array of present items, into a freshly zeroed scratch
/// buffer of `BITSET_WORDS` words.
pub fn from_sorted_array(items: &[u16]) -> Vec<u16> {
    let mut bitset = vec![0u16; BITSET_WORDS];
    for &item in items {
        insert(&mut bitset, item);
    }
    bitset
}

/// Scan `payload` in bit order and collect every *unset* position, ascending.
pub fn unset_positions(payload: &[u16]) -> Vec<u16> {
    let mut absences = Vec::new();
    for (i, &word) in payload.iter().enumerate() {
        for bit in 0..16u32 {
            if word & (1 << bit) == 0 {
                absences.push((i as u32 * 16 + bit) as u16);
            }
        }
    }
    absences
}

/// Scan `payload` in bit order and collect every *set* position, ascending. The
/// counterpart to [`unset_positions`], used to canonicalize a bitset result down to an
/// array once its cardinality drops into the array band.
pub fn set_positions(payload: &[u16]) -> Vec<u16> {
    let mut items = Vec::new();
    for (i, &word) in payload.iter().enumerate() {
        for bit in 0..16u32 {
            if word & (1 << bit) != 0 {
                items.push((i as u32 * 16 + bit) as u16);
            }
        }
    }
    items
}

/// Word-wise bitwise NOT over all `BITSET_WORDS` words, in place.
pub fn complement_in_place(payload: &mut [u16]) {
    for word in payload.iter_mut() {
        *word = !*word;
    }
}

/// Word-wise AND of `a` and `b` into `out` (which must already have `BITSET_WORDS`
/// words). Returns the resulting popcount.
pub fn and_into(a: &[u16], b: &[u16], out: &mut [u16]) -> u32 {
    let mut cardinality = 0u32;
    for i in 0..BITSET_WORDS {
        out[i] = a[i] & b[i];
        cardinality += out[i].count_ones();
    }
    cardinality
}
