//! The conversion engine: array -> bitset at the low cutoff, bitset -> inverted array at
//! the high cutoff.
//!
//! Both conversions allocate scratch first and only mutate the container's payload once
//! the scratch allocation has succeeded, so a failure here always leaves the container in
//! its prior valid state.

use crate::bitset;
use crate::error::RoaringError;
use crate::representation::BITSET_WORDS;
use fehler::{throw, throws};

/// Convert the array payload `buffer[1..=LOW_CUTOFF]` to a bitset, in place.
///
/// Caller must have already confirmed the incoming item is not present in the array
/// (the precondition check lives in `RoaringContainer::add`, before the cardinality
/// transition is detected).
#[throws(RoaringError)]
pub fn array_to_bitset(buffer: &mut [u16]) {
    let payload = &buffer[1..];
    let scratch = bitset::from_sorted_array(payload);
    if scratch.len() != BITSET_WORDS {
        throw!(RoaringError::Alloc);
    }
    buffer[1..1 + BITSET_WORDS].copy_from_slice(&scratch);
}

/// Convert the bitset payload `buffer[1..=BITSET_WORDS]` to an inverted array, in place.
#[throws(RoaringError)]
pub fn bitset_to_inverted_array(buffer: &mut [u16]) {
    let payload = &buffer[1..1 + BITSET_WORDS];
    let absences = bitset::unset_positions(payload);
    buffer[1..1 + absences.len()].copy_from_slice(&absences);
}
