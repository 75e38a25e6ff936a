//! The binary set operations: intersection and (by way of a shared finalizer) the
//! canonicalization step `invert` also leans on conceptually.
//!
//! Array∧array is fast-pathed with a two-pointer merge, since it never needs a bitset
//! scratch buffer. Every other combination, including bitset∧bitset, goes through a
//! shared bitset-AND route: both operands are materialized into (or, for an existing
//! bitset operand, borrowed as) a flat bitset, ANDed word-wise, and the result is
//! re-canonicalized into whichever encoding its cardinality now calls for.

use crate::array;
use crate::bitset;
use crate::container::RoaringContainer;
use crate::error::RoaringError;
use crate::representation::{Representation, BITSET_WORDS, HIGH_CUTOFF, LOW_CUTOFF, UNIVERSE_SIZE};
use fehler::throws;

/// Intersect `a` and `b` into `dst`. Callers (see [`RoaringContainer::intersection`])
/// have already ruled out `dst` aliasing either source.
#[throws(RoaringError)]
pub(crate) fn intersection(a: &RoaringContainer, b: &RoaringContainer, dst: &mut RoaringContainer) {
    let repr_a = a.representation();
    let repr_b = b.representation();

    if matches!(repr_a, Representation::Empty) || matches!(repr_b, Representation::Empty) {
        dst.truncate();
        return;
    }
    if matches!(repr_a, Representation::Full) {
        return dst.copy_from(b)?;
    }
    if matches!(repr_b, Representation::Full) {
        return dst.copy_from(a)?;
    }

    if let (Representation::Array(na), Representation::Array(nb)) = (repr_a, repr_b) {
        return intersect_array_array(a, na as usize, b, nb as usize, dst)?;
    }

    intersect_via_bitset(a, repr_a, b, repr_b, dst)?;
}

#[throws(RoaringError)]
fn intersect_array_array(
    a: &RoaringContainer,
    na: usize,
    b: &RoaringContainer,
    nb: usize,
    dst: &mut RoaringContainer,
) {
    let mut out = Vec::with_capacity(na.min(nb));
    let written = array::intersect_sorted(
        &a.buffer()[1..1 + na],
        &b.buffer()[1..1 + nb],
        &mut out,
    );
    if written == 0 {
        dst.truncate();
        return;
    }
    dst.grow_to_capacity(written)?;
    let buffer = dst.buffer_mut();
    buffer[0] = written as u16;
    buffer[1..1 + written].copy_from_slice(&out);
}

/// Materialize `container`'s logical contents as a standalone `BITSET_WORDS`-word bitset,
/// regardless of its actual encoding. Used as scratch, never written back in place.
fn as_bitset(container: &RoaringContainer, repr: Representation) -> Vec<u16> {
    match repr {
        Representation::Bitset => container.buffer()[1..1 + BITSET_WORDS].to_vec(),
        Representation::Array(n) => bitset::from_sorted_array(&container.buffer()[1..1 + n as usize]),
        Representation::InvertedArray(absences) => {
            let mut bits = vec![0xFFFFu16; BITSET_WORDS];
            for &absent in &container.buffer()[1..1 + absences as usize] {
                let word = (absent >> 4) as usize;
                bits[word] &= !(1u16 << (absent & 0xF));
            }
            bits
        }
        Representation::Empty | Representation::Full => {
            unreachable!("empty/full are short-circuited before reaching as_bitset")
        }
    }
}

/// Complement `src` (already known not to be `Empty`/`Full`, which `RoaringContainer::invert`
/// handles directly) into `dst`.
///
/// Always routes through a full bitset materialization rather than reusing `src`'s
/// payload in place: the array and inverted-array encodings share the same physical
/// "sorted list of u16" layout, so flipping cardinality alone would work for most
/// complements, but it breaks exactly at the Array/Bitset seam: an array at its
/// 4096-item ceiling complements to cardinality 61440, which belongs in the bitset band,
/// not the array band its payload is still shaped for. Going through a bitset scratch
/// buffer sidesteps that boundary case entirely.
#[throws(RoaringError)]
pub(crate) fn invert(src: &RoaringContainer, repr: Representation, dst: &mut RoaringContainer) {
    let mut bits = as_bitset(src, repr);
    bitset::complement_in_place(&mut bits);
    let cardinality = UNIVERSE_SIZE - src.cardinality();
    canonicalize_bitset_result(dst, &bits, cardinality)?;
}

#[throws(RoaringError)]
fn intersect_via_bitset(
    a: &RoaringContainer,
    repr_a: Representation,
    b: &RoaringContainer,
    repr_b: Representation,
    dst: &mut RoaringContainer,
) {
    let bitset_a = as_bitset(a, repr_a);
    let bitset_b = as_bitset(b, repr_b);
    let mut result = vec![0u16; BITSET_WORDS];
    let cardinality = bitset::and_into(&bitset_a, &bitset_b, &mut result);
    canonicalize_bitset_result(dst, &result, cardinality)?;
}

/// Write a freshly computed `BITSET_WORDS`-word result into `dst`, choosing whichever of
/// the three encodings its cardinality belongs in.
#[throws(RoaringError)]
fn canonicalize_bitset_result(dst: &mut RoaringContainer, result: &[u16], cardinality: u32) {
    if cardinality == 0 {
        dst.truncate();
        return;
    }
    if cardinality == UNIVERSE_SIZE {
        dst.fill();
        return;
    }
    if cardinality <= LOW_CUTOFF {
        let items = bitset::set_positions(result);
        dst.grow_to_capacity(items.len())?;
        let buffer = dst.buffer_mut();
        buffer[0] = cardinality as u16;
        buffer[1..1 + items.len()].copy_from_slice(&items);
        return;
    }
    if cardinality > HIGH_CUTOFF {
        let absences = bitset::unset_positions(result);
        dst.grow_to_capacity(absences.len())?;
        let buffer = dst.buffer_mut();
        buffer[0] = cardinality as u16;
        buffer[1..1 + absences.len()].copy_from_slice(&absences);
        return;
    }
    dst.grow_to_capacity(BITSET_WORDS)?;
    let buffer = dst.buffer_mut();
    buffer[0] = cardinality as u16;
    buffer[1..1 + BITSET_WORDS].copy_from_slice(result);
}
