//! Operations on the inverted-array-encoding payload: a sorted, duplicate-free sequence
//! of *absent* items. "Inserting x into S" here means removing x from the absence list.

/// `true` if `x` is present in the set, i.e. `x` does *not* appear in the sorted
/// absence list `absences`.
pub fn contains(absences: &[u16], x: u16) -> bool {
    absences.binary_search(&x).is_err()
}

/// Remove `x` from the sorted absence list living in `payload[..len]`, meaning "add x
/// to the set".
///
/// Shifts the tail left in place over `x`'s slot; the freed slot past the new logical
/// length is left with stale data, which is fine since every reader bounds itself to
/// the logical length derived from the header.
///
/// Returns `true` if `x` was newly added (i.e. it was found and removed from the
/// absence list), `false` if it was already present (not found in the absence list).
pub fn insert(payload: &mut [u16], len: usize, x: u16) -> bool {
    match payload[..len].binary_search(&x) {
        Ok(pos) => {
            payload.copy_within(pos + 1..len, pos);
            true
        }
        Err(_) => false,
    }
}
