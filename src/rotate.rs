//! In-place cyclic rotation of a contiguous range.
//!
//! Rotation is built from three reversals, so it only ever swaps elements:
//! nothing is cloned and nothing can panic for in-range arguments.

/// Rotates `range` so that the element at `mid` becomes the first one.
///
/// # Panics
///
/// Panics if `mid > range.len()`.
pub fn rotate_left<T>(range: &mut [T], mid: usize) {
    assert!(
        mid <= range.len(),
        "rotation point {} out of bounds for range of length {}",
        mid,
        range.len()
    );
    if mid == 0 || mid == range.len() {
        return;
    }

    range[..mid].reverse();
    range[mid..].reverse();
    range.reverse();
}

/// Rotates `range` so that the last `k` elements move to the front.
///
/// # Panics
///
/// Panics if `k > range.len()`.
pub fn rotate_right<T>(range: &mut [T], k: usize) {
    assert!(
        k <= range.len(),
        "rotation amount {} out of bounds for range of length {}",
        k,
        range.len()
    );
    let mid = range.len() - k;
    rotate_left(range, mid);
}
