//! Memory operations: memset, memcmp, memcpy.
//!
//! Safe Rust implementations operating on byte slices. Each clamps `n` to
//! the slices it is given, so a short slice never panics.

/// Fills the first `n` bytes of `dest` with the byte `value`.
///
/// Equivalent to C `memset(dest, c, n)`.
///
/// Returns the number of bytes actually set.
pub fn memset(dest: &mut [u8], value: u8, n: usize) -> usize {
    let count = n.min(dest.len());
    dest[..count].fill(value);
    count
}

/// Compares the first `n` bytes of `a` and `b`.
///
/// Equivalent to C `memcmp`. Returns zero if the bytes are identical,
/// otherwise the signed difference `a[i] - b[i]` of the first mismatching
/// pair, with both bytes taken as unsigned.
///
/// Only compares `min(n, a.len(), b.len())` bytes.
pub fn memcmp(a: &[u8], b: &[u8], n: usize) -> i32 {
    let count = n.min(a.len()).min(b.len());
    a[..count]
        .iter()
        .zip(&b[..count])
        .find(|(x, y)| x != y)
        .map_or(0, |(&x, &y)| i32::from(x) - i32::from(y))
}

/// Copies `n` bytes from `src` to `dest`.
///
/// Equivalent to C `memcpy`. Only copies `min(n, src.len(), dest.len())` bytes.
///
/// Returns the number of bytes actually copied.
pub fn memcpy(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    let count = n.min(dest.len()).min(src.len());
    dest[..count].copy_from_slice(&src[..count]);
    count
}
