//! String operations: strlen, strnlen, strcpy, strncpy, strncmp, istrncmp,
//! strcpy_strip, strnlen_terminator.
//!
//! These are safe Rust implementations operating on byte slices that represent
//! NUL-terminated C strings. A NUL byte (`0x00`) marks the logical end of the
//! string; the end of the slice counts as an implicit NUL.

use crate::ctype::to_lower;

#[inline]
fn byte_at(s: &[u8], i: usize) -> u8 {
    s.get(i).copied().unwrap_or(0)
}

/// Returns the length of a NUL-terminated byte string (not counting the NUL).
///
/// Equivalent to C `strlen`. If no NUL is found, returns the full slice length.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// Returns the length of `s`, scanning at most `max` bytes.
pub fn strnlen(s: &[u8], max: usize) -> usize {
    strlen(&s[..max.min(s.len())])
}

/// Copies a NUL-terminated string from `src` into `dest`.
///
/// Equivalent to C `strcpy`. Returns the number of bytes written (including the NUL).
///
/// # Panics
///
/// Panics if `dest` is too small to hold the source string plus NUL.
pub fn strcpy(dest: &mut [u8], src: &[u8]) -> usize {
    let src_len = strlen(src);
    assert!(
        dest.len() > src_len,
        "strcpy: destination buffer too small ({} bytes for {} byte string + NUL)",
        dest.len(),
        src_len
    );
    dest[..src_len].copy_from_slice(&src[..src_len]);
    dest[src_len] = 0;
    src_len + 1
}

/// Copies at most `n - 1` bytes from `src` into `dest` and always NUL-terminates.
///
/// This is the runtime's `strncpy`, which differs from ISO C: it never pads
/// with NULs and it terminates the copy even when `src` is longer. `n == 0`
/// still writes the terminator. Returns the number of bytes copied before the NUL.
///
/// Does nothing and returns 0 if `dest` is empty.
pub fn strncpy(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    if dest.is_empty() {
        return 0;
    }
    let limit = n.saturating_sub(1).min(dest.len() - 1);
    let copy_len = strlen(src).min(limit);
    dest[..copy_len].copy_from_slice(&src[..copy_len]);
    dest[copy_len] = 0;
    copy_len
}

/// Compares at most `n` bytes of two NUL-terminated byte strings.
///
/// Returns the difference of the first mismatching pair (as unsigned bytes),
/// or zero if the strings are equal up to `n` bytes or a shared NUL.
pub fn strncmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let a = byte_at(s1, i);
        let b = byte_at(s2, i);

        if a != b {
            return i32::from(a) - i32::from(b);
        }
        if a == 0 {
            return 0;
        }
    }
    0
}

/// Case-insensitive [`strncmp`].
///
/// Bytes are compared after ASCII lowercasing, but a mismatch reports the
/// difference of the original bytes.
pub fn istrncmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let a = byte_at(s1, i);
        let b = byte_at(s2, i);

        if to_lower(a) != to_lower(b) {
            return i32::from(a) - i32::from(b);
        }
        if a == 0 {
            return 0;
        }
    }
    0
}

/// Copies `src` into `dest` up to its NUL or its first space, then terminates.
///
/// Returns the number of bytes copied before the NUL.
///
/// # Panics
///
/// Panics if `dest` cannot hold the copied prefix plus NUL.
pub fn strcpy_strip(dest: &mut [u8], src: &[u8]) -> usize {
    let len = src[..strlen(src)]
        .iter()
        .position(|&b| b == b' ')
        .unwrap_or_else(|| strlen(src));
    assert!(
        dest.len() > len,
        "strcpy_strip: destination buffer too small ({} bytes for {} byte string + NUL)",
        dest.len(),
        len
    );
    dest[..len].copy_from_slice(&src[..len]);
    dest[len] = 0;
    len
}

/// Index of the first NUL or `terminator` byte in the first `max` bytes, else `max`.
pub fn strnlen_terminator(s: &[u8], max: usize, terminator: u8) -> usize {
    (0..max)
        .find(|&i| {
            let b = byte_at(s, i);
            b == 0 || b == terminator
        })
        .unwrap_or(max)
}
