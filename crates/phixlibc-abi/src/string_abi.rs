//! ABI layer for `<string.h>` and the byte primitives.
//!
//! Most functions build slices exactly as long as the C contract allows and
//! delegate to `phixlibc_core::string`. `strtok` keeps the process-wide scan
//! cursor C programs expect; `strtok_r` keeps it in the caller's save pointer.

use core::ffi::{c_char, c_int, c_void};
use core::ptr::{self, NonNull};

use phixlibc_core::string;
use spin::Mutex;

use crate::util::{c_str, c_str_bounded, c_str_mut};

// ---------------------------------------------------------------------------
// Byte primitives
// ---------------------------------------------------------------------------
//
// `memset`, `memcpy`, `memcmp` and `strlen` are written as plain loops here
// instead of delegating: slice fills, copies and `CStr` lower to calls of
// these very symbols once they are exported.

/// Fill `size` bytes at `p` with the low byte of `c`.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn memset(p: *mut c_void, c: c_int, size: usize) -> *mut c_void {
    if size == 0 {
        return p;
    }
    if p.is_null() {
        return ptr::null_mut();
    }
    let dest = p.cast::<u8>();
    for i in 0..size {
        // SAFETY: caller guarantees `p` is valid for `size` bytes.
        unsafe { *dest.add(i) = c as u8 };
    }
    p
}

/// Compare `count` bytes. Returns the difference of the first mismatching
/// pair as unsigned bytes, or 0.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn memcmp(p1: *const c_void, p2: *const c_void, count: usize) -> c_int {
    if count == 0 || p1 == p2 {
        return 0;
    }
    let (a, b) = (p1.cast::<u8>(), p2.cast::<u8>());
    for i in 0..count {
        // SAFETY: caller guarantees both regions are readable for `count` bytes.
        let (x, y) = unsafe { (*a.add(i), *b.add(i)) };
        if x != y {
            return c_int::from(x) - c_int::from(y);
        }
    }
    0
}

/// Copy `size` bytes from `src` to the non-overlapping `dst`.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn memcpy(dst: *mut c_void, src: *const c_void, size: usize) -> *mut c_void {
    if size == 0 {
        return dst;
    }
    if dst.is_null() || src.is_null() {
        return ptr::null_mut();
    }
    let (d, s) = (dst.cast::<u8>(), src.cast::<u8>());
    for i in 0..size {
        // SAFETY: caller guarantees validity for `size` bytes and no overlap.
        unsafe { *d.add(i) = *s.add(i) };
    }
    dst
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn strlen(str: *const c_char) -> usize {
    let mut len = 0;
    // SAFETY: caller guarantees `str` is NUL-terminated.
    while unsafe { *str.add(len) } != 0 {
        len += 1;
    }
    len
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn strnlen(str: *const c_char, max: usize) -> usize {
    unsafe { c_str_bounded(str, max) }.len()
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn strcpy(dest: *mut c_char, src: *const c_char) -> *mut c_char {
    let src = unsafe { c_str(src) };
    // SAFETY: caller guarantees `dest` holds `strlen(src) + 1` bytes.
    let out = unsafe { core::slice::from_raw_parts_mut(dest.cast::<u8>(), src.len() + 1) };
    string::strcpy(out, src);
    dest
}

/// Copy at most `n - 1` bytes of `src` and always terminate. Never pads.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn strncpy(dest: *mut c_char, src: *const c_char, n: usize) -> *mut c_char {
    let src = unsafe { c_str_bounded(src, n.saturating_sub(1)) };
    // SAFETY: the copy plus its NUL never exceeds `max(n, 1)` bytes.
    let out = unsafe { core::slice::from_raw_parts_mut(dest.cast::<u8>(), src.len() + 1) };
    string::strncpy(out, src, n);
    dest
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn strncmp(s1: *const c_char, s2: *const c_char, n: usize) -> c_int {
    let (a, b) = unsafe { (c_str_bounded(s1, n), c_str_bounded(s2, n)) };
    string::strncmp(a, b, n)
}

/// Case-insensitive `strncmp`. A mismatch reports the difference of the
/// original (unfolded) bytes.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn istrncmp(s1: *const c_char, s2: *const c_char, n: usize) -> c_int {
    let (a, b) = unsafe { (c_str_bounded(s1, n), c_str_bounded(s2, n)) };
    string::istrncmp(a, b, n)
}

/// Copy `src` up to its first space and terminate.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn strcpy_strip(dest: *mut c_char, src: *const c_char) -> *mut c_char {
    let src = unsafe { c_str(src) };
    let len = src.iter().position(|&b| b == b' ').unwrap_or(src.len());
    // SAFETY: caller guarantees `dest` holds the stripped copy plus NUL.
    let out = unsafe { core::slice::from_raw_parts_mut(dest.cast::<u8>(), len + 1) };
    string::strcpy_strip(out, src);
    dest
}

/// Index of the first NUL or `terminator` within `max` bytes, else `max`.
/// A non-positive `max` is returned unchanged.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn strnlen_terminator(
    str: *const c_char,
    max: c_int,
    terminator: c_char,
) -> c_int {
    let Ok(limit) = usize::try_from(max) else {
        return max;
    };
    let s = unsafe { c_str_bounded(str, limit) };
    // The result is bounded by `max`.
    string::strnlen_terminator(s, limit, terminator as u8) as c_int
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Position of the active `strtok` scan.
struct ScanCursor(Option<NonNull<c_char>>);

// SAFETY: the cursor is only dereferenced inside `strtok` while the lock is held.
unsafe impl Send for ScanCursor {}

static STRTOK_CURSOR: Mutex<ScanCursor> = Mutex::new(ScanCursor(None));

/// One tokenizer step at `at`. Returns the token and the cursor for the next
/// step, or `None` once the scan is exhausted.
///
/// # Safety
///
/// `at` must point into a writable NUL-terminated string.
unsafe fn step(
    at: NonNull<c_char>,
    delimiters: *const c_char,
) -> Option<(*mut c_char, NonNull<c_char>)> {
    let delims: &[u8] = if delimiters.is_null() {
        &[]
    } else {
        unsafe { c_str(delimiters) }
    };
    let base = at.as_ptr();
    let buf = unsafe { c_str_mut(base) };
    let (start, _, next) = string::strtok_r(buf, delims, 0)?;
    // SAFETY: `start` and `next` are indices inside `buf`.
    unsafe { Some((base.add(start), NonNull::new_unchecked(base.add(next)))) }
}

/// Split a string into tokens using one process-wide cursor.
///
/// A non-null `str` starts a new scan and discards any scan in progress. A
/// null `str` continues the current scan, or returns null if there is none.
/// Each token's ending delimiter is overwritten with a NUL.
///
/// Interleaving two scans corrupts both; use `strtok_r` for that.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn strtok(str: *mut c_char, delimiters: *const c_char) -> *mut c_char {
    let mut cursor = STRTOK_CURSOR.lock();
    if let Some(start) = NonNull::new(str) {
        cursor.0 = Some(start);
    }
    let Some(at) = cursor.0 else {
        return ptr::null_mut();
    };
    match unsafe { step(at, delimiters) } {
        Some((token, next)) => {
            cursor.0 = Some(next);
            token
        }
        None => {
            cursor.0 = None;
            ptr::null_mut()
        }
    }
}

/// Reentrant `strtok`. The scan position lives in `*save_ptr`, which is set
/// to null when the scan is exhausted.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn strtok_r(
    str: *mut c_char,
    delimiters: *const c_char,
    save_ptr: *mut *mut c_char,
) -> *mut c_char {
    if save_ptr.is_null() {
        return ptr::null_mut();
    }
    let resume = if str.is_null() { unsafe { *save_ptr } } else { str };
    let Some(at) = NonNull::new(resume) else {
        return ptr::null_mut();
    };
    match unsafe { step(at, delimiters) } {
        Some((token, next)) => {
            unsafe { *save_ptr = next.as_ptr() };
            token
        }
        None => {
            unsafe { *save_ptr = ptr::null_mut() };
            ptr::null_mut()
        }
    }
}
