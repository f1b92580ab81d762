//! Raw C string helpers shared by the ABI modules.

use core::ffi::{CStr, c_char};

/// Borrow the bytes of a NUL-terminated string, excluding the NUL.
///
/// # Safety
///
/// `ptr` must be non-null and point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn c_str<'a>(ptr: *const c_char) -> &'a [u8] {
    unsafe { CStr::from_ptr(ptr) }.to_bytes()
}

/// Mutably borrow a NUL-terminated string, including the NUL.
///
/// # Safety
///
/// As for [`c_str`], and the string must be writable and unaliased for `'a`.
pub(crate) unsafe fn c_str_mut<'a>(ptr: *mut c_char) -> &'a mut [u8] {
    let len = unsafe { CStr::from_ptr(ptr) }.count_bytes();
    unsafe { core::slice::from_raw_parts_mut(ptr.cast::<u8>(), len + 1) }
}

/// Length of the string at `ptr`, scanning at most `max` bytes.
///
/// # Safety
///
/// `ptr` must be readable up to its NUL or `max` bytes, whichever comes first.
pub(crate) unsafe fn c_strnlen(ptr: *const c_char, max: usize) -> usize {
    let mut len = 0;
    while len < max && unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    len
}

/// Borrow at most `max` bytes of the string at `ptr`, stopping at its NUL.
///
/// # Safety
///
/// As for [`c_strnlen`], with the bytes outliving `'a`.
pub(crate) unsafe fn c_str_bounded<'a>(ptr: *const c_char, max: usize) -> &'a [u8] {
    let len = unsafe { c_strnlen(ptr, max) };
    unsafe { core::slice::from_raw_parts(ptr.cast::<u8>(), len) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_view_stops_at_nul_or_limit() {
        let text = c"abcdef";
        assert_eq!(unsafe { c_str_bounded(text.as_ptr(), 3) }, b"abc");
        assert_eq!(unsafe { c_str_bounded(text.as_ptr(), 64) }, b"abcdef");
        assert_eq!(unsafe { c_strnlen(text.as_ptr(), 0) }, 0);
    }

    #[test]
    fn mutable_view_includes_terminator() {
        let mut buf = *b"hi\0junk";
        let view = unsafe { c_str_mut(buf.as_mut_ptr().cast()) };
        assert_eq!(view, b"hi\0");
    }
}
