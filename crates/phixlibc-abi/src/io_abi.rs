//! File forwards: `open`, `read`, `close`.
//!
//! The kernel owns file semantics; these only guard against null pointers.

use core::ffi::{c_char, c_int, c_void};

use crate::kernel;

/// Open `filename`. Returns a descriptor, or a negative value on failure.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn open(filename: *const c_char, mode: *const c_char) -> c_int {
    if filename.is_null() || mode.is_null() {
        return -1;
    }
    unsafe { kernel::phix_open(filename, mode) }
}

/// Read `n` items of `count` bytes from `fd` into `buf`.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn read(buf: *mut c_void, count: usize, n: usize, fd: c_int) -> c_int {
    if buf.is_null() {
        return -1;
    }
    unsafe { kernel::phix_read(buf, count, n, fd) }
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn close(fd: c_int) -> c_int {
    unsafe { kernel::phix_close(fd) }
}
