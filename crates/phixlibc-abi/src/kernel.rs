//! Kernel primitives.
//!
//! Outside tests these are the kernel's syscall stubs, resolved when the
//! static library is linked into a program. Under `cfg(test)` the same names
//! resolve to [`mock`], a per-thread scripted kernel.

use core::ffi::{c_char, c_int};

use phixlibc_core::stdio::{CharSink, KeySource};

#[cfg(not(test))]
mod imports {
    use core::ffi::{c_char, c_int, c_void};

    unsafe extern "C" {
        pub fn phix_getkey() -> c_int;
        pub fn phix_putchar(c: c_char);
        pub fn phix_print(s: *const c_char);
        pub fn phix_malloc(size: usize) -> *mut c_void;
        pub fn phix_free(p: *mut c_void);
        pub fn phix_exit(status: c_int) -> !;
        pub fn phix_open(filename: *const c_char, mode: *const c_char) -> c_int;
        pub fn phix_read(buf: *mut c_void, count: usize, n: usize, fd: c_int) -> c_int;
        pub fn phix_close(fd: c_int) -> c_int;
        pub fn phix_get_paddr(vaddr: *mut c_void) -> *mut c_void;
        pub fn phix_get_flags(vaddr: *mut c_void) -> u8;
    }
}

#[cfg(not(test))]
pub(crate) use imports::*;
#[cfg(test)]
pub(crate) use mock::*;

/// Longest run handed to `phix_print` in one call, excluding the NUL.
const PRINT_CHUNK: usize = 63;

pub(crate) fn exit(status: c_int) -> ! {
    // SAFETY: phix_exit takes no pointers and never returns.
    unsafe { phix_exit(status) }
}

/// The kernel console as a key source and character sink.
pub(crate) struct Console;

impl KeySource for Console {
    fn raw_read_key(&mut self) -> i32 {
        // SAFETY: phix_getkey takes no arguments.
        unsafe { phix_getkey() }
    }
}

impl CharSink for Console {
    fn put_char(&mut self, c: u8) {
        // SAFETY: phix_putchar takes a plain byte.
        unsafe { phix_putchar(c as c_char) }
    }

    fn print(&mut self, text: &[u8]) {
        let mut chunk = [0u8; PRINT_CHUNK + 1];
        for part in text.chunks(PRINT_CHUNK) {
            chunk[..part.len()].copy_from_slice(part);
            chunk[part.len()] = 0;
            // SAFETY: chunk is NUL-terminated at part.len().
            unsafe { phix_print(chunk.as_ptr().cast()) }
        }
    }
}
