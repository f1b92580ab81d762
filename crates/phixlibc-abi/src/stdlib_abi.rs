//! ABI layer for `<stdlib.h>` and the memory-management forwards.
//!
//! `itoa` and `atoi` delegate to `phixlibc_core::stdlib`. `malloc`, `free`,
//! `exit`, `get_paddr` and `get_flags` forward to the kernel unchanged.

use core::ffi::{c_char, c_int, c_void};

use phixlibc_core::compat_level;
use phixlibc_core::stdlib::{NumBuf, decimal_to_int};
use spin::Mutex;

use crate::kernel;
use crate::util::c_str;

/// Scratch buffer behind the pointer `itoa` returns.
static ITOA_TEXT: Mutex<NumBuf> = Mutex::new(NumBuf::new());

/// Render `i` in decimal into a static buffer and return a pointer to it.
///
/// The text stays valid until the next `itoa` call, which overwrites it.
/// Callers that need it longer must copy it first.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn itoa(i: c_int) -> *mut c_char {
    let mut text = ITOA_TEXT.lock();
    text.format_decimal(i).as_ptr().cast_mut().cast()
}

/// Parse a decimal string. Returns 0 for null, empty or invalid input.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn atoi(str: *const c_char) -> c_int {
    if str.is_null() {
        return 0;
    }
    decimal_to_int(unsafe { c_str(str) }, compat_level())
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn malloc(size: usize) -> *mut c_void {
    unsafe { kernel::phix_malloc(size) }
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn free(p: *mut c_void) {
    unsafe { kernel::phix_free(p) }
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn exit(status: c_int) -> ! {
    kernel::exit(status)
}

/// Physical address backing `vaddr` in the current address space.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn get_paddr(vaddr: *mut c_void) -> *mut c_void {
    unsafe { kernel::phix_get_paddr(vaddr) }
}

/// Page flags of the mapping containing `vaddr`.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn get_flags(vaddr: *mut c_void) -> u8 {
    unsafe { kernel::phix_get_flags(vaddr) }
}
