//! ABI layer for `<stdio.h>`: `getkey`, `readline`, `putchar`, `printf`.
//!
//! All output goes to the kernel console. `printf` collects its variadic
//! arguments into [`FormatArg`]s guided by the format string, then hands them
//! to the core formatter.

use core::ffi::{c_char, c_int};

use phixlibc_core::compat_level;
use phixlibc_core::stdio::{
    Conversion, FormatArg, FormatSegment, format, parse_format_string, read_key, read_line,
};

use crate::kernel::Console;
use crate::util::c_str;

/// Maximum variadic arguments extracted per `printf` call.
const MAX_VA_ARGS: usize = 32;

/// Printed for a null `%s` argument.
const NULL_STR: &[u8] = b"(null)";

/// Block until a key is pressed and return its code.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn getkey() -> c_int {
    read_key(&mut Console)
}

/// Read an edited line of at most `max - 1` characters into `buf`.
///
/// Does nothing if `buf` is null or `max < 1`.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn readline(buf: *mut c_char, max: c_int, output_while_typing: bool) {
    let Ok(capacity) = usize::try_from(max) else {
        return;
    };
    if buf.is_null() || capacity == 0 {
        return;
    }
    // SAFETY: caller guarantees `buf` is writable for `max` bytes.
    let line = unsafe { core::slice::from_raw_parts_mut(buf.cast::<u8>(), capacity) };
    // Capacity is non-zero, so this cannot fail.
    let _ = read_line(&mut Console, &mut Console, line, output_while_typing);
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn putchar(c: c_int) -> c_int {
    phixlibc_core::stdio::CharSink::put_char(&mut Console, c as u8);
    0
}

/// Pull one argument per conversion of `$fmt` out of the variadic list into
/// `$buf`, returning how many were taken.
/// Uses a macro to avoid naming the unstable `VaListImpl` type directly.
macro_rules! extract_va_args {
    ($fmt:expr, $args:expr, $buf:expr) => {{
        let mut idx = 0usize;
        for seg in parse_format_string($fmt) {
            let FormatSegment::Conversion(conv) = seg else {
                continue;
            };
            if idx == MAX_VA_ARGS {
                break;
            }
            $buf[idx] = match conv {
                Conversion::Str => {
                    let ptr = unsafe { $args.next_arg::<*const c_char>() };
                    if ptr.is_null() {
                        FormatArg::Str(NULL_STR)
                    } else {
                        FormatArg::Str(unsafe { c_str(ptr) })
                    }
                }
                // %d, %c and %p all take a C int.
                Conversion::Decimal | Conversion::Char | Conversion::Hex => {
                    FormatArg::Int(unsafe { $args.next_arg::<c_int>() })
                }
            };
            idx += 1;
        }
        idx
    }};
}

/// Formatted print to the console.
///
/// Returns 0 in reference mode, as the reference runtime did, and the number
/// of bytes written in strict mode. Returns -1 without printing if `fmt` is
/// null.
///
/// At most `MAX_VA_ARGS` arguments are pulled from the variadic list. A
/// format with more conversions prints nothing and returns -1 at either
/// level, where the reference runtime kept reading its stack and printed
/// them anyway.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn printf(fmt: *const c_char, mut args: ...) -> c_int {
    if fmt.is_null() {
        return -1;
    }
    let fmt = unsafe { c_str(fmt) };

    let mut arg_buf = [FormatArg::Int(0); MAX_VA_ARGS];
    let count = extract_va_args!(fmt, args, arg_buf);

    let level = compat_level();
    match format(&mut Console, fmt, &arg_buf[..count], level) {
        Ok(_) if level.reproduces_quirks() => 0,
        Ok(written) => c_int::try_from(written).unwrap_or(c_int::MAX),
        Err(_) => -1,
    }
}
