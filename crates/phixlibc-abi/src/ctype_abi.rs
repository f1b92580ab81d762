//! ABI layer for the character helpers: `is_digit`, `to_lower`, `to_upper`, `to_digit`.
//!
//! Pure compute. Each function narrows its argument to a byte and delegates
//! to `phixlibc_core::ctype`.

use core::ffi::{c_char, c_int};

use phixlibc_core::compat_level;
use phixlibc_core::ctype;

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn is_digit(c: c_char) -> bool {
    ctype::is_digit(c as u8)
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn to_lower(c: u8) -> c_char {
    ctype::to_lower(c) as c_char
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn to_upper(c: u8) -> c_char {
    ctype::to_upper(c) as c_char
}

/// Numeric value of a decimal digit.
///
/// For a non-digit, reference mode returns the character itself (sign
/// extended, as the reference runtime's `char` to `int` conversion did) and strict
/// mode returns -1.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn to_digit(c: c_char) -> c_int {
    match ctype::checked_digit_value(c as u8) {
        Some(value) => c_int::from(value),
        None if compat_level().reproduces_quirks() => c_int::from(c),
        None => -1,
    }
}
