//! Character classification and conversion.
//!
//! Pure byte-level helpers used by every other component. ASCII only.

/// Returns `true` if `c` is a decimal digit (`[0-9]`).
#[inline]
pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Returns `true` if `c` is an uppercase letter (`[A-Z]`).
#[inline]
pub fn is_upper(c: u8) -> bool {
    c.is_ascii_uppercase()
}

/// Returns `true` if `c` is a lowercase letter (`[a-z]`).
#[inline]
pub fn is_lower(c: u8) -> bool {
    c.is_ascii_lowercase()
}

/// Converts `c` to uppercase if it is a lowercase letter.
#[inline]
pub fn to_upper(c: u8) -> u8 {
    if is_lower(c) { c - 32 } else { c }
}

/// Converts `c` to lowercase if it is an uppercase letter.
#[inline]
pub fn to_lower(c: u8) -> u8 {
    if is_upper(c) { c + 32 } else { c }
}

/// Numeric value of a decimal digit byte.
///
/// Non-digit bytes are returned unchanged, so `digit_value(b'A') == b'A'`.
/// Callers that care must check [`is_digit`] first or use
/// [`checked_digit_value`].
#[inline]
pub fn digit_value(c: u8) -> u8 {
    if is_digit(c) { c - b'0' } else { c }
}

/// Numeric value of a decimal digit byte, or `None` for any other byte.
#[inline]
pub fn checked_digit_value(c: u8) -> Option<u8> {
    if is_digit(c) { Some(c - b'0') } else { None }
}
