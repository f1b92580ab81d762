//! Numeric conversion functions (itoa, atoi, and the `%p` hex renderer).
//!
//! Rendering writes into a caller-owned [`NumBuf`] from the end backward and
//! returns the text as a sub-slice. The byte after the returned text is always
//! a NUL, so the slice pointer doubles as a C string.

use crate::config::CompatLevel;
use crate::ctype::{checked_digit_value, digit_value};
use crate::string::strlen;

/// Size of a conversion buffer: sign + 10 digits + NUL for any `i32`.
pub const NUM_BUF_LEN: usize = 12;

/// Widest decimal magnitude an `i32` can hold.
const MAX_DECIMAL_DIGITS: usize = 10;

/// The reference runtime rejected inputs with `strlen - 1 >= sizeof(int)`.
const REFERENCE_MAX_LEN_MINUS_ONE: usize = core::mem::size_of::<i32>();

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Result of a string-to-number conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    /// Null, empty, or sign-only input.
    Empty,
    /// More digits than the integer can represent.
    TooLong,
    /// Fits the digit budget but not the value range.
    Overflow,
    /// A byte other than a decimal digit was found.
    InvalidDigit,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `value` as decimal into `buf`.
///
/// Negative values get a leading `'-'`; zero renders as `"0"`. Digits are
/// produced in the non-positive domain, so `i32::MIN` renders correctly
/// without negating it.
pub fn int_to_decimal(value: i32, buf: &mut [u8; NUM_BUF_LEN]) -> &[u8] {
    let last = NUM_BUF_LEN - 1;
    buf[last] = 0;
    let mut pos = last;

    let negative = value < 0;
    let mut n = if negative { value } else { -value };
    while n != 0 {
        pos -= 1;
        buf[pos] = b'0' + (-(n % 10)) as u8;
        n /= 10;
    }

    if pos == last {
        pos -= 1;
        buf[pos] = b'0';
    }
    if negative {
        pos -= 1;
        buf[pos] = b'-';
    }

    &buf[pos..last]
}

/// Render `value` as uppercase hexadecimal into `buf`, without prefix or leading zeros.
///
/// Zero renders as `"0"` under [`CompatLevel::Strict`] and as the empty
/// string under [`CompatLevel::Reference`].
pub fn unsigned_to_hex(value: u32, level: CompatLevel, buf: &mut [u8; NUM_BUF_LEN]) -> &[u8] {
    let last = NUM_BUF_LEN - 1;
    buf[last] = 0;
    let mut pos = last;

    let mut n = value;
    while n != 0 {
        pos -= 1;
        buf[pos] = HEX_DIGITS[(n % 16) as usize];
        n /= 16;
    }

    if pos == last && !level.reproduces_quirks() {
        pos -= 1;
        buf[pos] = b'0';
    }

    &buf[pos..last]
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a NUL-terminated decimal string. Failures yield `0`.
///
/// See [`decimal_to_int_status`] for the accepted syntax at each level.
pub fn decimal_to_int(text: &[u8], level: CompatLevel) -> i32 {
    decimal_to_int_status(text, level).0
}

/// Parse a NUL-terminated decimal string, reporting why a `0` came back.
///
/// The value is the sum of each digit weighted by the power of ten given by
/// the number of bytes left after it.
///
/// - `Strict`: an optional leading `'-'` followed by 1 to 10 digits. Any
///   other byte, or a value outside `i32`, yields `(0, status)`.
/// - `Reference`: no sign handling and no validation. Inputs of 5 or more
///   bytes yield 0, zero digits are skipped without consuming a power of
///   ten, and non-digit bytes contribute their raw byte value.
pub fn decimal_to_int_status(text: &[u8], level: CompatLevel) -> (i32, ConversionStatus) {
    let s = &text[..strlen(text)];
    if s.is_empty() {
        return (0, ConversionStatus::Empty);
    }
    match level {
        CompatLevel::Strict => parse_strict(s),
        CompatLevel::Reference => parse_reference(s),
    }
}

fn parse_strict(s: &[u8]) -> (i32, ConversionStatus) {
    let (negative, digits) = match s.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, s),
    };
    if digits.is_empty() {
        return (0, ConversionStatus::Empty);
    }
    if digits.len() > MAX_DECIMAL_DIGITS {
        return (0, ConversionStatus::TooLong);
    }

    let mut acc: i64 = 0;
    let mut remaining = digits.len();
    for &b in digits {
        let Some(d) = checked_digit_value(b) else {
            return (0, ConversionStatus::InvalidDigit);
        };
        remaining -= 1;
        acc += i64::from(d) * 10i64.pow(remaining as u32);
    }

    let signed = if negative { -acc } else { acc };
    match i32::try_from(signed) {
        Ok(v) => (v, ConversionStatus::Success),
        Err(_) => (0, ConversionStatus::Overflow),
    }
}

fn parse_reference(s: &[u8]) -> (i32, ConversionStatus) {
    let mut len = s.len() - 1;
    if len >= REFERENCE_MAX_LEN_MINUS_ONE {
        return (0, ConversionStatus::TooLong);
    }

    let mut ret: i32 = 0;
    for &b in s {
        let c = i32::from(digit_value(b));
        if c != 0 {
            ret += c * 10i32.pow(len as u32);
            len = len.saturating_sub(1);
        }
    }
    (ret, ConversionStatus::Success)
}

// ---------------------------------------------------------------------------
// NumBuf
// ---------------------------------------------------------------------------

/// Reusable conversion buffer.
///
/// Each call overwrites the previous result, so the returned slice borrows
/// the buffer mutably until it is dropped.
#[derive(Debug, Clone)]
pub struct NumBuf {
    buf: [u8; NUM_BUF_LEN],
}

impl NumBuf {
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: [0u8; NUM_BUF_LEN],
        }
    }

    /// Format an `i32` as decimal.
    #[inline]
    pub fn format_decimal(&mut self, value: i32) -> &[u8] {
        int_to_decimal(value, &mut self.buf)
    }

    /// Format a `u32` as uppercase hex without prefix.
    #[inline]
    pub fn format_hex(&mut self, value: u32, level: CompatLevel) -> &[u8] {
        unsigned_to_hex(value, level, &mut self.buf)
    }
}

impl Default for NumBuf {
    fn default() -> Self {
        Self::new()
    }
}
