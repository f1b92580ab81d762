//! The `printf` formatting engine.
//!
//! Supports exactly four conversions: `%d`, `%c`, `%s` and `%p`. There are no
//! flags, widths or precisions. Any other byte after `%` is emitted as itself,
//! which is how `%%` produces a single percent sign.
//!
//! Arguments are passed as a slice of [`FormatArg`] and checked against the
//! conversions before anything is written, so a bad call reports a
//! [`FormatError`] instead of printing garbage.

use core::fmt;

use thiserror::Error;

use super::device::CharSink;
use crate::config::CompatLevel;
use crate::stdlib::NumBuf;
use crate::string::strlen;

/// Prefix written before a `%p` rendering.
const HEX_PREFIX: &[u8] = b"0X";

/// One formatting argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg<'a> {
    Int(i32),
    Char(u8),
    /// A byte string, read up to its first NUL or the end of the slice.
    Str(&'a [u8]),
    Unsigned(u32),
}

impl FormatArg<'_> {
    #[must_use]
    pub const fn kind(&self) -> ArgKind {
        match self {
            Self::Int(_) => ArgKind::Int,
            Self::Char(_) => ArgKind::Char,
            Self::Str(_) => ArgKind::Str,
            Self::Unsigned(_) => ArgKind::Unsigned,
        }
    }
}

impl From<i32> for FormatArg<'_> {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for FormatArg<'_> {
    fn from(value: u32) -> Self {
        Self::Unsigned(value)
    }
}

impl From<u8> for FormatArg<'_> {
    fn from(value: u8) -> Self {
        Self::Char(value)
    }
}

impl<'a> From<&'a [u8]> for FormatArg<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value.as_bytes())
    }
}

/// The variant of a [`FormatArg`], used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Int,
    Char,
    Str,
    Unsigned,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "signed integer",
            Self::Char => "character",
            Self::Str => "string",
            Self::Unsigned => "unsigned integer",
        })
    }
}

/// A recognized conversion selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `%d`: signed decimal.
    Decimal,
    /// `%c`: one character.
    Char,
    /// `%s`: byte string.
    Str,
    /// `%p`: `0X` followed by uppercase hex.
    Hex,
}

impl Conversion {
    #[must_use]
    pub const fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            b'd' => Some(Self::Decimal),
            b'c' => Some(Self::Char),
            b's' => Some(Self::Str),
            b'p' => Some(Self::Hex),
            _ => None,
        }
    }

    #[must_use]
    pub const fn selector(self) -> u8 {
        match self {
            Self::Decimal => b'd',
            Self::Char => b'c',
            Self::Str => b's',
            Self::Hex => b'p',
        }
    }

    /// Whether `arg` may be consumed by this conversion.
    ///
    /// `%d` and `%c` take integers or characters (a C `char` argument is
    /// promoted to `int`), `%p` takes unsigned or signed integers, and `%s`
    /// only strings.
    #[must_use]
    pub const fn accepts(self, arg: &FormatArg<'_>) -> bool {
        matches!(
            (self, arg),
            (Self::Decimal | Self::Char, FormatArg::Int(_) | FormatArg::Char(_))
                | (Self::Str, FormatArg::Str(_))
                | (Self::Hex, FormatArg::Unsigned(_) | FormatArg::Int(_))
        )
    }
}

/// A piece of a parsed format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSegment<'a> {
    /// Bytes emitted as-is.
    Literal(&'a [u8]),
    /// A conversion consuming the next argument.
    Conversion(Conversion),
}

/// Iterator over the segments of a format string.
///
/// Returned by [`parse_format_string`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    fmt: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = FormatSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.fmt[self.pos..];
        let first = *rest.first()?;

        if first != b'%' {
            let run = rest.iter().position(|&b| b == b'%').unwrap_or(rest.len());
            self.pos += run;
            return Some(FormatSegment::Literal(&rest[..run]));
        }

        // A '%' at the very end has no selector and emits nothing.
        let Some(&selector) = rest.get(1) else {
            self.pos = self.fmt.len();
            return None;
        };
        self.pos += 2;
        Some(match Conversion::from_selector(selector) {
            Some(conv) => FormatSegment::Conversion(conv),
            None => FormatSegment::Literal(&rest[1..2]),
        })
    }
}

/// Split `fmt` into literals and conversions. The string ends at its first NUL.
#[must_use]
pub fn parse_format_string(fmt: &[u8]) -> Segments<'_> {
    Segments {
        fmt: &fmt[..strlen(fmt)],
        pos: 0,
    }
}

/// Errors reported by [`format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("conversion %{selector} needs argument {index}, but only {index} were given")]
    MissingArgument { index: usize, selector: char },
    #[error("conversion %{selector} cannot format argument {index}, a {found}")]
    ArgumentMismatch {
        index: usize,
        selector: char,
        found: ArgKind,
    },
}

/// Check `args` against the conversions in `fmt` without emitting anything.
///
/// Returns the number of arguments the format string consumes. Arguments
/// beyond that are ignored by [`format`].
pub fn check_arguments(fmt: &[u8], args: &[FormatArg<'_>]) -> Result<usize, FormatError> {
    let mut index = 0;
    for segment in parse_format_string(fmt) {
        let FormatSegment::Conversion(conv) = segment else {
            continue;
        };
        let selector = char::from(conv.selector());
        let arg = args
            .get(index)
            .ok_or(FormatError::MissingArgument { index, selector })?;
        if !conv.accepts(arg) {
            return Err(FormatError::ArgumentMismatch {
                index,
                selector,
                found: arg.kind(),
            });
        }
        index += 1;
    }
    Ok(index)
}

/// Counts the bytes passing through to the wrapped sink.
struct Counting<'s, S: ?Sized> {
    inner: &'s mut S,
    written: usize,
}

impl<S: CharSink + ?Sized> CharSink for Counting<'_, S> {
    fn put_char(&mut self, c: u8) {
        self.inner.put_char(c);
        self.written += 1;
    }

    fn print(&mut self, text: &[u8]) {
        if !text.is_empty() {
            self.inner.print(text);
            self.written += text.len();
        }
    }
}

/// Format `args` according to `fmt` and write the result to `out`.
///
/// Literal bytes and `%c` go through [`CharSink::put_char`]; `%d`, `%s` and
/// `%p` renderings go through [`CharSink::print`]. `level` only affects `%p`
/// of zero, which is `0X0` under [`CompatLevel::Strict`] and `0X` under
/// [`CompatLevel::Reference`].
///
/// Returns the number of bytes emitted. On error nothing has been written.
pub fn format<S: CharSink + ?Sized>(
    out: &mut S,
    fmt: &[u8],
    args: &[FormatArg<'_>],
    level: CompatLevel,
) -> Result<usize, FormatError> {
    check_arguments(fmt, args)?;

    let mut out = Counting {
        inner: out,
        written: 0,
    };
    let mut num = NumBuf::new();
    let mut args = args.iter();

    for segment in parse_format_string(fmt) {
        let conv = match segment {
            FormatSegment::Literal(bytes) => {
                for &c in bytes {
                    out.put_char(c);
                }
                continue;
            }
            FormatSegment::Conversion(conv) => conv,
        };
        // Checked above.
        let Some(&arg) = args.next() else {
            break;
        };
        match (conv, arg) {
            (Conversion::Decimal, FormatArg::Int(v)) => out.print(num.format_decimal(v)),
            (Conversion::Decimal, FormatArg::Char(c)) => {
                out.print(num.format_decimal(i32::from(c)));
            }
            (Conversion::Char, FormatArg::Char(c)) => out.put_char(c),
            (Conversion::Char, FormatArg::Int(v)) => out.put_char(v as u8),
            (Conversion::Str, FormatArg::Str(s)) => out.print(&s[..strlen(s)]),
            (Conversion::Hex, FormatArg::Unsigned(v)) => {
                out.print(HEX_PREFIX);
                out.print(num.format_hex(v, level));
            }
            (Conversion::Hex, FormatArg::Int(v)) => {
                out.print(HEX_PREFIX);
                out.print(num.format_hex(v as u32, level));
            }
            _ => {}
        }
    }

    Ok(out.written)
}
