//! String tokenization: a scan-local [`Tokenizer`] and index-based `strtok_r`.
//!
//! Both split a NUL-terminated byte string on a set of delimiter bytes,
//! overwriting the delimiter that ends each token with a NUL in place. The
//! original delimiter bytes are therefore destroyed by a scan.
//!
//! The C `strtok` with its single process-wide cursor lives in the ABI layer
//! and is built on [`strtok_r`]. Code in Rust should prefer [`Tokenizer`],
//! which carries its own cursor so any number of scans can coexist.

/// Returns true if byte `b` is in the (optionally NUL-terminated) `delimiters` set.
fn is_delim(b: u8, delimiters: &[u8]) -> bool {
    for &d in delimiters {
        if d == 0 {
            break;
        }
        if b == d {
            return true;
        }
    }
    false
}

/// Outcome of scanning one token from `s[offset..]`.
enum Scan {
    /// Only delimiters (or nothing) remained before the terminator.
    Exhausted,
    /// A token `[start, end)`; `split` says whether a delimiter at `end` was overwritten.
    Token { start: usize, end: usize, split: bool },
}

fn scan(s: &mut [u8], delimiters: &[u8], offset: usize) -> Scan {
    let len = s.len();
    let mut pos = offset;

    // Skip leading delimiters
    while pos < len && s[pos] != 0 && is_delim(s[pos], delimiters) {
        pos += 1;
    }

    if pos >= len || s[pos] == 0 {
        return Scan::Exhausted;
    }

    let start = pos;

    // Find end of token
    while pos < len && s[pos] != 0 && !is_delim(s[pos], delimiters) {
        pos += 1;
    }

    let split = pos < len && s[pos] != 0;
    if split {
        s[pos] = 0;
    }

    Scan::Token {
        start,
        end: pos,
        split,
    }
}

/// Reentrant string tokenizer.
///
/// `s` is the NUL-terminated byte string to tokenize, `delimiters` the set of
/// delimiter bytes, and `save_ptr` the position for this call (0 for the first).
///
/// Returns `Some((token_start, token_len, new_save_ptr))` for the next token,
/// or `None` when no more tokens remain. When a token ends at the terminator,
/// `new_save_ptr` points at the terminator, so the following call returns `None`.
pub fn strtok_r(s: &mut [u8], delimiters: &[u8], save_ptr: usize) -> Option<(usize, usize, usize)> {
    match scan(s, delimiters, save_ptr) {
        Scan::Exhausted => None,
        Scan::Token { start, end, split } => {
            let next = if split { end + 1 } else { end };
            Some((start, end - start, next))
        }
    }
}

/// A tokenizing scan over a caller-owned buffer.
///
/// Each call to [`next_token`](Self::next_token) yields the next token as a
/// slice of the original buffer. Tokens stay valid for the buffer's lifetime,
/// so several can be held at once, and separate `Tokenizer`s never share state.
///
/// ```
/// use phixlibc_core::string::Tokenizer;
///
/// let mut buf = *b"a, b,,c\0";
/// let mut scan = Tokenizer::new(&mut buf);
/// assert_eq!(scan.next_token(b" ,"), Some(&b"a"[..]));
/// assert_eq!(scan.next_token(b" ,"), Some(&b"b"[..]));
/// assert_eq!(scan.next_token(b" ,"), Some(&b"c"[..]));
/// assert_eq!(scan.next_token(b" ,"), None);
/// ```
#[derive(Debug)]
pub struct Tokenizer<'a> {
    rest: Option<&'a mut [u8]>,
}

impl<'a> Tokenizer<'a> {
    /// Start a scan at the beginning of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { rest: Some(buf) }
    }

    /// Returns true until a call has observed the end of the buffer.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.rest.is_some()
    }

    /// Yield the next token, splitting on any byte in `delimiters`.
    ///
    /// The delimiter set may change between calls. Once the terminator is
    /// reached the scan ends and every later call returns `None`.
    pub fn next_token(&mut self, delimiters: &[u8]) -> Option<&'a [u8]> {
        let rest = self.rest.take()?;
        match scan(rest, delimiters, 0) {
            Scan::Exhausted => None,
            Scan::Token { start, end, split } => {
                let (head, tail) = rest.split_at_mut(if split { end + 1 } else { end });
                self.rest = Some(tail);
                let head: &'a [u8] = head;
                Some(&head[start..end])
            }
        }
    }

    /// Turn the scan into an iterator over a fixed delimiter set.
    #[must_use]
    pub fn tokens<'d>(self, delimiters: &'d [u8]) -> Tokens<'a, 'd> {
        Tokens {
            scan: self,
            delimiters,
        }
    }
}

/// Iterator returned by [`Tokenizer::tokens`].
#[derive(Debug)]
pub struct Tokens<'a, 'd> {
    scan: Tokenizer<'a>,
    delimiters: &'d [u8],
}

impl<'a> Iterator for Tokens<'a, '_> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.scan.next_token(self.delimiters)
    }
}
