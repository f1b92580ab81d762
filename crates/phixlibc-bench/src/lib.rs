//! Shared inputs for the phixlibc benchmarks.

use phixlibc_core::stdio::CharSink;

/// Output sink that only counts bytes, so benches measure formatting alone.
#[derive(Debug, Default)]
pub struct NullSink {
    pub written: usize,
}

impl CharSink for NullSink {
    #[inline]
    fn put_char(&mut self, _c: u8) {
        self.written += 1;
    }

    #[inline]
    fn print(&mut self, text: &[u8]) {
        self.written += text.len();
    }
}

/// `len` bytes of `fill` followed by a NUL.
#[must_use]
pub fn c_string(len: usize, fill: u8) -> Vec<u8> {
    let mut s = vec![fill; len];
    s.push(0);
    s
}

/// A NUL-terminated line of `words` comma-and-space separated words.
#[must_use]
pub fn token_line(words: usize) -> Vec<u8> {
    let mut line = Vec::new();
    for i in 0..words {
        if i > 0 {
            line.extend_from_slice(if i % 3 == 0 { b",, " } else { b", " });
        }
        line.extend_from_slice(b"word");
        line.extend_from_slice(i.to_string().as_bytes());
    }
    line.push(0);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_line_shape() {
        assert_eq!(token_line(4), b"word0, word1, word2,, word3\0");
        assert_eq!(c_string(3, b'A'), b"AAA\0");
    }

    #[test]
    fn null_sink_counts() {
        let mut sink = NullSink::default();
        sink.put_char(b'x');
        sink.print(b"abc");
        assert_eq!(sink.written, 4);
    }
}
