//! Key and line input: `getkey` and `readline`.

use thiserror::Error;

use super::device::{CharSink, KeySource};

/// Key code that ends a line.
pub const CARRIAGE_RETURN: u8 = 13;
/// Key code that erases the previous character.
pub const BACKSPACE: u8 = 0x08;

/// Errors reported by [`read_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadLineError {
    /// The buffer has no room for the terminator.
    #[error("line buffer must hold at least the NUL terminator")]
    ZeroCapacity,
}

/// Block until a key is available and return it.
///
/// Polls `keys` until it reports a non-zero code, calling
/// [`KeySource::wait_for_key`] between empty polls. There is no timeout and
/// no cancellation.
pub fn read_key<K: KeySource + ?Sized>(keys: &mut K) -> i32 {
    loop {
        let key = keys.raw_read_key();
        if key != 0 {
            return key;
        }
        keys.wait_for_key();
    }
}

/// Read one edited line into `buf`, returning its length.
///
/// Reading stops at a carriage return (which is neither stored nor echoed)
/// or once `buf.len() - 1` characters are held. With `echo`, every other key
/// is written to `out` before it is interpreted, so backspaces are echoed
/// too. A backspace erases the previous character; with nothing to erase it
/// is ignored. Key codes are truncated to a byte.
///
/// The buffer is always NUL-terminated at the returned length.
pub fn read_line<K, S>(
    keys: &mut K,
    out: &mut S,
    buf: &mut [u8],
    echo: bool,
) -> Result<usize, ReadLineError>
where
    K: KeySource + ?Sized,
    S: CharSink + ?Sized,
{
    let Some(max) = buf.len().checked_sub(1) else {
        return Err(ReadLineError::ZeroCapacity);
    };

    let mut pos = 0;
    while pos < max {
        let key = read_key(keys) as u8;
        if key == CARRIAGE_RETURN {
            break;
        }
        if echo {
            out.put_char(key);
        }
        if key == BACKSPACE {
            if pos > 0 {
                pos -= 1;
                buf[pos] = 0;
            }
            continue;
        }
        buf[pos] = key;
        pos += 1;
    }

    buf[pos] = 0;
    Ok(pos)
}
