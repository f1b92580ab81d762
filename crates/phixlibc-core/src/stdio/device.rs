//! Character device seams.
//!
//! The kernel provides raw key polling and raw character output. These two
//! traits are the only way the core reaches them.

/// A source of keystrokes.
pub trait KeySource {
    /// Poll once. Returns 0 if no key is pending, else a positive key code.
    fn raw_read_key(&mut self) -> i32;

    /// Called after every empty poll.
    ///
    /// The default spins. A scheduled environment overrides this to yield
    /// until the next key may have arrived; keys must still be delivered one
    /// at a time in arrival order.
    fn wait_for_key(&mut self) {
        core::hint::spin_loop();
    }
}

/// A destination for output characters.
pub trait CharSink {
    /// Emit one character to the active output device.
    fn put_char(&mut self, c: u8);

    /// Emit a run of characters. `text` contains no NUL.
    ///
    /// Devices with a string primitive override this to avoid per-byte calls.
    fn print(&mut self, text: &[u8]) {
        for &c in text {
            self.put_char(c);
        }
    }
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn raw_read_key(&mut self) -> i32 {
        (**self).raw_read_key()
    }

    fn wait_for_key(&mut self) {
        (**self).wait_for_key();
    }
}

impl<S: CharSink + ?Sized> CharSink for &mut S {
    fn put_char(&mut self, c: u8) {
        (**self).put_char(c);
    }

    fn print(&mut self, text: &[u8]) {
        (**self).print(text);
    }
}
