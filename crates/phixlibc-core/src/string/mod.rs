//! String and memory operations.
//!
//! Implements the `<string.h>` functions of the runtime as safe Rust
//! operating on slices.

pub mod mem;
pub mod str;
pub mod strtok;

// Re-export commonly used functions.
pub use mem::{memcmp, memcpy, memset};
pub use str::{
    istrncmp, strcpy, strcpy_strip, strlen, strncmp, strncpy, strnlen, strnlen_terminator,
};
pub use strtok::{Tokenizer, Tokens, strtok_r};
