//! Standard I/O operations.
//!
//! Implements the `<stdio.h>` surface of the runtime: blocking key input,
//! line editing, and the `printf` formatting engine. Devices are abstracted
//! behind [`KeySource`] and [`CharSink`] so the same code drives the kernel
//! console, a test script, or a host terminal.

pub mod device;
pub mod input;
pub mod printf;

pub use device::{CharSink, KeySource};
pub use input::{BACKSPACE, CARRIAGE_RETURN, ReadLineError, read_key, read_line};
pub use printf::{
    ArgKind, Conversion, FormatArg, FormatError, FormatSegment, Segments, check_arguments, format,
    parse_format_string,
};
