//! Standard library utilities.
//!
//! Implements the `<stdlib.h>` numeric conversions the runtime exposes:
//! `itoa`, `atoi`, and the hexadecimal renderer behind `%p`.

pub mod conversion;

pub use conversion::{
    ConversionStatus, NUM_BUF_LEN, NumBuf, decimal_to_int, decimal_to_int_status, int_to_decimal,
    unsigned_to_hex,
};
