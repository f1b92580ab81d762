#![no_main]
use libfuzzer_sys::fuzz_target;
use phixlibc_core::CompatLevel;
use phixlibc_core::stdlib::{ConversionStatus, NumBuf, decimal_to_int_status};

fuzz_target!(|data: &[u8]| {
    // Reference parsing must never overflow or panic on any input.
    let _ = decimal_to_int_status(data, CompatLevel::Reference);

    let (value, status) = decimal_to_int_status(data, CompatLevel::Strict);
    if status != ConversionStatus::Success {
        assert_eq!(value, 0);
        return;
    }
    // A successful strict parse round-trips through the renderer, up to
    // leading zeros and a negative zero.
    let mut num = NumBuf::new();
    let text = num.format_decimal(value);
    let (again, status) = decimal_to_int_status(text, CompatLevel::Strict);
    assert_eq!(status, ConversionStatus::Success);
    assert_eq!(again, value);
});
