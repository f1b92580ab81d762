//! Runtime compatibility mode.
//!
//! A bare-metal program has no environment to read `PHIXLIBC_MODE` from, so
//! the level is switched explicitly: `0` fixes the reference quirks (the
//! default) and `1` reproduces them.

use core::ffi::c_int;

use phixlibc_core::config::{LEVEL_REFERENCE, LEVEL_STRICT};
use phixlibc_core::{CompatLevel, compat_level, set_compat_level};

/// Set the compatibility level. Returns the previous level, or -1 (leaving
/// the level unchanged) if `mode` is not a known level.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn phixlibc_set_mode(mode: c_int) -> c_int {
    let level = match u8::try_from(mode) {
        Ok(LEVEL_STRICT) => CompatLevel::Strict,
        Ok(LEVEL_REFERENCE) => CompatLevel::Reference,
        _ => return -1,
    };
    c_int::from(set_compat_level(level).to_raw())
}

/// Current compatibility level: 0 (strict) or 1 (reference).
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn phixlibc_get_mode() -> c_int {
    c_int::from(compat_level().to_raw())
}
