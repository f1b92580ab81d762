//! Runtime compatibility configuration.
//!
//! Two levels select how the documented quirks of the reference runtime are
//! treated:
//! - `strict` (default): the quirks are fixed. Hex rendering of zero yields
//!   `"0"`, decimal parsing handles a sign and rejects garbage and overflow.
//! - `reference`: the quirks are reproduced bit-for-bit so that programs
//!   written against the reference runtime see identical output.
//!
//! The kernel has no environment, so the level is stored in a process-wide
//! atomic that the ABI layer (or a host harness) sets explicitly.

use core::sync::atomic::{AtomicU8, Ordering};

/// Compatibility level for quirk-bearing operations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompatLevel {
    /// Quirks fixed. This is the behavior new code should rely on.
    #[default]
    Strict,
    /// Quirks reproduced exactly as the reference runtime exhibited them.
    Reference,
}

impl CompatLevel {
    /// Stable lowercase name, used in logs and fixtures.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Reference => "reference",
        }
    }

    /// Returns true if the reference quirks should be reproduced.
    #[must_use]
    pub const fn reproduces_quirks(self) -> bool {
        matches!(self, Self::Reference)
    }

    /// Decode the integer form used across the C boundary (`0` strict, `1` reference).
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            LEVEL_REFERENCE => Self::Reference,
            _ => Self::Strict,
        }
    }

    /// Integer form used across the C boundary.
    #[must_use]
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Strict => LEVEL_STRICT,
            Self::Reference => LEVEL_REFERENCE,
        }
    }
}

/// Raw value of [`CompatLevel::Strict`].
pub const LEVEL_STRICT: u8 = 0;
/// Raw value of [`CompatLevel::Reference`].
pub const LEVEL_REFERENCE: u8 = 1;

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(LEVEL_STRICT);

/// Get the process-wide compatibility level.
#[must_use]
pub fn compat_level() -> CompatLevel {
    CompatLevel::from_raw(CURRENT_LEVEL.load(Ordering::Relaxed))
}

/// Set the process-wide compatibility level, returning the previous one.
pub fn set_compat_level(level: CompatLevel) -> CompatLevel {
    CompatLevel::from_raw(CURRENT_LEVEL.swap(level.to_raw(), Ordering::AcqRel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        assert_eq!(CompatLevel::default(), CompatLevel::Strict);
        assert!(!CompatLevel::Strict.reproduces_quirks());
        assert!(CompatLevel::Reference.reproduces_quirks());
    }

    #[test]
    fn raw_round_trip_and_unknown_raw_is_strict() {
        for level in [CompatLevel::Strict, CompatLevel::Reference] {
            assert_eq!(CompatLevel::from_raw(level.to_raw()), level);
        }
        assert_eq!(CompatLevel::from_raw(200), CompatLevel::Strict);
    }

    #[test]
    fn set_level_is_process_sticky() {
        let previous = set_compat_level(CompatLevel::Reference);
        assert_eq!(compat_level(), CompatLevel::Reference);
        assert_eq!(set_compat_level(previous), CompatLevel::Reference);
        assert_eq!(compat_level(), previous);
    }
}
