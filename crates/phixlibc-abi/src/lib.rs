#![feature(c_variadic)]
#![cfg_attr(not(test), no_std)]
// Every export takes raw pointers from C callers under the usual C contracts;
// per-function safety sections would only restate them.
#![allow(clippy::missing_safety_doc)]
//! # phixlibc-abi
//!
//! The `extern "C"` boundary of the phix runtime library.
//!
//! This crate produces a static library that kernel-loaded C programs link
//! against. Each export converts its pointer arguments into slices and
//! delegates to the safe implementations in `phixlibc-core`; the kernel
//! primitives (`phix_getkey`, `phix_putchar`, `phix_print`, ...) are imported
//! from the kernel's syscall stubs.
//!
//! # Architecture
//!
//! ```text
//! C caller -> ABI entry (this crate) -> phixlibc-core -> kernel primitive
//! ```
//!
//! The compatibility level set with `phixlibc_set_mode` decides whether the
//! documented quirks of the reference runtime are reproduced (`1`) or fixed
//! (`0`, the default).
//!
//! Under `cfg(test)` nothing is exported with an unmangled name and the
//! kernel primitives are replaced by an in-process mock, so unit tests never
//! shadow the host libc.

mod kernel;
mod util;

pub mod ctype_abi;
pub mod io_abi;
pub mod mode_abi;
pub mod stdio_abi;
pub mod stdlib_abi;
pub mod string_abi;

#[cfg(all(not(test), feature = "panic-handler"))]
#[panic_handler]
fn panic(_: &core::panic::PanicInfo<'_>) -> ! {
    kernel::exit(1)
}

/// Serializes tests that touch process-wide state (mode, strtok, itoa).
#[cfg(test)]
pub(crate) fn serial() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
