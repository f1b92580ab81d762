//! # phixlibc-core
//!
//! Safe Rust implementations of the phix kernel runtime library.
//!
//! This crate is freestanding: it has no heap, no OS, and no global I/O of its
//! own. Character input and output reach it through the [`stdio::KeySource`]
//! and [`stdio::CharSink`] traits, which the ABI layer implements on top of the
//! kernel primitives. No `unsafe` code is permitted at the crate level.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod ctype;
pub mod stdio;
pub mod stdlib;
pub mod string;

pub use config::{CompatLevel, compat_level, set_compat_level};
