//! Conformance testing harness for phixlibc.
//!
//! This crate provides:
//! - Fixture sets: JSON descriptions of calls into `phixlibc-core` and their expected output
//! - Execution: dispatch of a fixture case to the core at a given compatibility level
//! - Verification and report generation: human-readable + machine-readable results
//! - Structured logging: JSONL run logs and an artifact index with SHA-256 digests

#![forbid(unsafe_code)]

pub mod diff;
pub mod error;
pub mod execute;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use execute::{Execution, execute_fixture_case};
pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::VerificationResult;
