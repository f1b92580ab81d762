//! Test execution engine.

use std::time::Instant;

use phixlibc_core::CompatLevel;

use crate::diff;
use crate::execute::execute_fixture_case;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::verify::VerificationResult;

/// Prefix of the actual output recorded when a case cannot be executed.
pub const UNSUPPORTED_PREFIX: &str = "unsupported:";

/// Runs a fixture set at one compatibility level and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Compatibility level the cases run at.
    pub mode: CompatLevel,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: CompatLevel) -> Self {
        Self {
            campaign: campaign.into(),
            mode,
        }
    }

    /// Run the cases of `fixture_set` that apply to this runner's level.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .filter(|case| mode_matches(self.mode, &case.mode))
            .map(|case| self.verify(case))
            .collect()
    }

    /// Like [`TestRunner::run`], also emitting one `fixture_case` log entry
    /// per case. Cases for the other level are logged as skipped.
    pub fn run_logged(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter,
    ) -> std::io::Result<Vec<VerificationResult>> {
        let mut results = Vec::new();
        for case in &fixture_set.cases {
            let entry = LogEntry::new(log.next_trace_id(), LogLevel::Info, "fixture_case")
                .with_mode(self.mode.as_str())
                .with_api(&fixture_set.family, &case.function);

            if !mode_matches(self.mode, &case.mode) {
                log.emit_entry(
                    entry
                        .with_outcome(Outcome::Skip)
                        .with_details(serde_json::json!({"case": case.name})),
                )?;
                continue;
            }

            let started = Instant::now();
            let result = self.verify(case);
            let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            let (level, outcome) = if result.passed {
                (LogLevel::Info, Outcome::Pass)
            } else if result.actual.starts_with(UNSUPPORTED_PREFIX) {
                (LogLevel::Error, Outcome::Error)
            } else {
                (LogLevel::Warn, Outcome::Fail)
            };
            let mut details = serde_json::json!({"case": case.name});
            if !result.passed {
                details["expected"] = result.expected.clone().into();
                details["actual"] = result.actual.clone().into();
            }
            let mut entry = entry
                .with_outcome(outcome)
                .with_duration_ms(elapsed)
                .with_details(details);
            entry.level = level;
            log.emit_entry(entry)?;
            results.push(result);
        }
        Ok(results)
    }

    fn verify(&self, case: &FixtureCase) -> VerificationResult {
        let (actual, diff) = execute_case(case, self.mode);
        VerificationResult {
            case_name: case.name.clone(),
            function: case.function.clone(),
            spec_section: case.spec_section.clone(),
            mode: self.mode.as_str().to_string(),
            passed: actual == case.expected_output,
            expected: case.expected_output.clone(),
            actual,
            diff,
        }
    }
}

/// Whether a case tagged `case_mode` runs at `active`.
#[must_use]
pub fn mode_matches(active: CompatLevel, case_mode: &str) -> bool {
    case_mode.eq_ignore_ascii_case("both") || case_mode.eq_ignore_ascii_case(active.as_str())
}

fn execute_case(case: &FixtureCase, mode: CompatLevel) -> (String, Option<String>) {
    match execute_fixture_case(&case.function, &case.inputs, mode) {
        Ok(run) => {
            let diff_out = if run.output != case.expected_output {
                let mut d = diff::render_diff(&case.expected_output, &run.output);
                if let Some(note) = &run.note {
                    d.push_str(&format!("note: {note}\n"));
                }
                Some(d)
            } else {
                run.note
            };
            (run.output, diff_out)
        }
        Err(err) => {
            let actual = format!("{UNSUPPORTED_PREFIX}{err}");
            let diff_out = Some(diff::render_diff(&case.expected_output, &actual));
            (actual, diff_out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structured_log::validate_log_line;

    const HEX_SET: &str = r#"{
        "version":"v1",
        "family":"stdlib",
        "captured_at":"2026-10-14T00:00:00Z",
        "cases":[
            {"name":"hex_zero_strict","function":"unsigned_to_hex","spec_section":"4.2","inputs":{"value":0},"expected_output":"0","mode":"strict"},
            {"name":"hex_zero_reference","function":"unsigned_to_hex","spec_section":"4.2","inputs":{"value":0},"expected_output":"","mode":"reference"},
            {"name":"hex_ff","function":"unsigned_to_hex","spec_section":"4.2","inputs":{"value":255},"expected_output":"FF","mode":"both"}
        ]
    }"#;

    #[test]
    fn each_level_runs_its_cases() {
        let set = FixtureSet::from_json(HEX_SET).unwrap();

        let strict = TestRunner::new("smoke", CompatLevel::Strict).run(&set);
        let names: Vec<_> = strict.iter().map(|r| r.case_name.as_str()).collect();
        assert_eq!(names, ["hex_zero_strict", "hex_ff"]);
        assert!(strict.iter().all(|r| r.passed));

        let reference = TestRunner::new("smoke", CompatLevel::Reference).run(&set);
        let names: Vec<_> = reference.iter().map(|r| r.case_name.as_str()).collect();
        assert_eq!(names, ["hex_zero_reference", "hex_ff"]);
        assert!(reference.iter().all(|r| r.passed && r.mode == "reference"));
    }

    #[test]
    fn mismatch_renders_a_diff() {
        let mut set = FixtureSet::from_json(HEX_SET).unwrap();
        set.cases[2].expected_output = "ff".into();
        let results = TestRunner::new("smoke", CompatLevel::Strict).run(&set);
        let failed = &results[1];
        assert!(!failed.passed);
        assert_eq!(failed.actual, "FF");
        assert!(failed.diff.as_deref().unwrap().contains("-ff\n+FF\n"));
    }

    #[test]
    fn unknown_function_is_recorded_as_unsupported() {
        let mut set = FixtureSet::from_json(HEX_SET).unwrap();
        set.cases[2].function = "sprintf".into();
        let results = TestRunner::new("smoke", CompatLevel::Strict).run(&set);
        assert!(results[1].actual.starts_with(UNSUPPORTED_PREFIX));
    }

    #[test]
    fn logged_run_emits_one_entry_per_case() {
        let set = FixtureSet::from_json(HEX_SET).unwrap();
        let mut log = LogEmitter::to_buffer("smoke", "run-1");
        let results = TestRunner::new("smoke", CompatLevel::Reference)
            .run_logged(&set, &mut log)
            .unwrap();
        assert_eq!(results.len(), 2);

        let text = std::str::from_utf8(log.buffer().unwrap()).unwrap();
        let entries: Vec<_> = text
            .lines()
            .enumerate()
            .map(|(i, line)| validate_log_line(line, i + 1).unwrap())
            .collect();
        let outcomes: Vec<_> = entries.iter().map(|e| e.outcome).collect();
        assert_eq!(
            outcomes,
            [Some(Outcome::Skip), Some(Outcome::Pass), Some(Outcome::Pass)]
        );
        assert!(entries.iter().all(|e| e.mode.as_deref() == Some("reference")));
        assert_eq!(entries[1].symbol.as_deref(), Some("unsigned_to_hex"));
        assert_eq!(entries[2].trace_id, "smoke::run-1::003");
    }

    #[test]
    fn mode_matching() {
        assert!(mode_matches(CompatLevel::Strict, "both"));
        assert!(mode_matches(CompatLevel::Reference, "Reference"));
        assert!(!mode_matches(CompatLevel::Strict, "reference"));
    }
}
