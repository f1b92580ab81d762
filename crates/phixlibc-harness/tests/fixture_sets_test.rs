//! Runs the checked-in fixture sets at both compatibility levels.

use std::collections::BTreeSet;
use std::path::PathBuf;

use phixlibc_core::CompatLevel;
use phixlibc_harness::TestRunner;
use phixlibc_harness::execute::SUPPORTED_FUNCTIONS;
use phixlibc_harness::fixtures::{FixtureSet, load_fixture_sets};
use phixlibc_harness::verify::VerificationSummary;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn load() -> Vec<FixtureSet> {
    load_fixture_sets(&fixture_dir()).expect("fixture sets load")
}

fn run_all(level: CompatLevel) -> VerificationSummary {
    let runner = TestRunner::new("fixture-sets-test", level);
    let results = load().iter().flat_map(|set| runner.run(set)).collect();
    VerificationSummary::from_results(results)
}

fn assert_all_pass(summary: &VerificationSummary) {
    let failures: Vec<String> = summary
        .failures()
        .map(|r| {
            format!(
                "{} [{}]: expected {:?}, got {:?}",
                r.case_name, r.mode, r.expected, r.actual
            )
        })
        .collect();
    assert!(failures.is_empty(), "failing cases:\n{}", failures.join("\n"));
}

#[test]
fn strict_fixtures_pass() {
    let summary = run_all(CompatLevel::Strict);
    assert!(summary.total > 0);
    assert_all_pass(&summary);
}

#[test]
fn reference_fixtures_pass() {
    let summary = run_all(CompatLevel::Reference);
    assert!(summary.total > 0);
    assert_all_pass(&summary);
}

#[test]
fn every_supported_function_has_fixtures() {
    let covered: BTreeSet<String> = load()
        .iter()
        .flat_map(|set| set.cases.iter().map(|c| c.function.clone()))
        .collect();
    for function in SUPPORTED_FUNCTIONS {
        assert!(covered.contains(*function), "no fixture exercises {function}");
    }
}

#[test]
fn case_names_are_unique_and_modes_valid() {
    let mut names = BTreeSet::new();
    for set in load() {
        for case in &set.cases {
            assert!(
                names.insert(case.name.clone()),
                "duplicate case name {}",
                case.name
            );
            assert!(
                ["strict", "reference", "both"].contains(&case.mode.as_str()),
                "{} has mode {}",
                case.name,
                case.mode
            );
        }
    }
}

#[test]
fn quirk_cases_split_by_level() {
    let strict: BTreeSet<String> = run_all(CompatLevel::Strict)
        .results
        .into_iter()
        .map(|r| r.case_name)
        .collect();
    assert!(strict.contains("hex_zero_strict"));
    assert!(!strict.contains("hex_zero_reference"));

    let reference: BTreeSet<String> = run_all(CompatLevel::Reference)
        .results
        .into_iter()
        .map(|r| r.case_name)
        .collect();
    assert!(reference.contains("atoi_inner_zero_reference"));
    assert!(!reference.contains("atoi_negative_strict"));
}

#[test]
fn single_file_path_loads_one_set() {
    let sets = load_fixture_sets(&fixture_dir().join("string.json")).unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].family, "string");
}
