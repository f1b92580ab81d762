//! CLI entrypoint for the phixlibc conformance harness.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand, ValueEnum};
use phixlibc_core::CompatLevel;
use phixlibc_core::stdio::{self, CharSink};
use phixlibc_harness::execute::parse_cli_arg;
use phixlibc_harness::fixtures::load_fixture_sets;
use phixlibc_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, now_utc, validate_log_file,
};
use phixlibc_harness::verify::VerificationSummary;
use phixlibc_harness::{ConformanceReport, TestRunner};

/// Conformance tooling for phixlibc.
#[derive(Debug, Parser)]
#[command(name = "phixlibc-harness")]
#[command(about = "Conformance testing harness for phixlibc")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the core against fixture sets.
    Verify {
        /// Fixture JSON file, or a directory of them.
        #[arg(long)]
        fixture: PathBuf,
        /// Compatibility level(s) to run.
        #[arg(long, value_enum, env = "PHIXLIBC_MODE", default_value = "both")]
        mode: ModeArg,
        /// Output report path (markdown; a `.json` sibling is written too).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Artifact index path listing the report and log with their digests.
        #[arg(long)]
        artifact_index: Option<PathBuf>,
    },
    /// Validate a structured JSONL log.
    ValidateLog {
        #[arg(long)]
        log: PathBuf,
    },
    /// Render one format string to stdout.
    ///
    /// Arguments are `i:<n>`, `u:<n>`, `c:<char>`, `s:<text>`, a bare
    /// integer, or any other text (a string).
    Printf {
        #[arg(long)]
        fmt: String,
        #[arg(long, value_enum, env = "PHIXLIBC_MODE", default_value = "strict")]
        mode: LevelArg,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Strict,
    Reference,
    Both,
}

impl ModeArg {
    fn levels(self) -> &'static [CompatLevel] {
        match self {
            Self::Strict => &[CompatLevel::Strict],
            Self::Reference => &[CompatLevel::Reference],
            Self::Both => &[CompatLevel::Strict, CompatLevel::Reference],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Reference => "reference",
            Self::Both => "strict+reference",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    Strict,
    Reference,
}

impl From<LevelArg> for CompatLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Strict => Self::Strict,
            LevelArg::Reference => Self::Reference,
        }
    }
}

struct Collect(Vec<u8>);

impl CharSink for Collect {
    fn put_char(&mut self, c: u8) {
        self.0.push(c);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            mode,
            report,
            log,
            artifact_index,
        } => verify(&fixture, mode, report, log, artifact_index)?,
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{err}");
            }
            eprintln!("{}: {lines} lines, {} errors", log.display(), errors.len());
            if !errors.is_empty() {
                return Err("structured log validation failed".into());
            }
        }
        Command::Printf { fmt, mode, args } => {
            let args = args
                .iter()
                .map(|raw| parse_cli_arg(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let mut out = Collect(Vec::new());
            let written = stdio::format(&mut out, fmt.as_bytes(), &args, mode.into())?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&out.0)?;
            writeln!(stdout)?;
            eprintln!("{written} bytes");
        }
    }
    Ok(())
}

fn verify(
    fixture: &Path,
    mode: ModeArg,
    report: Option<PathBuf>,
    log: Option<PathBuf>,
    artifact_index: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!(
        "Verifying against fixtures in {} ({})",
        fixture.display(),
        mode.label()
    );
    let fixture_sets = load_fixture_sets(fixture)?;

    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let run_id = format!("run-{secs}");
    let mut emitter = match &log {
        Some(path) => Some(LogEmitter::to_file(path, "conformance", &run_id)?),
        None => None,
    };

    let mut results = Vec::new();
    for &level in mode.levels() {
        let runner = TestRunner::new("fixture-verify", level);
        for set in &fixture_sets {
            match emitter.as_mut() {
                Some(emitter) => results.extend(runner.run_logged(set, emitter)?),
                None => results.extend(runner.run(set)),
            }
        }
    }

    let summary = VerificationSummary::from_results(results);
    let report_doc = ConformanceReport {
        title: String::from("phixlibc Conformance Report"),
        mode: mode.label().to_string(),
        timestamp: now_utc(),
        summary,
    };
    eprintln!(
        "Verification complete: total={}, passed={}, failed={}",
        report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
    );

    let mut artifacts: Vec<(PathBuf, &str)> = Vec::new();
    if let Some(emitter) = emitter.as_mut() {
        let level = if report_doc.summary.all_passed() {
            LogLevel::Info
        } else {
            LogLevel::Error
        };
        emitter.emit_entry(
            LogEntry::new("", level, "run_complete").with_details(serde_json::json!({
                "modes": mode.label(),
                "total": report_doc.summary.total,
                "passed": report_doc.summary.passed,
                "failed": report_doc.summary.failed,
            })),
        )?;
        emitter.flush()?;
    }
    if let Some(path) = &log {
        artifacts.push((path.clone(), "log"));
    }
    if let Some(report_path) = report {
        eprintln!("Writing report to {}", report_path.display());
        std::fs::write(&report_path, report_doc.to_markdown())?;
        let json_path = report_path.with_extension("json");
        std::fs::write(&json_path, report_doc.to_json())?;
        artifacts.push((report_path, "report"));
        artifacts.push((json_path, "report"));
    }
    if let Some(index_path) = artifact_index {
        let mut index = ArtifactIndex::new(&run_id);
        for (path, kind) in &artifacts {
            index.add_file(path, *kind, None)?;
        }
        std::fs::write(&index_path, index.to_json()?)?;
        eprintln!("Wrote artifact index to {}", index_path.display());
    }

    if !report_doc.summary.all_passed() {
        for failure in report_doc.summary.failures() {
            eprintln!("FAIL {} [{}]", failure.case_name, failure.mode);
            if let Some(diff) = &failure.diff {
                eprintln!("{diff}");
            }
        }
        return Err("Conformance verification failed".into());
    }
    Ok(())
}
