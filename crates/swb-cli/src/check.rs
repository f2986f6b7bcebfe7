//! # Validate and Run Subcommands
//!
//! `swb validate <PATH>...` checks each resource statically.
//! `swb run <PATH>...` also smoke-tests resources of allow-listed projects.
//!
//! Exit code 0 when every resource is clean, 1 when any diagnostic was
//! produced. Operational errors surface as `Err` and become exit code 2 in
//! `main`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use swb_core::{Diagnostic, ResourceRef};
use swb_validate::SolverValidator;

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `OK: path` or `FAIL: path — message` lines.
    #[default]
    Text,
    /// A JSON array of every diagnostic.
    Json,
}

/// Arguments for `swb validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Solver configuration resources to validate.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for `swb run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub check: ValidateArgs,

    /// Abandon a resource that has not finished after this many
    /// milliseconds and report it as failed.
    #[arg(long)]
    pub deadline_ms: Option<u64>,
}

/// Diagnostics produced for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Execute `swb validate`.
pub fn run_validate(args: &ValidateArgs, validator: &SolverValidator) -> Result<u8> {
    let reports = check_all(&args.paths, |resource, content| {
        Ok(validator.validate(resource, content))
    })?;
    emit(&reports, args.format, &mut std::io::stdout().lock())?;
    Ok(exit_code(&reports))
}

/// Execute `swb run`.
pub fn run_smoke(args: &RunArgs, validator: &SolverValidator) -> Result<u8> {
    let deadline = args.deadline_ms.map(Duration::from_millis);
    let reports = check_all(&args.check.paths, |resource, content| match deadline {
        Some(deadline) => run_with_deadline(validator, resource, content, deadline),
        None => Ok(validator.validate_and_run(resource, content)),
    })?;
    emit(&reports, args.check.format, &mut std::io::stdout().lock())?;
    Ok(exit_code(&reports))
}

fn check_all<F>(paths: &[PathBuf], mut check: F) -> Result<Vec<Report>>
where
    F: FnMut(&ResourceRef, &str) -> Result<Vec<Diagnostic>>,
{
    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let (resource, content) = read_resource(path)?;
        let diagnostics = check(&resource, &content)?;
        reports.push(Report {
            path: path.clone(),
            diagnostics,
        });
    }
    Ok(reports)
}

fn read_resource(path: &Path) -> Result<(ResourceRef, String)> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("failed to resolve resource: {}", path.display()))?;
    let content = std::fs::read_to_string(&canonical)
        .with_context(|| format!("failed to read resource: {}", canonical.display()))?;
    Ok((ResourceRef::new(canonical), content))
}

/// Run one resource on a worker thread and stop waiting after `deadline`.
///
/// The worker is detached, not killed; the process exits once every
/// resource has been reported.
pub fn run_with_deadline(
    validator: &SolverValidator,
    resource: &ResourceRef,
    content: &str,
    deadline: Duration,
) -> Result<Vec<Diagnostic>> {
    let (tx, rx) = mpsc::channel();
    let worker = validator.clone();
    let worker_resource = resource.clone();
    let worker_content = content.to_string();
    std::thread::Builder::new()
        .name("swb-smoke".into())
        .spawn(move || {
            let _ = tx.send(worker.validate_and_run(&worker_resource, &worker_content));
        })
        .context("failed to spawn smoke test thread")?;

    match rx.recv_timeout(deadline) {
        Ok(diagnostics) => Ok(diagnostics),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::warn!(
                resource = %resource,
                deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
                "smoke test abandoned"
            );
            Ok(vec![Diagnostic::error(
                resource.clone(),
                format!(
                    "the smoke test did not finish within the deadline of {} ms",
                    deadline.as_millis()
                ),
            )])
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Ok(vec![Diagnostic::error(
            resource.clone(),
            "the smoke test thread stopped without a result",
        )]),
    }
}

fn exit_code(reports: &[Report]) -> u8 {
    if reports.iter().all(|r| r.diagnostics.is_empty()) {
        0
    } else {
        1
    }
}

/// Write `reports` in `format`.
pub fn emit(reports: &[Report], format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                if report.diagnostics.is_empty() {
                    writeln!(out, "OK: {}", report.path.display())?;
                }
                for diagnostic in &report.diagnostics {
                    writeln!(
                        out,
                        "FAIL: {} — {}",
                        report.path.display(),
                        diagnostic.message
                    )?;
                }
            }
        }
        OutputFormat::Json => {
            let all: Vec<&Diagnostic> = reports.iter().flat_map(|r| &r.diagnostics).collect();
            serde_json::to_writer_pretty(&mut *out, &all)
                .context("failed to serialize diagnostics")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reports() -> Vec<Report> {
        let bad = ResourceRef::new("/p/src/main/resources/bad.yaml");
        vec![
            Report {
                path: PathBuf::from("good.yaml"),
                diagnostics: Vec::new(),
            },
            Report {
                path: PathBuf::from("bad.yaml"),
                diagnostics: vec![
                    Diagnostic::error(bad.clone(), "first"),
                    Diagnostic::error(bad, "second"),
                ],
            },
        ]
    }

    #[test]
    fn text_output_has_one_line_per_diagnostic() {
        let mut out = Vec::new();
        emit(&reports(), OutputFormat::Text, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "OK: good.yaml\nFAIL: bad.yaml — first\nFAIL: bad.yaml — second\n"
        );
    }

    #[test]
    fn json_output_is_flat_array() {
        let mut out = Vec::new();
        emit(&reports(), OutputFormat::Json, &mut out).unwrap();
        let parsed: Vec<Diagnostic> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].message, "second");
    }

    #[test]
    fn exit_code_reflects_diagnostics() {
        let mut r = reports();
        assert_eq!(exit_code(&r), 1);
        r.truncate(1);
        assert_eq!(exit_code(&r), 0);
    }

    #[test]
    fn missing_resource_is_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_resource(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to resolve resource"));
    }
}
