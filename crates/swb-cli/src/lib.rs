//! # swb-cli — Solver Workbench Command-Line Interface
//!
//! ```bash
//! swb validate optacloud/src/main/resources/cloudbalancing/solver.yaml
//! swb run --deadline-ms 10000 optacloud/src/main/resources/cloudbalancing/solver.yaml
//! swb -vv --config swb.yaml validate --format json a.yaml b.yaml
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `swb-validate`; no validation logic here.
//! - Operational errors use `anyhow` with context; diagnostics are output,
//!   not errors.

pub mod check;
pub mod config;

pub use check::{run_smoke, run_validate, OutputFormat, RunArgs, ValidateArgs};
pub use config::{CliConfig, SmokeTestSettings, DEFAULT_CONFIG_FILE};
