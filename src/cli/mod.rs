//! The combinatorial Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::io;
use std::path::Path;
use std::process;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Command, CombinatorialArgs};
use crate::plan::{MemberRegistry, TestPlan};
use crate::{resolve_values, Combinations, CombinatorialError};

pub mod args;
pub mod output;

/// Environment variable holding the log filter, e.g. `COMBINATORIAL_LOG=debug`.
pub const LOG_ENV_VAR: &str = "COMBINATORIAL_LOG";

/// The main entry point for the CLI.
pub fn run() {
    init_tracing();
    let args = CombinatorialArgs::parse();

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Values { plan, limit } => handle_values(&plan, limit),
        Command::Combinations { plan, limit, json } => handle_combinations(&plan, limit, json),
    };

    if let Err(e) = result {
        output::print_error(e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_plan(path: &Path) -> Result<(TestPlan, Vec<crate::Parameter>), CombinatorialError> {
    let plan = TestPlan::from_path(path)?;
    let parameters = plan.parameters(&MemberRegistry::new())?;
    Ok((plan, parameters))
}

/// Handles the `values` subcommand.
fn handle_values(path: &Path, limit: usize) -> Result<(), CombinatorialError> {
    let (plan, parameters) = load_plan(path)?;
    if let Some(name) = &plan.name {
        output::print_plan_heading(name);
    }
    for parameter in &parameters {
        let values = resolve_values(parameter)?;
        output::print_values(parameter, values, limit);
    }
    Ok(())
}

/// Handles the `combinations` subcommand.
fn handle_combinations(path: &Path, limit: usize, json: bool) -> Result<(), CombinatorialError> {
    let (plan, parameters) = load_plan(path)?;
    if let (Some(name), false) = (&plan.name, json) {
        output::print_plan_heading(name);
    }

    let mut combinations = Combinations::new(&parameters)?;
    let names = combinations.names().to_vec();
    for combination in combinations.by_ref().take(limit) {
        let line = if json {
            output::format_combination_json(&names, &combination)
        } else {
            output::format_combination(&names, &combination)
        };
        output::print_line(&line);
    }
    if combinations.next().is_some() {
        output::print_truncated(limit);
    }
    Ok(())
}
