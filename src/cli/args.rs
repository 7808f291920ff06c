//! Defines the command-line arguments and subcommands for the combinatorial CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "combinatorial",
    version,
    about = "Resolve parameter values and enumerate test combinations from a plan file."
)]
pub struct CombinatorialArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the resolved values of every parameter in a plan.
    Values {
        /// The path to the YAML or JSON plan file.
        #[arg(required = true)]
        plan: PathBuf,
        /// Maximum number of values printed per parameter.
        #[arg(long, default_value_t = 32)]
        limit: usize,
    },
    /// Print the combinations of a plan, one per line.
    Combinations {
        /// The path to the YAML or JSON plan file.
        #[arg(required = true)]
        plan: PathBuf,
        /// Maximum number of combinations printed.
        #[arg(long, default_value_t = 1000)]
        limit: usize,
        /// Print each combination as a JSON object.
        #[arg(long)]
        json: bool,
    },
}
