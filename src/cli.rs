//! CLI argument parsing for contract scaffolding.
//!
//! The CLI only routes: it collects a spec (from a file or the wizard),
//! hands it to a composer, and writes the result.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "alkahest",
    version,
    about = "Scaffold obligation and arbiter contracts",
    after_help = "Examples:\n  alkahest new                                 Ask which kind of contract to create\n  alkahest new obligation                      Answer prompts for an obligation\n  alkahest new arbiter --out-dir contracts     Write contracts/<Name>.sol\n  alkahest new obligation --spec payment.json  Generate from a JSON spec without prompts\n  alkahest new arbiter --save-spec arb.json    Keep the answers for a later --spec run",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    New(NewArgs),
}

/// The two contract archetypes the generator knows.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractKind {
    Obligation,
    Arbiter,
}

/// Inputs for generating one contract.
#[derive(Parser, Debug)]
#[command(about = "Create a new contract")]
pub struct NewArgs {
    /// Contract kind; prompted for when omitted
    #[arg(value_enum)]
    pub kind: Option<ContractKind>,

    /// Read the spec from a JSON file instead of prompting
    #[arg(long, value_name = "PATH", requires = "kind")]
    pub spec: Option<PathBuf>,

    /// Write <Name>.sol into this directory instead of printing to stdout
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Also write the collected spec as JSON, reusable with --spec
    #[arg(long, value_name = "PATH")]
    pub save_spec: Option<PathBuf>,

    /// Overwrite an existing contract file
    #[arg(long, requires = "out_dir")]
    pub force: bool,
}
