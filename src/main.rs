use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

mod cli;
mod fields;
mod output;
mod render;
mod spec;
mod wizard;

use cli::{Command, ContractKind, NewArgs, RootArgs};
use spec::{load_spec, ArbiterSpec, ObligationSpec};
use wizard::{run_wizard, CollectedSpec};

fn main() -> Result<()> {
    init_tracing();
    let args = RootArgs::parse();

    match args.command {
        Command::New(args) => cmd_new(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn cmd_new(args: &NewArgs) -> Result<()> {
    let spec = collect_spec(args)?;
    spec.validate()
        .with_context(|| format!("invalid spec for {}", spec.name()))?;
    if let Some(path) = &args.save_spec {
        output::write_spec(path, &spec)?;
        eprintln!("Saved spec to {}", path.display());
    }
    let source = spec.compose();

    match &args.out_dir {
        Some(out_dir) => {
            let path = output::write_contract(out_dir, spec.name(), &source, args.force)?;
            eprintln!("Wrote {}", path.display());
        }
        None => output::print_contract(io::stdout().lock(), &source)?,
    }
    Ok(())
}

fn collect_spec(args: &NewArgs) -> Result<CollectedSpec> {
    if let Some(path) = &args.spec {
        let spec = match args.kind {
            Some(ContractKind::Obligation) => {
                CollectedSpec::Obligation(load_spec::<ObligationSpec>(path)?)
            }
            Some(ContractKind::Arbiter) => CollectedSpec::Arbiter(load_spec::<ArbiterSpec>(path)?),
            None => anyhow::bail!("--spec needs a contract kind (obligation or arbiter)"),
        };
        tracing::debug!(path = %path.display(), name = spec.name(), "loaded spec");
        return Ok(spec);
    }
    run_wizard(args.kind, io::stdin().lock(), io::stderr())
}
