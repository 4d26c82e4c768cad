use super::{CollectedSpec, Step, Wizard};
use crate::cli::ContractKind;
use anyhow::{anyhow, bail, Context, Result};
use std::io::{BufRead, Write};

/// Ask questions on `prompts` and read one answer per line from `input`
/// until the wizard is done. Rejected answers are explained and re-asked.
pub fn run_wizard<R, W>(
    kind: Option<ContractKind>,
    mut input: R,
    mut prompts: W,
) -> Result<CollectedSpec>
where
    R: BufRead,
    W: Write,
{
    let mut wizard = Wizard::new(kind);
    let mut ask = true;
    while wizard.step() != Step::Done {
        if ask {
            writeln!(prompts, "{}", wizard.prompt()).context("write prompt")?;
        }
        write!(prompts, "> ").context("write prompt")?;
        prompts.flush().context("flush prompt")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("read answer")?;
        if read == 0 {
            bail!("input ended while waiting for an answer ({:?})", wizard.step());
        }
        match wizard.feed(&line) {
            Ok(_) => ask = true,
            Err(err) => {
                writeln!(prompts, "{err}").context("write prompt")?;
                ask = false;
            }
        }
    }
    writeln!(prompts, "Generating contract...").context("write prompt")?;
    wizard
        .finish()
        .ok_or_else(|| anyhow!("wizard stopped before a spec was complete"))
}
