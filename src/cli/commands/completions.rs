//! Completions command - shell completion scripts

use crate::cli::args::Cli;
use crate::error::GeocoinResult;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

/// Execute the completions command
pub async fn execute(shell: Shell) -> GeocoinResult<()> {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "geocoin", &mut io::stdout());
    Ok(())
}
