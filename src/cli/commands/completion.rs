use clap::CommandFactory;
use clap_complete::{Shell, generate};
use eyre::Result;
use std::io::{self, Write};

use crate::cli::Cli;

/// Print a completion script for this tool
#[derive(Debug, clap::Args)]
pub struct CompletionCommand {
    /// Shell to generate the script for
    #[arg(short, long)]
    pub shell: Shell,
}

impl CompletionCommand {
    pub fn execute(&self) -> Result<()> {
        let stdout = io::stdout();
        self.execute_with(&mut stdout.lock())
    }

    pub fn execute_with(&self, out: &mut impl Write) -> Result<()> {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, out);
        Ok(())
    }
}
