use eyre::Result;
use std::io::{self, Write};

use crate::cfg::{Config, Paths};

/// Print the tools from the config file
#[derive(Debug, Default, clap::Args)]
pub struct GetconfigCommand {}

impl GetconfigCommand {
    pub fn execute(&self) -> Result<()> {
        let stdout = io::stdout();
        self.execute_with(&Paths::from_env(), &mut stdout.lock())
    }

    pub fn execute_with(&self, paths: &Paths, out: &mut impl Write) -> Result<()> {
        let config = Config::load(paths)?;
        write_config(&config, out)
    }
}

fn write_config(config: &Config, out: &mut impl Write) -> Result<()> {
    for tool in &config.tool {
        writeln!(out, "tool name: {} exec command: {}", tool.name, tool.exec)?;
    }
    Ok(())
}
