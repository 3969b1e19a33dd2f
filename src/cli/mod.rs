pub mod commands;

use clap::{Parser, Subcommand};
use eyre::Result;

pub use commands::{BuildCommand, CompletionCommand, GetconfigCommand};

/// A tool for zsh that automatically sets completion commands set by the user
#[derive(Debug, Parser)]
#[command(
    name = "custom-completion-zsh",
    version,
    arg_required_else_help = true,
    long_about = "A tool for zsh that automatically sets completion commands set by the user\nLinux only"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Get config
    Getconfig(GetconfigCommand),
    /// Build completion files for every configured tool
    Build(BuildCommand),
    /// Generate the autocompletion script for the specified shell
    Completion(CompletionCommand),
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Getconfig(cmd) => cmd.execute(),
            Commands::Build(cmd) => cmd.execute().await,
            Commands::Completion(cmd) => cmd.execute(),
        }
    }
}
