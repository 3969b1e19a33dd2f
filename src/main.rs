use clap::Parser;
use custom_completion_zsh::Cli;
use env_logger::Target;
use eyre::{Report, Result};
use log::{error, info};
use std::fs::OpenOptions;

fn setup_logging() -> Result<(), Report> {
    let log_dir = dirs::data_local_dir()
        .ok_or_else(|| eyre::eyre!("Could not determine local data directory"))?
        .join("custom-completion-zsh")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;
    let log_file_path = log_dir.join("custom-completion-zsh.log");

    let log_file = OpenOptions::new().create(true).append(true).open(&log_file_path)?;

    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"))
        .target(Target::Pipe(Box::new(log_file)))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A missing log directory should not stop a build
    if let Err(e) = setup_logging() {
        eprintln!("Failed to setup logging: {e}");
    }
    info!("Starting custom-completion-zsh");

    if let Err(e) = cli.execute().await {
        error!("{e:#}");
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
