use colored::Colorize;
use eyre::{Result, eyre};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cfg::{Config, Paths};
use crate::executor::shell::DEFAULT_SHELL;
use crate::executor::{BuildOptions, BuildReport, CompletionBuilder, EntryOutcome, InteractiveShell};
use crate::ports::RealFs;

/// Regenerate every completion file from the config
#[derive(Debug, clap::Args)]
pub struct BuildCommand {
    /// Keep existing completion files
    #[arg(short, long)]
    pub keep: bool,

    /// Don't print progress or the fpath hint
    #[arg(short, long)]
    pub quiet: bool,

    /// Exit with an error if any tool command fails
    #[arg(long)]
    pub strict: bool,

    /// Interpreter used to run each exec command as `<shell> -i -c <exec>`
    #[arg(long, value_name = "PATH", env = "CUSTOM_COMPLETION_ZSH_SHELL", default_value = DEFAULT_SHELL)]
    pub shell: PathBuf,
}

impl BuildCommand {
    pub async fn execute(&self) -> Result<()> {
        let paths = Paths::from_env();
        let config = Config::load(&paths)?;
        let output_dir = paths.compfile_dir()?;

        info!("Building {} completion files into {}", config.tool.len(), output_dir.display());

        let builder = CompletionBuilder::new(RealFs, InteractiveShell::new(&self.shell), output_dir);
        let report = builder.build(&config, &BuildOptions { keep: self.keep }).await?;

        let stdout = io::stdout();
        self.print_report(&report, &mut stdout.lock())?;
        let stderr = io::stderr();
        self.print_failures(&report, &mut stderr.lock())?;

        let failed = report.failed_commands().len();
        if self.strict && failed > 0 {
            return Err(eyre!("{} of {} tool commands failed", failed, report.entries.len()));
        }

        Ok(())
    }

    fn print_report(&self, report: &BuildReport, out: &mut impl Write) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &report.entries {
            let label = match entry.outcome {
                EntryOutcome::Written { .. } => "Completed",
                EntryOutcome::Kept => "Kept",
            };
            writeln!(out, "{}: {}", label, entry.tool.exec)?;
        }
        writeln!(out, "Add {} to your fpath", report.output_dir.display())?;
        Ok(())
    }

    /// Command failures only reach the terminal with `--strict`; otherwise
    /// they stay in the log file.
    fn print_failures(&self, report: &BuildReport, out: &mut impl Write) -> Result<()> {
        if !self.strict {
            return Ok(());
        }

        for entry in report.failed_commands() {
            if let EntryOutcome::Written { command } = &entry.outcome {
                let code = command
                    .exit_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".to_string());
                writeln!(
                    out,
                    "{} command for {} exited with code {}",
                    "warning:".yellow().bold(),
                    entry.tool.name,
                    code
                )?;
            }
        }
        Ok(())
    }
}
