use eyre::{Result, WrapErr};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use super::shell::{CommandOutput, ShellRunner};
use crate::cfg::{Config, ToolEntry};
use crate::ports::FileSystem;

/// Permissions of every generated completion file (rw-r--r--)
pub const COMPFILE_MODE: u32 = 0o644;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Keep existing completion files instead of regenerating them
    pub keep: bool,
}

/// What happened to a single tool entry during a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The completion file was written; `command` may still have failed
    Written { command: CommandOutput },
    /// `keep` was set and the completion file already existed
    Kept,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub tool: ToolEntry,
    pub outcome: EntryOutcome,
}

impl EntryReport {
    pub fn command_failed(&self) -> bool {
        matches!(&self.outcome, EntryOutcome::Written { command, .. } if !command.success())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub entries: Vec<EntryReport>,
}

impl BuildReport {
    /// Entries whose exec command exited non-zero or could not be started
    pub fn failed_commands(&self) -> Vec<&EntryReport> {
        self.entries.iter().filter(|e| e.command_failed()).collect()
    }
}

/// Regenerates `_<name>` completion files from a [`Config`]
pub struct CompletionBuilder<F: FileSystem, R: ShellRunner> {
    fs: F,
    shell: R,
    output_dir: PathBuf,
}

impl<F: FileSystem, R: ShellRunner> CompletionBuilder<F, R> {
    pub fn new(fs: F, shell: R, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            shell,
            output_dir: output_dir.into(),
        }
    }

    /// Remove the output directory recursively and recreate it empty
    pub async fn clean(&self) -> Result<()> {
        info!("Cleaning {}", self.output_dir.display());
        self.fs
            .remove_dir_all(&self.output_dir)
            .await
            .wrap_err_with(|| format!("failed to remove {}", self.output_dir.display()))?;
        self.fs
            .create_dir_all(&self.output_dir)
            .await
            .wrap_err_with(|| format!("failed to create {}", self.output_dir.display()))?;
        Ok(())
    }

    /// Run every tool entry in order and write its output.
    ///
    /// Command failures are recorded in the report, never raised. A failed
    /// write clears the output directory and aborts the remaining entries.
    pub async fn build(&self, config: &Config, options: &BuildOptions) -> Result<BuildReport> {
        if options.keep {
            self.fs
                .create_dir_all(&self.output_dir)
                .await
                .wrap_err_with(|| format!("failed to create {}", self.output_dir.display()))?;
        } else {
            self.clean().await?;
        }

        let mut entries = Vec::with_capacity(config.tool.len());

        for tool in &config.tool {
            let path = self.output_dir.join(tool.compfile_name());

            if options.keep && self.fs.exists(&path).await {
                info!("Keeping existing {}", path.display());
                entries.push(EntryReport {
                    tool: tool.clone(),
                    outcome: EntryOutcome::Kept,
                });
                continue;
            }

            let command = self.shell.run(&tool.exec).await;
            if !command.success() {
                warn!(
                    "Command for {} exited with {:?}: {}",
                    tool.name,
                    command.exit_code,
                    command.stderr_lossy()
                );
            }

            if let Err(e) = self.write_compfile(&path, &command.stdout).await {
                error!("Failed to write {}: {:#}", path.display(), e);
                if let Err(clean_err) = self.clean().await {
                    error!("Cleanup after failed write also failed: {:#}", clean_err);
                }
                return Err(e);
            }

            info!("Wrote {} ({} bytes)", path.display(), command.stdout.len());
            entries.push(EntryReport {
                tool: tool.clone(),
                outcome: EntryOutcome::Written { command },
            });
        }

        Ok(BuildReport {
            output_dir: self.output_dir.clone(),
            entries,
        })
    }

    async fn write_compfile(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.fs
            .write(path, contents)
            .await
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        self.fs
            .set_permissions(path, COMPFILE_MODE)
            .await
            .wrap_err_with(|| format!("failed to set permissions on {}", path.display()))?;
        Ok(())
    }
}
