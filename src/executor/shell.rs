use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

pub const DEFAULT_SHELL: &str = "/bin/zsh";

/// Captured result of running one tool's exec command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// `None` when the process was killed by a signal or never started
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Runs a command string and captures its output
#[async_trait]
pub trait ShellRunner: Send + Sync {
    /// Never fails: a command that can't be started is reported through
    /// `CommandOutput` like any other failed command.
    async fn run(&self, exec: &str) -> CommandOutput;
}

/// Runs commands as `<shell> -i -c <exec>` so that aliases and functions from
/// the user's shell startup files are available.
#[derive(Debug, Clone)]
pub struct InteractiveShell {
    program: PathBuf,
}

impl InteractiveShell {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ShellRunner for InteractiveShell {
    async fn run(&self, exec: &str) -> CommandOutput {
        debug!("Running {} -i -c {:?}", self.program.display(), exec);

        let result = Command::new(&self.program)
            .arg("-i")
            .arg("-c")
            .arg(exec)
            .stdin(Stdio::null())
            .output()
            .await;

        match result {
            Ok(output) => CommandOutput {
                stdout: output.stdout,
                stderr: output.stderr,
                exit_code: output.status.code(),
            },
            Err(e) => {
                warn!("Failed to spawn {}: {}", self.program.display(), e);
                CommandOutput {
                    stdout: Vec::new(),
                    stderr: format!("failed to spawn {}: {}", self.program.display(), e).into_bytes(),
                    exit_code: None,
                }
            }
        }
    }
}

/// Canned outputs keyed by exec string, for tests
#[derive(Debug, Clone, Default)]
pub struct ScriptedShell {
    outputs: HashMap<String, CommandOutput>,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stdout(mut self, exec: &str, stdout: &str) -> Self {
        self.outputs.insert(
            exec.to_string(),
            CommandOutput {
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
                exit_code: Some(0),
            },
        );
        self
    }

    pub fn with_output(mut self, exec: &str, output: CommandOutput) -> Self {
        self.outputs.insert(exec.to_string(), output);
        self
    }
}

#[async_trait]
impl ShellRunner for ScriptedShell {
    async fn run(&self, exec: &str) -> CommandOutput {
        self.outputs.get(exec).cloned().unwrap_or_else(|| CommandOutput {
            stdout: Vec::new(),
            stderr: format!("command not found: {exec}").into_bytes(),
            exit_code: Some(127),
        })
    }
}
