pub mod builder;
pub mod shell;

pub use builder::{BuildOptions, BuildReport, CompletionBuilder, EntryOutcome, EntryReport};
pub use shell::{CommandOutput, InteractiveShell, ScriptedShell, ShellRunner};
