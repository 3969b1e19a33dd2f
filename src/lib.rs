pub mod cfg;
pub mod cli;
pub mod executor;
pub mod ports;

pub use cfg::{Config, Paths, ToolEntry};
pub use cli::Cli;
pub use executor::{BuildOptions, BuildReport, CompletionBuilder, EntryOutcome};
