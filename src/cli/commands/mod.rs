pub mod build;
pub mod completion;
pub mod getconfig;

pub use build::BuildCommand;
pub use completion::CompletionCommand;
pub use getconfig::GetconfigCommand;
