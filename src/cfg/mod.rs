pub mod config;
pub mod error;
pub mod paths;

pub use config::{Config, ToolEntry};
pub use paths::Paths;
