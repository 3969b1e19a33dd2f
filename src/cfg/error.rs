use std::path::Path;

use eyre::{Report, Result, eyre};

pub type ConfigResult<T> = Result<T, Report>;

// Helper functions for creating specific config errors
pub fn config_load_error(path: &Path, source: std::io::Error) -> Report {
    eyre!("failed to decode TOML: {}: {}", path.display(), source)
}

pub fn toml_decode_error(source: toml::de::Error) -> Report {
    eyre!("failed to decode TOML: {}", source)
}

pub fn invalid_tool_name_error(index: usize, name: &str, reason: &str) -> Report {
    eyre!("invalid tool name {:?} in [[tool]] entry {}: {}", name, index + 1, reason)
}

pub fn no_home_error() -> Report {
    eyre!("could not determine home directory; set HOME")
}
