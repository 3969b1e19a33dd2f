use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::error::{ConfigResult, config_load_error, invalid_tool_name_error, toml_decode_error};
use super::paths::Paths;

/// One `[[tool]]` table: the completion file `_<name>` is filled with the
/// stdout of `exec`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub exec: String,
}

impl ToolEntry {
    pub fn new(name: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec: exec.into(),
        }
    }

    /// File name of the completion script, e.g. `_git`
    pub fn compfile_name(&self) -> String {
        format!("_{}", self.name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tool: Vec<ToolEntry>,
}

impl Config {
    /// Load the config file located by `paths`
    pub fn load(paths: &Paths) -> ConfigResult<Self> {
        let config_path = paths.config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| config_load_error(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Config = toml::from_str(content).map_err(toml_decode_error)?;
        config.validate()?;
        debug!("Loaded {} tool entries", config.tool.len());
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        for (index, tool) in self.tool.iter().enumerate() {
            if let Some(reason) = name_problem(&tool.name) {
                return Err(invalid_tool_name_error(index, &tool.name, reason));
            }
        }
        Ok(())
    }
}

fn name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("name must not be empty")
    } else if name == "." || name == ".." {
        Some("name must not be a relative path component")
    } else if name.contains('/') {
        Some("name must not contain '/'")
    } else if name.contains('\0') {
        Some("name must not contain NUL")
    } else {
        None
    }
}
