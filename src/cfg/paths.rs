use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use super::error::{ConfigResult, no_home_error};

pub const APP_DIR: &str = "custom-completion-zsh";
pub const CONFIG_FILE: &str = "config.toml";

/// Snapshot of the environment variables used to locate the config file and
/// the completion output directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paths {
    pub xdg_config_home: Option<PathBuf>,
    pub xdg_data_home: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

impl Paths {
    pub fn from_env() -> Self {
        Self {
            xdg_config_home: non_empty(env::var_os("XDG_CONFIG_HOME")),
            xdg_data_home: non_empty(env::var_os("XDG_DATA_HOME")),
            home: non_empty(env::var_os("HOME")).or_else(dirs::home_dir),
        }
    }

    fn home(&self) -> ConfigResult<&PathBuf> {
        self.home.as_ref().ok_or_else(no_home_error)
    }

    /// `$XDG_CONFIG_HOME`, falling back to `$HOME/.config`
    pub fn config_home(&self) -> ConfigResult<PathBuf> {
        match &self.xdg_config_home {
            Some(dir) => Ok(dir.clone()),
            None => Ok(self.home()?.join(".config")),
        }
    }

    /// `$XDG_DATA_HOME`, falling back to `$HOME/.local/share`
    pub fn data_home(&self) -> ConfigResult<PathBuf> {
        match &self.xdg_data_home {
            Some(dir) => Ok(dir.clone()),
            None => Ok(self.home()?.join(".local").join("share")),
        }
    }

    pub fn config_path(&self) -> ConfigResult<PathBuf> {
        Ok(self.config_home()?.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn compfile_dir(&self) -> ConfigResult<PathBuf> {
        Ok(self.data_home()?.join("zsh").join(APP_DIR))
    }
}
