//! Configuration file discovery and loading
//!
//! Values are resolved in priority order:
//! 1. CLI arguments
//! 2. Environment variables
//! 3. A TOML config file (see [`find_config_file`])
//! 4. Built-in defaults

use std::env;
use std::path::PathBuf;

use log::debug;
use serde::de::DeserializeOwned;

use crate::{fs::read_file, APP_NAME};

/// Where the configuration file was found
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Path given on the command line or through the config env var
    Explicit(PathBuf),
    /// Found in the current working directory
    CurrentDir(PathBuf),
    /// Found under `$XDG_CONFIG_HOME/temp-forecaster/`
    XdgConfig(PathBuf),
    /// Found under `/etc/temp-forecaster/`
    System(PathBuf),
    /// No file, built-in defaults apply
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Locate a configuration file
///
/// Search order:
/// 1. `env_var` (e.g. `TEMP_FORECASTER_CONFIG`) if it points at an existing file
/// 2. `./<filename>`
/// 3. `$XDG_CONFIG_HOME/temp-forecaster/<filename>` (or `~/.config/...`)
/// 4. `/etc/temp-forecaster/<filename>`
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    if let Ok(path) = env::var(env_var) {
        let p = PathBuf::from(&path);
        if p.exists() {
            return ConfigSource::Explicit(p);
        }
        debug!("{} points at missing file {}, ignoring", env_var, path);
    }

    let local = PathBuf::from(filename);
    if local.exists() {
        return ConfigSource::CurrentDir(local);
    }

    let xdg_path = xdg_config_path(filename);
    if xdg_path.exists() {
        return ConfigSource::XdgConfig(xdg_path);
    }

    let system = PathBuf::from(format!("/etc/{}/{}", APP_NAME, filename));
    if system.exists() {
        return ConfigSource::System(system);
    }

    ConfigSource::Defaults
}

fn xdg_config_path(filename: &str) -> PathBuf {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join(APP_NAME).join(filename)
    } else if let Ok(home) = env::var("HOME") {
        PathBuf::from(home)
            .join(".config")
            .join(APP_NAME)
            .join(filename)
    } else {
        PathBuf::from(format!(".config/{}/{}", APP_NAME, filename))
    }
}

/// Parse the TOML file behind `source`, or return `T::default()` when there is none
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    match source.path() {
        Some(path) => {
            let content = read_file(path)?;
            let config: T = toml::from_str(&content)?;
            Ok(config)
        }
        None => Ok(T::default()),
    }
}
