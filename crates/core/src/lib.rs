//! Temperature Forecaster Core Library
//!
//! Shared utilities for the forecaster service:
//! - Configuration loading (XDG-compliant)
//! - File system helpers
//! - Application constants

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::{is_directory, read_file};

/// Application name used for XDG paths
pub const APP_NAME: &str = "temp-forecaster";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default directory holding the model artifacts
pub const DEFAULT_MODEL_DIR: &str = "./models";
