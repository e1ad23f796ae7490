//! Filesystem helpers

use std::fs;
use std::path::Path;

use log::debug;

/// Read a whole file into a string, logging what was read
pub fn read_file(path: impl AsRef<Path>) -> std::io::Result<String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Check if a path is a directory
pub fn is_directory(path: &str) -> bool {
    Path::new(path).is_dir()
}
