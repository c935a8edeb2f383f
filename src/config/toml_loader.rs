//! TOML file loading shared by the settings and desired-state loaders.
use serde::de::DeserializeOwned;
use std::io;
use std::path::Path;

use crate::error::ConfigError;

/// Load a TOML file, treating a missing file as empty.
///
/// # Type Parameters
///
/// - `T`: Target type to deserialize into (must implement `DeserializeOwned`)
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    match read(path) {
        Ok(content) => parse(path, &content),
        Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            parse(path, "")
        }
        Err(e) => Err(e),
    }
}

/// Load a TOML file that must exist.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or cannot be parsed.
pub fn load_required<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = read(path)?;
    parse(path, &content)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message: e.message().to_string(),
    })
}
