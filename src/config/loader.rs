// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] to also
/// check `[config]` and build the job specification.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;
    debug!(path = %path.display(), "parsed config file");

    Ok(config)
}

/// Load a configuration file and turn it into a [`ConfigFile`].
///
/// - Reads TOML.
/// - Checks `[config]` values.
/// - Converts `[job]` into a job specification. Job shapes are *not*
///   checked here; the engine reports them as `InvalidJobObject` before any
///   job runs.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Default config location: `Rundag.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Rundag.toml")
}
