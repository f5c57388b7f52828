// src/config/mod.rs

//! Configuration loading for rundag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Check `[config]` and convert `[job]` into a job specification
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, ConfigSection, RawConfigFile};
pub use validate::{CMD_KEY, jobs_to_spec};
