// src/config/model.rs

use serde::Deserialize;

use crate::spec::SpecValue;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// max_parallel = 4
///
/// [job]
/// setup = "echo setup"
///
/// [job.migrate]
/// cmd = "echo migrating $1"
/// after = ["setup"]
/// ```
///
/// The `[job]` table is kept as a raw TOML value: its shape is checked by the
/// job specification validator, not by serde.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All jobs from `[job]` / `[job.<name>]`.
    #[serde(default)]
    pub job: Option<toml::Value>,
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Maximum number of jobs running at once within a round.
    ///
    /// Unset means every job of a round starts immediately.
    #[serde(default)]
    pub max_parallel: Option<usize>,
}

/// Validated configuration: global settings plus the job specification
/// ready to be handed to the engine.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub spec: SpecValue,
}

impl ConfigFile {
    /// Internal constructor used by validation code.
    pub(crate) fn new_unchecked(config: ConfigSection, spec: SpecValue) -> Self {
        Self { config, spec }
    }
}
