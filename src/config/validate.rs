// src/config/validate.rs

use std::collections::BTreeMap;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::config::model::{ConfigFile, ConfigSection, RawConfigFile};
use crate::errors::{Result, RundagError};
use crate::exec::CommandJob;
use crate::spec::{JOB_KEY, SpecValue};

/// Key naming the shell command in a `[job.<name>]` table.
pub const CMD_KEY: &str = "cmd";

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RundagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_global_config(&raw.config)?;
        let spec = jobs_to_spec(raw.job);
        Ok(ConfigFile::new_unchecked(raw.config, spec))
    }
}

fn validate_global_config(cfg: &ConfigSection) -> Result<()> {
    match cfg.max_parallel {
        Some(0) => Err(RundagError::ConfigError(
            "[config].max_parallel must be >= 1 (got 0)".to_string(),
        )),
        Some(n) if n > Semaphore::MAX_PERMITS => Err(RundagError::ConfigError(format!(
            "[config].max_parallel must be <= {} (got {n})",
            Semaphore::MAX_PERMITS
        ))),
        _ => Ok(()),
    }
}

/// Turn the raw `[job]` table into a job specification.
///
/// Only the command strings are converted into callables; every other value
/// is passed through so that the specification validator sees, and rejects,
/// malformed jobs.
pub fn jobs_to_spec(jobs: Option<toml::Value>) -> SpecValue {
    match jobs {
        None => SpecValue::record(Vec::<(String, SpecValue)>::new()),
        Some(toml::Value::Table(table)) => SpecValue::record(
            table
                .into_iter()
                .map(|(name, value)| {
                    let entry = job_to_spec(&name, value);
                    (name, entry)
                }),
        ),
        Some(other) => SpecValue::from(other),
    }
}

fn job_to_spec(name: &str, value: toml::Value) -> SpecValue {
    match value {
        // `name = "cmd"` shorthand: a bare job.
        toml::Value::String(cmd) => SpecValue::job(CommandJob::new(cmd)),
        toml::Value::Table(mut table) => {
            let cmd = table.remove(CMD_KEY);
            let mut fields: BTreeMap<String, SpecValue> = table
                .into_iter()
                .map(|(key, value)| (key, SpecValue::from(value)))
                .collect();

            let job = match cmd {
                Some(toml::Value::String(cmd)) => SpecValue::job(CommandJob::new(cmd)),
                Some(other) => SpecValue::from(other),
                None => return SpecValue::Record(fields),
            };

            if fields.is_empty() {
                debug!(job = %name, "job table without dependencies; using bare form");
                return job;
            }

            // An explicit `job` key next to `cmd` leaves `cmd` as an
            // unrecognized key.
            let key = if fields.contains_key(JOB_KEY) { CMD_KEY } else { JOB_KEY };
            fields.insert(key.to_string(), job);
            SpecValue::Record(fields)
        }
        other => SpecValue::from(other),
    }
}
