// src/spec/validate.rs

//! Shape checking for job specifications.
//!
//! This is the only place that inspects raw [`SpecValue`]s. Everything
//! downstream works on the normalized [`Jobs`] map.

use std::collections::BTreeMap;

use tracing::debug;

use crate::engine::JobName;
use crate::errors::ScheduleError;
use crate::exec::JobHandle;
use crate::spec::value::SpecValue;

/// Key holding the dependency list in a detailed entry.
pub const AFTER_KEY: &str = "after";
/// Key holding the callable in a detailed entry.
pub const JOB_KEY: &str = "job";

/// A single validated job entry.
#[derive(Debug, Clone)]
pub enum JobEntry {
    /// Bare callable: no dependencies.
    Bare(JobHandle),
    /// Record form: `{ after: [...], job: <callable> }`.
    Detailed { after: Vec<JobName>, job: JobHandle },
}

impl JobEntry {
    /// Names this job waits for, in declaration order.
    pub fn after(&self) -> &[JobName] {
        match self {
            JobEntry::Bare(_) => &[],
            JobEntry::Detailed { after, .. } => after,
        }
    }

    pub fn job(&self) -> &JobHandle {
        match self {
            JobEntry::Bare(job) => job,
            JobEntry::Detailed { job, .. } => job,
        }
    }
}

/// Normalized specification, keyed (and therefore ordered) by job name.
pub type Jobs = BTreeMap<JobName, JobEntry>;

/// Validate a raw specification and normalize every entry.
///
/// Fails fast on the first malformed entry.
pub fn normalize(spec: SpecValue) -> Result<Jobs, ScheduleError> {
    let entries = match spec {
        SpecValue::Record(entries) => entries,
        other => {
            return Err(ScheduleError::invalid(format!(
                "job specification must be a record, got {}",
                other.kind()
            )));
        }
    };

    let mut jobs = Jobs::new();
    for (name, value) in entries {
        let entry = normalize_entry(&name, value)?;
        debug!(job = %name, after = ?entry.after(), "validated job entry");
        jobs.insert(name, entry);
    }

    Ok(jobs)
}

fn normalize_entry(name: &str, value: SpecValue) -> Result<JobEntry, ScheduleError> {
    match value {
        SpecValue::Job(job) => Ok(JobEntry::Bare(job)),
        SpecValue::Record(mut fields) => {
            if let Some(key) = fields.keys().find(|k| *k != AFTER_KEY && *k != JOB_KEY) {
                return Err(ScheduleError::invalid(format!(
                    "job '{}' has unrecognized key '{}'",
                    name, key
                )));
            }

            // A record must carry both keys; a lone `job` uses the bare form.
            let (Some(after), Some(job)) = (fields.remove(AFTER_KEY), fields.remove(JOB_KEY))
            else {
                return Err(ScheduleError::invalid(format!(
                    "job '{}' must have both `{}` and `{}` keys, or be a bare job",
                    name, AFTER_KEY, JOB_KEY
                )));
            };

            let job = match job {
                SpecValue::Job(job) => job,
                other => {
                    return Err(ScheduleError::invalid(format!(
                        "job '{}' has a non-callable `{}` ({})",
                        name,
                        JOB_KEY,
                        other.kind()
                    )));
                }
            };

            Ok(JobEntry::Detailed {
                after: dependency_names(name, after)?,
                job,
            })
        }
        other => Err(ScheduleError::invalid(format!(
            "job '{}' must be a job or a record, got {}",
            name,
            other.kind()
        ))),
    }
}

fn dependency_names(name: &str, after: SpecValue) -> Result<Vec<JobName>, ScheduleError> {
    let items = match after {
        SpecValue::List(items) => items,
        other => {
            return Err(ScheduleError::invalid(format!(
                "job '{}' has `{}` of type {}, expected a list of job names",
                name,
                AFTER_KEY,
                other.kind()
            )));
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            SpecValue::String(dep) => Ok(dep),
            other => Err(ScheduleError::invalid(format!(
                "job '{}' lists a {} in `{}`, expected a job name",
                name,
                other.kind(),
                AFTER_KEY
            ))),
        })
        .collect()
}
