// src/errors.rs

//! Crate-wide error types.
//!
//! - [`ScheduleError`] is what a single scheduling invocation can fail with:
//!   the three validation kinds (invalid shape, no start, circular
//!   dependency) plus propagated job failures.
//! - [`RundagError`] wraps that for the binary, together with config and IO
//!   problems.

use thiserror::Error;

use crate::engine::JobName;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The specification, or one of its entries, has the wrong shape.
    #[error("invalid job object: {reason}")]
    InvalidJobObject { reason: String },

    /// No job is runnable at the outset.
    #[error("no job can start: every job waits on another job")]
    NoStart,

    /// Execution stalled with jobs left that can never become runnable.
    #[error("circular dependency: jobs {blocked:?} can never run (cycles: {cycles:?})")]
    CircularDependency {
        /// Every job that had not run when the schedule stalled.
        blocked: Vec<JobName>,
        /// Strongly connected groups among `blocked`; empty when the stall is
        /// caused only by dependencies on unknown names.
        cycles: Vec<Vec<JobName>>,
    },

    /// A job callable returned an error.
    #[error("job '{job}' failed")]
    JobFailed {
        job: JobName,
        #[source]
        source: anyhow::Error,
    },

    /// A job callable panicked while running.
    #[error("job '{job}' panicked: {message}")]
    JobPanicked { job: JobName, message: String },

    /// A run was restricted to a job that the specification does not define.
    #[error("job not found: {0}")]
    UnknownJob(JobName),
}

impl ScheduleError {
    /// Shorthand for building an [`ScheduleError::InvalidJobObject`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        ScheduleError::InvalidJobObject {
            reason: reason.into(),
        }
    }

    /// `true` for the errors detected from the specification and graph shape
    /// alone, as opposed to errors raised while jobs were running.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidJobObject { .. }
                | ScheduleError::NoStart
                | ScheduleError::CircularDependency { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum RundagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RundagError>;
