// src/exec/mod.rs

//! Job execution.
//!
//! - [`job`] defines the [`Job`] trait the scheduler invokes, and the
//!   [`JobHandle`] wrapper stored in specifications.
//! - [`command`] provides [`CommandJob`], which runs a shell command via
//!   `tokio::process::Command`.

pub mod command;
pub mod job;

pub use command::{CommandJob, JOB_NAME_ENV};
pub use job::{Job, JobFuture, JobHandle};
