// src/engine/mod.rs

//! Orchestration engine for rundag.
//!
//! The engine takes a raw specification through the whole pipeline:
//! - validation and normalization (`spec`)
//! - graph construction (`dag::graph`)
//! - frontier rounds (`dag::scheduler`), with each round's jobs spawned on
//!   the Tokio runtime and joined before the next round is computed.

/// Canonical job name type used throughout the crate.
pub type JobName = String;

/// Options that influence how a run behaves.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Upper bound on jobs in flight within one round. `None` means the
    /// whole frontier runs at once.
    pub max_parallel: Option<usize>,

    /// Only run this job and the jobs it transitively depends on.
    pub target: Option<JobName>,
}

pub mod runtime;

pub use runtime::{Runner, schedule};
