// src/dag/mod.rs

//! Dependency graph and frontier scheduling.
//!
//! - [`graph`] builds the job graph (dependencies and dependents) from
//!   normalized job entries.
//! - [`scheduler`] holds the per-job unmet-dependency counters and decides
//!   which jobs make up each round.

pub mod graph;
pub mod scheduler;

pub use graph::DagGraph;
pub use scheduler::Scheduler;
