// src/dag/scheduler.rs

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::dag::graph::DagGraph;
use crate::engine::JobName;
use crate::errors::ScheduleError;

/// Per-job scheduling state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeState {
    /// Dependencies not yet completed.
    unmet: usize,
    has_run: bool,
}

/// Frontier scheduler: the immutable graph plus mutable per-job counters.
///
/// It is synchronous and performs no IO. The engine asks for a frontier,
/// runs it, reports it back with [`Scheduler::complete_round`], and repeats.
/// Counters only change inside `complete_round`, so a frontier is never
/// computed from a half-updated state.
#[derive(Debug)]
pub struct Scheduler {
    graph: DagGraph,
    state: BTreeMap<JobName, NodeState>,
    rounds: usize,
}

impl Scheduler {
    pub fn new(graph: DagGraph) -> Self {
        for (job, dep) in graph.unknown_dependencies() {
            warn!(
                job = %job,
                dep = %dep,
                "job depends on an unknown job; it will never become runnable"
            );
        }

        let state = graph
            .jobs()
            .map(|name| {
                (
                    name.to_string(),
                    NodeState {
                        unmet: graph.dependencies_of(name).len(),
                        has_run: false,
                    },
                )
            })
            .collect();

        Self {
            graph,
            state,
            rounds: 0,
        }
    }

    pub fn graph(&self) -> &DagGraph {
        &self.graph
    }

    /// Number of rounds handed out so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Whether every job has run.
    pub fn is_done(&self) -> bool {
        self.state.values().all(|s| s.has_run)
    }

    /// Jobs that have not run yet, in lexical order.
    pub fn pending(&self) -> Vec<JobName> {
        self.state
            .iter()
            .filter(|(_, s)| !s.has_run)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Remaining unmet dependencies of a job, or `None` if it is unknown.
    pub fn unmet_of(&self, name: &str) -> Option<usize> {
        self.state.get(name).map(|s| s.unmet)
    }

    /// The opening frontier. Fails with `NoStart` when no job is free of
    /// dependencies.
    pub fn first_frontier(&mut self) -> Result<Vec<JobName>, ScheduleError> {
        let frontier = self.ready();
        if frontier.is_empty() {
            warn!(jobs = self.state.len(), "no job without dependencies; nothing can start");
            return Err(ScheduleError::NoStart);
        }

        self.rounds = 1;
        info!(round = self.rounds, jobs = ?frontier, "initial frontier");
        Ok(frontier)
    }

    /// The frontier of the next round.
    ///
    /// - `Ok(None)`: every job has run.
    /// - `Ok(Some(frontier))`: jobs to run next, in lexical order.
    /// - `Err(CircularDependency)`: jobs remain but none can run.
    pub fn next_frontier(&mut self) -> Result<Option<Vec<JobName>>, ScheduleError> {
        if self.is_done() {
            debug!(rounds = self.rounds, "all jobs have run");
            return Ok(None);
        }

        let frontier = self.ready();
        if frontier.is_empty() {
            let blocked = self.pending();
            let cycles = self.graph.cycles_among(&blocked);
            warn!(?blocked, ?cycles, "schedule stalled with jobs left to run");
            return Err(ScheduleError::CircularDependency { blocked, cycles });
        }

        self.rounds += 1;
        info!(round = self.rounds, jobs = ?frontier, "next frontier");
        Ok(Some(frontier))
    }

    /// Mark a finished round: each job is flagged as run and every dependent
    /// loses one unmet dependency per occurrence of the job in its `after`.
    pub fn complete_round(&mut self, completed: &[JobName]) {
        for name in completed {
            match self.state.get_mut(name) {
                Some(s) => s.has_run = true,
                None => {
                    warn!(job = %name, "completion for unknown job; ignoring");
                    continue;
                }
            }

            for dependent in self.graph.dependents_of(name) {
                if let Some(s) = self.state.get_mut(dependent) {
                    if !s.has_run {
                        s.unmet = s.unmet.saturating_sub(1);
                        debug!(job = %dependent, unmet = s.unmet, satisfied_by = %name, "dependency satisfied");
                    }
                }
            }
        }
    }

    /// Compute every round up front without running anything.
    pub fn plan(mut self) -> Result<Vec<Vec<JobName>>, ScheduleError> {
        let mut rounds = Vec::new();
        let mut frontier = self.first_frontier()?;

        loop {
            self.complete_round(&frontier);
            rounds.push(frontier);

            match self.next_frontier()? {
                Some(next) => frontier = next,
                None => return Ok(rounds),
            }
        }
    }

    /// Not-yet-run jobs with no unmet dependencies.
    fn ready(&self) -> Vec<JobName> {
        self.state
            .iter()
            .filter(|(_, s)| !s.has_run && s.unmet == 0)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
