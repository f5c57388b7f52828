// src/engine/runtime.rs

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::dag::{DagGraph, Scheduler};
use crate::engine::{JobName, RunOptions};
use crate::errors::ScheduleError;
use crate::spec::{Jobs, SpecValue, normalize};

/// Validate `spec` and run every job in dependency order with default
/// options.
///
/// Resolves with job names in completion order.
pub async fn schedule(spec: SpecValue) -> Result<Vec<JobName>, ScheduleError> {
    Runner::default().run(spec).await
}

/// Drives a specification through validation, graph building and the
/// frontier rounds.
///
/// Each call to [`Runner::run`] builds its own graph; nothing is shared
/// between runs.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    options: RunOptions,
}

impl Runner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Run all jobs (or the selected subgraph) to completion.
    pub async fn run(&self, spec: SpecValue) -> Result<Vec<JobName>, ScheduleError> {
        let jobs = self.prepare(spec)?;
        let mut scheduler = Scheduler::new(DagGraph::from_jobs(&jobs));
        let limiter = self
            .options
            .max_parallel
            .map(|n| Arc::new(Semaphore::new(n.clamp(1, Semaphore::MAX_PERMITS))));

        let mut completed: Vec<JobName> = Vec::with_capacity(jobs.len());
        let mut frontier = scheduler.first_frontier()?;

        loop {
            let round = scheduler.rounds();
            info!(round, jobs = frontier.len(), "running round");

            let finished = run_round(&jobs, &frontier, limiter.as_ref()).await?;
            scheduler.complete_round(&finished);
            completed.extend(finished);

            match scheduler.next_frontier()? {
                Some(next) => frontier = next,
                None => break,
            }
        }

        info!(
            jobs = completed.len(),
            rounds = scheduler.rounds(),
            "all jobs completed"
        );
        Ok(completed)
    }

    /// The rounds a run would execute, without invoking any job.
    pub fn plan(&self, spec: SpecValue) -> Result<Vec<Vec<JobName>>, ScheduleError> {
        let jobs = self.prepare(spec)?;
        Scheduler::new(DagGraph::from_jobs(&jobs)).plan()
    }

    /// Validate and, when a target is set, cut the jobs down to its subgraph.
    fn prepare(&self, spec: SpecValue) -> Result<Jobs, ScheduleError> {
        let mut jobs = normalize(spec)?;

        if let Some(target) = &self.options.target {
            let needed = DagGraph::from_jobs(&jobs).required_for(target)?;
            jobs.retain(|name, _| needed.contains(name));
            debug!(job = %target, jobs = ?needed, "restricted run to target subgraph");
        }

        Ok(jobs)
    }
}

/// Spawn every job of the frontier in order, then wait for all of them.
///
/// Jobs that were already issued are always awaited, even once one of them
/// has failed; the first failure in frontier order is then returned.
async fn run_round(
    jobs: &Jobs,
    frontier: &[JobName],
    limiter: Option<&Arc<Semaphore>>,
) -> Result<Vec<JobName>, ScheduleError> {
    let mut handles: Vec<(JobName, JoinHandle<anyhow::Result<()>>)> =
        Vec::with_capacity(frontier.len());

    for name in frontier {
        let Some(entry) = jobs.get(name) else {
            continue;
        };

        // Owned permit, released when the spawned job settles. The semaphore
        // is never closed, so acquiring only waits.
        let permit = match limiter {
            Some(sem) => Arc::clone(sem).acquire_owned().await.ok(),
            None => None,
        };

        debug!(job = %name, "dispatching job");
        let job = entry.job().clone();
        let job_name = name.clone();
        // `call` runs inside the task so a callable that panics before
        // returning its future is caught by the join like any other panic.
        let handle = tokio::spawn(async move {
            let _permit = permit;
            job.call(&job_name).await
        });
        handles.push((name.clone(), handle));
    }

    let mut finished = Vec::with_capacity(handles.len());
    let mut first_error: Option<ScheduleError> = None;

    for (name, handle) in handles {
        match handle.await {
            Ok(Ok(())) => {
                debug!(job = %name, "job completed");
                finished.push(name);
            }
            Ok(Err(source)) => {
                error!(job = %name, error = %source, "job failed");
                if first_error.is_none() {
                    first_error = Some(ScheduleError::JobFailed { job: name, source });
                }
            }
            Err(join_err) => {
                error!(job = %name, error = %join_err, "job panicked");
                if first_error.is_none() {
                    first_error = Some(ScheduleError::JobPanicked {
                        job: name,
                        message: join_err.to_string(),
                    });
                }
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(finished),
    }
}
