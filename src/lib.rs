// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod spec;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::engine::{JobName, RunOptions, Runner};
use crate::errors::Result;

pub use crate::engine::schedule;
pub use crate::errors::{RundagError, ScheduleError};
pub use crate::exec::{Job, JobHandle};
pub use crate::spec::SpecValue;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - run options (CLI flags override `[config]`)
/// - either a dry-run plan or a full run through the engine
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = &args.config;
    let cfg = load_and_validate(config_path)?;

    let options = RunOptions {
        max_parallel: args
            .max_parallel
            .map(|n| n as usize)
            .or(cfg.config.max_parallel),
        target: args.job.clone(),
    };
    debug!(?options, config = %config_path.display(), "resolved run options");

    let runner = Runner::new(options);

    if args.dry_run {
        let rounds = runner.plan(cfg.spec)?;
        print_dry_run(&rounds);
        return Ok(());
    }

    let completed = runner.run(cfg.spec).await?;
    info!(order = ?completed, "run finished");
    Ok(())
}

/// Simple dry-run output: one line per round.
fn print_dry_run(rounds: &[Vec<JobName>]) {
    println!("rundag dry-run");
    println!();

    let total: usize = rounds.iter().map(Vec::len).sum();
    println!("jobs ({total}), rounds ({}):", rounds.len());
    for (idx, round) in rounds.iter().enumerate() {
        println!("  {}: {}", idx + 1, round.join(", "));
    }

    debug!("dry-run complete (no execution)");
}
