// src/exec/command.rs

//! Jobs backed by a shell command.

use std::process::Stdio;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::exec::job::{Job, JobFuture};

/// Environment variable carrying the job's own name into the process.
pub const JOB_NAME_ENV: &str = "RUNDAG_JOB";

/// A job that runs `cmd` through the platform shell.
///
/// The job name is available to the command both as `$RUNDAG_JOB` and as the
/// first positional argument (`$1`) on Unix shells.
#[derive(Debug, Clone)]
pub struct CommandJob {
    cmd: String,
}

impl CommandJob {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }
}

impl Job for CommandJob {
    fn call(&self, name: &str) -> JobFuture {
        let cmd = self.cmd.clone();
        let name = name.to_string();
        Box::pin(async move { run_command(&name, &cmd).await })
    }
}

async fn run_command(name: &str, cmd_line: &str) -> Result<()> {
    info!(job = %name, cmd = %cmd_line, "starting job process");

    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd_line);
        c
    } else {
        let mut c = Command::new("sh");
        // `sh -c <cmd> <$0> <$1>`: the job name lands in `$1`.
        c.arg("-c").arg(cmd_line).arg("rundag").arg(name);
        c
    };

    cmd.env(JOB_NAME_ENV, name)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for job '{}'", name))?;

    let stdout_task = child.stdout.take().map(|stdout| {
        let job = name.to_string();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(job = %job, "stdout: {}", line);
            }
        })
    });

    // Always consume stderr so buffers don't fill; log at debug.
    let stderr_task = child.stderr.take().map(|stderr| {
        let job = name.to_string();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(job = %job, "stderr: {}", line);
            }
        })
    });

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of job '{}'", name))?;

    for reader in [stdout_task, stderr_task].into_iter().flatten() {
        let _ = reader.await;
    }

    let code = status.code().unwrap_or(-1);
    info!(
        job = %name,
        exit_code = code,
        success = status.success(),
        "job process exited"
    );

    if !status.success() {
        bail!("command `{}` exited with code {}", cmd_line, code);
    }

    Ok(())
}
