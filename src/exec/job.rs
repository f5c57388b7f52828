// src/exec/job.rs

//! The callable side of a job.
//!
//! A [`Job`] is invoked with its own name and hands back a future. Calling
//! `call` *issues* the job; awaiting the returned future waits for it to
//! settle. The scheduler only looks at whether the future resolved to `Ok`
//! or `Err`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by a job invocation.
pub type JobFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

/// Something the scheduler can invoke.
///
/// Implemented for any `Fn(String) -> impl Future<Output = anyhow::Result<()>>`,
/// so plain async closures work:
///
/// ```
/// use rundag::exec::JobHandle;
///
/// let job = JobHandle::new(|name: String| async move {
///     println!("running {name}");
///     anyhow::Ok(())
/// });
/// # let _ = job;
/// ```
pub trait Job: Send + Sync {
    fn call(&self, name: &str) -> JobFuture;
}

impl<F, Fut> Job for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    fn call(&self, name: &str) -> JobFuture {
        Box::pin(self(name.to_string()))
    }
}

/// Shared, cloneable reference to a [`Job`].
#[derive(Clone)]
pub struct JobHandle(Arc<dyn Job>);

impl JobHandle {
    pub fn new(job: impl Job + 'static) -> Self {
        Self(Arc::new(job))
    }

    /// Issue the job, passing it its own name.
    pub fn call(&self, name: &str) -> JobFuture {
        self.0.call(name)
    }
}

impl fmt::Debug for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JobHandle(..)")
    }
}
