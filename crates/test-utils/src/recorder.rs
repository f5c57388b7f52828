use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rundag::exec::JobHandle;

/// Hands out jobs that record the name they were invoked with.
///
/// The name is recorded synchronously when the job is *called*, so the
/// recorded order is the order in which the scheduler issued the jobs.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A job that records its name and succeeds.
    pub fn job(&self) -> JobHandle {
        let calls = Arc::clone(&self.calls);
        JobHandle::new(move |name: String| {
            calls.lock().unwrap().push(name);
            async { anyhow::Ok(()) }
        })
    }

    /// A job that records its name and then fails with `message`.
    pub fn failing_job(&self, message: &'static str) -> JobHandle {
        let calls = Arc::clone(&self.calls);
        JobHandle::new(move |name: String| {
            calls.lock().unwrap().push(name);
            async move { Err::<(), _>(anyhow::anyhow!(message)) }
        })
    }

    /// A job that records its name, sleeps, then succeeds.
    pub fn slow_job(&self, delay: Duration) -> JobHandle {
        let calls = Arc::clone(&self.calls);
        JobHandle::new(move |name: String| {
            calls.lock().unwrap().push(name);
            async move {
                tokio::time::sleep(delay).await;
                anyhow::Ok(())
            }
        })
    }

    /// Names recorded so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times `name` was invoked.
    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|n| *n == name).count()
    }
}

/// Tracks how many probe jobs are in flight at the same time.
#[derive(Clone, Default)]
pub struct ConcurrencyProbe {
    current: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl ConcurrencyProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// A job that holds a slot for `delay` while it runs.
    pub fn job(&self, delay: Duration) -> JobHandle {
        let current = Arc::clone(&self.current);
        let peak = Arc::clone(&self.peak);
        JobHandle::new(move |_name: String| {
            let current = Arc::clone(&current);
            let peak = Arc::clone(&peak);
            async move {
                let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                current.fetch_sub(1, Ordering::SeqCst);
                anyhow::Ok(())
            }
        })
    }

    /// Highest number of probe jobs observed running at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}
