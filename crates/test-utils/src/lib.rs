//! Shared helpers for rundag's integration tests.
//!
//! - [`builders`]: assemble job specifications tersely.
//! - [`recorder`]: jobs that record their invocations or measure overlap.

pub mod builders;
pub mod recorder;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

/// How long a single scheduling run may take in a test.
pub const RUN_TIMEOUT: Duration = Duration::from_secs(5);

static INIT: Once = Once::new();

/// Install a test-captured subscriber once per test binary.
///
/// Reads the same `RUNDAG_LOG` directives as the binary, so
/// `RUNDAG_LOG=rundag::dag=debug cargo test -- --nocapture` shows the
/// scheduler's round bookkeeping.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(rundag::logging::LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("info"));

        // Another test harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Await `fut`, failing the test if it outlives [`RUN_TIMEOUT`].
///
/// A scheduler that stalls instead of reporting NoStart or a cycle shows up
/// here as a timeout.
pub async fn with_timeout<F, T>(fut: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(RUN_TIMEOUT, fut).await {
        Ok(value) => value,
        Err(_) => panic!("run did not settle within {RUN_TIMEOUT:?}"),
    }
}
