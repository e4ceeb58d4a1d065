//! Clock abstraction so scheduler timing is controllable in tests.

use futures::future::BoxFuture;
use tokio::time::{Duration, Instant};

/// Abstraction over the system clock used by the retry scheduler.
pub trait Clock: Send + Sync + 'static {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Sleep for the given duration.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Live implementation delegating to tokio time.
///
/// Under `#[tokio::test(start_paused = true)]` tokio's virtual clock drives
/// both `now` and `sleep`, so timing tests advance deterministically without
/// real sleeps.
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
