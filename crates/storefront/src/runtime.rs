//! Task spawning and timers.
//!
//! Everything runs on one thread. Spawned tasks are local (not `Send`) and
//! share state through `Rc`, matching the browser's single event loop.

use std::future::Future;
use std::time::Duration;

/// Executor and clock the behaviors schedule work on.
pub trait Runtime: 'static {
    /// Run `task` to completion in the background. Tasks cannot be cancelled.
    fn spawn(&self, task: impl Future<Output = ()> + 'static);

    /// Resolve after `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + 'static;
}

/// Tokio-backed runtime for native harnesses and tests.
///
/// Must be used from inside a [`tokio::task::LocalSet`], since tasks are
/// spawned with [`tokio::task::spawn_local`].
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRuntime;

#[cfg(not(target_arch = "wasm32"))]
impl Runtime for TokioRuntime {
    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + 'static {
        tokio::time::sleep(duration)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use tokio::task::LocalSet;
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_waits_for_duration() {
        let start = Instant::now();
        TokioRuntime.sleep(Duration::from_millis(300)).await;
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_task_runs_locally() {
        let ran = Rc::new(Cell::new(false));
        let local = LocalSet::new();

        let flag = Rc::clone(&ran);
        local.spawn_local(async move {
            TokioRuntime.spawn(async move { flag.set(true) });
        });
        local.await;

        assert!(ran.get());
    }
}
