use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;

use anyhow::{anyhow, Result};
use futures_util::future::{FutureExt, LocalBoxFuture};
use tracing::{debug, trace, warn};

/// Unit of runtime work (a re-render, a deferred callback) queued on a platform.
pub type PlatformTask = LocalBoxFuture<'static, Result<()>>;

/// Upper bound on tasks drained by one flush, so a task that keeps
/// rescheduling itself cannot hang a test.
const MAX_FLUSH_TASKS: usize = 10_000;

/// Scheduler standing in for the runtime's platform. Each synthetic document
/// owns one; `flush` drains whatever the runtime queued on it.
#[derive(Default)]
pub struct TestPlatform {
    queue: RefCell<VecDeque<PlatformTask>>,
    flushes: Cell<usize>,
}

impl TestPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = Result<()>> + 'static,
    {
        self.queue.borrow_mut().push_back(task.boxed_local());
        trace!(target: "platform", pending = self.pending(), "scheduled platform task");
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of times `flush` has been entered.
    pub fn flush_count(&self) -> usize {
        self.flushes.get()
    }

    /// Yield once to the executor, then run queued tasks in FIFO order until
    /// the queue stays empty. Tasks may schedule further tasks. The first
    /// failing task aborts the flush.
    pub async fn flush(&self) -> Result<()> {
        self.flushes.set(self.flushes.get() + 1);
        tokio::task::yield_now().await;

        let mut drained = 0usize;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(task) = next else {
                break;
            };
            if drained >= MAX_FLUSH_TASKS {
                warn!(
                    target: "platform",
                    "Stopped flushing after {} tasks (possible reschedule loop)",
                    MAX_FLUSH_TASKS
                );
                return Err(anyhow!(
                    "platform did not settle after {MAX_FLUSH_TASKS} tasks"
                ));
            }
            task.await?;
            drained += 1;
        }

        debug!(target: "platform", drained, "platform flushed");
        Ok(())
    }
}
