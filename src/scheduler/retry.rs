//! Rate-limit-aware retry queue.
//!
//! The queue holds at most one task per id (rescheduling overwrites) and is
//! processed by a lazily-started polling loop that exits once the queue
//! drains. Rate limiting is the only condition the queue retries: any other
//! failure drops the task immediately.
//!
//! The queue is in-memory and scoped to a single running instance. A
//! multi-instance deployment would need it externalized into a durable
//! store, which this design does not provide.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use serde::Serialize;
use tokio::time::{Duration, Instant};

use crate::discord::api::{ApiError, RateLimitInfo};
use crate::scheduler::clock::Clock;

/// Interval between queue scans while work remains.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default retry budget for a scheduled task.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// A retryable unit of work. Each invocation is one full execution attempt.
pub type TaskOperation = Box<dyn Fn() -> BoxFuture<'static, Result<(), TaskError>> + Send + Sync>;

/// Failure reported by a task operation.
#[derive(Debug)]
pub enum TaskError {
    /// The attempt was rejected by a rate limit; retry after the backoff.
    RateLimited(RateLimitInfo),
    /// Terminal failure; the task is dropped without further attempts.
    Fatal(String),
}

/// Returns the rate-limit descriptor when a remote failure is specifically a
/// rate-limit rejection, `None` for every other failure.
pub fn extract_rate_limit_info(error: &ApiError) -> Option<RateLimitInfo> {
    match error {
        ApiError::RateLimited(info) => Some(info.clone()),
        _ => None,
    }
}

struct ScheduledTask {
    operation: TaskOperation,
    retry_count: u32,
    max_retries: u32,
    scheduled_for: Instant,
}

/// Introspection snapshot of the retry queue.
#[derive(Debug, Clone, Serialize)]
pub struct QueueStatus {
    pub count: usize,
    pub tasks: Vec<TaskSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskSnapshot {
    pub id: String,
    pub retry_count: u32,
    /// Seconds until the task is due; zero when already due.
    pub due_in_secs: f64,
}

/// In-memory retry queue scoped to this process.
///
/// The processing loop starts lazily on the first scheduled task, executes
/// due tasks sequentially each tick, and terminates once the queue is empty.
/// The task map is only touched from `schedule_retry` callers and the loop
/// itself; there is no cross-process coordination.
pub struct RetryScheduler {
    clock: Arc<dyn Clock>,
    tasks: Mutex<HashMap<String, ScheduledTask>>,
    loop_running: Mutex<bool>,
}

impl RetryScheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Arc<Self> {
        Arc::new(Self {
            clock,
            tasks: Mutex::new(HashMap::new()),
            loop_running: Mutex::new(false),
        })
    }

    /// Queues (or requeues) `operation` under `task_id`, due after the
    /// backoff carried by `info`, and makes sure the processing loop is
    /// running. An existing task under the same id is overwritten, never
    /// duplicated.
    pub fn schedule_retry(
        self: &Arc<Self>,
        task_id: String,
        operation: TaskOperation,
        info: &RateLimitInfo,
        max_retries: u32,
    ) {
        let scheduled_for = self.clock.now() + info.retry_after();
        tracing::debug!(
            "scheduling retry task {} in {:.2}s (global: {})",
            task_id,
            info.retry_after_secs,
            info.global
        );

        self.tasks.lock().unwrap().insert(
            task_id,
            ScheduledTask {
                operation,
                retry_count: 0,
                max_retries,
                scheduled_for,
            },
        );

        self.ensure_processing();
    }

    /// Snapshot of queued tasks for observability.
    pub fn queue_status(&self) -> QueueStatus {
        let now = self.clock.now();
        let tasks = self.tasks.lock().unwrap();

        let mut snapshots: Vec<TaskSnapshot> = tasks
            .iter()
            .map(|(id, task)| TaskSnapshot {
                id: id.clone(),
                retry_count: task.retry_count,
                due_in_secs: task.scheduled_for.saturating_duration_since(now).as_secs_f64(),
            })
            .collect();
        snapshots.sort_by(|a, b| a.id.cmp(&b.id));

        QueueStatus {
            count: snapshots.len(),
            tasks: snapshots,
        }
    }

    /// Spawns the processing loop unless one is already running.
    fn ensure_processing(self: &Arc<Self>) {
        let mut running = self.loop_running.lock().unwrap();
        if *running {
            return;
        }
        *running = true;

        let scheduler = Arc::clone(self);
        tokio::spawn(async move { scheduler.run().await });
    }

    async fn run(self: Arc<Self>) {
        tracing::debug!("retry queue processing started");
        loop {
            self.process_due().await;

            // Exit once drained; the next schedule_retry restarts the loop.
            {
                let tasks = self.tasks.lock().unwrap();
                if tasks.is_empty() {
                    *self.loop_running.lock().unwrap() = false;
                    break;
                }
            }

            self.clock.sleep(POLL_INTERVAL).await;
        }
        tracing::debug!("retry queue drained");
    }

    /// Executes every task whose backoff has elapsed, sequentially.
    ///
    /// A rate-limited failure requeues the task with a backoff from the new
    /// descriptor until its retry budget runs out; any other failure drops
    /// it immediately.
    async fn process_due(&self) {
        let now = self.clock.now();
        let due: Vec<(String, ScheduledTask)> = {
            let mut tasks = self.tasks.lock().unwrap();
            let ids: Vec<String> = tasks
                .iter()
                .filter(|(_, task)| task.scheduled_for <= now)
                .map(|(id, _)| id.clone())
                .collect();
            ids.into_iter()
                .filter_map(|id| tasks.remove(&id).map(|task| (id, task)))
                .collect()
        };

        for (id, mut task) in due {
            match (task.operation)().await {
                Ok(()) => {
                    tracing::info!("retry task {} succeeded after {} retries", id, task.retry_count);
                }
                Err(TaskError::RateLimited(info)) => {
                    task.retry_count += 1;
                    if task.retry_count >= task.max_retries {
                        tracing::error!(
                            "retry task {} dropped after {} rate-limited attempts",
                            id,
                            task.retry_count
                        );
                    } else {
                        tracing::warn!(
                            "retry task {} rate limited again, backing off {:.2}s (attempt {}/{})",
                            id,
                            info.retry_after_secs,
                            task.retry_count,
                            task.max_retries
                        );
                        task.scheduled_for = self.clock.now() + info.retry_after();
                        self.tasks.lock().unwrap().insert(id, task);
                    }
                }
                Err(TaskError::Fatal(reason)) => {
                    tracing::error!("retry task {} failed terminally: {}", id, reason);
                }
            }
        }
    }
}
