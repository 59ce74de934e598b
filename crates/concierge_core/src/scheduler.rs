//! Fixed-interval task scheduling.

use concierge_error::{ConciergeResult, SchedulerError, SchedulerErrorKind};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument};

/// Named repeating tasks on the tokio runtime.
///
/// Scheduling is idempotent per task ID: a second `schedule` call for a task
/// that is still running starts nothing. The first tick fires immediately.
#[derive(Debug, Clone, Default)]
pub struct IntervalScheduler {
    tasks: Arc<RwLock<HashMap<String, JoinHandle<()>>>>,
}

impl IntervalScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `task` every `period` unless a task with this ID is already running.
    ///
    /// Returns `Ok(true)` if the task was started, `Ok(false)` if it was
    /// already running. Errors returned by the task are logged and the loop
    /// continues.
    ///
    /// # Errors
    ///
    /// Returns error if `period` is zero.
    #[instrument(skip_all, fields(task_id = %task_id.as_ref()))]
    pub async fn schedule<F, Fut>(
        &self,
        task_id: impl AsRef<str>,
        period: Duration,
        task: F,
    ) -> Result<bool, SchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ConciergeResult<()>> + Send + 'static,
    {
        let task_id = task_id.as_ref().to_string();
        if period.is_zero() {
            return Err(SchedulerError::new(SchedulerErrorKind::InvalidPeriod(task_id)));
        }

        let mut tasks = self.tasks.write().await;
        if let Some(handle) = tasks.get(&task_id)
            && !handle.is_finished()
        {
            debug!("Task already running");
            return Ok(false);
        }

        let id = task_id.clone();
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                if let Err(e) = task().await {
                    error!(task_id = %id, error = %e, "Task execution failed");
                }
            }
        });

        tasks.insert(task_id, handle);
        info!(?period, "Task scheduled");
        Ok(true)
    }

    /// Stop a task. Returns whether one was running.
    #[instrument(skip(self))]
    pub async fn cancel(&self, task_id: &str) -> bool {
        let mut tasks = self.tasks.write().await;
        match tasks.remove(task_id) {
            Some(handle) => {
                handle.abort();
                info!("Task canceled");
                true
            }
            None => false,
        }
    }

    /// Whether a task with this ID is running.
    pub async fn is_scheduled(&self, task_id: &str) -> bool {
        self.tasks
            .read()
            .await
            .get(task_id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// IDs of all running tasks.
    pub async fn scheduled_tasks(&self) -> Vec<String> {
        self.tasks
            .read()
            .await
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Abort every task.
    pub async fn shutdown(&self) {
        let mut tasks = self.tasks.write().await;
        for (id, handle) in tasks.drain() {
            handle.abort();
            debug!(task_id = %id, "Task aborted");
        }
    }
}
