//! Owned periodic-refresh task.
//!
//! The original dashboard re-polled its feeds from ambient interval timers;
//! here the schedule is a value. Whoever holds the [`RefreshHandle`] owns the
//! task, and dropping the handle tears the task down with it.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct RefreshHandle {
    every: Duration,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Spawn a task that awaits `tick` once per `every`.
    ///
    /// The first tick fires after one full interval, not immediately; the
    /// caller has usually just done the initial fetch itself. Ticks missed
    /// while a slow `tick` future runs are skipped, not replayed.
    pub fn spawn<F, Fut>(every: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut timer = tokio::time::interval(every);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            timer.tick().await;
            loop {
                timer.tick().await;
                tick().await;
            }
        });

        Self { every, task }
    }

    pub fn interval(&self) -> Duration {
        self.every
    }

    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
