//! Explicitly owned periodic polling with a start/stop lifecycle.
//!
//! Each dashboard widget refreshes on its own cadence (candles every 60s,
//! ticker every 10s, tokenomics every 120s); the timers are uncoordinated and
//! share no state. A poller is tied to the lifetime of the view that owns it:
//! dropping it stops the task. A job already in flight when the poller stops
//! runs to completion and its output is discarded.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::debug;

/// Handle to a periodic background job.
#[derive(Debug)]
pub struct Poller {
    handle: Option<JoinHandle<()>>,
    stop_tx: watch::Sender<bool>,
    period: Duration,
}

impl Poller {
    /// Spawn a task that runs `job` immediately and then once per `period`.
    ///
    /// Each tick awaits the job to completion before the next is scheduled,
    /// so a slow refresh never overlaps itself.
    pub fn start<F, Fut>(period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut timer = interval(period);
            loop {
                // the stop signal is only honoured at the tick boundary, so
                // a job that is already running finishes normally
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => break,
                    _ = timer.tick() => {}
                }
                job().await;
            }
        });

        debug!(?period, "poller started");
        Self {
            handle: Some(handle),
            stop_tx,
            period,
        }
    }

    /// Stop the poller. Idempotent; no new job starts after this returns. A
    /// job already in flight runs to completion and its output is discarded.
    pub fn stop(&mut self) {
        if self.handle.take().is_some() {
            let _ = self.stop_tx.send(true);
            debug!(period = ?self.period, "poller stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_poller_ticks_on_period() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        let _poller = Poller::start(Duration::from_secs(60), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        // first tick fires immediately, then every 60s
        tokio::time::sleep(Duration::from_secs(150)).await;
        assert!(ticks.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_prevents_further_ticks() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        let mut poller = Poller::start(Duration::from_secs(10), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(25)).await;
        poller.stop();
        assert!(!poller.is_running());

        let observed = ticks.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(100)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), observed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_lets_in_flight_job_complete() {
        let completed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completed);

        let mut poller = Poller::start(Duration::from_secs(60), move || {
            let counter = Arc::clone(&counter);
            async move {
                // a slow refresh still running when the poller stops
                tokio::time::sleep(Duration::from_secs(5)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        // stop while the first job is mid-sleep
        tokio::time::sleep(Duration::from_secs(1)).await;
        poller.stop();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 1);

        // and nothing fires after it drains
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_the_task() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        {
            let _poller = Poller::start(Duration::from_secs(10), move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            });
            tokio::time::sleep(Duration::from_secs(15)).await;
        }

        let observed = ticks.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(100)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), observed);
    }
}
