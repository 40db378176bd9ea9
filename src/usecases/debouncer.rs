//! Cancellable debounce timer. One armed timer per instance.
//!
//! `schedule` restarts the quiet period. When the timer fires, the work it produced is
//! spawned as its own task, so later `schedule`/`cancel` calls never abort work in flight.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct Debouncer {
    delay: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
    /// Generation of the armed timer; `None` when nothing is pending.
    armed: Arc<watch::Sender<Option<u64>>>,
    next_generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timer: Mutex::new(None),
            armed: Arc::new(watch::channel(None).0),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Arm the timer, cancelling any pending one. After the quiet period `on_fire` runs on the
    /// timer task and the future it returns is spawned detached.
    ///
    /// `on_fire` is synchronous and runs right after the sleep with no await in between, so a
    /// timer is either cancelled before firing or fires completely.
    pub fn schedule<F, Fut>(&self, on_fire: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed) + 1;

        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        self.armed.send_replace(Some(generation));

        let delay = self.delay;
        let armed = Arc::clone(&self.armed);
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let work = on_fire();
            tokio::spawn(work);
            armed.send_if_modified(|current| {
                if *current == Some(generation) {
                    *current = None;
                    true
                } else {
                    false
                }
            });
            debug!(generation, "debounce timer fired");
        }));
    }

    /// Drop the pending timer, if any, without firing it.
    pub fn cancel(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        self.armed.send_replace(None);
    }

    pub fn is_pending(&self) -> bool {
        self.armed.borrow().is_some()
    }

    /// Resolves once no timer is armed (fired or cancelled).
    pub async fn quiet(&self) {
        let mut rx = self.armed.subscribe();
        let _ = rx.wait_for(Option::is_none).await;
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(timer) = self
            .timer
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            timer.abort();
        }
    }
}
