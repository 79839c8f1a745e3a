//! Cancellable debounce timer.
//!
//! Each [`Debouncer::trigger`] cancels the pending timer and schedules a new
//! one; only a value that survives a full quiet interval is delivered on the
//! receiver returned by [`Debouncer::new`]. Dropping the debouncer cancels any
//! pending delivery.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver its fired values arrive on.
    #[must_use]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            pending: None,
            tx,
        };
        (debouncer, rx)
    }

    /// Restarts the quiet interval with `value` as the value to deliver.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may already be gone during teardown.
            let _ = tx.send(value);
        }));
    }
}

impl<T> Debouncer<T> {
    /// Cancels the pending delivery. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_with_last_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        for value in 1..=5 {
            debouncer.trigger(value);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(rx.recv().await, Some(5));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err(), "only one value should be delivered");
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_fire_separately() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.trigger("first");
        tokio::time::sleep(Duration::from_millis(600)).await;
        debouncer.trigger("second");
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(rx.recv().await, Some("first"));
        assert_eq!(rx.recv().await, Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_before_quiet_interval() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.trigger(1);
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());
        assert!(debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_delivery() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.trigger(1);
        assert!(debouncer.cancel());
        assert!(!debouncer.is_pending());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_delivery() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.trigger(1);
        drop(debouncer);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}
