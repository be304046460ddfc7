// ============================================================================
// TICKER
// ============================================================================

use log::{debug, trace};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Periodic signal source.
///
/// Fires its callback immediately on start, then once per interval until
/// cancelled. The wait restarts after each callback returns, so a slow
/// callback delays later ticks rather than causing a burst of catch-up ticks.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::every_second()
    }
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_millis(1000))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts the worker thread with `on_tick` as its single subscriber.
    pub fn start<F>(self, mut on_tick: F) -> std::io::Result<TickerHandle>
    where
        F: FnMut() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let interval = self.interval;
        let worker = thread::Builder::new()
            .name("clock-ticker".to_string())
            .spawn(move || {
                let mut fired: u64 = 0;
                loop {
                    on_tick();
                    fired += 1;
                    trace!("tick #{fired}");
                    match cancel_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("ticker stopped after {fired} ticks");
            })?;

        Ok(TickerHandle {
            cancel: Some(cancel_tx),
            worker: Some(worker),
        })
    }
}

/// Owner of a running ticker. Dropping it cancels the ticker.
#[derive(Debug)]
pub struct TickerHandle {
    cancel: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Stops the ticker. Once this returns no callback is running and none
    /// will run again.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    fn shutdown(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // Worker may already be gone; disconnection stops it just as well.
            let _ = cancel.send(());
        }
        if let Some(worker) = self.worker.take() {
            // Cancelling from inside the callback cannot wait for itself.
            if worker.thread().id() == thread::current().id() {
                return;
            }
            if worker.join().is_err() {
                log::error!("ticker callback panicked");
            }
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn first_tick_is_immediate() {
        let (tx, rx) = mpsc::channel();
        let started = Instant::now();
        let handle = Ticker::new(Duration::from_secs(60))
            .start(move || {
                let _ = tx.send(Instant::now());
            })
            .unwrap();
        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(first.duration_since(started) < Duration::from_secs(5));
        // the next tick is a minute away
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        handle.cancel();
    }

    #[test]
    fn ticks_repeat_at_the_interval() {
        let interval = Duration::from_millis(20);
        let (tx, rx) = mpsc::channel();
        let handle = Ticker::new(interval)
            .start(move || {
                let _ = tx.send(Instant::now());
            })
            .unwrap();
        let fired: Vec<Instant> = (0..5)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        handle.cancel();

        for pair in fired.windows(2) {
            let gap = pair[1].duration_since(pair[0]);
            assert!(gap >= interval, "ticks only {gap:?} apart");
        }
    }

    #[test]
    fn no_ticks_after_cancel() {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let handle = Ticker::new(Duration::from_millis(5))
            .start(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        thread::sleep(Duration::from_millis(30));
        assert!(handle.is_running());
        handle.cancel();

        let after_cancel = count.load(Ordering::SeqCst);
        assert!(after_cancel >= 1);
        thread::sleep(Duration::from_millis(40));
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn dropping_the_handle_cancels() {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        {
            let _handle = Ticker::new(Duration::from_millis(5))
                .start(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
            thread::sleep(Duration::from_millis(20));
        }
        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn default_interval_is_one_second() {
        assert_eq!(Ticker::default().interval(), Duration::from_millis(1000));
    }
}
