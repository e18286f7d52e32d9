// File: console/src/actions/reload.rs
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Replaces the whole view after a delay, once server-side state changed too
/// broadly for the controls to patch themselves.
pub trait PageReloader: Send + Sync {
    /// Non-blocking: the reload happens later, after `delay`
    fn schedule_reload(&self, delay: Duration);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadRequest {
    pub scheduled_at: DateTime<Utc>,
    pub delay: Duration,
}

/// Fires a `ReloadRequest` on a channel once the delay elapses. Whoever owns
/// the receiver rebuilds the view.
#[derive(Clone)]
pub struct TimedReloader {
    tx: mpsc::UnboundedSender<ReloadRequest>,
}

impl TimedReloader {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ReloadRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PageReloader for TimedReloader {
    fn schedule_reload(&self, delay: Duration) {
        let request = ReloadRequest {
            scheduled_at: Utc::now(),
            delay,
        };
        info!("Page reload scheduled in {}ms", delay.as_millis());

        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(request).is_err() {
                debug!("Reload fired after the view was already gone");
            }
        });
    }
}
