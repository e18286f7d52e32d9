// File: console/src/feedback/notifications.rs
//! Transient, self-dismissing notifications
//!
//! Every event is visible as soon as `notify` returns and removes itself after
//! the display duration. Each event carries its own expiry task, so the number
//! of concurrently visible events does not affect when any of them expires.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::constants::notifications::{DISPLAY_DURATION, EVENT_CHANNEL_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationEvent {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// Why an event left the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Expired,
    Dismissed,
    Evicted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Shown(NotificationEvent),
    Removed { id: Uuid, reason: DismissReason },
}

/// Cloneable handle to the notification list shared by the whole console
#[derive(Clone)]
pub struct NotificationFeed {
    visible: Arc<RwLock<Vec<NotificationEvent>>>,
    events: broadcast::Sender<FeedEvent>,
    display_for: Duration,
    max_visible: Option<usize>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::with_settings(DISPLAY_DURATION, None)
    }

    /// `max_visible` of `None` keeps every event until it expires
    pub fn with_settings(display_for: Duration, max_visible: Option<usize>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            visible: Arc::new(RwLock::new(Vec::new())),
            events,
            display_for,
            max_visible,
        }
    }

    /// Append an event and schedule its removal. Must run inside a tokio runtime.
    pub async fn notify(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        let event = NotificationEvent {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };
        let id = event.id;

        let evicted = {
            let mut visible = self.visible.write().await;
            visible.push(event.clone());

            match self.max_visible {
                Some(cap) if visible.len() > cap => {
                    let overflow = visible.len() - cap;
                    visible.drain(..overflow).map(|e| e.id).collect()
                }
                _ => Vec::new(),
            }
        };

        match severity {
            Severity::Error | Severity::Warning => warn!("[{}] {}", severity, event.message),
            _ => info!("[{}] {}", severity, event.message),
        }

        // No receivers is fine: rendering is optional.
        let _ = self.events.send(FeedEvent::Shown(event));
        for evicted_id in evicted {
            debug!("Evicted notification {} to respect the visible cap", evicted_id);
            let _ = self.events.send(FeedEvent::Removed {
                id: evicted_id,
                reason: DismissReason::Evicted,
            });
        }

        let feed = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(feed.display_for).await;
            feed.remove(id, DismissReason::Expired).await;
        });

        id
    }

    /// User dismissal before expiry. Returns false if the event is already gone.
    pub async fn dismiss(&self, id: Uuid) -> bool {
        self.remove(id, DismissReason::Dismissed).await
    }

    async fn remove(&self, id: Uuid, reason: DismissReason) -> bool {
        let removed = {
            let mut visible = self.visible.write().await;
            let before = visible.len();
            visible.retain(|e| e.id != id);
            visible.len() != before
        };

        if removed {
            debug!("Notification {} removed ({:?})", id, reason);
            let _ = self.events.send(FeedEvent::Removed { id, reason });
        }
        removed
    }

    /// Currently visible events, oldest first
    pub async fn visible(&self) -> Vec<NotificationEvent> {
        self.visible.read().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.events.subscribe()
    }

    pub fn display_duration(&self) -> Duration {
        self.display_for
    }
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new()
    }
}
