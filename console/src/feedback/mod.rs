//! Operator feedback sinks
//!
//! Both sinks are cheap cloneable handles over shared state: one notification
//! list and one blocking overlay per console.

pub mod notifications;
pub mod overlay;

pub use notifications::{DismissReason, FeedEvent, NotificationEvent, NotificationFeed, Severity};
pub use overlay::{BlockingOverlay, OverlayState};
