// File: console/src/feedback/overlay.rs
//! Full-view "operation in progress" indicator
//!
//! There is exactly one overlay per console. It counts its holders instead of
//! tracking a single flag, so two overlapping blocking actions cannot clear
//! each other's indicator: it stays up until the last holder hides it.

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlayState {
    pub visible: bool,
    pub message: String,
    pub holders: usize,
}

#[derive(Clone)]
pub struct BlockingOverlay {
    state: watch::Sender<OverlayState>,
}

impl BlockingOverlay {
    pub fn new() -> Self {
        let (state, _) = watch::channel(OverlayState::default());
        Self { state }
    }

    /// Add a holder and show `message`. The most recent message wins.
    pub fn show(&self, message: &str) {
        self.state.send_modify(|state| {
            state.holders += 1;
            state.visible = true;
            state.message = message.to_string();
        });
        debug!(holders = self.state.borrow().holders, "Overlay shown: {}", message);
    }

    /// Release one holder. Hiding with no holders is a no-op.
    pub fn hide(&self) {
        let changed = self.state.send_if_modified(|state| {
            if state.holders == 0 {
                return false;
            }
            state.holders -= 1;
            if state.holders == 0 {
                state.visible = false;
                state.message.clear();
            }
            true
        });
        if changed {
            debug!(holders = self.state.borrow().holders, "Overlay holder released");
        }
    }

    /// Drop every holder at once, e.g. before the view is replaced
    pub fn force_hide(&self) {
        self.state.send_if_modified(|state| {
            if *state == OverlayState::default() {
                return false;
            }
            *state = OverlayState::default();
            true
        });
    }

    pub fn state(&self) -> OverlayState {
        self.state.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn subscribe(&self) -> watch::Receiver<OverlayState> {
        self.state.subscribe()
    }
}

impl Default for BlockingOverlay {
    fn default() -> Self {
        Self::new()
    }
}
