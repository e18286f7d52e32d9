//! Visual controls bound to administrative actions
//!
//! A control is the mutable view an action manages: a toggle switch for a
//! service or a button for a page-wide operation. It tracks three values:
//!
//! - **current**: the committed value, what the server last confirmed
//! - **displayed**: what the operator sees right now (may run ahead of current)
//! - **pending**: the optimistic value while a request is in flight
//!
//! `disabled` is the only mutual-exclusion gate: it is set atomically together
//! with the pending value, and a control that is disabled refuses to begin a
//! second action.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::errors::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Toggle,
    Button,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub name: String,
    pub kind: ControlKind,
    /// Committed value; `None` for buttons
    pub current_value: Option<bool>,
    pub displayed_value: Option<bool>,
    pub pending_value: Option<bool>,
    pub is_disabled: bool,
    pub label: String,
    idle_label: String,
    pub busy_since: Option<DateTime<Utc>>,
    /// Settled, but left disabled until the scheduled reload replaces it
    pub awaiting_reload: bool,
}

impl ControlState {
    /// `Active`/`Inactive` indicator shown next to a service switch
    pub fn status_text(&self) -> Option<&'static str> {
        self.current_value
            .map(|active| if active { "Active" } else { "Inactive" })
    }
}

#[derive(Clone)]
pub struct UiControl {
    state: Arc<RwLock<ControlState>>,
}

impl UiControl {
    pub fn toggle(name: &str, value: bool) -> Self {
        Self::build(name, ControlKind::Toggle, Some(value), name)
    }

    pub fn button(name: &str, label: &str) -> Self {
        Self::build(name, ControlKind::Button, None, label)
    }

    fn build(name: &str, kind: ControlKind, value: Option<bool>, label: &str) -> Self {
        Self {
            state: Arc::new(RwLock::new(ControlState {
                name: name.to_string(),
                kind,
                current_value: value,
                displayed_value: value,
                pending_value: None,
                is_disabled: false,
                label: label.to_string(),
                idle_label: label.to_string(),
                busy_since: None,
                awaiting_reload: false,
            })),
        }
    }

    pub async fn snapshot(&self) -> ControlState {
        self.state.read().await.clone()
    }

    pub async fn name(&self) -> String {
        self.state.read().await.name.clone()
    }

    pub async fn kind(&self) -> ControlKind {
        self.state.read().await.kind
    }

    pub async fn is_disabled(&self) -> bool {
        self.state.read().await.is_disabled
    }

    pub async fn current_value(&self) -> Option<bool> {
        self.state.read().await.current_value
    }

    pub async fn displayed_value(&self) -> Option<bool> {
        self.state.read().await.displayed_value
    }

    pub async fn status_text(&self) -> Option<&'static str> {
        self.state.read().await.status_text()
    }

    /// What the originating UI event does before any action runs: a switch
    /// flips its displayed value on click. Ignored while disabled.
    pub async fn flip(&self, value: bool) {
        let mut state = self.state.write().await;
        if state.kind == ControlKind::Toggle && !state.is_disabled {
            state.displayed_value = Some(value);
        }
    }

    /// Put the displayed value back to the committed one (declined prompt)
    pub async fn restore_display(&self) {
        let mut state = self.state.write().await;
        state.displayed_value = state.current_value;
    }

    /// Atomically claim the control for an in-flight request and apply the
    /// optimistic value. Fails if another request already holds it.
    #[instrument(skip(self, busy_label), fields(control))]
    pub async fn begin(
        &self,
        pending: Option<bool>,
        busy_label: Option<&str>,
    ) -> Result<(), ActionError> {
        let mut state = self.state.write().await;
        tracing::Span::current().record("control", state.name.as_str());

        if state.is_disabled {
            return Err(ActionError::ControlBusy {
                control: state.name.clone(),
                since: state.busy_since,
            });
        }

        state.is_disabled = true;
        state.busy_since = Some(Utc::now());
        if state.kind == ControlKind::Toggle {
            state.pending_value = pending;
            if pending.is_some() {
                state.displayed_value = pending;
            }
        }
        if let Some(label) = busy_label {
            state.label = label.to_string();
        }

        debug!("Control {} claimed (pending {:?})", state.name, state.pending_value);
        Ok(())
    }

    /// Make the optimistic value the committed one
    pub async fn commit(&self) {
        let mut state = self.state.write().await;
        if let Some(value) = state.pending_value.take() {
            state.current_value = Some(value);
        }
        state.displayed_value = state.current_value;
        info!(
            "Control {} committed at {:?}",
            state.name, state.current_value
        );
    }

    /// Discard the optimistic value and show the pre-action value again
    pub async fn rollback(&self) {
        let mut state = self.state.write().await;
        state.pending_value = None;
        state.displayed_value = state.current_value;
        state.label = state.idle_label.clone();
        info!(
            "Control {} rolled back to {:?}",
            state.name, state.current_value
        );
    }

    /// Re-enable the control once its request has settled
    pub async fn release(&self) {
        let mut state = self.state.write().await;
        if let Some(started) = state.busy_since.take() {
            debug!(
                "Control {} released after {}ms",
                state.name,
                Utc::now().signed_duration_since(started).num_milliseconds()
            );
        }
        state.is_disabled = false;
        state.awaiting_reload = false;
        state.label = state.idle_label.clone();
    }

    /// Keep the control disabled after settlement; a reload is coming
    pub async fn park(&self) {
        let mut state = self.state.write().await;
        state.awaiting_reload = true;
        debug!("Control {} parked until reload", state.name);
    }

    /// Release the control only if it was parked for a reload
    pub async fn unpark(&self) -> bool {
        if !self.state.read().await.awaiting_reload {
            return false;
        }
        self.release().await;
        true
    }

    /// Overwrite the committed value with server-reported state. Skipped
    /// while a request is in flight so an optimistic value is never clobbered.
    pub async fn bind(&self, value: bool) -> bool {
        let mut state = self.state.write().await;
        if state.kind != ControlKind::Toggle || state.is_disabled {
            return false;
        }
        state.current_value = Some(value);
        state.displayed_value = Some(value);
        true
    }
}
