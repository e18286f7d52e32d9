// File: console/src/actions/orchestrator.rs
//! End-to-end driver for one administrative action
//!
//! ```text
//! AwaitingConfirmation ─ declined ─→ Declined
//!        │ confirmed
//!        ↓
//!    InFlight (control disabled, optimistic value shown, overlay if blocking)
//!        │
//!        ├─ success ─────────────→ Committed  (+ reload for page-wide actions)
//!        ├─ success:false ───────→ RolledBack
//!        ├─ no response ─────────→ RolledBack
//!        └─ no response, expected → Disconnected (+ reload, no rollback)
//! ```
//!
//! Every settled outcome except `Declined` emits exactly one notification,
//! always after the control has been committed or rolled back.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::confirmation::Confirmer;
use super::descriptor::ActionDescriptor;
use super::reload::PageReloader;
use crate::control::UiControl;
use crate::errors::{ActionError, ConsoleError};
use crate::feedback::{BlockingOverlay, NotificationFeed, Severity};
use crate::http::{interpret, ControlPlane, Reply};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    AwaitingConfirmation,
    Declined,
    Confirmed,
    InFlight,
    Committed,
    RolledBack,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Operator said no; nothing changed and nothing was reported
    Declined,
    Committed {
        message: String,
        reload_after: Option<Duration>,
    },
    RolledBack {
        error: String,
    },
    /// Transport failure the action declared as expected
    Disconnected {
        reload_after: Option<Duration>,
    },
}

impl ActionOutcome {
    pub fn phase(&self) -> ActionPhase {
        match self {
            ActionOutcome::Declined => ActionPhase::Declined,
            ActionOutcome::Committed { .. } => ActionPhase::Committed,
            ActionOutcome::RolledBack { .. } => ActionPhase::RolledBack,
            ActionOutcome::Disconnected { .. } => ActionPhase::Disconnected,
        }
    }

    pub fn reload_after(&self) -> Option<Duration> {
        match self {
            ActionOutcome::Committed { reload_after, .. }
            | ActionOutcome::Disconnected { reload_after } => *reload_after,
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct ActionOrchestrator {
    control_plane: Arc<dyn ControlPlane>,
    confirmer: Arc<dyn Confirmer>,
    reloader: Arc<dyn PageReloader>,
    notifications: NotificationFeed,
    overlay: BlockingOverlay,
}

impl ActionOrchestrator {
    pub fn new(
        control_plane: Arc<dyn ControlPlane>,
        confirmer: Arc<dyn Confirmer>,
        reloader: Arc<dyn PageReloader>,
        notifications: NotificationFeed,
        overlay: BlockingOverlay,
    ) -> Self {
        Self {
            control_plane,
            confirmer,
            reloader,
            notifications,
            overlay,
        }
    }

    pub fn notifications(&self) -> &NotificationFeed {
        &self.notifications
    }

    pub fn overlay(&self) -> &BlockingOverlay {
        &self.overlay
    }

    /// Run `descriptor` against `control`.
    ///
    /// `Err` only when the control already has a request in flight; every
    /// network or server failure is reconciled here and returned as
    /// `ActionOutcome::RolledBack`.
    #[instrument(skip_all, fields(action = %descriptor.target))]
    pub async fn perform_action(
        &self,
        descriptor: &ActionDescriptor,
        control: &UiControl,
    ) -> Result<ActionOutcome, ConsoleError> {
        if control.is_disabled().await {
            let state = control.snapshot().await;
            return Err(ActionError::ControlBusy {
                control: state.name,
                since: state.busy_since,
            }
            .into());
        }

        debug!(phase = ?ActionPhase::AwaitingConfirmation, "Asking for confirmation");
        if descriptor.requires_confirmation
            && !self.confirmer.confirm(&descriptor.confirmation_prompt).await
        {
            // The click may already have flipped the switch
            control.restore_display().await;
            debug!(phase = ?ActionPhase::Declined, "Operator declined");
            return Ok(ActionOutcome::Declined);
        }
        debug!(phase = ?ActionPhase::Confirmed, "Operator confirmed");

        // Another action may have claimed the control while we waited
        if let Err(e) = control
            .begin(descriptor.desired_value, descriptor.busy_label.as_deref())
            .await
        {
            warn!("{}", e);
            return Err(e.into());
        }

        if let Some(message) = &descriptor.blocking_message {
            self.overlay.show(message);
        }

        debug!(phase = ?ActionPhase::InFlight, "{} {}", descriptor.method, descriptor.endpoint);
        let exchange = self.control_plane.send(&descriptor.request()).await;

        let outcome = match exchange {
            Err(transport) if descriptor.treat_transport_failure_as_expected => {
                let message = descriptor
                    .disconnect_message
                    .clone()
                    .unwrap_or_else(|| transport.to_string());
                info!(
                    "Connection dropped during {}, as expected: {}",
                    descriptor.target, transport
                );
                self.notifications.notify(message, Severity::Info).await;
                ActionOutcome::Disconnected {
                    reload_after: descriptor.reload_after_disconnect,
                }
            }
            Err(transport) => self.roll_back(control, transport.to_string()).await,
            Ok(raw) => match interpret(&raw, descriptor.wrap_http_errors) {
                Reply::Succeeded { message } => {
                    control.commit().await;
                    let message = message.unwrap_or_else(|| descriptor.success_fallback.clone());
                    info!("{} succeeded: {}", descriptor.target, message);
                    self.notifications
                        .notify(message.clone(), Severity::Success)
                        .await;
                    ActionOutcome::Committed {
                        message,
                        reload_after: descriptor.reload_after_success,
                    }
                }
                Reply::Failed { error } => self.roll_back(control, error).await,
            },
        };

        // Cleanup runs for every settled outcome
        if descriptor.is_blocking() {
            self.overlay.hide();
        }
        match outcome.reload_after() {
            Some(delay) => {
                // Re-enabling is moot: the view is about to be replaced
                control.park().await;
                self.reloader.schedule_reload(delay);
            }
            None => control.release().await,
        }

        debug!(phase = ?outcome.phase(), "Action settled");
        Ok(outcome)
    }

    async fn roll_back(&self, control: &UiControl, error: String) -> ActionOutcome {
        control.rollback().await;
        warn!("Action failed, rolled back: {}", error);
        self.notifications
            .notify(format!("Error: {}", error), Severity::Error)
            .await;
        ActionOutcome::RolledBack { error }
    }
}
