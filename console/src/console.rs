// File: console/src/console.rs
//! The admin page as a whole: its controls, feedback sinks and orchestrator

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::actions::{
    ActionDescriptor, ActionOrchestrator, ActionOutcome, Confirmer, PageReloader,
};
use crate::binder::{bind_controls, fetch_system_status, SystemStatus};
use crate::config::Config;
use crate::constants::{messages, targets};
use crate::control::{ControlKind, UiControl};
use crate::errors::{ActionError, ConsoleError};
use crate::feedback::{BlockingOverlay, NotificationFeed};
use crate::http::ControlPlane;

pub struct AdminConsole {
    orchestrator: ActionOrchestrator,
    control_plane: Arc<dyn ControlPlane>,
    controls: BTreeMap<String, UiControl>,
}

impl AdminConsole {
    pub fn new(
        config: &Config,
        control_plane: Arc<dyn ControlPlane>,
        confirmer: Arc<dyn Confirmer>,
        reloader: Arc<dyn PageReloader>,
    ) -> Self {
        let notifications = NotificationFeed::with_settings(
            config.notifications.display_duration(),
            config.notifications.max_visible,
        );
        let overlay = BlockingOverlay::new();
        let orchestrator = ActionOrchestrator::new(
            control_plane.clone(),
            confirmer,
            reloader,
            notifications,
            overlay,
        );

        let mut controls = BTreeMap::new();
        for service in &config.services.managed {
            let key = service.to_lowercase();
            // Off until the first status read says otherwise
            controls.insert(key.clone(), UiControl::toggle(&key, false));
        }
        controls.insert(
            targets::RESTART_PROXY.to_string(),
            UiControl::button(targets::RESTART_PROXY, messages::PROXY_RESTART_IDLE_LABEL),
        );
        controls.insert(
            targets::REGENERATE_MENUS.to_string(),
            UiControl::button(targets::REGENERATE_MENUS, messages::MENUS_IDLE_LABEL),
        );

        Self {
            orchestrator,
            control_plane,
            controls,
        }
    }

    pub fn control(&self, name: &str) -> Result<&UiControl, ActionError> {
        self.controls
            .get(&name.to_lowercase())
            .ok_or_else(|| ActionError::UnknownControl {
                control: name.to_string(),
            })
    }

    pub fn controls(&self) -> impl Iterator<Item = &UiControl> {
        self.controls.values()
    }

    pub fn notifications(&self) -> &NotificationFeed {
        self.orchestrator.notifications()
    }

    pub fn overlay(&self) -> &BlockingOverlay {
        self.orchestrator.overlay()
    }

    /// Flip a service switch and run the toggle it implies
    pub async fn toggle_service(
        &self,
        service: &str,
        enable: bool,
    ) -> Result<ActionOutcome, ConsoleError> {
        let control = self.control(service)?;
        if control.kind().await != ControlKind::Toggle {
            return Err(ActionError::InvalidControl {
                control: service.to_string(),
                reason: "not a service switch".to_string(),
            }
            .into());
        }

        control.flip(enable).await;
        self.orchestrator
            .perform_action(&ActionDescriptor::toggle_service(service, enable), control)
            .await
    }

    pub async fn restart_proxy(&self) -> Result<ActionOutcome, ConsoleError> {
        let control = self.control(targets::RESTART_PROXY)?;
        self.orchestrator
            .perform_action(&ActionDescriptor::restart_proxy(), control)
            .await
    }

    pub async fn regenerate_menus(&self) -> Result<ActionOutcome, ConsoleError> {
        let control = self.control(targets::REGENERATE_MENUS)?;
        self.orchestrator
            .perform_action(&ActionDescriptor::regenerate_menus(), control)
            .await
    }

    /// Re-read server state and rebind the idle controls
    pub async fn refresh(&self) -> Result<SystemStatus, ConsoleError> {
        let status = fetch_system_status(self.control_plane.as_ref()).await?;
        bind_controls(&status, self.controls.values()).await;
        info!(
            "Console refreshed: disk usage {}",
            status.disk_usage.as_deref().unwrap_or("Unknown")
        );
        Ok(status)
    }

    /// Replace the view after a scheduled reload: the overlay is torn down,
    /// controls left disabled by the action that scheduled it come back, then
    /// everything rebinds from server state.
    pub async fn reload(&self) -> Result<SystemStatus, ConsoleError> {
        self.overlay().force_hide();
        for control in self.controls.values() {
            control.unpark().await;
        }
        self.refresh().await
    }
}
