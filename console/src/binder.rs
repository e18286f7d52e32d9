//! Server-reported state mapped onto the console's controls
//!
//! This is a one-shot read run at startup and after every reload. It never
//! touches a control with a request in flight.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::constants::endpoints;
use crate::control::UiControl;
use crate::errors::ConsoleError;
use crate::http::{ActionRequest, ControlPlane};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub success: bool,
    #[serde(default)]
    pub services: BTreeMap<String, bool>,
    pub disk_usage: Option<String>,
}

impl SystemStatus {
    pub fn is_active(&self, service: &str) -> Option<bool> {
        self.services.get(service).copied()
    }
}

pub async fn fetch_system_status(
    control_plane: &dyn ControlPlane,
) -> Result<SystemStatus, ConsoleError> {
    let request = ActionRequest {
        method: Method::GET,
        path: endpoints::SYSTEM_STATUS.to_string(),
        body: None,
    };

    let raw = control_plane.send(&request).await?;
    if !raw.is_success() {
        return Err(ConsoleError::Other(format!(
            "System status request failed: HTTP {}: {}",
            raw.status, raw.body
        )));
    }

    let status: SystemStatus = serde_json::from_str(&raw.body)
        .map_err(|e| ConsoleError::Other(format!("Failed to parse system status: {}", e)))?;
    if !status.success {
        return Err(ConsoleError::Other(
            "Control plane reported an unsuccessful status read".to_string(),
        ));
    }

    debug!("System status: {:?}", status.services);
    Ok(status)
}

/// Apply reported service states to matching toggles. Returns how many
/// controls were updated.
pub async fn bind_controls<'a>(
    status: &SystemStatus,
    controls: impl IntoIterator<Item = &'a UiControl>,
) -> usize {
    let mut bound = 0;
    for control in controls {
        let name = control.name().await;
        if let Some(active) = status.is_active(&name) {
            if control.bind(active).await {
                bound += 1;
            }
        }
    }
    info!("Bound {} controls from server state", bound);
    bound
}
