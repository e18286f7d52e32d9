// File: console/src/actions/descriptor.rs
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

use crate::constants::{endpoints, messages, reload, targets};
use crate::http::protocol::{ActionRequest, ToggleRequest};

/// Static description of one administrative operation and its failure policy
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub target: String,
    pub endpoint: String,
    pub method: Method,
    pub requires_confirmation: bool,
    pub confirmation_prompt: String,
    pub payload: Option<Value>,
    /// Value applied optimistically to a toggle while the request is in flight
    pub desired_value: Option<bool>,
    /// Page-wide operations show the blocking overlay; scoped ones only
    /// disable their own control
    pub blocking_message: Option<String>,
    pub busy_label: Option<String>,
    pub success_fallback: String,
    pub treat_transport_failure_as_expected: bool,
    pub disconnect_message: Option<String>,
    pub reload_after_success: Option<Duration>,
    pub reload_after_disconnect: Option<Duration>,
    pub wrap_http_errors: bool,
}

impl ActionDescriptor {
    /// Start or stop a managed service (DHCP, TFTP, ...)
    pub fn toggle_service(service: &str, enable: bool) -> Self {
        let service_key = service.to_lowercase();
        let service_label = service.to_uppercase();
        let verb = if enable { "start" } else { "stop" };
        let done = if enable { "started" } else { "stopped" };

        // Serializing a single bool field cannot fail
        let payload = serde_json::to_value(ToggleRequest { enable }).ok();

        Self {
            target: service_key.clone(),
            endpoint: format!("{}/{}/toggle", endpoints::ADMIN_PREFIX, service_key),
            method: Method::POST,
            requires_confirmation: true,
            confirmation_prompt: format!(
                "Are you sure you want to {} the {} server?",
                verb.to_uppercase(),
                service_label
            ),
            payload,
            desired_value: Some(enable),
            blocking_message: None,
            busy_label: None,
            success_fallback: format!("{} server {}", service_label, done),
            treat_transport_failure_as_expected: false,
            disconnect_message: None,
            reload_after_success: None,
            reload_after_disconnect: None,
            wrap_http_errors: false,
        }
    }

    /// Restart the reverse proxy. The proxy drops our own connection while it
    /// restarts, so a missing response is expected and leads to a reload.
    pub fn restart_proxy() -> Self {
        Self {
            target: targets::RESTART_PROXY.to_string(),
            endpoint: endpoints::PROXY_RESTART.to_string(),
            method: Method::POST,
            requires_confirmation: true,
            confirmation_prompt: messages::PROXY_RESTART_PROMPT.to_string(),
            payload: None,
            desired_value: None,
            blocking_message: Some(messages::PROXY_RESTART_OVERLAY.to_string()),
            busy_label: Some(messages::PROXY_RESTART_BUSY_LABEL.to_string()),
            success_fallback: messages::PROXY_RESTART_SUCCESS.to_string(),
            treat_transport_failure_as_expected: true,
            disconnect_message: Some(messages::PROXY_RESTART_DISCONNECT.to_string()),
            reload_after_success: Some(reload::AFTER_PROXY_RESTART),
            reload_after_disconnect: Some(reload::AFTER_PROXY_DISCONNECT),
            wrap_http_errors: false,
        }
    }

    /// Regenerate the iPXE boot menus from the image catalog
    pub fn regenerate_menus() -> Self {
        Self {
            target: targets::REGENERATE_MENUS.to_string(),
            endpoint: endpoints::MENUS_REGENERATE.to_string(),
            method: Method::POST,
            requires_confirmation: true,
            confirmation_prompt: messages::MENUS_PROMPT.to_string(),
            payload: None,
            desired_value: None,
            blocking_message: Some(messages::MENUS_OVERLAY.to_string()),
            busy_label: Some(messages::MENUS_BUSY_LABEL.to_string()),
            success_fallback: messages::MENUS_SUCCESS.to_string(),
            treat_transport_failure_as_expected: false,
            disconnect_message: None,
            reload_after_success: Some(reload::AFTER_MENU_REGENERATION),
            reload_after_disconnect: None,
            wrap_http_errors: true,
        }
    }

    pub fn request(&self) -> ActionRequest {
        ActionRequest {
            method: self.method.clone(),
            path: self.endpoint.clone(),
            body: self.payload.clone(),
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking_message.is_some()
    }
}
