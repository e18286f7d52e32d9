//! Mock control plane server for testing
//!
//! Answers the admin endpoints the console calls, without a real netboot
//! server behind them.

use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub struct MockControlPlane {
    pub server: MockServer,
    pub base_url: String,
}

impl MockControlPlane {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Toggle accepted for the given desired state
    pub async fn mock_toggle_success(&self, service: &str, enable: bool, message: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/admin/{}/toggle", service)))
            .and(body_json(json!({ "enable": enable })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": message,
                "enabled": enable
            })))
            .mount(&self.server)
            .await;
    }

    /// Toggle refused by the server (`success: false`)
    pub async fn mock_toggle_failure(&self, service: &str, error: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/admin/{}/toggle", service)))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": error
            })))
            .mount(&self.server)
            .await;
    }

    /// Toggle that answers only after `delay`
    pub async fn mock_toggle_slow(&self, service: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(format!("/admin/{}/toggle", service)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "message": "done" }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_proxy_restart_success(&self) {
        Mock::given(method("POST"))
            .and(path("/admin/nginx/restart"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "NGINX server restarted successfully!"
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_proxy_restart_failure(&self, error: &str) {
        Mock::given(method("POST"))
            .and(path("/admin/nginx/restart"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": error
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_menus_success(&self) {
        Mock::given(method("POST"))
            .and(path("/admin/api/menus/regenerate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "output": "Generated 4 menu entries"
            })))
            .mount(&self.server)
            .await;
    }

    /// Non-2xx with a plain-text body
    pub async fn mock_menus_http_error(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/admin/api/menus/regenerate"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_menus_slow(&self, delay: Duration) {
        Mock::given(method("POST"))
            .and(path("/admin/api/menus/regenerate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Any endpoint answering 200 with a body lacking `success`
    pub async fn mock_malformed(&self, endpoint: &str) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_system_status(&self, dhcp: bool, tftp: bool) {
        Mock::given(method("GET"))
            .and(path("/admin/api/system/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "services": {
                    "dhcp": dhcp,
                    "tftp": tftp,
                    "nginx": true,
                    "web": true
                },
                "disk_usage": "12.40 GB"
            })))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server saw on `endpoint`
    pub async fn request_count(&self, endpoint: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == endpoint)
            .count()
    }

    /// `Content-Type` of each request the server saw on `endpoint`
    pub async fn content_types(&self, endpoint: &str) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == endpoint)
            .map(|r| {
                r.headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.to_string())
            })
            .collect()
    }
}
