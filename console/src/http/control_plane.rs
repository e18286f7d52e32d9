// File: console/src/http/control_plane.rs
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::protocol::{ActionRequest, RawResponse};
use crate::config::Config;
use crate::errors::{ConfigError, ConsoleError, TransportError};

/// The remote side of every administrative action.
///
/// `Err` means no complete response arrived: the connection failed or
/// dropped before the body was read. Any complete response, including
/// non-2xx, is returned as `Ok` for the caller to interpret.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn send(&self, request: &ActionRequest) -> Result<RawResponse, TransportError>;
}

pub struct HttpControlPlane {
    base_url: Url,
    client: Client,
}

impl HttpControlPlane {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ConsoleError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ConsoleError::Config(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                reason: e.to_string(),
            })
        })?;

        // No timeout unless configured: the transport settles on its own
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConsoleError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConsoleError> {
        Self::new(&config.base_url, config.request_timeout())
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url.join(path).map_err(|e| TransportError {
            url: format!("{}{}", self.base_url, path),
            reason: format!("invalid URL: {}", e),
        })
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn send(&self, request: &ActionRequest) -> Result<RawResponse, TransportError> {
        let url = self.resolve(&request.path)?;
        info!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), url.clone());
        // `json` sets the content type; bodyless requests carry none
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("Request to {} produced no response: {}", url, e);
            TransportError {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status().as_u16();
        // A connection dropped mid-body is a transport failure, not a malformed reply
        let body = response.text().await.map_err(|e| {
            warn!("Response from {} was cut off: {}", url, e);
            TransportError {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;
        debug!("{} answered {} ({} bytes)", url, status, body.len());

        Ok(RawResponse { status, body })
    }
}
