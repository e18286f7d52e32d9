// File: console/src/http/protocol.rs
//! Wire contract of the control plane's admin endpoints
//!
//! Requests are JSON objects. Every response body is the envelope
//! `{success, message?, error?}`; a body that does not parse or lacks
//! `success` is a malformed response.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::messages::{MALFORMED_RESPONSE, UNKNOWN_ERROR};

/// One request to the control plane, relative to its base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// What came back from the wire, before interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToggleRequest {
    pub enable: bool,
}

/// How the orchestrator should reconcile a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Succeeded { message: Option<String> },
    Failed { error: String },
}

/// Translate a raw response into a reply.
///
/// With `wrap_http_errors`, any non-2xx status becomes `HTTP {status}: {body}`
/// without looking at the body. Otherwise the body is decoded as the envelope
/// first and only wrapped when it is not one.
pub fn interpret(raw: &RawResponse, wrap_http_errors: bool) -> Reply {
    if wrap_http_errors && !raw.is_success() {
        return Reply::Failed {
            error: http_error_text(raw),
        };
    }

    match serde_json::from_str::<ActionResponse>(&raw.body) {
        Ok(response) if response.success => Reply::Succeeded {
            message: response.message.filter(|m| !m.is_empty()),
        },
        Ok(response) => Reply::Failed {
            error: response
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        },
        Err(_) if !raw.is_success() => Reply::Failed {
            error: http_error_text(raw),
        },
        Err(_) => Reply::Failed {
            error: MALFORMED_RESPONSE.to_string(),
        },
    }
}

fn http_error_text(raw: &RawResponse) -> String {
    format!("HTTP {}: {}", raw.status, raw.body)
}
