//! HTTP communication with the netboot control plane
//!
//! # Communication Pattern
//!
//! ```text
//! Orchestrator → ActionRequest → ControlPlane::send → RawResponse
//!                                       ↓
//!                          protocol::interpret → Reply
//! ```
//!
//! The transport layer never judges a response: non-2xx statuses and
//! `success: false` bodies come back as `Ok(RawResponse)`. Only a missing or
//! truncated response is an error.

pub mod control_plane;
pub mod protocol;

pub use control_plane::{ControlPlane, HttpControlPlane};
pub use protocol::{interpret, ActionRequest, ActionResponse, RawResponse, Reply};
