//! Error types for the netboot console
//!
//! Only two kinds of error ever leave the console: configuration problems at
//! startup and a busy control refusing a second action. Network and server
//! failures are reconciled inside the orchestrator and surface as
//! notifications instead.

use chrono::{DateTime, Utc};
use std::fmt;

/// Main error type for the console
#[derive(Debug)]
pub enum ConsoleError {
    /// Configuration-related errors
    Config(ConfigError),

    /// The control plane could not be reached
    Transport(TransportError),

    /// Action could not be started
    Action(ActionError),

    /// Other errors with context
    Other(String),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

/// A network exchange that produced no response at all
#[derive(Debug, Clone)]
pub struct TransportError {
    pub url: String,
    pub reason: String,
}

/// Action start-up error variants
#[derive(Debug)]
pub enum ActionError {
    /// The control already has a request in flight
    ControlBusy {
        control: String,
        since: Option<DateTime<Utc>>,
    },

    /// No control is registered under this name
    UnknownControl { control: String },

    /// The control kind does not fit the action (e.g. toggling a button)
    InvalidControl { control: String, reason: String },
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Config(e) => write!(f, "Configuration error: {}", e),
            ConsoleError::Transport(e) => write!(f, "Transport error: {}", e),
            ConsoleError::Action(e) => write!(f, "Action error: {}", e),
            ConsoleError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

// The bare reason is what operators see in the error notification.
impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::ControlBusy { control, since } => match since {
                Some(started) => {
                    let elapsed = Utc::now().signed_duration_since(*started);
                    write!(
                        f,
                        "Control '{}' is busy with a request in flight (started {}s ago)",
                        control,
                        elapsed.num_seconds()
                    )
                }
                None => write!(f, "Control '{}' is busy with a request in flight", control),
            },
            ActionError::UnknownControl { control } => {
                write!(f, "No control named '{}'", control)
            }
            ActionError::InvalidControl { control, reason } => {
                write!(f, "Control '{}' cannot run this action: {}", control, reason)
            }
        }
    }
}

impl std::error::Error for ConsoleError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for TransportError {}
impl std::error::Error for ActionError {}

impl From<anyhow::Error> for ConsoleError {
    fn from(err: anyhow::Error) -> Self {
        ConsoleError::Other(err.to_string())
    }
}

impl From<ConfigError> for ConsoleError {
    fn from(err: ConfigError) -> Self {
        ConsoleError::Config(err)
    }
}

impl From<TransportError> for ConsoleError {
    fn from(err: TransportError) -> Self {
        ConsoleError::Transport(err)
    }
}

impl From<ActionError> for ConsoleError {
    fn from(err: ActionError) -> Self {
        ConsoleError::Action(err)
    }
}

impl ConsoleError {
    /// True when the error is a mutual-exclusion rejection
    pub fn is_busy(&self) -> bool {
        matches!(self, ConsoleError::Action(ActionError::ControlBusy { .. }))
    }
}
