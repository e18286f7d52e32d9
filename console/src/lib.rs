pub mod actions;
pub mod binder;
pub mod config;
pub mod console;
pub mod constants;
pub mod control;
pub mod errors;
pub mod feedback;
pub mod http;

// Re-export commonly used types
pub use actions::{ActionDescriptor, ActionOrchestrator, ActionOutcome, Confirmer, PageReloader};
pub use config::{Config, ConfigManager};
pub use console::AdminConsole;
pub use control::UiControl;
pub use errors::ConsoleError;
pub use feedback::{BlockingOverlay, NotificationFeed, Severity};
pub use http::{ControlPlane, HttpControlPlane};
