//! Administrative actions: what they are and how one runs end to end
//!
//! An `ActionDescriptor` declares the request and its failure policy; the
//! `ActionOrchestrator` takes it through confirmation, optimistic mutation,
//! the network exchange and reconciliation against one `UiControl`.

pub mod confirmation;
pub mod descriptor;
pub mod orchestrator;
pub mod reload;

pub use confirmation::{Confirmer, LineConfirmer, StaticConfirmer};
pub use descriptor::ActionDescriptor;
pub use orchestrator::{ActionOrchestrator, ActionOutcome, ActionPhase};
pub use reload::{PageReloader, ReloadRequest, TimedReloader};
