//! Effect reconciliation engine
//!
//! # Architecture
//!
//! ```text
//!   Scheduler (every 0.5s)
//!        │
//!        ▼
//!   DiscEffects::tick ── one Arc<Catalog> snapshot per pass
//!        │
//!        ├─ for each online entity: reconcile_entity
//!        │     held_trigger ─► Catalog::resolve ─► grant_reason
//!        │     grant / release through the host, OwnershipLedger updated
//!        │
//!        └─ drop ledger marks of entities that went offline
//! ```

mod ledger;
mod reconcile;
mod scheduler;
mod service;


pub use ledger::OwnershipLedger;
pub use reconcile::{GrantReason, ReconcileOutcome, grant_reason, reconcile_entity};
pub use scheduler::Scheduler;
pub use service::{DiscEffects, EngineError, TickReport};
