pub mod catalog;
pub mod config;
pub mod effects;
pub mod engine;
pub mod host;
pub mod ids;
pub mod triggers;

// Re-exports for convenience
pub use catalog::{AdminError, Catalog, CatalogHandle, CatalogManager, TriggerUpdate};
pub use config::{ConfigError, EngineTiming, Settings};
pub use effects::{ActiveEffect, EffectDescriptor, EffectGrant, EffectKind};
pub use engine::{DiscEffects, EngineError, GrantReason, OwnershipLedger, ReconcileOutcome, Scheduler, TickReport};
pub use host::{EffectSubsystem, EntityRoster, Hand, HeldItems, Host, HostCall, ItemRegistry, SimHost};
pub use ids::{EntityId, ItemId};
pub use triggers::{TriggerRegistry, held_trigger};
