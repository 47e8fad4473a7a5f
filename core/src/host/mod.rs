//! Host runtime seams.
//!
//! The engine never owns entity or effect state. It reads and writes it through
//! these traits, which a server integration implements over its live objects.
//! [`SimHost`] is an in-memory implementation used by the CLI and the tests.

mod sim;

use crate::effects::{ActiveEffect, EffectGrant, EffectKind};
use crate::ids::{EntityId, ItemId};

pub use sim::{Hand, HostCall, SimHost, SimPlayer, VANILLA_DISCS};

/// Online-entity roster
pub trait EntityRoster {
    fn list_active_entities(&self) -> Vec<EntityId>;
}

/// Item registry scan, used once at startup to discover trigger items
pub trait ItemRegistry {
    fn all_items(&self) -> Vec<ItemId>;
}

/// What an entity is presenting in each hand
pub trait HeldItems {
    fn main_hand(&self, entity: EntityId) -> Option<ItemId>;
    fn off_hand(&self, entity: EntityId) -> Option<ItemId>;
}

/// The host's effect subsystem
pub trait EffectSubsystem {
    fn active_effect(&self, entity: EntityId, kind: EffectKind) -> Option<ActiveEffect>;

    /// Apply `grant`, overwriting any instance of the same kind
    fn grant_effect(&mut self, entity: EntityId, grant: EffectGrant);

    fn remove_effect(&mut self, entity: EntityId, kind: EffectKind);
}

/// Everything a reconciliation pass needs from the host
pub trait Host: EntityRoster + HeldItems + EffectSubsystem {}

impl<T: EntityRoster + HeldItems + EffectSubsystem> Host for T {}
