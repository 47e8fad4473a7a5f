//! Effect catalog: trigger item -> desired effect
//!
//! A [`Catalog`] is an immutable snapshot. Reloads build a fresh one and
//! publish it through [`CatalogHandle`], so a reconciliation pass holding an
//! `Arc<Catalog>` never sees a half-applied reload.

mod manager;

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Local};
use discfx_types::TriggerConfig;

use crate::effects::{EffectDescriptor, EffectKind};
use crate::ids::ItemId;
use crate::triggers::TriggerRegistry;

pub use manager::{AdminError, CatalogManager, TriggerUpdate, parse_level};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<ItemId, EffectDescriptor>,
    loaded_at: Option<DateTime<Local>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (ItemId, EffectDescriptor)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            loaded_at: Some(Local::now()),
        }
    }

    /// Build from the trigger file, considering only discovered trigger items.
    ///
    /// `NONE` entries are absent. Entries with an unknown effect name or a level
    /// outside `0..=255` are logged and skipped; they never fail the load.
    pub fn build(config: &TriggerConfig, registry: &TriggerRegistry) -> Self {
        let mut entries = BTreeMap::new();

        for item in registry.items() {
            let Some(entry) = config.entry(item.as_str()) else {
                continue;
            };
            if entry.is_none() {
                continue;
            }

            let Some(kind) = EffectKind::from_name(&entry.effect) else {
                tracing::warn!("Unknown potion effect '{}' for {}", entry.effect, item);
                continue;
            };
            let Ok(amplifier) = u8::try_from(entry.level) else {
                tracing::warn!("Level {} out of range for {}", entry.level, item);
                continue;
            };

            entries.insert(
                item.clone(),
                EffectDescriptor::new(kind, amplifier, entry.infinite),
            );
        }

        tracing::info!("Loaded {} disc effect configurations", entries.len());
        Self {
            entries,
            loaded_at: Some(Local::now()),
        }
    }

    /// Desired effect for `item`, if it has one
    pub fn resolve(&self, item: &str) -> Option<EffectDescriptor> {
        self.entries.get(item).copied()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.entries.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in item-name order
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &EffectDescriptor)> {
        self.entries.iter()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }
}

/// Shared, atomically replaceable reference to the current catalog
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The current snapshot. Holders keep seeing it even after a reload.
    pub fn snapshot(&self) -> Arc<Catalog> {
        // The guarded value is a pointer swap; a poisoned lock still holds a whole snapshot.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publish `catalog`, returning the snapshot it replaced
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}
