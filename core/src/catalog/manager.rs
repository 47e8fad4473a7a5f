use std::sync::{Arc, Mutex, PoisonError};

use discfx_types::{NO_EFFECT, TriggerConfig, TriggerEntry};

use super::{Catalog, CatalogHandle};
use crate::config::{ConfigError, ConfigStore};
use crate::effects::{EffectDescriptor, EffectKind};
use crate::ids::ItemId;
use crate::triggers::TriggerRegistry;

/// Failures of administrative catalog edits. None of them change any state.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Unknown disc: {0}")]
    UnknownTrigger(String),

    #[error("Unknown potion effect: {0}")]
    UnknownEffect(String),

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result of a successful `set`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerUpdate {
    Set {
        item: ItemId,
        descriptor: EffectDescriptor,
    },
    Cleared {
        item: ItemId,
    },
}

/// Parse an admin-supplied amplifier
pub fn parse_level(text: &str) -> Result<u8, AdminError> {
    text.trim()
        .parse::<u8>()
        .map_err(|_| AdminError::InvalidLevel(text.to_string()))
}

/// Owns the trigger file and publishes catalog snapshots built from it.
///
/// Safe to share between the tick loop and an admin thread: readers only ever
/// take snapshots, and edits are serialized on the in-memory config.
#[derive(Debug)]
pub struct CatalogManager {
    registry: TriggerRegistry,
    store: ConfigStore,
    config: Mutex<TriggerConfig>,
    handle: CatalogHandle,
}

impl CatalogManager {
    /// Read the trigger file, add default entries for new trigger items, and
    /// publish the first catalog
    pub fn open(registry: TriggerRegistry, store: ConfigStore) -> Result<Self, ConfigError> {
        let mut config = store.load()?;
        preload(&registry, &store, &mut config)?;
        let catalog = Catalog::build(&config, &registry);

        Ok(Self {
            registry,
            store,
            config: Mutex::new(config),
            handle: CatalogHandle::new(catalog),
        })
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Current catalog snapshot
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.handle.snapshot()
    }

    /// Everything currently configured (same as a snapshot, named for the list command)
    pub fn list_configured_triggers(&self) -> Arc<Catalog> {
        self.handle.snapshot()
    }

    /// Re-read the trigger file and publish a rebuilt catalog.
    ///
    /// Active effects and ownership marks are untouched; the next pass picks
    /// up the new catalog. On error the previous catalog stays published.
    pub fn reload(&self) -> Result<Arc<Catalog>, ConfigError> {
        let mut config = self.lock_config();
        let mut fresh = self.store.load()?;
        preload(&self.registry, &self.store, &mut fresh)?;

        let catalog = Catalog::build(&fresh, &self.registry);
        *config = fresh;
        self.handle.replace(catalog);
        Ok(self.handle.snapshot())
    }

    /// Configure `disc` to grant `effect` at `level`, persist, and rebuild.
    /// An effect of `NONE` clears the disc instead.
    pub fn set_trigger(
        &self,
        disc: &str,
        effect: &str,
        level: &str,
        infinite: bool,
    ) -> Result<TriggerUpdate, AdminError> {
        let item = self.resolve_trigger(disc)?;
        let amplifier = parse_level(level)?;

        if effect.trim().eq_ignore_ascii_case(NO_EFFECT) {
            self.edit(&item, |config| config.clear(item.as_str()))?;
            return Ok(TriggerUpdate::Cleared { item });
        }

        let kind = EffectKind::from_name(effect)
            .ok_or_else(|| AdminError::UnknownEffect(effect.to_string()))?;

        let entry = TriggerEntry::new(kind.name(), i64::from(amplifier), infinite);
        self.edit(&item, |config| config.set(item.as_str(), entry))?;
        Ok(TriggerUpdate::Set {
            item,
            descriptor: EffectDescriptor::new(kind, amplifier, infinite),
        })
    }

    /// Reset `disc` to grant nothing, persist, and rebuild
    pub fn clear_trigger(&self, disc: &str) -> Result<ItemId, AdminError> {
        let item = self.resolve_trigger(disc)?;
        self.edit(&item, |config| config.clear(item.as_str()))?;
        Ok(item)
    }

    fn resolve_trigger(&self, disc: &str) -> Result<ItemId, AdminError> {
        self.registry
            .resolve_name(disc)
            .cloned()
            .ok_or_else(|| AdminError::UnknownTrigger(disc.to_string()))
    }

    /// Apply `change` to a copy of the config, persist it, then publish.
    /// Nothing changes if the save fails.
    fn edit(
        &self,
        item: &ItemId,
        change: impl FnOnce(&mut TriggerConfig),
    ) -> Result<(), ConfigError> {
        let mut config = self.lock_config();

        let mut next = config.clone();
        change(&mut next);
        self.store.save(&next)?;

        let catalog = Catalog::build(&next, &self.registry);
        *config = next;
        self.handle.replace(catalog);
        tracing::debug!(%item, "Trigger entry saved");
        Ok(())
    }

    fn lock_config(&self) -> std::sync::MutexGuard<'_, TriggerConfig> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Give every discovered trigger item an entry, saving if any were added
fn preload(
    registry: &TriggerRegistry,
    store: &ConfigStore,
    config: &mut TriggerConfig,
) -> Result<(), ConfigError> {
    let added = config.ensure_entries(registry.items().iter().map(ItemId::as_str));
    if added > 0 {
        store.save(config)?;
        tracing::info!("Preloaded {} missing disc config entries", added);
    }
    Ok(())
}
