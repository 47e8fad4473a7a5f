use std::sync::Arc;

use hashbrown::HashSet;

use super::{OwnershipLedger, ReconcileOutcome, reconcile_entity};
use crate::catalog::{AdminError, Catalog, CatalogManager, TriggerUpdate};
use crate::config::{ConfigError, ConfigStore, EngineTiming, Settings, TimingError};
use crate::host::{EffectSubsystem, HeldItems, Host};
use crate::ids::{EntityId, ItemId};
use crate::triggers::TriggerRegistry;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid engine timing: {0}")]
    Timing(#[from] TimingError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Totals for one scheduler pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub entities: usize,
    pub grants: usize,
    pub releases: usize,
    /// Offline entities whose ownership marks were dropped
    pub forgotten: usize,
}

/// The effect engine: catalog, ownership ledger and timing policy.
///
/// The tick loop owns this value. Admin edits go through the shared
/// [`CatalogManager`], which can be cloned out with [`DiscEffects::catalogs`]
/// and used from another thread while passes run.
#[derive(Debug)]
pub struct DiscEffects {
    catalogs: Arc<CatalogManager>,
    ledger: OwnershipLedger,
    timing: EngineTiming,
}

impl DiscEffects {
    /// Discover trigger items, load the trigger file, and publish the first catalog
    pub fn start(
        settings: &Settings,
        items: impl IntoIterator<Item = ItemId>,
    ) -> Result<Self, EngineError> {
        settings.timing.validate()?;
        let registry = TriggerRegistry::discover(items, &settings.trigger_prefix);
        let store = ConfigStore::new(settings.trigger_file());
        let catalogs = CatalogManager::open(registry, store)?;
        Ok(Self::new(Arc::new(catalogs), settings.timing)?)
    }

    pub fn new(catalogs: Arc<CatalogManager>, timing: EngineTiming) -> Result<Self, TimingError> {
        timing.validate()?;
        Ok(Self {
            catalogs,
            ledger: OwnershipLedger::new(),
            timing,
        })
    }

    pub fn catalogs(&self) -> &Arc<CatalogManager> {
        &self.catalogs
    }

    pub fn timing(&self) -> &EngineTiming {
        &self.timing
    }

    pub fn ledger(&self) -> &OwnershipLedger {
        &self.ledger
    }

    /// Reconcile a single entity against the current catalog
    pub fn reconcile<H: HeldItems + EffectSubsystem + ?Sized>(
        &mut self,
        host: &mut H,
        entity: EntityId,
    ) -> ReconcileOutcome {
        let catalog = self.catalogs.snapshot();
        reconcile_entity(host, entity, &catalog, &mut self.ledger, &self.timing)
    }

    /// One scheduler pass: every online entity against a single catalog snapshot,
    /// then drop marks for entities that went offline
    pub fn tick<H: Host + ?Sized>(&mut self, host: &mut H) -> TickReport {
        let catalog = self.catalogs.snapshot();
        let roster = host.list_active_entities();
        let mut report = TickReport {
            entities: roster.len(),
            ..TickReport::default()
        };

        for &entity in &roster {
            let outcome = reconcile_entity(host, entity, &catalog, &mut self.ledger, &self.timing);
            report.grants += usize::from(outcome.granted.is_some());
            report.releases += outcome.released.len();
        }

        let online: HashSet<EntityId> = roster.into_iter().collect();
        report.forgotten = self.ledger.retain_entities(|entity| online.contains(&entity));
        if report.forgotten > 0 {
            tracing::debug!(count = report.forgotten, "Forgot marks for offline entities");
        }

        tracing::trace!(
            entities = report.entities,
            grants = report.grants,
            releases = report.releases,
            "Tick complete"
        );
        report
    }

    /// Re-read the trigger file. Returns the number of configured triggers.
    pub fn reload(&self) -> Result<usize, ConfigError> {
        Ok(self.catalogs.reload()?.len())
    }

    pub fn set_trigger(
        &self,
        disc: &str,
        effect: &str,
        level: &str,
        infinite: bool,
    ) -> Result<TriggerUpdate, AdminError> {
        self.catalogs.set_trigger(disc, effect, level, infinite)
    }

    pub fn clear_trigger(&self, disc: &str) -> Result<ItemId, AdminError> {
        self.catalogs.clear_trigger(disc)
    }

    pub fn list_configured_triggers(&self) -> Arc<Catalog> {
        self.catalogs.list_configured_triggers()
    }
}
