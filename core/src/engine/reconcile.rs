//! Per-entity reconciliation pass
//!
//! Decides whether the engine-owned effect for one entity must be applied,
//! refreshed, left alone or removed, without touching effects granted by
//! anything else.

use std::fmt;

use super::OwnershipLedger;
use crate::catalog::Catalog;
use crate::config::EngineTiming;
use crate::effects::{ActiveEffect, EffectDescriptor, EffectGrant, EffectKind};
use crate::host::{EffectSubsystem, HeldItems};
use crate::ids::EntityId;
use crate::triggers::held_trigger;

/// Why a grant was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantReason {
    /// The entity has no effect of this kind
    Missing,
    /// An effect of this kind exists at a different level
    AmplifierMismatch,
    /// An effect of this kind exists but another source granted it
    Takeover,
    /// Our finite effect is about to run out
    Expiring,
}

impl fmt::Display for GrantReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Missing => "missing",
            Self::AmplifierMismatch => "amplifier mismatch",
            Self::Takeover => "takeover",
            Self::Expiring => "expiring",
        })
    }
}

/// Side effects of one pass for one entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub granted: Option<(EffectKind, GrantReason)>,
    /// Engine-owned kinds that were removed, sorted
    pub released: Vec<EffectKind>,
}

impl ReconcileOutcome {
    /// True if the host was not touched
    pub fn is_noop(&self) -> bool {
        self.granted.is_none() && self.released.is_empty()
    }
}

/// Decide whether `desired` has to be (re)applied given what the host reports.
///
/// Checked in order: nothing active, wrong level, not ours, ours but a finite
/// effect below the refresh threshold. Infinite effects are never renewed for
/// time alone; their grant duration outlasts many passes.
pub fn grant_reason(
    current: Option<ActiveEffect>,
    desired: &EffectDescriptor,
    marked: bool,
    timing: &EngineTiming,
) -> Option<GrantReason> {
    let Some(current) = current else {
        return Some(GrantReason::Missing);
    };
    if current.amplifier != desired.amplifier {
        Some(GrantReason::AmplifierMismatch)
    } else if !marked {
        Some(GrantReason::Takeover)
    } else if !desired.infinite && current.remaining < timing.refresh_threshold {
        Some(GrantReason::Expiring)
    } else {
        None
    }
}

/// Run one reconciliation pass for `entity` against a catalog snapshot
pub fn reconcile_entity<H: HeldItems + EffectSubsystem + ?Sized>(
    host: &mut H,
    entity: EntityId,
    catalog: &Catalog,
    ledger: &mut OwnershipLedger,
    timing: &EngineTiming,
) -> ReconcileOutcome {
    let desired = held_trigger(&*host, entity, catalog)
        .and_then(|item| catalog.resolve(item.as_str()));

    let Some(desired) = desired else {
        return ReconcileOutcome {
            granted: None,
            released: release_owned(host, entity, ledger, None),
        };
    };

    let kind = desired.kind;
    let current = host.active_effect(entity, kind);
    let reason = grant_reason(current, &desired, ledger.is_marked(entity, kind), timing);

    if let Some(reason) = reason {
        let duration = timing.grant_duration(desired.infinite);
        host.grant_effect(
            entity,
            EffectGrant::hidden(kind, desired.amplifier, duration),
        );
        ledger.mark(entity, kind);
        tracing::debug!(
            %entity,
            %kind,
            amplifier = desired.amplifier,
            duration,
            %reason,
            "Granted effect"
        );
    }

    ReconcileOutcome {
        granted: reason.map(|r| (kind, r)),
        released: release_owned(host, entity, ledger, Some(kind)),
    }
}

/// Remove every engine-owned kind on `entity` except `keep`
fn release_owned<H: EffectSubsystem + ?Sized>(
    host: &mut H,
    entity: EntityId,
    ledger: &mut OwnershipLedger,
    keep: Option<EffectKind>,
) -> Vec<EffectKind> {
    let mut released = Vec::new();
    for kind in ledger.marked(entity) {
        if Some(kind) == keep {
            continue;
        }
        host.remove_effect(entity, kind);
        ledger.unmark(entity, kind);
        tracing::debug!(%entity, %kind, "Released effect");
        released.push(kind);
    }
    released
}
