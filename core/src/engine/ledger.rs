use hashbrown::{HashMap, HashSet};

use crate::effects::EffectKind;
use crate::ids::EntityId;

/// Per-entity record of which effect instances this engine granted.
///
/// A kind is marked iff the engine most recently applied it to that entity and
/// has not removed it since. Nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct OwnershipLedger {
    marks: HashMap<EntityId, HashSet<EffectKind>>,
}

impl OwnershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, entity: EntityId, kind: EffectKind) {
        self.marks.entry(entity).or_default().insert(kind);
    }

    /// Clear a mark. Returns true if it was set.
    pub fn unmark(&mut self, entity: EntityId, kind: EffectKind) -> bool {
        let Some(kinds) = self.marks.get_mut(&entity) else {
            return false;
        };
        let removed = kinds.remove(&kind);
        if kinds.is_empty() {
            self.marks.remove(&entity);
        }
        removed
    }

    pub fn is_marked(&self, entity: EntityId, kind: EffectKind) -> bool {
        self.marks
            .get(&entity)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Marked kinds for `entity`, sorted
    pub fn marked(&self, entity: EntityId) -> Vec<EffectKind> {
        let mut kinds: Vec<EffectKind> = self
            .marks
            .get(&entity)
            .map(|kinds| kinds.iter().copied().collect())
            .unwrap_or_default();
        kinds.sort_unstable();
        kinds
    }

    pub fn owned_count(&self, entity: EntityId) -> usize {
        self.marks.get(&entity).map_or(0, HashSet::len)
    }

    /// Keep only entities for which `keep` returns true. Returns how many were dropped.
    pub fn retain_entities(&mut self, mut keep: impl FnMut(EntityId) -> bool) -> usize {
        let before = self.marks.len();
        self.marks.retain(|entity, _| keep(*entity));
        before - self.marks.len()
    }

    /// Entities with at least one mark
    pub fn entity_count(&self) -> usize {
        self.marks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALEX: EntityId = EntityId(1);
    const SAM: EntityId = EntityId(2);

    #[test]
    fn marks_are_entity_scoped() {
        let mut ledger = OwnershipLedger::new();
        ledger.mark(ALEX, EffectKind::Speed);

        assert!(ledger.is_marked(ALEX, EffectKind::Speed));
        assert!(!ledger.is_marked(SAM, EffectKind::Speed));
        assert!(!ledger.is_marked(ALEX, EffectKind::Haste));
    }

    #[test]
    fn unmark_drops_empty_entities() {
        let mut ledger = OwnershipLedger::new();
        ledger.mark(ALEX, EffectKind::Speed);
        ledger.mark(ALEX, EffectKind::Luck);

        assert!(ledger.unmark(ALEX, EffectKind::Speed));
        assert!(!ledger.unmark(ALEX, EffectKind::Speed));
        assert_eq!(ledger.marked(ALEX), vec![EffectKind::Luck]);

        ledger.unmark(ALEX, EffectKind::Luck);
        assert_eq!(ledger.entity_count(), 0);
        assert!(!ledger.unmark(SAM, EffectKind::Luck));
    }

    #[test]
    fn retain_drops_departed_entities() {
        let mut ledger = OwnershipLedger::new();
        ledger.mark(ALEX, EffectKind::Speed);
        ledger.mark(SAM, EffectKind::Haste);

        assert_eq!(ledger.retain_entities(|e| e == ALEX), 1);
        assert_eq!(ledger.owned_count(SAM), 0);
        assert_eq!(ledger.owned_count(ALEX), 1);

        assert_eq!(ledger.retain_entities(|_| false), 1);
        assert_eq!(ledger.entity_count(), 0);
    }
}
