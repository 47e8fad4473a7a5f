//! Trigger item discovery and held-item resolution

use crate::catalog::Catalog;
use crate::host::HeldItems;
use crate::ids::{EntityId, ItemId};

/// The fixed set of items that can act as triggers, discovered once at startup
#[derive(Debug, Clone, Default)]
pub struct TriggerRegistry {
    prefix: String,
    items: Vec<ItemId>,
}

impl TriggerRegistry {
    /// Keep every registry item whose name starts with `prefix`
    pub fn discover(items: impl IntoIterator<Item = ItemId>, prefix: &str) -> Self {
        let prefix = prefix.trim().to_ascii_uppercase();
        let mut items: Vec<ItemId> = items
            .into_iter()
            .filter(|item| item.as_str().starts_with(&prefix))
            .collect();
        items.sort();
        items.dedup();

        tracing::info!("Detected {} trigger items", items.len());
        Self { prefix, items }
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i.as_str() == item)
    }

    /// Resolve admin input to a trigger item.
    ///
    /// Accepts the full name (`MUSIC_DISC_13`, any case), the name without the
    /// prefix (`13`), or a `_`-delimited suffix (`pigstep`).
    pub fn resolve_name(&self, input: &str) -> Option<&ItemId> {
        let upper = input.trim().to_ascii_uppercase();
        if upper.is_empty() {
            return None;
        }

        if let Some(item) = self.find_exact(&upper) {
            return Some(item);
        }

        let prefixed = format!("{}{}", self.prefix, upper);
        if let Some(item) = self.find_exact(&prefixed) {
            return Some(item);
        }

        let suffix = format!("_{upper}");
        self.items.iter().find(|item| item.as_str().ends_with(&suffix))
    }

    fn find_exact(&self, name: &str) -> Option<&ItemId> {
        self.items.iter().find(|item| item.as_str() == name)
    }
}

/// Which configured trigger an entity is presenting, if any.
///
/// The main hand wins; the off hand is only consulted when the main-hand item
/// has no catalog entry.
pub fn held_trigger<H: HeldItems + ?Sized>(
    host: &H,
    entity: EntityId,
    catalog: &Catalog,
) -> Option<ItemId> {
    host.main_hand(entity)
        .filter(|item| catalog.contains(item.as_str()))
        .or_else(|| host.off_hand(entity).filter(|item| catalog.contains(item.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectDescriptor, EffectKind};
    use crate::host::{Hand, SimHost, VANILLA_DISCS};

    fn registry() -> TriggerRegistry {
        let items = VANILLA_DISCS
            .iter()
            .chain(&["STICK", "JUKEBOX"])
            .map(ItemId::new);
        TriggerRegistry::discover(items, "MUSIC_DISC_")
    }

    #[test]
    fn discover_keeps_prefixed_items_sorted() {
        let registry = registry();
        assert_eq!(registry.items().len(), VANILLA_DISCS.len());
        assert!(!registry.contains("STICK"));
        assert!(registry.items().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn resolve_name_forms() {
        let registry = registry();
        let thirteen = ItemId::new("MUSIC_DISC_13");

        assert_eq!(registry.resolve_name("MUSIC_DISC_13"), Some(&thirteen));
        assert_eq!(registry.resolve_name("music_disc_13"), Some(&thirteen));
        assert_eq!(registry.resolve_name("13"), Some(&thirteen));
        assert_eq!(
            registry.resolve_name("music_box"),
            Some(&ItemId::new("MUSIC_DISC_CREATOR_MUSIC_BOX"))
        );
        assert_eq!(registry.resolve_name("creator"), Some(&ItemId::new("MUSIC_DISC_CREATOR")));
    }

    #[test]
    fn resolve_name_rejects_non_triggers() {
        let registry = registry();
        assert_eq!(registry.resolve_name("STICK"), None);
        assert_eq!(registry.resolve_name("14"), None);
        assert_eq!(registry.resolve_name("  "), None);
    }

    fn catalog_with(items: &[&str]) -> Catalog {
        Catalog::from_entries(items.iter().map(|name| {
            (
                ItemId::new(name),
                EffectDescriptor::new(EffectKind::Speed, 0, true),
            )
        }))
    }

    #[test]
    fn main_hand_has_priority() {
        let catalog = catalog_with(&["MUSIC_DISC_13", "MUSIC_DISC_CAT"]);
        let mut host = SimHost::new();
        let alex = host.join("Alex");
        host.set_hand(alex, Hand::Main, Some(ItemId::new("MUSIC_DISC_13")));
        host.set_hand(alex, Hand::Off, Some(ItemId::new("MUSIC_DISC_CAT")));

        assert_eq!(held_trigger(&host, alex, &catalog), Some(ItemId::new("MUSIC_DISC_13")));
    }

    #[test]
    fn off_hand_used_when_main_hand_not_configured() {
        let catalog = catalog_with(&["MUSIC_DISC_CAT"]);
        let mut host = SimHost::new();
        let alex = host.join("Alex");
        host.set_hand(alex, Hand::Main, Some(ItemId::new("MUSIC_DISC_13")));
        host.set_hand(alex, Hand::Off, Some(ItemId::new("MUSIC_DISC_CAT")));

        assert_eq!(held_trigger(&host, alex, &catalog), Some(ItemId::new("MUSIC_DISC_CAT")));
    }

    #[test]
    fn nothing_configured_in_either_hand() {
        let catalog = catalog_with(&["MUSIC_DISC_FAR"]);
        let mut host = SimHost::new();
        let alex = host.join("Alex");
        host.set_hand(alex, Hand::Main, Some(ItemId::new("STICK")));

        assert_eq!(held_trigger(&host, alex, &catalog), None);
    }
}
