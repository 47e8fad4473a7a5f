use std::collections::BTreeMap;

use hashbrown::HashMap;

use super::{EffectSubsystem, EntityRoster, HeldItems, ItemRegistry};
use crate::effects::{ActiveEffect, EffectGrant, EffectKind};
use crate::ids::{EntityId, ItemId};

/// Every music disc in the vanilla item registry
pub const VANILLA_DISCS: &[&str] = &[
    "MUSIC_DISC_13",
    "MUSIC_DISC_CAT",
    "MUSIC_DISC_BLOCKS",
    "MUSIC_DISC_CHIRP",
    "MUSIC_DISC_CREATOR",
    "MUSIC_DISC_CREATOR_MUSIC_BOX",
    "MUSIC_DISC_FAR",
    "MUSIC_DISC_MALL",
    "MUSIC_DISC_MELLOHI",
    "MUSIC_DISC_STAL",
    "MUSIC_DISC_STRAD",
    "MUSIC_DISC_WARD",
    "MUSIC_DISC_11",
    "MUSIC_DISC_WAIT",
    "MUSIC_DISC_OTHERSIDE",
    "MUSIC_DISC_RELIC",
    "MUSIC_DISC_5",
    "MUSIC_DISC_PIGSTEP",
    "MUSIC_DISC_PRECIPICE",
];

const OTHER_ITEMS: &[&str] = &["AIR", "STICK", "DIAMOND_SWORD", "JUKEBOX", "DISC_FRAGMENT_5"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Main,
    Off,
}

/// Side effect issued against the simulated host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Grant { entity: EntityId, grant: EffectGrant },
    Remove { entity: EntityId, kind: EffectKind },
}

#[derive(Debug, Clone, Default)]
pub struct SimPlayer {
    pub name: String,
    pub main_hand: Option<ItemId>,
    pub off_hand: Option<ItemId>,
    effects: HashMap<EffectKind, GrantedInstance>,
}

#[derive(Debug, Clone, Copy)]
struct GrantedInstance {
    grant: EffectGrant,
    remaining: u32,
}

impl SimPlayer {
    /// Current effects, sorted by kind
    pub fn effects(&self) -> Vec<(EffectKind, ActiveEffect)> {
        let mut out: Vec<_> = self
            .effects
            .iter()
            .map(|(kind, state)| {
                (
                    *kind,
                    ActiveEffect {
                        amplifier: state.grant.amplifier,
                        remaining: state.remaining,
                    },
                )
            })
            .collect();
        out.sort_by_key(|(kind, _)| *kind);
        out
    }

    /// The grant that produced the current instance of `kind`
    pub fn grant_for(&self, kind: EffectKind) -> Option<EffectGrant> {
        self.effects.get(&kind).map(|s| s.grant)
    }
}

/// In-memory host: a player roster with hands and effect tables
#[derive(Debug, Clone)]
pub struct SimHost {
    players: BTreeMap<EntityId, SimPlayer>,
    items: Vec<ItemId>,
    next_id: i64,
    calls: Vec<HostCall>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHost {
    /// Host with the vanilla discs and a few unrelated items registered
    pub fn new() -> Self {
        let items = VANILLA_DISCS
            .iter()
            .chain(OTHER_ITEMS)
            .map(ItemId::new)
            .collect();
        Self::with_items(items)
    }

    pub fn with_items(items: Vec<ItemId>) -> Self {
        Self {
            players: BTreeMap::new(),
            items,
            next_id: 1,
            calls: Vec::new(),
        }
    }

    /// Bring a player online and return its id
    pub fn join(&mut self, name: &str) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.players.insert(
            id,
            SimPlayer {
                name: name.to_string(),
                ..SimPlayer::default()
            },
        );
        id
    }

    /// Take a player offline. Returns false if it was not online.
    pub fn leave(&mut self, entity: EntityId) -> bool {
        self.players.remove(&entity).is_some()
    }

    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.players
            .iter()
            .find(|(_, p)| p.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    pub fn player(&self, entity: EntityId) -> Option<&SimPlayer> {
        self.players.get(&entity)
    }

    pub fn players(&self) -> impl Iterator<Item = (EntityId, &SimPlayer)> {
        self.players.iter().map(|(id, p)| (*id, p))
    }

    /// Put `item` in a hand (or empty it). Returns false for unknown players.
    pub fn set_hand(&mut self, entity: EntityId, hand: Hand, item: Option<ItemId>) -> bool {
        let Some(player) = self.players.get_mut(&entity) else {
            return false;
        };
        match hand {
            Hand::Main => player.main_hand = item,
            Hand::Off => player.off_hand = item,
        }
        true
    }

    /// Count every effect down by `ticks`, dropping the ones that run out
    pub fn advance(&mut self, ticks: u32) {
        for player in self.players.values_mut() {
            player.effects.retain(|_, state| {
                state.remaining = state.remaining.saturating_sub(ticks);
                state.remaining > 0
            });
        }
    }

    /// Side effects issued since the last `take_calls`
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }
}

impl EntityRoster for SimHost {
    fn list_active_entities(&self) -> Vec<EntityId> {
        self.players.keys().copied().collect()
    }
}

impl ItemRegistry for SimHost {
    fn all_items(&self) -> Vec<ItemId> {
        self.items.clone()
    }
}

impl HeldItems for SimHost {
    fn main_hand(&self, entity: EntityId) -> Option<ItemId> {
        self.players.get(&entity)?.main_hand.clone()
    }

    fn off_hand(&self, entity: EntityId) -> Option<ItemId> {
        self.players.get(&entity)?.off_hand.clone()
    }
}

impl EffectSubsystem for SimHost {
    fn active_effect(&self, entity: EntityId, kind: EffectKind) -> Option<ActiveEffect> {
        let state = self.players.get(&entity)?.effects.get(&kind)?;
        Some(ActiveEffect {
            amplifier: state.grant.amplifier,
            remaining: state.remaining,
        })
    }

    fn grant_effect(&mut self, entity: EntityId, grant: EffectGrant) {
        self.calls.push(HostCall::Grant { entity, grant });
        if let Some(player) = self.players.get_mut(&entity) {
            player.effects.insert(
                grant.kind,
                GrantedInstance {
                    grant,
                    remaining: grant.duration,
                },
            );
        }
    }

    fn remove_effect(&mut self, entity: EntityId, kind: EffectKind) {
        self.calls.push(HostCall::Remove { entity, kind });
        if let Some(player) = self.players.get_mut(&entity) {
            player.effects.remove(&kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_overwrites_same_kind() {
        let mut host = SimHost::new();
        let alex = host.join("Alex");

        host.grant_effect(alex, EffectGrant::visible(EffectKind::Speed, 0, 100));
        host.grant_effect(alex, EffectGrant::hidden(EffectKind::Speed, 2, 50));

        let player = host.player(alex).unwrap();
        assert_eq!(player.effects().len(), 1);
        assert_eq!(
            host.active_effect(alex, EffectKind::Speed),
            Some(ActiveEffect {
                amplifier: 2,
                remaining: 50
            })
        );
        assert!(!player.grant_for(EffectKind::Speed).unwrap().particles);
    }

    #[test]
    fn advance_expires_effects() {
        let mut host = SimHost::new();
        let alex = host.join("Alex");
        host.grant_effect(alex, EffectGrant::hidden(EffectKind::Luck, 0, 30));

        host.advance(20);
        assert_eq!(host.active_effect(alex, EffectKind::Luck).unwrap().remaining, 10);

        host.advance(10);
        assert_eq!(host.active_effect(alex, EffectKind::Luck), None);
    }

    #[test]
    fn hands_and_roster() {
        let mut host = SimHost::new();
        let alex = host.join("Alex");
        let sam = host.join("Sam");
        assert_eq!(host.find("alex"), Some(alex));

        assert!(host.set_hand(alex, Hand::Off, Some(ItemId::new("MUSIC_DISC_CAT"))));
        assert_eq!(host.off_hand(alex), Some(ItemId::new("MUSIC_DISC_CAT")));
        assert_eq!(host.main_hand(alex), None);

        assert!(host.leave(sam));
        assert!(!host.leave(sam));
        assert_eq!(host.list_active_entities(), vec![alex]);
        assert!(!host.set_hand(sam, Hand::Main, None));
    }

    #[test]
    fn registry_lists_discs_and_other_items() {
        let items = SimHost::new().all_items();
        assert!(items.contains(&ItemId::new("MUSIC_DISC_PIGSTEP")));
        assert!(items.contains(&ItemId::new("STICK")));
    }
}
