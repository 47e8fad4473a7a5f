//! Status effect vocabulary of the host.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Category of status effect, independent of intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    Speed,
    Slowness,
    Haste,
    MiningFatigue,
    Strength,
    InstantHealth,
    InstantDamage,
    JumpBoost,
    Nausea,
    Regeneration,
    Resistance,
    FireResistance,
    WaterBreathing,
    Invisibility,
    Blindness,
    NightVision,
    Hunger,
    Weakness,
    Poison,
    Wither,
    HealthBoost,
    Absorption,
    Saturation,
    Glowing,
    Levitation,
    Luck,
    Unluck,
    SlowFalling,
    ConduitPower,
    DolphinsGrace,
    BadOmen,
    HeroOfTheVillage,
    Darkness,
    TrialOmen,
    RaidOmen,
    WindCharged,
    Weaving,
    Oozing,
    Infested,
}

/// Canonical names plus the legacy aliases older configs still use.
/// Keys are upper case; lookups upper-case the input first.
static EFFECT_NAMES: phf::Map<&'static str, EffectKind> = phf_map! {
    "SPEED" => EffectKind::Speed,
    "SLOWNESS" => EffectKind::Slowness,
    "HASTE" => EffectKind::Haste,
    "MINING_FATIGUE" => EffectKind::MiningFatigue,
    "STRENGTH" => EffectKind::Strength,
    "INSTANT_HEALTH" => EffectKind::InstantHealth,
    "INSTANT_DAMAGE" => EffectKind::InstantDamage,
    "JUMP_BOOST" => EffectKind::JumpBoost,
    "NAUSEA" => EffectKind::Nausea,
    "REGENERATION" => EffectKind::Regeneration,
    "RESISTANCE" => EffectKind::Resistance,
    "FIRE_RESISTANCE" => EffectKind::FireResistance,
    "WATER_BREATHING" => EffectKind::WaterBreathing,
    "INVISIBILITY" => EffectKind::Invisibility,
    "BLINDNESS" => EffectKind::Blindness,
    "NIGHT_VISION" => EffectKind::NightVision,
    "HUNGER" => EffectKind::Hunger,
    "WEAKNESS" => EffectKind::Weakness,
    "POISON" => EffectKind::Poison,
    "WITHER" => EffectKind::Wither,
    "HEALTH_BOOST" => EffectKind::HealthBoost,
    "ABSORPTION" => EffectKind::Absorption,
    "SATURATION" => EffectKind::Saturation,
    "GLOWING" => EffectKind::Glowing,
    "LEVITATION" => EffectKind::Levitation,
    "LUCK" => EffectKind::Luck,
    "UNLUCK" => EffectKind::Unluck,
    "SLOW_FALLING" => EffectKind::SlowFalling,
    "CONDUIT_POWER" => EffectKind::ConduitPower,
    "DOLPHINS_GRACE" => EffectKind::DolphinsGrace,
    "BAD_OMEN" => EffectKind::BadOmen,
    "HERO_OF_THE_VILLAGE" => EffectKind::HeroOfTheVillage,
    "DARKNESS" => EffectKind::Darkness,
    "TRIAL_OMEN" => EffectKind::TrialOmen,
    "RAID_OMEN" => EffectKind::RaidOmen,
    "WIND_CHARGED" => EffectKind::WindCharged,
    "WEAVING" => EffectKind::Weaving,
    "OOZING" => EffectKind::Oozing,
    "INFESTED" => EffectKind::Infested,
    // Legacy names
    "SLOW" => EffectKind::Slowness,
    "FAST_DIGGING" => EffectKind::Haste,
    "SLOW_DIGGING" => EffectKind::MiningFatigue,
    "INCREASE_DAMAGE" => EffectKind::Strength,
    "HEAL" => EffectKind::InstantHealth,
    "HARM" => EffectKind::InstantDamage,
    "JUMP" => EffectKind::JumpBoost,
    "CONFUSION" => EffectKind::Nausea,
    "DAMAGE_RESISTANCE" => EffectKind::Resistance,
    "BAD_LUCK" => EffectKind::Unluck,
};

impl EffectKind {
    pub const ALL: [EffectKind; 39] = [
        Self::Speed,
        Self::Slowness,
        Self::Haste,
        Self::MiningFatigue,
        Self::Strength,
        Self::InstantHealth,
        Self::InstantDamage,
        Self::JumpBoost,
        Self::Nausea,
        Self::Regeneration,
        Self::Resistance,
        Self::FireResistance,
        Self::WaterBreathing,
        Self::Invisibility,
        Self::Blindness,
        Self::NightVision,
        Self::Hunger,
        Self::Weakness,
        Self::Poison,
        Self::Wither,
        Self::HealthBoost,
        Self::Absorption,
        Self::Saturation,
        Self::Glowing,
        Self::Levitation,
        Self::Luck,
        Self::Unluck,
        Self::SlowFalling,
        Self::ConduitPower,
        Self::DolphinsGrace,
        Self::BadOmen,
        Self::HeroOfTheVillage,
        Self::Darkness,
        Self::TrialOmen,
        Self::RaidOmen,
        Self::WindCharged,
        Self::Weaving,
        Self::Oozing,
        Self::Infested,
    ];

    /// Canonical upper-snake name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Speed => "SPEED",
            Self::Slowness => "SLOWNESS",
            Self::Haste => "HASTE",
            Self::MiningFatigue => "MINING_FATIGUE",
            Self::Strength => "STRENGTH",
            Self::InstantHealth => "INSTANT_HEALTH",
            Self::InstantDamage => "INSTANT_DAMAGE",
            Self::JumpBoost => "JUMP_BOOST",
            Self::Nausea => "NAUSEA",
            Self::Regeneration => "REGENERATION",
            Self::Resistance => "RESISTANCE",
            Self::FireResistance => "FIRE_RESISTANCE",
            Self::WaterBreathing => "WATER_BREATHING",
            Self::Invisibility => "INVISIBILITY",
            Self::Blindness => "BLINDNESS",
            Self::NightVision => "NIGHT_VISION",
            Self::Hunger => "HUNGER",
            Self::Weakness => "WEAKNESS",
            Self::Poison => "POISON",
            Self::Wither => "WITHER",
            Self::HealthBoost => "HEALTH_BOOST",
            Self::Absorption => "ABSORPTION",
            Self::Saturation => "SATURATION",
            Self::Glowing => "GLOWING",
            Self::Levitation => "LEVITATION",
            Self::Luck => "LUCK",
            Self::Unluck => "UNLUCK",
            Self::SlowFalling => "SLOW_FALLING",
            Self::ConduitPower => "CONDUIT_POWER",
            Self::DolphinsGrace => "DOLPHINS_GRACE",
            Self::BadOmen => "BAD_OMEN",
            Self::HeroOfTheVillage => "HERO_OF_THE_VILLAGE",
            Self::Darkness => "DARKNESS",
            Self::TrialOmen => "TRIAL_OMEN",
            Self::RaidOmen => "RAID_OMEN",
            Self::WindCharged => "WIND_CHARGED",
            Self::Weaving => "WEAVING",
            Self::Oozing => "OOZING",
            Self::Infested => "INFESTED",
        }
    }

    /// Case-insensitive lookup by canonical or legacy name
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        EFFECT_NAMES.get(upper.as_str()).copied()
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown potion effect: {0}")]
pub struct UnknownEffectKind(pub String);

impl FromStr for EffectKind {
    type Err = UnknownEffectKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownEffectKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_canonical_name_round_trips() {
        for kind in EffectKind::ALL {
            assert_eq!(EffectKind::from_name(kind.name()), Some(kind), "{kind}");
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(EffectKind::from_name("speed"), Some(EffectKind::Speed));
        assert_eq!(EffectKind::from_name("Night_Vision"), Some(EffectKind::NightVision));
    }

    #[test]
    fn legacy_aliases_resolve() {
        assert_eq!(EffectKind::from_name("FAST_DIGGING"), Some(EffectKind::Haste));
        assert_eq!(EffectKind::from_name("increase_damage"), Some(EffectKind::Strength));
        assert_eq!(EffectKind::from_name("JUMP").map(|k| k.name()), Some("JUMP_BOOST"));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "FLIGHT".parse::<EffectKind>().unwrap_err();
        assert_eq!(err, UnknownEffectKind("FLIGHT".to_string()));
        assert!(EffectKind::from_name("NONE").is_none());
    }
}
