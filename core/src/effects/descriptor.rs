use serde::{Deserialize, Serialize};

use super::EffectKind;

/// Desired effect for one trigger item (immutable, rebuilt on every reload)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDescriptor {
    pub kind: EffectKind,
    /// Discrete intensity level, 0 = weakest
    pub amplifier: u8,
    /// Renew with the long duration instead of the short refreshed one
    pub infinite: bool,
}

impl EffectDescriptor {
    pub fn new(kind: EffectKind, amplifier: u8, infinite: bool) -> Self {
        Self {
            kind,
            amplifier,
            infinite,
        }
    }
}

/// What the host reports for one effect kind on one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    pub amplifier: u8,
    /// Remaining duration in host ticks
    pub remaining: u32,
}

/// A request to put an effect on an entity, replacing any instance of the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectGrant {
    pub kind: EffectKind,
    pub amplifier: u8,
    /// Duration in host ticks
    pub duration: u32,
    pub ambient: bool,
    pub particles: bool,
    pub icon: bool,
}

impl EffectGrant {
    /// Grant with no ambient flag, particles or HUD icon
    pub fn hidden(kind: EffectKind, amplifier: u8, duration: u32) -> Self {
        Self {
            kind,
            amplifier,
            duration,
            ambient: false,
            particles: false,
            icon: false,
        }
    }

    /// Visible grant, as another plugin or a potion would produce
    pub fn visible(kind: EffectKind, amplifier: u8, duration: u32) -> Self {
        Self {
            particles: true,
            icon: true,
            ..Self::hidden(kind, amplifier, duration)
        }
    }
}
