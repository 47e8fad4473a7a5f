//! Effect vocabulary and the value types exchanged with the host
//!
//! - **EffectKind**: the host's closed set of status effects
//! - **EffectDescriptor**: what a trigger item should grant (from config)
//! - **ActiveEffect**: what the host says an entity currently has
//! - **EffectGrant**: what the engine asks the host to apply
//!
//! # Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │               EffectDescriptor (trigger file)            │
//! │  "MUSIC_DISC_13 grants SPEED level 1, infinite"          │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                   reconcile vs ActiveEffect
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                  EffectGrant (to the host)               │
//! │  "SPEED 1 for 12000 ticks, no particles, no icon"        │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod descriptor;
mod kind;

pub use descriptor::{ActiveEffect, EffectDescriptor, EffectGrant};
pub use kind::{EffectKind, UnknownEffectKind};
