//! Shared configuration types for discfx.
//!
//! These are the raw, persisted shapes of the trigger file. Names are kept as
//! plain strings here; resolving them against the effect vocabulary and the
//! item registry happens in `discfx-core`.

pub mod trigger_config;

pub use trigger_config::{NO_EFFECT, TriggerConfig, TriggerEntry};
