//! Trigger file layout.
//!
//! One table per trigger item, keyed by the item's registry name:
//!
//! ```toml
//! [discs.MUSIC_DISC_13]
//! effect = "SPEED"
//! level = 1
//! infinite = true
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Effect name meaning "this item grants nothing".
pub const NO_EFFECT: &str = "NONE";

fn default_effect() -> String {
    NO_EFFECT.to_string()
}

fn default_true() -> bool {
    true
}

/// Persisted effect settings for a single trigger item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEntry {
    /// Effect name, or `NONE`
    #[serde(default = "default_effect")]
    pub effect: String,

    /// Amplifier (0 = weakest). Stored wide so bad values survive a round trip
    /// and can be reported instead of failing the whole file.
    #[serde(default)]
    pub level: i64,

    /// Renew with a very long duration instead of a short refreshed one
    #[serde(default = "default_true")]
    pub infinite: bool,
}

impl Default for TriggerEntry {
    fn default() -> Self {
        Self {
            effect: default_effect(),
            level: 0,
            infinite: true,
        }
    }
}

impl TriggerEntry {
    pub fn new(effect: impl Into<String>, level: i64, infinite: bool) -> Self {
        Self {
            effect: effect.into(),
            level,
            infinite,
        }
    }

    /// True if this entry grants nothing (`NONE`, any case)
    pub fn is_none(&self) -> bool {
        self.effect.trim().eq_ignore_ascii_case(NO_EFFECT)
    }
}

/// Whole trigger file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(default)]
    pub discs: BTreeMap<String, TriggerEntry>,

    /// Items whose table in the file could not be read as a [`TriggerEntry`].
    /// They grant nothing and are left in the file untouched.
    #[serde(skip)]
    pub malformed: BTreeSet<String>,
}

impl TriggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, item: &str) -> Option<&TriggerEntry> {
        self.discs.get(item)
    }

    /// Insert or replace the entry for `item`
    pub fn set(&mut self, item: impl Into<String>, entry: TriggerEntry) {
        let item = item.into();
        self.malformed.remove(&item);
        self.discs.insert(item, entry);
    }

    /// Reset `item` back to the `NONE` entry
    pub fn clear(&mut self, item: impl Into<String>) {
        self.set(item, TriggerEntry::default());
    }

    /// Add a default `NONE` entry for every item that has none yet.
    /// Malformed entries count as present. Returns how many entries were added.
    pub fn ensure_entries<'a>(&mut self, items: impl IntoIterator<Item = &'a str>) -> usize {
        let mut added = 0;
        for item in items {
            if !self.discs.contains_key(item) && !self.malformed.contains(item) {
                self.discs.insert(item.to_string(), TriggerEntry::default());
                added += 1;
            }
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trigger_toml() {
        let toml = r#"
[discs.MUSIC_DISC_13]
effect = "SPEED"
level = 1
infinite = false

[discs.MUSIC_DISC_CAT]
effect = "none"
"#;

        let config: TriggerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.discs.len(), 2);

        let thirteen = config.entry("MUSIC_DISC_13").unwrap();
        assert_eq!(thirteen.effect, "SPEED");
        assert_eq!(thirteen.level, 1);
        assert!(!thirteen.infinite);
        assert!(!thirteen.is_none());

        let cat = config.entry("MUSIC_DISC_CAT").unwrap();
        assert!(cat.is_none());
        assert_eq!(cat.level, 0);
        assert!(cat.infinite, "infinite defaults to true");
    }

    #[test]
    fn test_empty_file_parses() {
        let config: TriggerConfig = toml::from_str("").unwrap();
        assert!(config.discs.is_empty());
    }

    #[test]
    fn test_negative_level_is_kept_for_reporting() {
        let config: TriggerConfig =
            toml::from_str("[discs.MUSIC_DISC_11]\neffect = \"HASTE\"\nlevel = -3\n").unwrap();
        assert_eq!(config.entry("MUSIC_DISC_11").unwrap().level, -3);
    }

    #[test]
    fn test_ensure_entries_only_adds_missing() {
        let mut config = TriggerConfig::new();
        config.set("MUSIC_DISC_13", TriggerEntry::new("SPEED", 2, true));

        let added = config.ensure_entries(["MUSIC_DISC_13", "MUSIC_DISC_CAT", "MUSIC_DISC_FAR"]);
        assert_eq!(added, 2);
        assert_eq!(config.entry("MUSIC_DISC_13").unwrap().effect, "SPEED");
        assert_eq!(config.entry("MUSIC_DISC_CAT"), Some(&TriggerEntry::default()));

        assert_eq!(config.ensure_entries(["MUSIC_DISC_CAT"]), 0);
    }

    #[test]
    fn test_ensure_entries_keeps_malformed_items() {
        let mut config = TriggerConfig::new();
        config.malformed.insert("MUSIC_DISC_CAT".to_string());

        assert_eq!(config.ensure_entries(["MUSIC_DISC_13", "MUSIC_DISC_CAT"]), 1);
        assert!(config.entry("MUSIC_DISC_CAT").is_none());

        config.set("MUSIC_DISC_CAT", TriggerEntry::new("HASTE", 0, true));
        assert!(config.malformed.is_empty());
    }

    #[test]
    fn test_clear_resets_entry() {
        let mut config = TriggerConfig::new();
        config.set("MUSIC_DISC_13", TriggerEntry::new("SPEED", 2, false));
        config.clear("MUSIC_DISC_13");
        assert!(config.entry("MUSIC_DISC_13").unwrap().is_none());
        assert!(config.entry("MUSIC_DISC_13").unwrap().infinite);
    }
}
