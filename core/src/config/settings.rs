use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ConfigError, EngineTiming};

const APP_NAME: &str = "discfx";
const TRIGGER_FILE: &str = "discs.toml";

/// Application settings, persisted by `confy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Trigger file location; the platform config dir is used when unset
    pub config_path: Option<PathBuf>,
    /// Registry name prefix that marks an item as a trigger
    pub trigger_prefix: String,
    pub timing: EngineTiming,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: None,
            trigger_prefix: "MUSIC_DISC_".to_string(),
            timing: EngineTiming::default(),
        }
    }
}

impl Settings {
    /// Load from the platform settings location, writing defaults on first run
    pub fn load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Load from an explicit settings file, writing defaults if it does not exist
    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        Ok(confy::load_path(path)?)
    }

    /// Where the trigger file lives
    pub fn trigger_file(&self) -> PathBuf {
        self.config_path.clone().unwrap_or_else(default_trigger_file)
    }
}

/// Default trigger file: `<config dir>/discfx/discs.toml`
pub fn default_trigger_file() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME).join(TRIGGER_FILE))
        .unwrap_or_else(|| PathBuf::from(TRIGGER_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_path_wins() {
        let settings = Settings {
            config_path: Some(PathBuf::from("/srv/discs.toml")),
            ..Settings::default()
        };
        assert_eq!(settings.trigger_file(), PathBuf::from("/srv/discs.toml"));
    }

    #[test]
    fn default_path_ends_with_trigger_file() {
        assert!(Settings::default().trigger_file().ends_with(TRIGGER_FILE));
    }

    #[test]
    fn load_path_writes_defaults_then_reads_them() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let first = Settings::load_path(&path).unwrap();
        assert_eq!(first, Settings::default());
        assert!(path.exists());

        let second = Settings::load_path(&path).unwrap();
        assert_eq!(second, first);
    }
}
