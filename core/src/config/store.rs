use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use discfx_types::{TriggerConfig, TriggerEntry};
use toml::{Table, Value};

use super::ConfigError;

/// Location of the trigger file on disk
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the trigger file. A file that does not exist yet reads as empty.
    pub fn load(&self) -> Result<TriggerConfig, ConfigError> {
        match fs::metadata(&self.path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Trigger file missing, starting empty");
                Ok(TriggerConfig::default())
            }
            _ => load_file(&self.path),
        }
    }

    /// Write the trigger file, creating its directory if needed
    pub fn save(&self, config: &TriggerConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        save_file(&self.path, config)
    }
}

fn read_table(path: &Path) -> Result<Table, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a single TOML trigger file.
///
/// Only TOML syntax errors fail the load. Each disc table is read on its own;
/// one with wrongly typed fields is logged and recorded as malformed.
pub fn load_file(path: &Path) -> Result<TriggerConfig, ConfigError> {
    let mut table = read_table(path)?;
    let mut config = TriggerConfig::new();

    let discs = match table.remove("discs") {
        Some(Value::Table(discs)) => discs,
        Some(other) => {
            tracing::warn!(
                path = %path.display(),
                "Expected a [discs] table, found {}; ignoring it",
                other.type_str()
            );
            return Ok(config);
        }
        None => return Ok(config),
    };

    for (item, value) in discs {
        match value.try_into::<TriggerEntry>() {
            Ok(entry) => {
                config.discs.insert(item, entry);
            }
            Err(e) => {
                tracing::warn!("Malformed config entry for {}: {}", item, e.message());
                config.malformed.insert(item);
            }
        }
    }
    Ok(config)
}

/// Save a trigger config to a TOML file.
///
/// Malformed tables still in `config.malformed` are copied over from the file
/// as they are, so a save never erases what the user wrote.
pub fn save_file(path: &Path, config: &TriggerConfig) -> Result<(), ConfigError> {
    let serialize_error = |e: toml::ser::Error| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    };
    let mut out = Table::try_from(config).map_err(serialize_error)?;

    if !config.malformed.is_empty()
        && let Ok(mut existing) = read_table(path)
        && let Some(Value::Table(raw)) = existing.remove("discs")
    {
        let discs = out.entry("discs").or_insert(Value::Table(Table::new()));
        if let Value::Table(discs) = discs {
            for (item, value) in raw {
                if config.malformed.contains(&item) && !discs.contains_key(&item) {
                    discs.insert(item, value);
                }
            }
        }
    }

    let contents = toml::to_string_pretty(&out).map_err(serialize_error)?;

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("discs.toml"));
        assert!(store.load().unwrap().discs.is_empty());
    }

    #[test]
    fn save_creates_directory_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested").join("discs.toml"));

        let mut config = TriggerConfig::new();
        config.set("MUSIC_DISC_13", TriggerEntry::new("SPEED", 1, false));
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn mistyped_entry_does_not_hide_valid_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discs.toml");
        fs::write(
            &path,
            r#"
[discs.MUSIC_DISC_13]
effect = "SPEED"
level = 1

[discs.MUSIC_DISC_CAT]
effect = "HASTE"
level = "2"

[discs.MUSIC_DISC_FAR]
effect = 5
"#,
        )
        .unwrap();

        let config = ConfigStore::new(&path).load().unwrap();
        assert_eq!(
            config.entry("MUSIC_DISC_13"),
            Some(&TriggerEntry::new("SPEED", 1, true))
        );
        assert!(config.entry("MUSIC_DISC_CAT").is_none());
        assert!(config.malformed.contains("MUSIC_DISC_CAT"));
        assert!(config.malformed.contains("MUSIC_DISC_FAR"));
    }

    #[test]
    fn save_keeps_malformed_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discs.toml");
        fs::write(&path, "[discs.MUSIC_DISC_CAT]\neffect = \"HASTE\"\nlevel = \"2\"\n").unwrap();
        let store = ConfigStore::new(&path);

        let mut config = store.load().unwrap();
        config.set("MUSIC_DISC_13", TriggerEntry::new("SPEED", 0, true));
        store.save(&config).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("level = \"2\""), "{text}");
        let reloaded = store.load().unwrap();
        assert!(reloaded.malformed.contains("MUSIC_DISC_CAT"));
        assert!(reloaded.entry("MUSIC_DISC_13").is_some());

        // Fixing the entry through the config replaces the raw table
        let mut fixed = reloaded;
        fixed.set("MUSIC_DISC_CAT", TriggerEntry::new("HASTE", 2, true));
        store.save(&fixed).unwrap();
        assert_eq!(
            store.load().unwrap().entry("MUSIC_DISC_CAT"),
            Some(&TriggerEntry::new("HASTE", 2, true))
        );
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discs.toml");
        fs::write(&path, "[discs.MUSIC_DISC_13\neffect = ").unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
