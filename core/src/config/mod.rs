//! Configuration loading
//!
//! Two layers:
//! - **Settings**: application settings managed through `confy` (file locations,
//!   trigger prefix, engine timing)
//! - **Trigger file**: the editable TOML table mapping trigger items to effects

mod settings;
mod store;
mod timing;

use std::path::PathBuf;

pub use settings::Settings;
pub use store::{ConfigStore, load_file, save_file};
pub use timing::{EngineTiming, TICKS_PER_SECOND, TimingError};

/// Errors that can occur while reading or writing configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },

    #[error("settings error: {0}")]
    Settings(#[from] confy::ConfyError),
}
