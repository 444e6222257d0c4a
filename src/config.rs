//! Runtime configuration.
//!
//! Values resolve in this order: built-in defaults under the data directory,
//! then `config.toml` inside that directory, then the command line.
//!
//! ## Environment Variables
//!
//! - `FLASHDECK_DATA_DIR`: override the data directory
//!   (default: `$HOME/.local/share/flashdeck`)
//! - `FLASHDECK_LOG`: tracing filter, takes precedence over `log_level`

use serde::Deserialize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const DATA_DIR_ENV: &str = "FLASHDECK_DATA_DIR";
pub const LOG_FILTER_ENV: &str = "FLASHDECK_LOG";

const CONFIG_FILE_NAME: &str = "config.toml";
const LIBRARY_FILE_NAME: &str = "library.json";
const LOG_FILE_NAME: &str = "flashdeck.log";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub library_path: PathBuf,
    pub autosave: bool,
    /// Directory the export/import prompt starts in.
    pub export_dir: PathBuf,
    pub help_path: Option<PathBuf>,
    pub log_path: PathBuf,
    pub log_level: String,
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    storage: Option<StorageSection>,
    logging: Option<LoggingSection>,
    help: Option<HelpSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StorageSection {
    library_path: Option<PathBuf>,
    autosave: Option<bool>,
    export_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingSection {
    path: Option<PathBuf>,
    level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HelpSection {
    path: Option<PathBuf>,
}

pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    let home_var = if cfg!(target_os = "windows") {
        "USERPROFILE"
    } else {
        "HOME"
    };
    let home = std::env::var(home_var).unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("flashdeck")
}

impl Config {
    pub fn defaults(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            library_path: data_dir.join(LIBRARY_FILE_NAME),
            autosave: true,
            export_dir: data_dir.to_path_buf(),
            help_path: None,
            log_path: data_dir.join(LOG_FILE_NAME),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Resolve the configuration for this run. `library_override` comes from
    /// the command line.
    pub fn load(library_override: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::from_dir(&get_data_dir())?;
        if let Some(path) = library_override {
            config.library_path = path;
        }
        Ok(config)
    }

    pub fn from_dir(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml(data_dir, &contents)
                .with_context(|| format!("invalid configuration in {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::defaults(data_dir)),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    /// Apply `config.toml` contents on top of the defaults. Relative paths
    /// are taken relative to the data directory.
    pub fn from_toml(data_dir: &Path, contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        let mut config = Self::defaults(data_dir);

        if let Some(storage) = file.storage {
            if let Some(path) = storage.library_path {
                config.library_path = data_dir.join(path);
            }
            if let Some(autosave) = storage.autosave {
                config.autosave = autosave;
            }
            if let Some(dir) = storage.export_dir {
                config.export_dir = data_dir.join(dir);
            }
        }

        if let Some(logging) = file.logging {
            if let Some(path) = logging.path {
                config.log_path = data_dir.join(path);
            }
            if let Some(level) = logging.level {
                config.log_level = level;
            }
        }

        if let Some(help) = file.help {
            config.help_path = help.path.map(|p| data_dir.join(p));
        }

        Ok(config)
    }
}
