//! Optional TOML configuration: where the data files live and which UI
//! extras are enabled.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV: &str = "VIDEOMAP_CONFIG";

const APP_DIR: &str = "videomap";

/// Errors that can occur while loading the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// World topology (TopoJSON)
    pub topology_path: PathBuf,
    /// Name of the object inside the topology holding the country shapes
    pub topology_object: String,
    /// Video metadata (JSON array)
    pub videos_path: PathBuf,
    /// Show the info button and its notice panel
    pub show_info_panel: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            topology_path: data_dir.join("countries-50m.json"),
            topology_object: "countries".to_string(),
            videos_path: data_dir.join("videos.json"),
            show_info_panel: true,
        }
    }
}

impl Config {
    /// Load the config from `$VIDEOMAP_CONFIG` or the user config directory.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.topology_path, &mut self.videos_path] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
