use anyhow::Context;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::info;

/// Seconds between two refreshes of the display.
pub const UPDATE_INTERVAL: u64 = 2;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "SYSCHECK_CONFIG";

/// Mount points whose usage is reported when no config file overrides them.
pub fn default_disks() -> Vec<PathBuf> {
    if cfg!(windows) {
        vec![PathBuf::from("C:\\")]
    } else {
        vec![PathBuf::from("/")]
    }
}

fn default_update_interval() -> u64 {
    UPDATE_INTERVAL
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_update_interval")]
    pub update_interval_secs: u64,
    #[serde(default = "default_disks")]
    pub disks: Vec<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: UPDATE_INTERVAL,
            disks: default_disks(),
        }
    }
}

impl AppConfig {
    /// Loads the config file if there is one, compiled-in defaults otherwise.
    pub fn load() -> anyhow::Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => match Self::config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        Self::load_from_path(&path)
    }

    /// Like [`AppConfig::load`] but for an explicit path. A missing file is not an error.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::load_from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.update_interval_secs > 0,
            "update_interval_secs must be > 0, got {}",
            self.update_interval_secs
        );
        anyhow::ensure!(!self.disks.is_empty(), "disks must list at least one path");
        anyhow::ensure!(
            self.disks.iter().all(|d| !d.as_os_str().is_empty()),
            "disks must not contain empty paths"
        );
        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("syscheck").join("config.toml"))
    }
}
