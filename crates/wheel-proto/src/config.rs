use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::error::{Result, WheelError};
use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// What happens to the winner once it has been revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalMode {
    /// Winner leaves the pool right after the reveal.
    #[default]
    Immediate,
    /// Winner stays on the wheel until the user continues.
    Deferred,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    #[serde(default = "default_spin_duration_ms")]
    pub spin_duration_ms: u64,
    #[serde(default = "default_fade_duration_ms")]
    pub fade_duration_ms: u64,
    #[serde(default)]
    pub removal: RemovalMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Ring the terminal bell when a winner is revealed.
    #[serde(default = "default_bell_on_winner")]
    pub bell_on_winner: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON file holding the name pool.
    /// Defaults to `~/.local/share/namewheel/pool.json`.
    #[serde(default = "platform::pool_file")]
    pub pool_file: PathBuf,
}

impl WheelConfig {
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: default_spin_duration_ms(),
            fade_duration_ms: default_fade_duration_ms(),
            removal: RemovalMode::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            bell_on_winner: default_bell_on_winner(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            pool_file: platform::pool_file(),
        }
    }
}

fn default_spin_duration_ms() -> u64 {
    6000
}

fn default_fade_duration_ms() -> u64 {
    500
}

fn default_bell_on_winner() -> bool {
    true
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.paths.pool_file = platform::expand_home(&config.paths.pool_file);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.wheel.spin_duration_ms == 0 {
            return Err(WheelError::ConfigInvalid {
                message: "wheel.spin_duration_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
