//! # Configuration Management Module
//!
//! Gpsctl reads a small TOML configuration file with sections for storage,
//! UI language, logging and the optional GSM modem transport. All values have
//! defaults, so a missing section never prevents startup.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [storage]
//! data_dir = "./data"
//!
//! [ui]
//! language = "en"
//!
//! [logging]
//! level = "info"
//! file = "gpsctl.log"
//!
//! [transport]
//! port = "/dev/ttyUSB0"
//! baud_rate = 115200
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// BCP-47 style language tag; only the primary subtag is used.
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Serial port of a GSM modem. Empty means no modem: composed messages
    /// go to the outbox journal instead.
    #[serde(default)]
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

fn default_baud_rate() -> u32 {
    115200
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("gpsctl.log".to_string()),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: default_baud_rate(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file.
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
