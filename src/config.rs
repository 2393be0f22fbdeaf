//! Configuration management module.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{CameraSettings, ResponseMode};
use crate::serial::{DEFAULT_BAUD_RATE, DEFAULT_PORTS};
use crate::visca::{DEFAULT_ZOOM_STEP, MAX_ZOOM_LEVEL};

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing.
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub serial: SerialConfig,
    pub response: ResponseConfig,
    pub zoom: ZoomConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Serial line settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device paths probed in order.
    pub ports: Vec<String>,
    pub baud_rate: u32,
    /// Per-read timeout of the opened port in milliseconds.
    pub timeout_ms: u64,
}

/// Reply collection for the console tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Upper bound on waiting for a reply after each command.
    pub max_wait_ms: u64,
    /// Quiet time after the last received byte that ends a reply.
    pub idle_gap_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Level delta for zoom in/out.
    pub step: u16,
}

/// HTTP API listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to this file.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Get config file path in the platform config directory.
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "viscactl")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.ports.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::Validation("At least one serial port is required".to_string()));
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::Validation("Baud rate must be greater than 0".to_string()));
        }
        if self.response.idle_gap_ms > self.response.max_wait_ms {
            return Err(ConfigError::Validation(
                "Response idle gap cannot exceed max wait".to_string(),
            ));
        }
        if self.zoom.step == 0 || self.zoom.step > MAX_ZOOM_LEVEL {
            return Err(ConfigError::Validation(format!(
                "Zoom step must be between 1 and {MAX_ZOOM_LEVEL}"
            )));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Server port must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Save configuration to file, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Dispatcher settings. `Drain` reads replies, otherwise writes are fire-and-forget.
    pub fn camera_settings(&self, drain: bool) -> CameraSettings {
        let response = if drain {
            ResponseMode::Drain {
                max_wait: Duration::from_millis(self.response.max_wait_ms),
                idle_gap: Duration::from_millis(self.response.idle_gap_ms),
            }
        } else {
            ResponseMode::Ignore
        };

        CameraSettings {
            ports: self.serial.ports.clone(),
            baud_rate: self.serial.baud_rate,
            response,
            zoom_step: self.zoom.step,
        }
    }
}

impl SerialConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ServerConfig {
    /// Listener address as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            ports: DEFAULT_PORTS.iter().map(|p| p.to_string()).collect(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout_ms: 1000,
        }
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            max_wait_ms: 500,
            idle_gap_ms: 50,
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_ZOOM_STEP,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}
