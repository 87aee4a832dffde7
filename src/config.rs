// src/config.rs
// Configuration file loading and merging with command line flags

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 8000;
pub const CONFIG_FILE_NAME: &str = "serve.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEntry {
    pub path: String,
    /// Skips the prompt for this item when set.
    #[serde(default)]
    pub pattern: Option<String>,
}

impl MountEntry {
    pub fn prompted(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            pattern: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default = "default_true")]
    pub end: bool,

    #[serde(default = "default_true")]
    pub request_logging: bool,

    #[serde(default = "default_true")]
    pub timestamps: bool,

    /// Seconds to wait for in-flight requests on shutdown.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,

    #[serde(default)]
    pub mounts: Vec<MountEntry>,
}

fn default_true() -> bool {
    true
}
fn default_shutdown_timeout() -> u64 {
    5
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            port: None,
            end: true,
            request_logging: true,
            timestamps: true,
            shutdown_timeout: default_shutdown_timeout(),
            mounts: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    FileNotFound(String),
    ParseError(String),
    ValidationError(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Configuration file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse configuration: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation failed: {}", msg)
            }
            ConfigError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

pub struct ConfigLoader {
    current_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(current_dir: PathBuf) -> Self {
        Self { current_dir }
    }

    /// Load `custom_config_path`, or `serve.json` from the current directory
    /// when present. No file at all yields the defaults.
    pub fn load_configuration(
        &self,
        custom_config_path: Option<&str>,
    ) -> Result<Configuration, ConfigError> {
        let config_path = match custom_config_path {
            Some(custom_path) => {
                let path = self.current_dir.join(custom_path);
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.to_string_lossy().to_string()));
                }
                path
            }
            None => {
                let path = self.current_dir.join(CONFIG_FILE_NAME);
                if !path.exists() {
                    return Ok(Configuration::default());
                }
                path
            }
        };

        let contents = fs::read_to_string(&config_path)?;
        log::info!("Loading configuration from: {}", config_path.display());

        let mut config: Configuration = serde_json::from_str(&contents).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", config_path.display(), e))
        })?;

        self.validate_config(&config)?;

        // Mount paths are relative to the file that lists them
        let config_dir = config_path.parent().unwrap_or(self.current_dir.as_path());
        for mount in &mut config.mounts {
            if !Path::new(&mount.path).is_absolute() {
                mount.path = config_dir.join(&mount.path).to_string_lossy().to_string();
            }
        }

        Ok(config)
    }

    fn validate_config(&self, config: &Configuration) -> Result<(), ConfigError> {
        if config.shutdown_timeout == 0 {
            return Err(ConfigError::ValidationError(
                "shutdownTimeout must be at least 1 second".to_string(),
            ));
        }

        for mount in &config.mounts {
            if mount.path.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "Mount path cannot be empty".to_string(),
                ));
            }
            if let Some(ref pattern) = mount.pattern {
                if pattern.trim().is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "Mount pattern for {} cannot be empty",
                        mount.path
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Command line values that can override the configuration file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub items: Vec<String>,
    pub port: Option<u16>,
    pub no_end: bool,
    pub no_request_logging: bool,
    pub no_timestamps: bool,
}

/// Effective settings after merging flags over the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
    pub port: u16,
    pub end_route: bool,
    pub request_logging: bool,
    pub timestamps: bool,
    pub shutdown_timeout: u64,
    pub items: Vec<MountEntry>,
}

impl ServeOptions {
    pub fn merge(config: Configuration, cli: CliOverrides) -> Self {
        // Command line items replace the configured mounts entirely
        let items = if cli.items.is_empty() {
            config.mounts
        } else {
            cli.items.into_iter().map(MountEntry::prompted).collect()
        };

        Self {
            port: cli.port.or(config.port).unwrap_or(DEFAULT_PORT),
            end_route: !cli.no_end && config.end,
            request_logging: !cli.no_request_logging && config.request_logging,
            timestamps: !cli.no_timestamps && config.timestamps,
            shutdown_timeout: config.shutdown_timeout,
            items,
        }
    }
}
