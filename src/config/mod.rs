//! Configuration management.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Listening port used when nothing else selects one.
pub const DEFAULT_PORT: u16 = 3000;

/// Default name of the config file, looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "marquee.toml";

/// Default name of the seed fixture.
const DEFAULT_SEED_FILE: &str = "movies.json";

/// Origins allowed by default.
const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:8080",
    "http://localhost:3000",
    "https://movies.com",
    "https://midu.dev",
];

/// Main configuration for marquee.
#[derive(Debug, Clone)]
pub struct MarqueeConfig {
    /// Port the HTTP listener binds to.
    pub port: u16,
    /// Origins the cross-origin policy accepts.
    pub allowed_origins: Vec<String>,
    /// Path to the seed fixture read at startup.
    pub seed_path: PathBuf,
    /// Whether log lines are emitted as JSON.
    pub log_json: bool,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(ToString::to_string)
                .collect(),
            seed_path: PathBuf::from(DEFAULT_SEED_FILE),
            log_json: false,
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Listening port.
    pub port: Option<u16>,
    /// Origin allow-list.
    pub allowed_origins: Option<Vec<String>>,
    /// Seed fixture path.
    pub seed_path: Option<String>,
    /// JSON log output.
    pub log_json: Option<bool>,
}

impl MarqueeConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {}", path.display(), e),
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Reads `marquee.toml` from the working directory when present;
    /// returns default configuration otherwise.
    #[must_use]
    pub fn load_default() -> Self {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            if let Ok(config) = Self::load_from_file(path) {
                return config;
            }
        }

        Self::default()
    }

    /// Applies the `PORT` environment variable when set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `PORT` is set but does not
    /// parse as a port number.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(port) = std::env::var("PORT") {
            if !port.trim().is_empty() {
                self.port = parse_port(&port)?;
            }
        }
        Ok(self)
    }

    /// Converts a `ConfigFile` to `MarqueeConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(port) = file.port {
            config.port = port;
        }
        if let Some(allowed_origins) = file.allowed_origins {
            config.allowed_origins = allowed_origins;
        }
        if let Some(seed_path) = file.seed_path {
            config.seed_path = PathBuf::from(seed_path);
        }
        if let Some(log_json) = file.log_json {
            config.log_json = log_json;
        }

        config
    }

    /// Sets the listening port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the seed fixture path.
    #[must_use]
    pub fn with_seed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_path = path.into();
        self
    }

    /// Sets the origin allow-list.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("PORT is not a port number: {raw}")))
}
