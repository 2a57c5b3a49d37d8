//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config/default.toml
//! structure. Every field has a default so partial files (or no file at all)
//! produce a working configuration.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Source names accepted in `[sources] enabled`
pub const KNOWN_SOURCES: &[&str] = &["pumpfun", "dexscreener", "geckoterminal", "birdeye"];

/// Main configuration structure matching config/default.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub sources: SourcesSection,
    #[serde(default)]
    pub jupiter: JupiterSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// HTTP server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerSection {
    /// Get the listen port with environment variable override
    /// Checks the PORT env var first, falls back to the config value
    pub fn effective_port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.port)
    }
}

/// Token source configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesSection {
    /// Per-source request timeout in seconds
    pub timeout_secs: u64,
    /// Sources registered for aggregation, in merge-priority order
    /// (later sources win field-count ties)
    pub enabled: Vec<String>,
    /// pump.fun frontend API base URL
    pub pump_fun_url: String,
    /// Board page size requested from pump.fun
    pub pump_limit: u32,
    /// DexScreener API base URL
    pub dexscreener_url: String,
    /// Search query used for the DexScreener source
    pub dexscreener_query: String,
    /// GeckoTerminal API base URL
    pub gecko_terminal_url: String,
    /// Birdeye API base URL
    pub birdeye_url: String,
    /// Birdeye API key; leave unset to disable the source at runtime
    pub birdeye_api_key: Option<String>,
    /// Page size requested from the Birdeye token list
    pub birdeye_limit: u32,
}

impl Default for SourcesSection {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            enabled: KNOWN_SOURCES.iter().map(|s| s.to_string()).collect(),
            pump_fun_url: crate::adapters::pump_fun::DEFAULT_BASE_URL.to_string(),
            pump_limit: 50,
            dexscreener_url: crate::adapters::dexscreener::DEFAULT_BASE_URL.to_string(),
            dexscreener_query: "solana".to_string(),
            gecko_terminal_url: crate::adapters::gecko_terminal::DEFAULT_BASE_URL.to_string(),
            birdeye_url: crate::adapters::birdeye::DEFAULT_BASE_URL.to_string(),
            birdeye_api_key: None,
            birdeye_limit: 50,
        }
    }
}

impl SourcesSection {
    /// Per-source timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the Birdeye API key with environment variable fallback
    /// Checks BIRDEYE_API_KEY env var if the config value is empty/None
    pub fn effective_birdeye_key(&self) -> Option<String> {
        if let Some(ref key) = self.birdeye_api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("BIRDEYE_API_KEY").ok().filter(|k| !k.is_empty())
    }
}

/// Jupiter API configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JupiterSection {
    /// Jupiter quote/swap API base URL
    pub api_base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Optional API key for higher rate limits (get from jup.ag)
    pub api_key: Option<String>,
}

impl Default for JupiterSection {
    fn default() -> Self {
        Self {
            api_base_url: "https://quote-api.jup.ag/v6".to_string(),
            timeout_secs: 10,
            api_key: None,
        }
    }
}

impl JupiterSection {
    /// Get API key with environment variable fallback
    /// Checks JUPITER_API_KEY env var if config value is empty/None
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("JUPITER_API_KEY").ok().filter(|k| !k.is_empty())
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host cannot be empty".to_string(),
            ));
        }

        if self.sources.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "sources.timeout_secs must be > 0".to_string(),
            ));
        }

        for (field, value) in [
            ("sources.pump_fun_url", &self.sources.pump_fun_url),
            ("sources.dexscreener_url", &self.sources.dexscreener_url),
            ("sources.gecko_terminal_url", &self.sources.gecko_terminal_url),
            ("sources.birdeye_url", &self.sources.birdeye_url),
            ("jupiter.api_base_url", &self.jupiter.api_base_url),
        ] {
            if value.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} cannot be empty",
                    field
                )));
            }
        }

        if self.sources.dexscreener_query.is_empty() {
            return Err(ConfigError::ValidationError(
                "sources.dexscreener_query cannot be empty".to_string(),
            ));
        }

        if self.jupiter.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "jupiter.timeout_secs must be > 0".to_string(),
            ));
        }

        for name in &self.sources.enabled {
            if !KNOWN_SOURCES.contains(&name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "unknown source '{}' in sources.enabled (known: {})",
                    name,
                    KNOWN_SOURCES.join(", ")
                )));
            }
        }

        Ok(())
    }
}
