//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    load_config, Config, ConfigError, JupiterSection, LoggingSection, ServerSection,
    SourcesSection, KNOWN_SOURCES,
};
