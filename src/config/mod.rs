//! Configuration module for loading and validating settings.
//!
//! Handles:
//! - TOML configuration file loading
//! - Configuration validation
//! - Post URL and save directory checks

pub mod loader;
pub mod validation;

pub use loader::{Config, HttpConfig, OptionsConfig, DEFAULT_CONFIG_FILE};
pub use validation::{validate_config, validate_post_url, validate_save_directory};
