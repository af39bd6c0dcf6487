//! Configuration for the keywave player.
//!
//! Settings live in a TOML file in the platform config directory. Every field
//! is optional; command-line flags override what the file provides.
//!
//! # Example
//!
//! ```rust,no_run
//! use keywave_config::{SynthConfig, config_file_path};
//!
//! let config = SynthConfig::load_or_default(config_file_path()).unwrap();
//! let engine_config = config.engine_config();
//! println!("sample rate: {}", engine_config.sample_rate);
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

/// Range checks for configuration values.
pub mod validation;

pub use config::{DEFAULT_BUFFER_SIZE, DEFAULT_SAMPLE_RATE, KickSection, SynthConfig};
pub use error::ConfigError;
pub use paths::{CONFIG_FILE_NAME, config_file_path, ensure_user_config_dir, user_config_dir};
pub use validation::{ValidationError, ValidationResult};
