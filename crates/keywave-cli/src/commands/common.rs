//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::Context;
use keywave_config::{SynthConfig, config_file_path};

/// Load the configuration from `path`, or from the user config file when it
/// exists, or fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SynthConfig> {
    match path {
        Some(path) => SynthConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => {
            let path = config_file_path();
            let config = match SynthConfig::load_or_default(&path) {
                Ok(config) => config,
                Err(err) if err.is_content_error() => {
                    return Err(err).with_context(|| {
                        format!("fix or remove the user config at {}", path.display())
                    });
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("loading config from {}", path.display()));
                }
            };
            tracing::debug!(path = %path.display(), "config loaded");
            Ok(config)
        }
    }
}
