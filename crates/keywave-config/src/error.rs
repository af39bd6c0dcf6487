//! Errors raised while loading, checking or saving the player configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Why a keywave configuration could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("cannot read keywave config '{path}': {source}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be written.
    #[error("cannot write keywave config '{path}': {source}")]
    Write {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The directory that should hold the config file could not be created.
    #[error("cannot create keywave config directory '{path}': {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or a value has the wrong type.
    #[error("malformed config: {0}")]
    Syntax(#[from] toml::de::Error),

    /// The settings could not be encoded as TOML.
    #[error("cannot encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    /// A setting parsed but is out of range or names an unknown waveform.
    #[error("invalid setting: {0}")]
    Setting(#[from] crate::validation::ValidationError),
}

impl ConfigError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Whether the file contents were at fault rather than the filesystem.
    pub fn is_content_error(&self) -> bool {
        matches!(self, ConfigError::Syntax(_) | ConfigError::Setting(_))
    }
}
