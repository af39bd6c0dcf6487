//! Audio output layer for the keywave player.
//!
//! This crate provides:
//!
//! - **Device discovery**: [`list_devices`] and [`default_output_device`]
//! - **Backends**: the [`AudioBackend`] trait and its cpal implementation
//!   [`CpalBackend`]
//! - **Playback**: [`Playback`], which runs a [`PlaybackEngine`] inside an
//!   output stream until dropped
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use keywave_io::{BackendStreamConfig, CpalBackend, Playback};
//! use keywave_synth::SynthController;
//!
//! let mut controller = SynthController::default();
//! let backend = CpalBackend::new();
//! let playback = Playback::start(&backend, &BackendStreamConfig::default(), controller.engine())?;
//!
//! controller.set_note(52)?; // heard on the next buffer
//! drop(playback); // stops the stream
//! ```
//!
//! [`PlaybackEngine`]: keywave_synth::PlaybackEngine

pub mod backend;
pub mod cpal_backend;
mod devices;
mod playback;

pub use backend::{AudioBackend, BackendStreamConfig, ErrorCallback, OutputCallback, StreamHandle};
pub use cpal_backend::CpalBackend;
pub use devices::{AudioDevice, default_output_device, find_output_device, list_devices};
pub use playback::{OutputRenderer, Playback};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// The stream configuration cannot be used.
    #[error("Invalid stream configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
