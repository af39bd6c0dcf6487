//! Keywave Synth - Phase-continuous waveform engine for the keywave player
//!
//! This crate turns a selected piano key into an uninterrupted stream of
//! samples, one callback-sized buffer at a time, with an optional kick-drum
//! pitch envelope.
//!
//! # Core Components
//!
//! ## Notes
//!
//! Equal-tempered key numbering (key 49 = A4 = 440 Hz):
//!
//! - [`Note`] - A validated piano key with its frequency
//! - [`key_to_frequency`] / [`nearest_key`] - Key and frequency conversion
//! - [`note_name`] - Display names such as `C#5`
//!
//! ## Waveforms
//!
//! - [`WaveformKind`] - Sine or sawtooth
//! - [`waveform::period`] - Allocation-free samples of one (partial) period
//!
//! ## Playback
//!
//! - [`PlaybackEngine`] - Fills audio buffers, carrying phase across calls
//! - [`PlaybackParams`] - Lock-free parameters shared with the UI thread
//! - [`SynthController`] - UI-side note, octave, waveform and kick control
//!
//! ```rust
//! use keywave_synth::SynthController;
//!
//! let mut controller = SynthController::default();
//! controller.set_note(52).unwrap(); // C5
//!
//! let mut engine = controller.engine();
//! let mut buffer = vec![0.0f32; 512];
//! engine.fill(&mut buffer);
//! ```
//!
//! ## Kick Mode
//!
//! - [`KickEnvelope`] - Per-period pitch sweep, hold and re-trigger
//! - [`calculate_decay_factor`] - Solves the decay factor for a sweep length
//!
//! # no_std Support
//!
//! The engine is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature:
//!
//! ```toml
//! [dependencies]
//! keywave-synth = { version = "0.1", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to log solver warnings and controller changes.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod controller;
pub mod engine;
pub mod kick;
pub mod note;
pub mod params;
pub mod waveform;

// Re-export main types at crate root
pub use controller::{DEFAULT_OCTAVE, MAX_OCTAVE, MIN_OCTAVE, SynthController};
pub use engine::{
    CallbackStatus, DEFAULT_KICK_KEY, DEFAULT_SAMPLE_RATE, EngineConfig, KickConfig,
    PlaybackEngine, StreamTime, engine_at,
};
pub use kick::{
    DecaySolution, KickEnvelope, KickPhase, SolverOptions, calculate_decay_factor,
    period_samples, sweep_length,
};
pub use note::{
    HIGHEST_KEY, LOWEST_KEY, Note, NoteError, NoteName, key_octave, key_to_frequency,
    nearest_key, note_name,
};
pub use params::{ParamSnapshot, PlaybackParams};
pub use waveform::WaveformKind;
