//! User configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use keywave_synth::{
    DEFAULT_KICK_KEY, DEFAULT_OCTAVE, EngineConfig, HIGHEST_KEY, KickConfig, LOWEST_KEY,
    MAX_OCTAVE, MIN_OCTAVE, WaveformKind,
    kick::{
        DEFAULT_KICK_HOLD_SECONDS, DEFAULT_KICK_START_HZ, DEFAULT_KICK_SWEEP_SECONDS,
        DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_SAMPLES,
    },
};

use crate::error::ConfigError;
use crate::validation::{ValidationError, ValidationResult, check_range};

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default audio buffer size in frames.
pub const DEFAULT_BUFFER_SIZE: u32 = 512;

/// Player settings stored in `config.toml`.
///
/// Every field is optional in the file; missing fields take their defaults.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 44100
/// buffer_size = 512
/// device = "pulse"
/// waveform = "sine"
/// octave = 4
///
/// [kick]
/// start_frequency_hz = 5000.0
/// hold_seconds = 0.1
/// sweep_seconds = 0.25
/// note = 13
/// tolerance_samples = 250
/// max_iterations = 1000000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,

    /// Requested buffer size in frames.
    pub buffer_size: u32,

    /// Output device name; the system default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,

    /// Starting waveform, `sine` or `saw`.
    pub waveform: String,

    /// Starting octave of the piano roll.
    pub octave: i32,

    /// Kick mode settings.
    pub kick: KickSection,
}

/// `[kick]` table of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KickSection {
    /// Frequency the sweep starts from, in Hz.
    pub start_frequency_hz: f32,
    /// Hold time at the bottom of the sweep, in seconds.
    pub hold_seconds: f32,
    /// Sweep duration the decay solver aims for, in seconds.
    pub sweep_seconds: f32,
    /// Piano key selected when kick mode is switched on.
    pub note: i32,
    /// Solver acceptance window in samples.
    pub tolerance_samples: u32,
    /// Solver iteration cap.
    pub max_iterations: u32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            buffer_size: DEFAULT_BUFFER_SIZE,
            device: None,
            waveform: WaveformKind::Sine.name().to_string(),
            octave: DEFAULT_OCTAVE,
            kick: KickSection::default(),
        }
    }
}

impl Default for KickSection {
    fn default() -> Self {
        Self {
            start_frequency_hz: DEFAULT_KICK_START_HZ,
            hold_seconds: DEFAULT_KICK_HOLD_SECONDS,
            sweep_seconds: DEFAULT_KICK_SWEEP_SECONDS,
            note: DEFAULT_KICK_KEY,
            tolerance_samples: DEFAULT_TOLERANCE_SAMPLES as u32,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SynthConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        Self::from_toml(&content)
    }

    /// Load the file at `path` if it exists, otherwise the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SynthConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every setting against its accepted range.
    pub fn validate(&self) -> ValidationResult<()> {
        check_range("sample_rate", self.sample_rate, 8000, 192_000)?;
        check_range("buffer_size", self.buffer_size, 16, 8192)?;
        check_range("octave", self.octave, MIN_OCTAVE, MAX_OCTAVE)?;
        self.waveform_kind()?;

        let kick = &self.kick;
        check_range(
            "kick.start_frequency_hz",
            kick.start_frequency_hz,
            f32::MIN_POSITIVE,
            96_000.0,
        )?;
        check_range("kick.hold_seconds", kick.hold_seconds, 0.0, 10.0)?;
        check_range("kick.sweep_seconds", kick.sweep_seconds, 0.001, 10.0)?;
        check_range("kick.note", kick.note, LOWEST_KEY, HIGHEST_KEY)?;
        check_range("kick.max_iterations", kick.max_iterations, 1, 100_000_000)?;
        Ok(())
    }

    /// The configured waveform.
    pub fn waveform_kind(&self) -> ValidationResult<WaveformKind> {
        WaveformKind::from_name(&self.waveform)
            .ok_or_else(|| ValidationError::UnknownWaveform(self.waveform.clone()))
    }

    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            sample_rate: self.sample_rate as f32,
            kick: KickConfig {
                start_frequency_hz: self.kick.start_frequency_hz,
                hold_seconds: self.kick.hold_seconds,
                sweep_seconds: self.kick.sweep_seconds,
                key: self.kick.note,
                tolerance_samples: self.kick.tolerance_samples as usize,
                max_iterations: self.kick.max_iterations,
            },
        }
    }
}
