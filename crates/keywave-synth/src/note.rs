//! Piano key numbers, equal-tempered frequencies, and note names.
//!
//! Keys follow the 88-key piano numbering where key 49 is A4 (440 Hz).
//! Frequencies use the fixed semitone ratio `1.059463`, and the inverse
//! mapping uses the same ratio so that key → frequency → key is exact
//! across the whole keyboard.

use core::fmt;
use libm::{logf, powf, roundf};

/// Key number of the reference pitch A4.
pub const REFERENCE_KEY: i32 = 49;

/// Frequency of the reference pitch in Hz.
pub const REFERENCE_FREQUENCY_HZ: f32 = 440.0;

/// Equal-temperament semitone ratio.
pub const SEMITONE_RATIO: f32 = 1.059463;

/// Lowest supported piano key (A0).
pub const LOWEST_KEY: i32 = 1;

/// Highest supported piano key (C8).
pub const HIGHEST_KEY: i32 = 88;

const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Errors raised when mapping keys and frequencies.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum NoteError {
    /// The key number lies outside the supported keyboard.
    #[error("piano key {0} is outside the supported range 1..=88")]
    OutOfRange(i32),

    /// The frequency is zero, negative, or not finite.
    #[error("invalid frequency: {0} Hz")]
    InvalidFrequency(f32),
}

/// Frequency of a piano key in Hz.
///
/// Defined for any key; callers that need validation use [`Note::from_key`].
#[inline]
pub fn key_to_frequency(key: i32) -> f32 {
    REFERENCE_FREQUENCY_HZ * powf(SEMITONE_RATIO, (key - REFERENCE_KEY) as f32)
}

/// Nearest piano key to a frequency.
///
/// The result is not range-checked against the keyboard; a very low or very
/// high frequency maps to a key outside `LOWEST_KEY..=HIGHEST_KEY`.
pub fn nearest_key(frequency_hz: f32) -> Result<i32, NoteError> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Err(NoteError::InvalidFrequency(frequency_hz));
    }
    let semitones = logf(frequency_hz / REFERENCE_FREQUENCY_HZ) / logf(SEMITONE_RATIO);
    Ok(REFERENCE_KEY + roundf(semitones) as i32)
}

/// Octave number of a key: `floor((key + 8) / 12)`.
#[inline]
pub fn key_octave(key: i32) -> i32 {
    (key + 8).div_euclid(12)
}

/// Human-readable name of a key, e.g. `A4` for key 49.
pub fn note_name(key: i32) -> NoteName {
    NoteName {
        pitch_class: PITCH_CLASSES[(key + 8).rem_euclid(12) as usize],
        octave: key_octave(key),
    }
}

/// Pitch class plus octave, displayed as `C#5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteName {
    /// Chromatic pitch class (`C`, `C#`, ... `B`).
    pub pitch_class: &'static str,
    /// Octave number.
    pub octave: i32,
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

/// A validated piano key with its frequency.
///
/// Recomputed on every note change; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    key: i32,
    frequency_hz: f32,
}

impl Note {
    /// Build a note from a key number, rejecting keys off the keyboard.
    pub fn from_key(key: i32) -> Result<Self, NoteError> {
        if !(LOWEST_KEY..=HIGHEST_KEY).contains(&key) {
            return Err(NoteError::OutOfRange(key));
        }
        Ok(Self {
            key,
            frequency_hz: key_to_frequency(key),
        })
    }

    /// Build the note nearest to a frequency.
    pub fn from_frequency(frequency_hz: f32) -> Result<Self, NoteError> {
        Self::from_key(nearest_key(frequency_hz)?)
    }

    /// Piano key number.
    pub fn key(&self) -> i32 {
        self.key
    }

    /// Frequency in Hz, always positive.
    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz
    }

    /// Display name such as `A4`.
    pub fn name(&self) -> NoteName {
        note_name(self.key)
    }

    /// Octave number.
    pub fn octave(&self) -> i32 {
        key_octave(self.key)
    }
}

impl Default for Note {
    fn default() -> Self {
        Self {
            key: REFERENCE_KEY,
            frequency_hz: REFERENCE_FREQUENCY_HZ,
        }
    }
}
