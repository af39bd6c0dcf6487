//! Lock-free parameter store shared by the UI thread and the audio thread.
//!
//! Every field is an independent atomic scalar. The UI thread stores, the
//! audio thread loads a [`ParamSnapshot`] once per callback. Fields are not
//! updated together, so a callback may observe a new frequency with the old
//! waveform; each field on its own is always consistent.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use crate::kick::INITIAL_DECAY_GUESS;
use crate::note::REFERENCE_FREQUENCY_HZ;
use crate::waveform::WaveformKind;

/// Scalar playback parameters written by the UI and read by the engine.
#[derive(Debug)]
pub struct PlaybackParams {
    /// Target (note) frequency, f32 bits.
    frequency_hz: AtomicU32,
    waveform: AtomicU8,
    kick_enabled: AtomicBool,
    /// Kick decay factor per period, f32 bits.
    kick_decay_factor: AtomicU32,
}

/// Values of [`PlaybackParams`] loaded at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Target frequency in Hz.
    pub frequency_hz: f32,
    /// Selected waveform.
    pub waveform: WaveformKind,
    /// Whether kick mode is on.
    pub kick_enabled: bool,
    /// Kick decay factor per period.
    pub kick_decay_factor: f32,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self::new(REFERENCE_FREQUENCY_HZ, WaveformKind::Sine)
    }
}

impl PlaybackParams {
    /// Create a store with kick mode off.
    pub fn new(frequency_hz: f32, waveform: WaveformKind) -> Self {
        let frequency_hz = if is_valid_frequency(frequency_hz) {
            frequency_hz
        } else {
            REFERENCE_FREQUENCY_HZ
        };
        Self {
            frequency_hz: AtomicU32::new(frequency_hz.to_bits()),
            waveform: AtomicU8::new(waveform.to_bits()),
            kick_enabled: AtomicBool::new(false),
            kick_decay_factor: AtomicU32::new(INITIAL_DECAY_GUESS.to_bits()),
        }
    }

    /// Set the target frequency. Returns `false` (and keeps the old value)
    /// for a non-positive or non-finite frequency.
    pub fn set_frequency_hz(&self, frequency_hz: f32) -> bool {
        if !is_valid_frequency(frequency_hz) {
            return false;
        }
        self.frequency_hz
            .store(frequency_hz.to_bits(), Ordering::Relaxed);
        true
    }

    /// Target frequency in Hz.
    pub fn frequency_hz(&self) -> f32 {
        f32::from_bits(self.frequency_hz.load(Ordering::Relaxed))
    }

    /// Select the waveform.
    pub fn set_waveform_kind(&self, kind: WaveformKind) {
        self.waveform.store(kind.to_bits(), Ordering::Relaxed);
    }

    /// Selected waveform.
    pub fn waveform_kind(&self) -> WaveformKind {
        WaveformKind::from_bits(self.waveform.load(Ordering::Relaxed))
    }

    /// Turn kick mode on or off.
    pub fn set_kick_enabled(&self, enabled: bool) {
        self.kick_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether kick mode is on.
    pub fn kick_enabled(&self) -> bool {
        self.kick_enabled.load(Ordering::Relaxed)
    }

    /// Set the kick decay factor. Returns `false` for values outside `(0, 1)`.
    pub fn set_kick_decay_factor(&self, factor: f32) -> bool {
        if !(factor > 0.0 && factor < 1.0) {
            return false;
        }
        self.kick_decay_factor
            .store(factor.to_bits(), Ordering::Relaxed);
        true
    }

    /// Kick decay factor per period.
    pub fn kick_decay_factor(&self) -> f32 {
        f32::from_bits(self.kick_decay_factor.load(Ordering::Relaxed))
    }

    /// Load every field.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            frequency_hz: self.frequency_hz(),
            waveform: self.waveform_kind(),
            kick_enabled: self.kick_enabled(),
            kick_decay_factor: self.kick_decay_factor(),
        }
    }
}

fn is_valid_frequency(frequency_hz: f32) -> bool {
    frequency_hz.is_finite() && frequency_hz > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PlaybackParams::default();
        let snap = params.snapshot();
        assert_eq!(snap.frequency_hz, 440.0);
        assert_eq!(snap.waveform, WaveformKind::Sine);
        assert!(!snap.kick_enabled);
        assert_eq!(snap.kick_decay_factor, INITIAL_DECAY_GUESS);
    }

    #[test]
    fn test_invalid_frequency_rejected() {
        let params = PlaybackParams::default();
        assert!(!params.set_frequency_hz(0.0));
        assert!(!params.set_frequency_hz(-1.0));
        assert!(!params.set_frequency_hz(f32::INFINITY));
        assert_eq!(params.frequency_hz(), 440.0);
        assert!(params.set_frequency_hz(55.0));
        assert_eq!(params.frequency_hz(), 55.0);
    }

    #[test]
    fn test_invalid_decay_factor_rejected() {
        let params = PlaybackParams::default();
        assert!(!params.set_kick_decay_factor(1.0));
        assert!(!params.set_kick_decay_factor(0.0));
        assert!(params.set_kick_decay_factor(0.99));
        assert_eq!(params.kick_decay_factor(), 0.99);
    }

    #[test]
    fn test_invalid_initial_frequency_falls_back() {
        let params = PlaybackParams::new(f32::NAN, WaveformKind::Sawtooth);
        assert_eq!(params.frequency_hz(), 440.0);
        assert_eq!(params.waveform_kind(), WaveformKind::Sawtooth);
    }

    #[test]
    fn test_shared_across_threads() {
        use std::sync::Arc;

        let params = Arc::new(PlaybackParams::default());
        let writer = Arc::clone(&params);
        std::thread::spawn(move || {
            writer.set_frequency_hz(110.0);
            writer.set_kick_enabled(true);
        })
        .join()
        .unwrap();
        assert_eq!(params.frequency_hz(), 110.0);
        assert!(params.kick_enabled());
    }
}
