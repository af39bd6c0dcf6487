//! Sample-accurate playback engine run inside the audio callback.
//!
//! Each call to [`PlaybackEngine::fill`] writes exactly as many samples as the
//! buffer holds, regardless of how the buffer length relates to the waveform
//! period. The unconsumed part of the last period is remembered as a phase
//! fraction and resumed by the next call:
//!
//! ```text
//!  call n                          | call n+1
//!  ... period | period | head ---->|<---- tail | period | period | head -->
//!                                  ^ phase_fraction = head / period
//! ```
//!
//! In kick mode the envelope is stepped at every period boundary crossed
//! while filling, so the pitch glides period by period independent of the
//! buffer size.

use alloc::sync::Arc;

use crate::kick::{
    DEFAULT_KICK_HOLD_SECONDS, DEFAULT_KICK_START_HZ, DEFAULT_KICK_SWEEP_SECONDS,
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_SAMPLES, INITIAL_DECAY_GUESS, KickEnvelope,
    KickPhase, SolverOptions, period_samples,
};
use crate::params::{ParamSnapshot, PlaybackParams};
use crate::waveform::{self, WaveformKind};

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// Piano key selected when kick mode is switched on (A1).
pub const DEFAULT_KICK_KEY: i32 = 13;

/// Kick mode settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickConfig {
    /// Frequency the sweep starts from, in Hz.
    pub start_frequency_hz: f32,
    /// Time spent at the bottom of the sweep before re-triggering, in seconds.
    pub hold_seconds: f32,
    /// Sweep duration the decay solver aims for, in seconds.
    pub sweep_seconds: f32,
    /// Key selected when kick mode is switched on.
    pub key: i32,
    /// Solver acceptance window in samples.
    pub tolerance_samples: usize,
    /// Solver iteration cap.
    pub max_iterations: u32,
}

impl Default for KickConfig {
    fn default() -> Self {
        Self {
            start_frequency_hz: DEFAULT_KICK_START_HZ,
            hold_seconds: DEFAULT_KICK_HOLD_SECONDS,
            sweep_seconds: DEFAULT_KICK_SWEEP_SECONDS,
            key: DEFAULT_KICK_KEY,
            tolerance_samples: DEFAULT_TOLERANCE_SAMPLES,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl KickConfig {
    /// Solver options derived from these settings.
    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            tolerance_samples: self.tolerance_samples,
            max_iterations: self.max_iterations,
            initial_guess: INITIAL_DECAY_GUESS,
        }
    }
}

/// Engine configuration fixed for the lifetime of a playback session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: f32,
    /// Kick mode settings.
    pub kick: KickConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            kick: KickConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Configuration at the given sample rate with default kick settings.
    pub fn with_sample_rate(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Kick hold length in whole samples.
    pub fn kick_hold_samples(&self) -> usize {
        (self.sample_rate * self.kick.hold_seconds) as usize
    }

    /// Kick sweep length in whole samples.
    pub fn kick_sweep_samples(&self) -> usize {
        (self.sample_rate * self.kick.sweep_seconds) as usize
    }
}

/// Timing information handed to the callback by the audio layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StreamTime {
    /// Seconds of audio rendered before this callback.
    pub elapsed_seconds: f64,
}

/// What the audio layer should do after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStatus {
    /// Keep the stream running.
    Continue,
}

/// Phase-continuous monophonic playback engine.
///
/// Owns all per-stream state. Created when playback starts, moved into the
/// audio callback, and dropped with the stream.
#[derive(Debug)]
pub struct PlaybackEngine {
    config: EngineConfig,
    params: Arc<PlaybackParams>,
    phase_fraction: f32,
    kick: KickEnvelope,
    kick_was_enabled: bool,
    frames_rendered: u64,
}

impl PlaybackEngine {
    /// Create an engine reading its parameters from `params`.
    pub fn new(config: EngineConfig, params: Arc<PlaybackParams>) -> Self {
        Self {
            config,
            params,
            phase_fraction: 0.0,
            kick: KickEnvelope::new(config.kick.start_frequency_hz, config.kick_hold_samples()),
            kick_was_enabled: false,
            frames_rendered: 0,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared parameter store.
    pub fn params(&self) -> &Arc<PlaybackParams> {
        &self.params
    }

    /// Fraction of the current period already emitted, in `[0, 1)`.
    pub fn phase_fraction(&self) -> f32 {
        self.phase_fraction
    }

    /// Kick envelope state.
    pub fn kick(&self) -> &KickEnvelope {
        &self.kick
    }

    /// Total samples written since creation.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Samples per period at the frequency that currently drives playback.
    pub fn samples_per_period(&self) -> usize {
        self.period_for(&self.params.snapshot())
    }

    /// Audio callback entry point.
    ///
    /// Fills `output` completely and always asks the stream to continue.
    /// Stream time is informational; the caller's cadence is the only clock.
    pub fn process(&mut self, output: &mut [f32], _time: StreamTime) -> CallbackStatus {
        self.fill(output);
        CallbackStatus::Continue
    }

    /// Write exactly `output.len()` samples, continuing from the previous call.
    pub fn fill(&mut self, output: &mut [f32]) {
        if output.is_empty() {
            return;
        }
        let params = self.params.snapshot();
        self.begin_block(&params);
        self.frames_rendered += output.len() as u64;

        let mut period = self.period_for(&params);
        if period == 0 {
            output.fill(0.0);
            self.phase_fraction = 0.0;
            return;
        }

        let kind = params.waveform;
        let boost = params.kick_enabled;
        let mut written = 0;

        if self.phase_fraction > 0.0 {
            let tail = waveform::period(period, self.phase_fraction, kind, boost);
            let tail_start = tail.start_index();
            let tail_len = tail.len();
            if tail_len > output.len() {
                write_samples(output, tail);
                self.phase_fraction = (tail_start + output.len()) as f32 / period as f32;
                return;
            }
            write_samples(&mut output[..tail_len], tail);
            written = tail_len;
            if tail_len > 0 {
                period = self.complete_period(period, &params);
            }
        }

        loop {
            let remaining = output.len() - written;
            if remaining < period {
                write_samples(
                    &mut output[written..],
                    waveform::period(period, 0.0, kind, boost).take(remaining),
                );
                self.phase_fraction = remaining as f32 / period as f32;
                return;
            }
            write_samples(
                &mut output[written..written + period],
                waveform::period(period, 0.0, kind, boost),
            );
            written += period;
            period = self.complete_period(period, &params);
        }
    }

    /// Block-start bookkeeping: pick up kick mode changes and run the
    /// envelope's block transitions.
    ///
    /// A re-triggered kick starts on a fresh period at its start frequency.
    fn begin_block(&mut self, params: &ParamSnapshot) {
        if params.kick_enabled {
            let mut retriggered = self.kick.phase() == KickPhase::Finished;
            if !self.kick_was_enabled {
                self.kick.retrigger();
                retriggered = true;
            }
            self.kick.set_decay_factor(params.kick_decay_factor);
            self.kick.begin_block(params.frequency_hz);
            if retriggered {
                self.phase_fraction = 0.0;
            }
        }
        self.kick_was_enabled = params.kick_enabled;
    }

    /// A period boundary was crossed; returns the length of the next period.
    fn complete_period(&mut self, period: usize, params: &ParamSnapshot) -> usize {
        if params.kick_enabled {
            self.kick.on_period_complete(period);
        }
        self.period_for(params)
    }

    fn period_for(&self, params: &ParamSnapshot) -> usize {
        let frequency = if params.kick_enabled {
            self.kick.frequency_hz()
        } else {
            params.frequency_hz
        };
        period_samples(self.config.sample_rate, frequency)
    }
}

#[inline]
fn write_samples(output: &mut [f32], samples: impl Iterator<Item = f32>) {
    for (slot, sample) in output.iter_mut().zip(samples) {
        *slot = sample;
    }
}

/// Convenience for offline rendering: a fresh engine at a fixed note.
pub fn engine_at(sample_rate: f32, frequency_hz: f32, kind: WaveformKind) -> PlaybackEngine {
    let params = Arc::new(PlaybackParams::new(frequency_hz, kind));
    PlaybackEngine::new(EngineConfig::with_sample_rate(sample_rate), params)
}
