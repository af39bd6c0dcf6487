//! Periodic waveform generation.
//!
//! A period of `N` samples is the linearly spaced phase ladder
//! `2π·k/(N-1)` for `k = 0..N`, including both `0` and `2π`. A period that
//! resumes at phase fraction `f` is the *tail* of that same ladder, its last
//! `round(N·(1-f))` samples. Resuming therefore reproduces exactly the
//! samples an uninterrupted period would have produced, and a callback
//! boundary can fall anywhere inside a period without a click.
//!
//! All functions here are pure. [`period`] is allocation-free and is what the
//! audio thread uses; [`generate`] collects it into a `Vec`.

use alloc::vec::Vec;
use core::f32::consts::{PI, TAU};
use libm::{roundf, sinf};

/// Gain applied to the sine in kick mode before hard clipping.
pub const KICK_BOOST_GAIN: f32 = 4.0;

/// Waveform shape selected by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaveformKind {
    /// Pure sine.
    #[default]
    Sine,
    /// Rising ramp from -1, dropping back at the period edge.
    Sawtooth,
}

impl WaveformKind {
    /// All kinds, in toggle order.
    pub const ALL: [WaveformKind; 2] = [WaveformKind::Sine, WaveformKind::Sawtooth];

    /// The other kind.
    pub fn toggled(self) -> Self {
        match self {
            WaveformKind::Sine => WaveformKind::Sawtooth,
            WaveformKind::Sawtooth => WaveformKind::Sine,
        }
    }

    /// Short lowercase name (`sine`, `saw`).
    pub fn name(self) -> &'static str {
        match self {
            WaveformKind::Sine => "sine",
            WaveformKind::Sawtooth => "saw",
        }
    }

    /// Parse a name as produced by [`WaveformKind::name`].
    ///
    /// `sawtooth` is accepted as an alias of `saw`. Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("sine") {
            Some(WaveformKind::Sine)
        } else if name.eq_ignore_ascii_case("saw") || name.eq_ignore_ascii_case("sawtooth") {
            Some(WaveformKind::Sawtooth)
        } else {
            None
        }
    }

    pub(crate) fn to_bits(self) -> u8 {
        match self {
            WaveformKind::Sine => 0,
            WaveformKind::Sawtooth => 1,
        }
    }

    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits {
            1 => WaveformKind::Sawtooth,
            _ => WaveformKind::Sine,
        }
    }
}

/// Evaluate one waveform sample at a phase in radians (`0..=2π`).
///
/// Sine in kick mode is `clamp(4·sin(phase), -1, 1)`. The sawtooth ignores
/// `kick_boost`; its phase is reduced modulo 2π, so the ladder endpoint `2π`
/// sits on the wraparound edge and evaluates to `-1`.
#[inline]
pub fn sample_at(kind: WaveformKind, phase: f32, kick_boost: bool) -> f32 {
    match kind {
        WaveformKind::Sine => {
            let s = sinf(phase);
            if kick_boost {
                (KICK_BOOST_GAIN * s).clamp(-1.0, 1.0)
            } else {
                s
            }
        }
        WaveformKind::Sawtooth => {
            let wrapped = if phase >= TAU { phase - TAU } else { phase };
            wrapped / PI - 1.0
        }
    }
}

/// Phase of ladder step `index` in a period of `period_samples` samples.
#[inline]
pub fn ladder_phase(index: usize, period_samples: usize) -> f32 {
    if period_samples <= 1 {
        return 0.0;
    }
    TAU * (index as f32 / (period_samples - 1) as f32)
}

/// Number of samples [`period`] yields when resuming at `start_phase_fraction`.
///
/// `round(period_samples · (1 - start_phase_fraction))`, capped at one full
/// period. Zero when less than half a sample of the period remains.
#[inline]
pub fn period_len(period_samples: usize, start_phase_fraction: f32) -> usize {
    let len = roundf(period_samples as f32 * (1.0 - start_phase_fraction));
    if len < 1.0 {
        0
    } else {
        (len as usize).min(period_samples)
    }
}

/// Iterate the samples of one period, starting at `start_phase_fraction`.
///
/// `period_samples` must be at least 1 and `start_phase_fraction` in
/// `[0, 1)`; out-of-range fractions are clamped.
pub fn period(
    period_samples: usize,
    start_phase_fraction: f32,
    kind: WaveformKind,
    kick_boost: bool,
) -> PeriodSamples {
    let fraction = start_phase_fraction.clamp(0.0, 1.0);
    let len = period_len(period_samples, fraction);
    PeriodSamples {
        index: period_samples - len,
        end: period_samples,
        period_samples,
        kind,
        kick_boost,
    }
}

/// Generate one period (or the rest of one) as a vector.
///
/// See [`period`] for the constraints on the arguments.
pub fn generate(
    period_samples: usize,
    start_phase_fraction: f32,
    kind: WaveformKind,
    kick_boost: bool,
) -> Vec<f32> {
    period(period_samples, start_phase_fraction, kind, kick_boost).collect()
}

/// Iterator over the samples of one period. Created by [`period`].
#[derive(Debug, Clone)]
pub struct PeriodSamples {
    index: usize,
    end: usize,
    period_samples: usize,
    kind: WaveformKind,
    kick_boost: bool,
}

impl PeriodSamples {
    /// Ladder index of the next sample within the full period.
    pub fn start_index(&self) -> usize {
        self.index
    }
}

impl Iterator for PeriodSamples {
    type Item = f32;

    #[inline]
    fn next(&mut self) -> Option<f32> {
        if self.index >= self.end {
            return None;
        }
        let phase = ladder_phase(self.index, self.period_samples);
        self.index += 1;
        Some(sample_at(self.kind, phase, self.kick_boost))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PeriodSamples {}
