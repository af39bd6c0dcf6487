//! Kick mode: a percussive pitch envelope.
//!
//! The frequency starts high and is multiplied by a decay factor once per
//! completed waveform period until it falls below the target note, holds
//! there for a fixed number of samples, then re-triggers. The glide is
//! stepped per period, not per sample.
//!
//! [`calculate_decay_factor`] finds the decay factor that makes the sweep
//! from start to target last a requested number of samples.

use libm::roundf;

/// Default start frequency of the sweep in Hz.
pub const DEFAULT_KICK_START_HZ: f32 = 5000.0;

/// Default hold duration at the bottom of the sweep, in seconds.
pub const DEFAULT_KICK_HOLD_SECONDS: f32 = 0.1;

/// Default sweep duration the solver aims for, in seconds.
pub const DEFAULT_KICK_SWEEP_SECONDS: f32 = 0.25;

/// Default acceptance window of the solver, in samples either side of the target.
pub const DEFAULT_TOLERANCE_SAMPLES: usize = 250;

/// Default iteration cap of the solver.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1_000_000;

/// Solver starting point, also used as the fallback decay factor.
pub const INITIAL_DECAY_GUESS: f32 = 0.5;

/// Solver step per iteration.
const DECAY_STEP: f64 = 1e-6;

/// Bounds keeping a trial factor strictly inside `(0, 1)`.
const MIN_DECAY: f64 = 1e-6;
const MAX_DECAY: f64 = 1.0 - 1e-6;

/// Samples in one period at `frequency_hz`: `max(1, round(sample_rate / frequency_hz))`.
///
/// Returns 0 for a non-positive or non-finite frequency, which callers treat
/// as "no signal".
#[inline]
pub fn period_samples(sample_rate: f32, frequency_hz: f32) -> usize {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return 0;
    }
    let samples = roundf(sample_rate / frequency_hz);
    if samples < 1.0 { 1 } else { samples as usize }
}

/// Stage of the kick envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KickPhase {
    /// Pitch falls by the decay factor every period.
    Decaying,
    /// Pitch is frozen at the bottom of the sweep while the hold counter runs.
    Holding,
    /// Hold elapsed; the next block re-triggers the sweep.
    Finished,
}

/// Kick pitch envelope state, advanced by the playback engine.
#[derive(Debug, Clone)]
pub struct KickEnvelope {
    start_frequency_hz: f32,
    frequency_hz: f32,
    decay_factor: f32,
    phase: KickPhase,
    samples_held: usize,
    hold_threshold_samples: usize,
}

impl KickEnvelope {
    /// Create an armed envelope at `start_frequency_hz`.
    pub fn new(start_frequency_hz: f32, hold_threshold_samples: usize) -> Self {
        Self {
            start_frequency_hz,
            frequency_hz: start_frequency_hz,
            decay_factor: INITIAL_DECAY_GUESS,
            phase: KickPhase::Decaying,
            samples_held: 0,
            hold_threshold_samples,
        }
    }

    /// Restart the sweep from the start frequency.
    pub fn retrigger(&mut self) {
        self.frequency_hz = self.start_frequency_hz;
        self.phase = KickPhase::Decaying;
        self.samples_held = 0;
    }

    /// Set the per-period decay factor. Values outside `(0, 1)` are ignored.
    pub fn set_decay_factor(&mut self, factor: f32) {
        if factor > 0.0 && factor < 1.0 {
            self.decay_factor = factor;
        }
    }

    /// Block-start transition against the target (note) frequency.
    ///
    /// A sweep that has dropped below the target starts holding; a finished
    /// hold re-triggers.
    pub fn begin_block(&mut self, target_hz: f32) {
        match self.phase {
            KickPhase::Decaying if self.frequency_hz < target_hz => {
                self.phase = KickPhase::Holding;
                self.samples_held = 0;
            }
            KickPhase::Finished => self.retrigger(),
            _ => {}
        }
    }

    /// Account for one completed period of `period_samples` samples.
    pub fn on_period_complete(&mut self, period_samples: usize) {
        match self.phase {
            KickPhase::Decaying => self.frequency_hz *= self.decay_factor,
            KickPhase::Holding => {
                self.samples_held += period_samples;
                if self.samples_held > self.hold_threshold_samples {
                    self.phase = KickPhase::Finished;
                }
            }
            KickPhase::Finished => {}
        }
    }

    /// Current sweep frequency in Hz.
    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz
    }

    /// Start frequency in Hz.
    pub fn start_frequency_hz(&self) -> f32 {
        self.start_frequency_hz
    }

    /// Current decay factor.
    pub fn decay_factor(&self) -> f32 {
        self.decay_factor
    }

    /// Current stage.
    pub fn phase(&self) -> KickPhase {
        self.phase
    }

    /// Samples spent holding so far.
    pub fn samples_held(&self) -> usize {
        self.samples_held
    }

    /// Hold length in samples.
    pub fn hold_threshold_samples(&self) -> usize {
        self.hold_threshold_samples
    }
}

/// Tuning of [`calculate_decay_factor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Accepted distance from the target length, in samples.
    pub tolerance_samples: usize,
    /// Iteration cap; the solver gives up and returns its best estimate.
    pub max_iterations: u32,
    /// Starting decay factor.
    pub initial_guess: f32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance_samples: DEFAULT_TOLERANCE_SAMPLES,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_guess: INITIAL_DECAY_GUESS,
        }
    }
}

/// Result of [`calculate_decay_factor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecaySolution {
    /// Decay factor, always in `(0, 1)`.
    pub factor: f32,
    /// Simulated sweep length for `factor`. When the sweep overshoots the
    /// window the count stops just past the window's upper edge.
    pub total_samples: usize,
    /// Iterations spent.
    pub iterations: u32,
    /// Whether `total_samples` landed inside the tolerance window.
    pub converged: bool,
}

/// Length in samples of a sweep from `start_hz` down to `end_hz`.
///
/// Returns `None` when the sweep would never end (`factor` outside `(0, 1)`
/// or a non-positive end frequency while `start_hz > end_hz`).
pub fn sweep_length(sample_rate: f32, start_hz: f32, end_hz: f32, factor: f32) -> Option<usize> {
    if start_hz > end_hz && !(factor > 0.0 && factor < 1.0 && end_hz > 0.0) {
        return None;
    }
    Some(simulate_sweep(sample_rate, start_hz, end_hz, factor, usize::MAX))
}

/// Accumulate period lengths while the frequency stays above `end_hz`,
/// stopping early once the total passes `limit`.
fn simulate_sweep(
    sample_rate: f32,
    start_hz: f32,
    end_hz: f32,
    factor: f32,
    limit: usize,
) -> usize {
    let mut frequency = start_hz;
    let mut total = 0usize;
    while frequency > end_hz {
        total += period_samples(sample_rate, frequency);
        if total > limit {
            break;
        }
        frequency *= factor;
    }
    total
}

/// Find the per-period decay factor whose sweep from `start_hz` to `end_hz`
/// lasts `target_samples` (within the tolerance window).
///
/// This is an approximate root finder: it walks the trial factor up or down
/// by `1e-6` per iteration from `options.initial_guess`. The walk is capped at
/// `options.max_iterations` and kept strictly inside `(0, 1)`; when it cannot
/// converge the best factor seen is returned with `converged == false`.
pub fn calculate_decay_factor(
    sample_rate: f32,
    start_hz: f32,
    end_hz: f32,
    target_samples: usize,
    options: SolverOptions,
) -> DecaySolution {
    let fallback = DecaySolution {
        factor: options.initial_guess.clamp(MIN_DECAY as f32, MAX_DECAY as f32),
        total_samples: 0,
        iterations: 0,
        converged: false,
    };
    if !(start_hz > end_hz && end_hz > 0.0 && sample_rate > 0.0) {
        #[cfg(feature = "tracing")]
        tracing::warn!(start_hz, end_hz, sample_rate, "kick sweep has no range to decay over");
        return fallback;
    }

    let upper = target_samples.saturating_add(options.tolerance_samples);
    let lower = target_samples.saturating_sub(options.tolerance_samples);

    let mut guess = f64::from(fallback.factor);
    let mut best = fallback;
    let mut best_error = usize::MAX;
    let mut iterations = 0;

    while iterations < options.max_iterations {
        iterations += 1;
        let factor = guess as f32;
        let total = simulate_sweep(sample_rate, start_hz, end_hz, factor, upper);

        if total > upper {
            guess -= DECAY_STEP;
        } else if total < lower {
            guess += DECAY_STEP;
        } else {
            return DecaySolution {
                factor,
                total_samples: total,
                iterations,
                converged: true,
            };
        }

        let error = total.abs_diff(target_samples);
        if error < best_error {
            best_error = error;
            best = DecaySolution {
                factor,
                total_samples: total,
                iterations,
                converged: false,
            };
        }

        if !(MIN_DECAY..=MAX_DECAY).contains(&guess) {
            break;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::warn!(
        iterations,
        factor = best.factor,
        total_samples = best.total_samples,
        target_samples,
        "kick decay solver did not converge, using best estimate"
    );
    DecaySolution { iterations, ..best }
}
