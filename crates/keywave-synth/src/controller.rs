//! UI-side control surface.
//!
//! [`SynthController`] owns the note and octave the player has selected and
//! publishes every change into the shared [`PlaybackParams`]. The decay
//! solver runs here, on the caller's thread, never inside the audio callback.

use alloc::sync::Arc;

use crate::engine::{EngineConfig, PlaybackEngine};
use crate::kick::{DecaySolution, calculate_decay_factor};
use crate::note::{HIGHEST_KEY, LOWEST_KEY, Note, NoteError};
use crate::params::PlaybackParams;
use crate::waveform::WaveformKind;

/// Lowest selectable octave.
pub const MIN_OCTAVE: i32 = 1;

/// Highest selectable octave.
pub const MAX_OCTAVE: i32 = 6;

/// Default octave (middle C is note index 0).
pub const DEFAULT_OCTAVE: i32 = 4;

/// Owner of the player's note, octave, waveform and kick selections.
#[derive(Debug)]
pub struct SynthController {
    config: EngineConfig,
    params: Arc<PlaybackParams>,
    note: Note,
    octave: i32,
    last_solution: Option<DecaySolution>,
}

impl SynthController {
    /// Create a controller at A4 with kick mode off.
    ///
    /// `octave` is clamped to `MIN_OCTAVE..=MAX_OCTAVE`.
    pub fn new(config: EngineConfig, octave: i32) -> Self {
        let note = Note::default();
        Self {
            config,
            params: Arc::new(PlaybackParams::new(note.frequency_hz(), WaveformKind::Sine)),
            note,
            octave: octave.clamp(MIN_OCTAVE, MAX_OCTAVE),
            last_solution: None,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parameter store shared with the engine.
    pub fn params(&self) -> &Arc<PlaybackParams> {
        &self.params
    }

    /// A fresh engine reading this controller's parameters.
    pub fn engine(&self) -> PlaybackEngine {
        PlaybackEngine::new(self.config, Arc::clone(&self.params))
    }

    /// Currently selected note.
    pub fn note(&self) -> Note {
        self.note
    }

    /// Currently selected octave.
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Selected waveform.
    pub fn waveform_kind(&self) -> WaveformKind {
        self.params.waveform_kind()
    }

    /// Whether kick mode is on.
    pub fn kick_enabled(&self) -> bool {
        self.params.kick_enabled()
    }

    /// Result of the most recent decay solve, if any.
    pub fn last_solution(&self) -> Option<DecaySolution> {
        self.last_solution
    }

    /// Select a piano key.
    ///
    /// Keys off the keyboard are rejected and leave playback untouched. In
    /// kick mode the decay factor is re-solved for the new target.
    pub fn set_note(&mut self, key: i32) -> Result<Note, NoteError> {
        let note = Note::from_key(key)?;
        self.note = note;
        self.params.set_frequency_hz(note.frequency_hz());
        #[cfg(feature = "tracing")]
        tracing::debug!(
            key,
            name = %note.name(),
            frequency_hz = note.frequency_hz(),
            "note selected"
        );
        if self.params.kick_enabled() {
            self.solve_kick_decay();
        }
        Ok(note)
    }

    /// Piano key of `note_index` semitones above C in the current octave.
    pub fn piano_key_for(&self, note_index: i32) -> i32 {
        self.octave * 12 - 8 + note_index
    }

    /// Select the note `note_index` semitones above C in the current octave.
    pub fn play_note_index(&mut self, note_index: i32) -> Result<Note, NoteError> {
        self.set_note(self.piano_key_for(note_index))
    }

    /// Shift the octave by `delta`, clamped to `MIN_OCTAVE..=MAX_OCTAVE`.
    ///
    /// The selected key moves by the octaves actually applied, as long as it
    /// stays on the keyboard. Returns the new octave.
    pub fn set_octave(&mut self, delta: i32) -> i32 {
        let octave = self.octave.saturating_add(delta).clamp(MIN_OCTAVE, MAX_OCTAVE);
        let applied = octave - self.octave;
        self.octave = octave;
        if applied != 0 {
            let key = self.note.key() + applied * 12;
            if (LOWEST_KEY..=HIGHEST_KEY).contains(&key) {
                // Range checked above, so this cannot fail.
                let _ = self.set_note(key);
            }
        }
        octave
    }

    /// Select the waveform.
    pub fn set_waveform_kind(&mut self, kind: WaveformKind) {
        self.params.set_waveform_kind(kind);
        #[cfg(feature = "tracing")]
        tracing::debug!(waveform = kind.name(), "waveform selected");
    }

    /// Switch between sine and sawtooth; returns the new kind.
    pub fn toggle_waveform_kind(&mut self) -> WaveformKind {
        let kind = self.params.waveform_kind().toggled();
        self.set_waveform_kind(kind);
        kind
    }

    /// Turn kick mode on or off.
    ///
    /// Enabling selects the configured kick key and solves the decay factor
    /// before the engine sees the flag, so the first kick already uses it.
    pub fn set_kick_enabled(&mut self, enabled: bool) {
        if enabled {
            match Note::from_key(self.config.kick.key) {
                Ok(note) => {
                    self.note = note;
                    self.params.set_frequency_hz(note.frequency_hz());
                }
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_err, "invalid kick key, keeping current note");
                }
            }
            self.solve_kick_decay();
        }
        self.params.set_kick_enabled(enabled);
        #[cfg(feature = "tracing")]
        tracing::debug!(enabled, "kick mode");
    }

    fn solve_kick_decay(&mut self) {
        let solution = calculate_decay_factor(
            self.config.sample_rate,
            self.config.kick.start_frequency_hz,
            self.note.frequency_hz(),
            self.config.kick_sweep_samples(),
            self.config.kick.solver_options(),
        );
        self.params.set_kick_decay_factor(solution.factor);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            factor = solution.factor,
            total_samples = solution.total_samples,
            iterations = solution.iterations,
            converged = solution.converged,
            "kick decay solved"
        );
        #[cfg(feature = "tracing")]
        if !solution.converged {
            tracing::warn!(
                target_hz = self.note.frequency_hz(),
                factor = solution.factor,
                total_samples = solution.total_samples,
                wanted_samples = self.config.kick_sweep_samples(),
                "kick decay did not converge, using best estimate"
            );
        }
        self.last_solution = Some(solution);
    }
}

impl Default for SynthController {
    fn default() -> Self {
        Self::new(EngineConfig::default(), DEFAULT_OCTAVE)
    }
}
