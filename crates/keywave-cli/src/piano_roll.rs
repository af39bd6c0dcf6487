//! Computer-keyboard piano.
//!
//! The home row plays white keys and the row above plays black keys, one
//! octave from C to C:
//!
//! ```text
//!   W E   T Y U
//!  A S D F G H J K
//!  C D E F G A B C
//! ```

use keywave_synth::SynthController;

/// Keys in note order, starting at C.
const NOTE_KEYS: [char; 13] = [
    'A', 'W', 'S', 'E', 'D', 'F', 'T', 'G', 'Y', 'H', 'U', 'J', 'K',
];

/// A key press understood by the piano roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PianoCommand {
    /// Play the note this many semitones above C of the current octave.
    Note(i32),
    /// `Z`
    OctaveDown,
    /// `X`
    OctaveUp,
    /// `9`
    ToggleWaveform,
}

impl PianoCommand {
    /// Map a key to a command; case-insensitive.
    pub fn from_key(key: char) -> Option<Self> {
        let key = key.to_ascii_uppercase();
        match key {
            'Z' => Some(PianoCommand::OctaveDown),
            'X' => Some(PianoCommand::OctaveUp),
            '9' => Some(PianoCommand::ToggleWaveform),
            _ => NOTE_KEYS
                .iter()
                .position(|&k| k == key)
                .map(|index| PianoCommand::Note(index as i32)),
        }
    }
}

/// Apply a command to the controller.
pub fn apply(controller: &mut SynthController, command: PianoCommand) {
    match command {
        PianoCommand::Note(index) => {
            if let Err(err) = controller.play_note_index(index) {
                tracing::warn!(index, error = %err, "note ignored");
            }
        }
        PianoCommand::OctaveDown => {
            controller.set_octave(-1);
        }
        PianoCommand::OctaveUp => {
            controller.set_octave(1);
        }
        PianoCommand::ToggleWaveform => {
            controller.toggle_waveform_kind();
        }
    }
}

/// Status lines shown while the piano roll is active.
pub fn status_lines(controller: &SynthController) -> Vec<String> {
    let mut lines = vec![
        format!("Note: {}", controller.note().name()),
        format!("Waveform: {}", controller.waveform_kind().name()),
        format!("Octave: {}", controller.octave()),
    ];
    if controller.kick_enabled() {
        lines.push("Kick mode: on".to_string());
    }
    lines.extend(
        [
            "A W S E D F T G Y H U J K: Play notes",
            "Z: Octave down",
            "X: Octave up",
            "9: Change waveform",
            "q: Stop audio",
        ]
        .map(String::from),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_keys() {
        assert_eq!(PianoCommand::from_key('a'), Some(PianoCommand::Note(0)));
        assert_eq!(PianoCommand::from_key('W'), Some(PianoCommand::Note(1)));
        assert_eq!(PianoCommand::from_key('h'), Some(PianoCommand::Note(9)));
        assert_eq!(PianoCommand::from_key('k'), Some(PianoCommand::Note(12)));
        assert_eq!(PianoCommand::from_key('p'), None);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(PianoCommand::from_key('z'), Some(PianoCommand::OctaveDown));
        assert_eq!(PianoCommand::from_key('X'), Some(PianoCommand::OctaveUp));
        assert_eq!(PianoCommand::from_key('9'), Some(PianoCommand::ToggleWaveform));
    }

    #[test]
    fn test_keys_play_expected_notes() {
        let mut controller = SynthController::default();
        apply(&mut controller, PianoCommand::from_key('h').unwrap());
        assert_eq!(controller.note().name().to_string(), "A4");
        apply(&mut controller, PianoCommand::from_key('k').unwrap());
        assert_eq!(controller.note().name().to_string(), "C5");
        apply(&mut controller, PianoCommand::OctaveDown);
        assert_eq!(controller.note().name().to_string(), "C4");
        assert_eq!(controller.octave(), 3);
    }

    #[test]
    fn test_status_lines() {
        let mut controller = SynthController::default();
        apply(&mut controller, PianoCommand::ToggleWaveform);
        let lines = status_lines(&controller);
        assert_eq!(lines[0], "Note: A4");
        assert_eq!(lines[1], "Waveform: saw");
        assert!(!lines.iter().any(|l| l.starts_with("Kick")));
    }
}
