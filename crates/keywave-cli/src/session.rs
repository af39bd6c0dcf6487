//! Interactive player state: menu, synth controller and the output stream.

use keywave_io::{AudioBackend, BackendStreamConfig, Playback};
use keywave_synth::SynthController;

use crate::menu::{MenuAction, MenuEvent, Navigator, Screen, main_menu};
use crate::piano_roll::{self, PianoCommand};

/// Everything the interactive player needs between key presses.
pub struct PlayerSession<'a> {
    backend: &'a dyn AudioBackend,
    stream_config: BackendStreamConfig,
    controller: SynthController,
    navigator: Navigator,
    playback: Option<Playback>,
    message: Option<String>,
}

impl<'a> PlayerSession<'a> {
    /// Create a session at the main menu with no stream running.
    pub fn new(
        backend: &'a dyn AudioBackend,
        stream_config: BackendStreamConfig,
        controller: SynthController,
    ) -> Self {
        Self {
            backend,
            stream_config,
            controller,
            navigator: Navigator::new(main_menu()),
            playback: None,
            message: None,
        }
    }

    /// Handle one key; returns `false` once the player asked to exit.
    pub fn handle_key(&mut self, key: char) -> bool {
        self.message = None;
        match self.navigator.press(key) {
            MenuEvent::Exit => {
                self.playback = None;
                return false;
            }
            MenuEvent::Redraw | MenuEvent::Ignored => {}
            MenuEvent::Run(MenuAction::ActivateKick) => {
                self.controller.set_kick_enabled(true);
                self.message = Some(format!("Kick mode on ({})", self.controller.note().name()));
            }
            MenuEvent::Run(MenuAction::DeactivateKick) => {
                self.controller.set_kick_enabled(false);
                self.message = Some("Kick mode off".to_string());
            }
            MenuEvent::Enter(Screen::PianoRoll) => self.start_playback(),
            MenuEvent::Leave(Screen::PianoRoll) => {
                self.playback = None;
            }
            MenuEvent::Forward(Screen::PianoRoll, key) => {
                if let Some(command) = PianoCommand::from_key(key) {
                    piano_roll::apply(&mut self.controller, command);
                }
            }
        }
        true
    }

    fn start_playback(&mut self) {
        match Playback::start(self.backend, &self.stream_config, self.controller.engine()) {
            Ok(playback) => self.playback = Some(playback),
            Err(err) => {
                tracing::error!(error = %err, "could not start audio");
                self.message = Some(format!("Audio error: {}", err));
                // Back to the menu; the screen never started.
                self.navigator.press('q');
            }
        }
    }

    /// Lines for the current screen.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = match self.navigator.screen() {
            Some(Screen::PianoRoll) => piano_roll::status_lines(&self.controller),
            None => self.navigator.render(),
        };
        if let Some(message) = &self.message {
            lines.push(String::new());
            lines.push(message.clone());
        }
        lines
    }

    /// Whether an output stream is running.
    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// The synth controller.
    pub fn controller(&self) -> &SynthController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywave_io::{AudioDevice, Error, ErrorCallback, OutputCallback, Result, StreamHandle};

    struct SilentBackend {
        fail: bool,
    }

    impl AudioBackend for SilentBackend {
        fn name(&self) -> &str {
            "silent"
        }

        fn list_devices(&self) -> Result<Vec<AudioDevice>> {
            Ok(Vec::new())
        }

        fn default_output_device(&self) -> Result<Option<AudioDevice>> {
            Ok(None)
        }

        fn build_output_stream(
            &self,
            _config: &BackendStreamConfig,
            _callback: OutputCallback,
            _error_callback: ErrorCallback,
        ) -> Result<StreamHandle> {
            if self.fail {
                Err(Error::NoDevice)
            } else {
                Ok(StreamHandle::new(()))
            }
        }
    }

    fn session(backend: &SilentBackend) -> PlayerSession<'_> {
        PlayerSession::new(
            backend,
            BackendStreamConfig::default(),
            SynthController::default(),
        )
    }

    #[test]
    fn test_piano_roll_starts_and_stops_stream() {
        let backend = SilentBackend { fail: false };
        let mut session = session(&backend);
        assert!(session.handle_key('0'));
        assert!(session.is_playing());
        assert!(session.lines()[0].starts_with("Note:"));

        assert!(session.handle_key('k'));
        assert_eq!(session.controller().note().name().to_string(), "C5");

        assert!(session.handle_key('q'));
        assert!(!session.is_playing());
        assert_eq!(session.lines()[0], "Current Menu: Main Menu");
        assert!(!session.handle_key('q'));
    }

    #[test]
    fn test_kick_actions() {
        let backend = SilentBackend { fail: false };
        let mut session = session(&backend);
        session.handle_key('9');
        assert!(session.controller().kick_enabled());
        assert_eq!(session.controller().note().key(), 13);
        assert!(session.lines().last().unwrap().contains("Kick mode on"));
        session.handle_key('8');
        assert!(!session.controller().kick_enabled());
    }

    #[test]
    fn test_audio_failure_returns_to_menu() {
        let backend = SilentBackend { fail: true };
        let mut session = session(&backend);
        assert!(session.handle_key('0'));
        assert!(!session.is_playing());
        let lines = session.lines();
        assert_eq!(lines[0], "Current Menu: Main Menu");
        assert!(lines.last().unwrap().starts_with("Audio error"));
    }
}
