//! Raw-mode terminal session for the interactive player.

use std::io::{self, Stdout, Write, stdout};

use crossterm::{
    ExecutableCommand, QueueableCommand,
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

/// A key press relevant to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Ctrl-C.
    Interrupt,
}

/// Puts the terminal in raw mode on an alternate screen; restores it on drop.
pub struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        out.execute(EnterAlternateScreen)?.execute(Hide)?;
        Ok(Self { out })
    }

    /// Replace the screen contents with `lines`.
    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        for line in lines {
            // Raw mode does not translate `\n`.
            write!(self.out, "{}\r\n", line)?;
        }
        self.out.flush()
    }

    /// Block until the next key press.
    pub fn next_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(Key::Interrupt);
                    }
                    KeyCode::Char(c) => return Ok(Key::Char(c)),
                    KeyCode::Esc => return Ok(Key::Char('q')),
                    _ => {}
                }
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.out.execute(Show);
        let _ = self.out.execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
