//=========================================================================
// Windows Console
//=========================================================================
//
// Terminal backend for Windows consoles, built on crossterm's event
// stream. The Windows console delivers whole key events rather than a
// byte stream, so this backend re-encodes each press as the canonical
// POSIX byte sequence and feeds the decoder from a pending-byte queue:
//
//   crossterm KeyEvent ──► enqueue_key() ──► VecDeque<u8> ──► decoder
//
// Arrows become CSI sequences, Enter becomes CR, Ctrl-letters become
// their control bytes. Ctrl-Z, the console's end-of-file chord, is
// translated to EOT so the byte machine never branches on platform.
// Extended keys without a canonical encoding are swallowed.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::VecDeque;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

//=== External Dependencies ===============================================

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::error::{Error, Result};
use crate::core::input::keys;
use crate::platform::Console;

//=== WindowsConsole ======================================================

/// Console backend over the Windows console host.
pub(crate) struct WindowsConsole {
    /// Bytes synthesized from key events, drained one at a time.
    pending: VecDeque<u8>,

    /// Whether raw mode is currently held.
    raw: bool,
}

impl WindowsConsole {
    /// Creates the backend after checking stdin interactivity.
    ///
    /// # Errors
    ///
    /// [`Error::RawModeUnavailable`] when standard input is redirected.
    pub fn new() -> Result<Self> {
        if !io::stdin().is_terminal() {
            return Err(Error::RawModeUnavailable(
                "standard input is not an interactive terminal".into(),
            ));
        }

        Ok(Self {
            pending: VecDeque::new(),
            raw: false,
        })
    }

    /// Re-encodes one key press as canonical bytes on the pending queue.
    fn enqueue_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.pending.push_back(b'\r'),
            KeyCode::Backspace => self.pending.push_back(0x08),
            KeyCode::Tab => self.pending.push_back(b'\t'),
            KeyCode::Esc => self.pending.push_back(0x1b),
            KeyCode::Up => self.pending.extend(keys::UP.as_bytes()),
            KeyCode::Down => self.pending.extend(keys::DOWN.as_bytes()),
            KeyCode::Right => self.pending.extend(keys::RIGHT.as_bytes()),
            KeyCode::Left => self.pending.extend(keys::LEFT.as_bytes()),
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                match c {
                    // Console end-of-file chord, canonicalized to EOT.
                    'z' | 'Z' => self.pending.push_back(0x04),
                    c if c.is_ascii_alphabetic() => {
                        self.pending.push_back((c.to_ascii_uppercase() as u8) & 0x1f);
                    }
                    _ => {}
                }
            }
            KeyCode::Char(c) => {
                let mut buf = [0u8; 4];
                self.pending.extend(c.encode_utf8(&mut buf).as_bytes());
            }
            // Extended keys with no canonical encoding are dropped.
            _ => {}
        }
    }
}

impl Console for WindowsConsole {
    fn acquire_raw_mode(&mut self) -> Result<()> {
        if self.raw {
            return Ok(());
        }

        terminal::enable_raw_mode().map_err(|e| {
            Error::RawModeUnavailable(format!("enable_raw_mode failed: {}", e))
        })?;
        self.raw = true;
        Ok(())
    }

    fn release_raw_mode(&mut self) -> Result<()> {
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        loop {
            if let Some(byte) = self.pending.pop_front() {
                return Ok(Some(byte));
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.enqueue_key(key);
                }
            }
        }
    }

    fn read_byte_nonblocking(&mut self, timeout: Duration) -> Result<Option<u8>> {
        if self.pending.is_empty() && event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.enqueue_key(key);
                }
            }
        }
        Ok(self.pending.pop_front())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        io::stdout().write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }
}

impl Drop for WindowsConsole {
    fn drop(&mut self) {
        if self.raw {
            if let Err(e) = self.release_raw_mode() {
                warn!("Failed to restore console mode: {}", e);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn console() -> WindowsConsole {
        WindowsConsole {
            pending: VecDeque::new(),
            raw: false,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn arrows_synthesize_canonical_sequences() {
        let mut console = console();
        console.enqueue_key(press(KeyCode::Up));
        let bytes: Vec<u8> = console.pending.drain(..).collect();
        assert_eq!(bytes, keys::UP.as_bytes());
    }

    #[test]
    fn enter_synthesizes_carriage_return() {
        let mut console = console();
        console.enqueue_key(press(KeyCode::Enter));
        assert_eq!(console.pending.pop_front(), Some(b'\r'));
    }

    #[test]
    fn control_letters_become_control_bytes() {
        let mut console = console();
        console.enqueue_key(ctrl('c'));
        console.enqueue_key(ctrl('d'));
        assert_eq!(console.pending.pop_front(), Some(0x03));
        assert_eq!(console.pending.pop_front(), Some(0x04));
    }

    #[test]
    fn ctrl_z_canonicalizes_to_eot() {
        let mut console = console();
        console.enqueue_key(ctrl('z'));
        assert_eq!(console.pending.pop_front(), Some(0x04));
    }

    #[test]
    fn unicode_chars_enqueue_utf8_bytes() {
        let mut console = console();
        console.enqueue_key(press(KeyCode::Char('é')));
        let bytes: Vec<u8> = console.pending.drain(..).collect();
        assert_eq!(bytes, "é".as_bytes());
    }

    #[test]
    fn extended_keys_are_swallowed() {
        let mut console = console();
        console.enqueue_key(press(KeyCode::F(5)));
        assert!(console.pending.is_empty());
    }
}
