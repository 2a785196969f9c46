//=========================================================================
// Raw Input Decoder
//=========================================================================
//
// Byte-assembly state machine turning raw console bytes into one logical
// token per call: a submitted line of text, or a single escape sequence
// for a non-printable key.
//
// Flow per read_token() call:
// ```text
//   write prompt ─► acquire raw mode (RAII session)
//                        │
//                        ▼
//      ┌─────────── byte loop ────────────┐
//      │ CR/LF   → echo newline, line out │
//      │ ETX     → Interrupted            │
//      │ EOT/EOF → EndOfInput             │
//      │ BS/DEL  → pop + erase echo       │
//      │ ESC     → escape assembly ───────┼─► sequence out
//      │ other   → UTF-8 decode + echo    │
//      └──────────────────────────────────┘
//                        │
//            session drop restores mode
// ```
//
// The session guard restores the saved terminal mode on every exit path,
// including the interrupt and end-of-input returns.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::{Error, Result};
use crate::platform::{default_console, Console};

use super::InputProvider;

//=== Constants ===========================================================

/// Grace window for escape-sequence follow-up bytes.
///
/// After an ESC byte, follow-up bytes arriving within this window are
/// treated as part of one escape sequence; silence means a bare ESC
/// press. Known tradeoff: two genuine ESC presses delivered within the
/// window (slow links, paste) are folded into one sequence. The POSIX
/// backend additionally rounds this up to poll(2)'s 1 ms resolution.
pub const ESCAPE_GRACE: Duration = Duration::from_micros(100);

/// Maximum escape-sequence length in bytes, including the ESC byte.
///
/// Covers every sequence in the canonical vocabulary plus modifier forms
/// like `ESC [ 1 ; 5 A`.
pub const MAX_ESCAPE_LEN: usize = 6;

//=== RawDecoder ==========================================================

/// Raw-terminal input provider over a [`Console`] backend.
///
/// Each [`read_token`](InputProvider::read_token) call writes the prompt,
/// holds raw mode for the duration of the call, and returns one token:
/// the typed line on Enter, or an escape sequence verbatim. Line state
/// does not carry over between calls.
pub struct RawDecoder<C: Console> {
    console: C,
}

impl<C: Console> RawDecoder<C> {
    /// Wraps a console backend.
    pub fn new(console: C) -> Self {
        Self { console }
    }
}

impl RawDecoder<Box<dyn Console>> {
    /// Builds a decoder over the platform's default console.
    ///
    /// # Errors
    ///
    /// [`Error::RawModeUnavailable`] when the environment has no
    /// interactive terminal.
    pub fn for_terminal() -> Result<Self> {
        Ok(Self::new(default_console()?))
    }
}

impl<C: Console> InputProvider for RawDecoder<C> {
    fn read_token(&mut self, prompt: &str) -> Result<String> {
        self.console.write_bytes(prompt.as_bytes())?;
        self.console.flush()?;

        let mut session = RawModeSession::begin(&mut self.console)?;
        session.read_line_or_sequence()
    }
}

//=== RawModeSession ======================================================

/// Scoped raw-mode acquisition.
///
/// Holds raw mode from construction until drop; drop restore is
/// best-effort and logged, never panicking, so the guard is safe on
/// error-return paths.
struct RawModeSession<'a, C: Console> {
    console: &'a mut C,
    /// Byte handed back by UTF-8 recovery, consumed before the next read.
    replay: Option<u8>,
}

impl<'a, C: Console> RawModeSession<'a, C> {
    fn begin(console: &'a mut C) -> Result<Self> {
        console.acquire_raw_mode()?;
        Ok(Self {
            console,
            replay: None,
        })
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        if let Some(byte) = self.replay.take() {
            return Ok(Some(byte));
        }
        self.console.read_byte()
    }

    //--- Token Assembly ---------------------------------------------------

    fn read_line_or_sequence(&mut self) -> Result<String> {
        let mut line = String::new();

        loop {
            let byte = self.next_byte()?.ok_or(Error::EndOfInput)?;

            match byte {
                b'\r' | b'\n' => {
                    self.echo(b"\r\n")?;
                    return Ok(line);
                }
                0x03 => {
                    debug!("Interrupt received during input");
                    return Err(Error::Interrupted);
                }
                0x04 => return Err(Error::EndOfInput),
                0x08 | 0x7f => {
                    if line.pop().is_some() {
                        self.echo(b"\x08 \x08")?;
                    }
                }
                0x1b => return self.assemble_escape_sequence(),
                lead => {
                    if let Some(ch) = self.read_utf8_char(lead)? {
                        line.push(ch);
                        let mut buf = [0u8; 4];
                        self.echo(ch.encode_utf8(&mut buf).as_bytes())?;
                    }
                }
            }
        }
    }

    /// Collects the bytes following an ESC into one verbatim token.
    ///
    /// Stops on an ASCII-alphabetic byte or `~` (CSI terminators), when no
    /// byte arrives within [`ESCAPE_GRACE`], or at [`MAX_ESCAPE_LEN`]
    /// bytes. A lone ESC with no follow-up yields the one-byte token.
    fn assemble_escape_sequence(&mut self) -> Result<String> {
        let mut sequence = vec![0x1b];

        while sequence.len() < MAX_ESCAPE_LEN {
            let Some(byte) = self.console.read_byte_nonblocking(ESCAPE_GRACE)? else {
                break;
            };
            sequence.push(byte);
            if byte.is_ascii_alphabetic() || byte == b'~' {
                break;
            }
        }

        debug!("Assembled escape sequence of {} bytes", sequence.len());
        Ok(String::from_utf8_lossy(&sequence).into_owned())
    }

    /// Completes one UTF-8 character starting at `lead`.
    ///
    /// Continuation bytes are read blocking (they belong to the same
    /// keystroke). Invalid sequences yield `None` and are dropped rather
    /// than failing the call. A non-continuation byte cut into one ends
    /// the bad sequence and replays as its own keystroke, so a mangled
    /// character never swallows the Enter or Ctrl-C behind it.
    fn read_utf8_char(&mut self, lead: u8) -> Result<Option<char>> {
        let continuation_len = match lead {
            0x00..=0x7f => return Ok(Some(lead as char)),
            0xc0..=0xdf => 1,
            0xe0..=0xef => 2,
            0xf0..=0xf7 => 3,
            // Stray continuation or invalid lead byte.
            _ => return Ok(None),
        };

        let mut bytes = vec![lead];
        for _ in 0..continuation_len {
            let byte = self.next_byte()?.ok_or(Error::EndOfInput)?;
            if !matches!(byte, 0x80..=0xbf) {
                self.replay = Some(byte);
                return Ok(None);
            }
            bytes.push(byte);
        }

        Ok(std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.chars().next()))
    }

    fn echo(&mut self, bytes: &[u8]) -> Result<()> {
        self.console.write_bytes(bytes)?;
        self.console.flush()
    }
}

impl<C: Console> Drop for RawModeSession<'_, C> {
    fn drop(&mut self) {
        if let Err(e) = self.console.release_raw_mode() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
