//=========================================================================
// Input System
//
// Pluggable input, output, and screen-clear seams plus the providers
// shipped with the runtime.
//
// Providers:
// - LineInput      blocking line reads from stdin (the default)
// - RawDecoder     raw-terminal token decoding (when enabled + available)
// - ScriptedInput  canned command replay for tests and demos
//
// Notes:
// All three seams are injected through the AppBuilder; scenes reach them
// only through the SceneContext handed into their callbacks.
//
//=========================================================================

//=== Submodules ==========================================================

mod decoder;
pub mod keys;

//=== Standard Library Imports ============================================

use std::collections::VecDeque;
use std::io::{self, IsTerminal, Write};

//=== Internal Dependencies ===============================================

use crate::core::error::{Error, Result};

//=== Public API ==========================================================

pub use decoder::{RawDecoder, ESCAPE_GRACE, MAX_ESCAPE_LEN};

//=== Seams ===============================================================

/// Source of one input token per request.
///
/// A token is either a submitted line of text or a single escape
/// sequence; see [`keys`] for the escape vocabulary.
pub trait InputProvider {
    /// Writes `prompt`, blocks for input, and returns one token.
    ///
    /// # Errors
    ///
    /// [`Error::Interrupted`] on a user interrupt,
    /// [`Error::EndOfInput`] when the source is exhausted, or an I/O
    /// error from the underlying device.
    fn read_token(&mut self, prompt: &str) -> Result<String>;
}

/// Destination for one line of output per call.
pub trait OutputSink {
    /// Writes `message` followed by a line ending.
    fn write_line(&mut self, message: &str);
}

/// Screen-clearing strategy used before renders.
pub trait ScreenClear {
    /// Clears the visible screen.
    fn clear(&mut self);
}

//=== Default Providers ===================================================

/// Blocking line reads from standard input.
///
/// The default input provider. Trailing line endings are stripped from
/// the returned token.
pub struct LineInput;

impl InputProvider for LineInput {
    fn read_token(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Err(Error::EndOfInput);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

/// Line-per-call writer to standard output.
///
/// Write errors are ignored; the sink has no failure channel.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, message: &str) {
        let _ = writeln!(io::stdout(), "{}", message);
    }
}

/// ANSI clear-and-home, with a blank-line fallback for non-terminals.
pub struct AnsiClear;

impl ScreenClear for AnsiClear {
    fn clear(&mut self) {
        let mut stdout = io::stdout();
        if stdout.is_terminal() {
            let _ = stdout.write_all(b"\x1b[2J\x1b[H");
            let _ = stdout.flush();
        } else {
            // Pushes previous content off-screen instead.
            let _ = stdout.write_all(b"\n\n\n\n\n");
        }
    }
}

//=== Scripted Provider ===================================================

/// Replays a fixed list of commands, then signals end of input.
///
/// Deterministic stand-in for interactive input in tests and demos:
///
/// ```
/// use proscenium::prelude::*;
///
/// let mut input = ScriptedInput::new(["look", "north", "quit"]);
/// assert_eq!(input.read_token("> ").unwrap(), "look");
/// ```
pub struct ScriptedInput {
    commands: VecDeque<String>,
}

impl ScriptedInput {
    /// Builds a provider over the given commands, replayed in order.
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns how many commands are left to replay.
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl InputProvider for ScriptedInput {
    fn read_token(&mut self, _prompt: &str) -> Result<String> {
        self.commands.pop_front().ok_or(Error::EndOfInput)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_replays_in_order() {
        let mut input = ScriptedInput::new(["first", "second"]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.read_token("> ").unwrap(), "first");
        assert_eq!(input.read_token("> ").unwrap(), "second");
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn scripted_input_signals_end_when_exhausted() {
        let mut input = ScriptedInput::new(Vec::<String>::new());
        assert!(matches!(input.read_token("> "), Err(Error::EndOfInput)));
    }
}
