//=========================================================================
// POSIX Console
//=========================================================================
//
// Terminal backend for Unix-likes: termios raw mode plus poll(2) for the
// escape-sequence grace window.
//
// Bytes are read from an owned /dev/tty handle rather than the process
// stdin handle. Rust's Stdin is internally buffered; buffered read-ahead
// would swallow escape-sequence bytes that the poll-based grace window
// then never sees. The unbuffered file handle keeps poll() and read()
// looking at the same queue. Prompt and echo go to stdout, matching where
// line-buffered input would echo.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::os::fd::AsFd;
use std::time::Duration;

//=== External Dependencies ===============================================

use log::warn;
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::termios::{self, SetArg, Termios};

//=== Internal Dependencies ===============================================

use crate::core::error::{Error, Result};
use crate::platform::Console;

//=== PosixConsole ========================================================

/// Console backend over the controlling terminal of the process.
pub(crate) struct PosixConsole {
    /// Owned read handle on /dev/tty.
    tty: File,

    /// Termios saved by acquire, present while raw mode is held.
    saved: Option<Termios>,
}

impl PosixConsole {
    /// Opens the controlling terminal.
    ///
    /// # Errors
    ///
    /// [`Error::RawModeUnavailable`] when standard input is not an
    /// interactive terminal (redirected from a file or pipe) or /dev/tty
    /// cannot be opened.
    pub fn new() -> Result<Self> {
        if !io::stdin().is_terminal() {
            return Err(Error::RawModeUnavailable(
                "standard input is not an interactive terminal".into(),
            ));
        }

        let tty = File::open("/dev/tty").map_err(|e| {
            Error::RawModeUnavailable(format!("cannot open /dev/tty: {}", e))
        })?;

        Ok(Self { tty, saved: None })
    }
}

impl Console for PosixConsole {
    fn acquire_raw_mode(&mut self) -> Result<()> {
        if self.saved.is_some() {
            return Ok(());
        }

        let original = termios::tcgetattr(&self.tty)
            .map_err(|e| Error::RawModeUnavailable(format!("tcgetattr failed: {}", e)))?;

        let mut raw = original.clone();
        termios::cfmakeraw(&mut raw);
        termios::tcsetattr(&self.tty, SetArg::TCSAFLUSH, &raw)
            .map_err(|e| Error::RawModeUnavailable(format!("tcsetattr failed: {}", e)))?;

        self.saved = Some(original);
        Ok(())
    }

    fn release_raw_mode(&mut self) -> Result<()> {
        if let Some(saved) = self.saved.take() {
            // TCSADRAIN: let pending output finish before the mode flips
            // back, so echoed characters are not garbled.
            termios::tcsetattr(&self.tty, SetArg::TCSADRAIN, &saved)?;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match (&self.tty).read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// poll(2) has millisecond resolution, so sub-millisecond grace
    /// windows round up to one millisecond here.
    fn read_byte_nonblocking(&mut self, timeout: Duration) -> Result<Option<u8>> {
        let millis = timeout.as_millis().clamp(1, u128::from(u16::MAX)) as u16;
        let mut fds = [PollFd::new(self.tty.as_fd(), PollFlags::POLLIN)];

        match poll(&mut fds, PollTimeout::from(millis)) {
            Ok(0) => Ok(None),
            Ok(_) => self.read_byte(),
            Err(Errno::EINTR) => Ok(None),
            Err(e) => Err(e.into()),
        }
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

impl Drop for PosixConsole {
    fn drop(&mut self) {
        // Best-effort restore if a caller leaked an acquire.
        if self.saved.is_some() {
            if let Err(e) = self.release_raw_mode() {
                warn!("Failed to restore terminal attributes: {}", e);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
