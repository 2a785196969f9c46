//=========================================================================
// Platform Subsystem
//
// Narrow capability interface over the OS terminal, selected once at
// startup so the decoder's byte-assembly logic stays platform-agnostic.
//
// Architecture:
// ```text
//   RawDecoder (byte machine, no platform knowledge)
//        │
//        │ Console trait
//        ▼
//   ┌───────────────────────┐   ┌───────────────────────────┐
//   │ PosixConsole          │   │ WindowsConsole            │
//   │  /dev/tty byte reads  │   │  crossterm key events     │
//   │  termios raw mode     │   │  re-encoded as canonical  │
//   │  poll() grace window  │   │  POSIX byte sequences     │
//   └───────────────────────┘   └───────────────────────────┘
// ```
//
// Key Design Decisions:
// - **One byte vocabulary**: the Windows backend translates its native
//   key events into the same CSI byte strings a POSIX terminal delivers,
//   so callers never branch on platform
// - **Scoped raw mode**: acquire/release are explicit and idempotent;
//   the decoder wraps them in an RAII session so the prior terminal mode
//   is restored on every exit path
// - **Degradation over failure**: constructors report RawModeUnavailable
//   for non-interactive input instead of partially applying mode changes
//
//=========================================================================

//=== Submodules ==========================================================

#[cfg(unix)]
mod posix;

#[cfg(windows)]
mod windows;

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::error::Result;

//=== Console =============================================================

/// Capability interface over one interactive terminal.
///
/// Implementations own whatever OS state is needed to switch the terminal
/// in and out of raw mode and to move single bytes. The decoder drives
/// this interface and never touches the OS directly.
pub trait Console {
    /// Switches the terminal into raw (unbuffered, no-echo) mode.
    ///
    /// Saves the prior mode for [`release_raw_mode`](Self::release_raw_mode).
    /// Calling it while raw mode is already held is a no-op. Must not
    /// partially apply mode changes on failure.
    fn acquire_raw_mode(&mut self) -> Result<()>;

    /// Restores the terminal mode saved by the last acquire.
    ///
    /// A no-op when raw mode is not currently held.
    fn release_raw_mode(&mut self) -> Result<()>;

    /// Blocking read of one byte.
    ///
    /// Returns `Ok(None)` when the device reports end of input.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Reads one byte if it arrives within `timeout`.
    ///
    /// Returns `Ok(None)` on timeout or end of input. Used for the
    /// escape-sequence grace window.
    fn read_byte_nonblocking(&mut self, timeout: Duration) -> Result<Option<u8>>;

    /// Writes bytes to the paired output stream (prompt, echo).
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flushes the paired output stream.
    fn flush(&mut self) -> Result<()>;
}

//--- Forwarding ----------------------------------------------------------

impl<C: Console + ?Sized> Console for Box<C> {
    fn acquire_raw_mode(&mut self) -> Result<()> {
        (**self).acquire_raw_mode()
    }

    fn release_raw_mode(&mut self) -> Result<()> {
        (**self).release_raw_mode()
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }

    fn read_byte_nonblocking(&mut self, timeout: Duration) -> Result<Option<u8>> {
        (**self).read_byte_nonblocking(timeout)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_bytes(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

//=== Selection ===========================================================

/// Constructs the console backend for the current platform.
///
/// # Errors
///
/// [`Error::RawModeUnavailable`](crate::Error::RawModeUnavailable) when
/// standard input is not an interactive terminal or the platform has no
/// raw terminal backend.
#[allow(unreachable_code)]
pub(crate) fn default_console() -> Result<Box<dyn Console>> {
    #[cfg(unix)]
    return Ok(Box::new(posix::PosixConsole::new()?));

    #[cfg(windows)]
    return Ok(Box::new(windows::WindowsConsole::new()?));

    Err(crate::core::error::Error::RawModeUnavailable(
        "no raw terminal backend for this platform".into(),
    ))
}
