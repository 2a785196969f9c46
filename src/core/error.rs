//=========================================================================
// Error Types
//=========================================================================
//
// Single error taxonomy for the runtime and the input subsystem.
//
// The variants map onto the failure classes the loop has to distinguish:
//   - NoScenes            fatal misuse, surfaced to the run() caller
//   - RawModeUnavailable  degraded environment, callers fall back
//   - Interrupted         user abort, unwinds the loop cleanly
//   - EndOfInput          input source exhausted, treated as a stop request
//   - Io                  underlying device failure
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Error ===============================================================

/// Errors produced by the application runtime and the input decoder.
#[derive(Debug, Error)]
pub enum Error {
    /// `run()` was called before any scene was pushed.
    #[error("no scenes have been pushed onto the app")]
    NoScenes,

    /// Raw terminal input cannot be provided in this environment.
    ///
    /// Carries a human-readable reason (non-interactive stdin, missing
    /// controlling terminal, termios failure). Non-fatal: callers keep the
    /// line-buffered provider.
    #[error("raw input is unavailable: {0}")]
    RawModeUnavailable(String),

    /// The user pressed the interrupt key (Ctrl-C) during input.
    #[error("interrupted by user")]
    Interrupted,

    /// The input source has no more data (Ctrl-D, script exhausted, EOF).
    #[error("end of input")]
    EndOfInput,

    /// An underlying device read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

//--- Platform Conversions ------------------------------------------------

#[cfg(unix)]
impl From<nix::errno::Errno> for Error {
    fn from(err: nix::errno::Errno) -> Self {
        Error::Io(std::io::Error::from_raw_os_error(err as i32))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(
            Error::NoScenes.to_string(),
            "no scenes have been pushed onto the app"
        );
        assert_eq!(Error::Interrupted.to_string(), "interrupted by user");
        assert_eq!(Error::EndOfInput.to_string(), "end of input");
        assert_eq!(
            Error::RawModeUnavailable("not a tty".into()).to_string(),
            "raw input is unavailable: not a tty"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
