//=========================================================================
// Key Tokens
//=========================================================================
//
// Canonical escape-sequence vocabulary produced by the decoder.
//
// Scenes that care about directional keys compare the raw token against
// these constants before falling back to treating it as typed text. The
// Windows console backend synthesizes exactly these CSI byte strings, so
// the vocabulary is identical on every platform. Terminals in application
// cursor mode emit the SS3 variants instead; the decoder passes those
// through verbatim as well.
//
//=========================================================================

/// Up arrow (CSI).
pub const UP: &str = "\x1b[A";

/// Down arrow (CSI).
pub const DOWN: &str = "\x1b[B";

/// Right arrow (CSI).
pub const RIGHT: &str = "\x1b[C";

/// Left arrow (CSI).
pub const LEFT: &str = "\x1b[D";

/// Bare escape press (one-byte token).
pub const ESC: &str = "\x1b";

/// Up arrow in application cursor mode (SS3).
pub const UP_SS3: &str = "\x1bOA";

/// Down arrow in application cursor mode (SS3).
pub const DOWN_SS3: &str = "\x1bOB";

/// Right arrow in application cursor mode (SS3).
pub const RIGHT_SS3: &str = "\x1bOC";

/// Left arrow in application cursor mode (SS3).
pub const LEFT_SS3: &str = "\x1bOD";

//=========================================================================
// Unit Tests
//=========================================================================
