//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use proscenium::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application entry points
pub use crate::app::{App, AppBuilder};

// Scene system
pub use crate::core::context::SceneContext;
pub use crate::core::scene::{Scene, TextScene};

// Input and output seams
pub use crate::core::input::{
    keys, InputProvider, OutputSink, RawDecoder, ScreenClear, ScriptedInput,
};

// Error handling
pub use crate::core::error::{Error, Result};

// Platform capability surface
pub use crate::platform::Console;
