//=========================================================================
// Core Systems
//
// Internal subsystems of the runtime, layered leaf-first:
//
//   error      crate-wide error taxonomy
//   clock      frame delta measurement and throttling
//   input      input/output/clear seams, raw decoder, key vocabulary
//   scene      Scene contract, stack, transition queue, TextScene
//   context    the runtime surface scenes see during callbacks
//
// The application loop that drives these lives in `crate::app`; the
// OS-facing console backends live in `crate::platform`.
//
//=========================================================================

pub mod clock;
pub mod context;
pub mod error;
pub mod input;
pub mod scene;
