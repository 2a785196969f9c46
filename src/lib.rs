//=========================================================================
// Proscenium — Library Root
//
// This crate defines the public API surface of Proscenium, a scene-stack
// runtime for terminal applications.
//
// Responsibilities:
// - Expose the application entry points (`App`, `AppBuilder`)
// - Keep OS-specific console handling (`platform`) hidden from end users
// - Provide clean separation between the high-level application facade
//   and lower-level subsystems (scenes, input decoding, timing)
//
// Typical usage:
// ```no_run
// use proscenium::prelude::*;
//
// struct Menu;
//
// impl TextScene for Menu {
//     fn get_display_text(&self) -> String {
//         "press 2 to quit".into()
//     }
//
//     fn process_command(&mut self, ctx: &mut SceneContext<'_>, command: &str) -> Result<()> {
//         if command == "2" {
//             ctx.stop();
//         }
//         Ok(())
//     }
// }
//
// fn main() -> Result<()> {
//     let mut app = AppBuilder::new().build();
//     app.push_scene(Menu);
//     app.run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the runtime subsystems (scenes, input, clock, errors).
// It is exposed publicly for extensibility, but normal application code
// will mostly use the top-level `App` facade and the `prelude`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific console handling (termios raw mode on
// POSIX, the console event stream on Windows) and is kept private; only
// the `Console` capability trait leaks out, for custom backends.
//
// `app` defines the main application entry point and frame loop.
//
mod app;
mod platform;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the main entry points so users can simply
// `use proscenium::{App, AppBuilder};` without having to know the
// internal module structure.
//
pub use app::{App, AppBuilder};
pub use crate::core::error::{Error, Result};
pub use platform::Console;
