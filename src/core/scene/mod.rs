//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle contract and stack-based scene switching.
//
// Architecture:
//   App
//     ├─ stack: SceneStack (Vec<Box<dyn Scene>>)
//     └─ transitions: TransitionQueue
//
// Flow per frame:
//   handle_input() → [drain transitions] → update() → [drain] → render()
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::context::SceneContext;
use crate::core::error::Result;

//=== Module Declarations =================================================

mod stack;
mod text;
mod transition;

//=== Public API ==========================================================

pub use text::TextScene;

pub(crate) use stack::SceneStack;
pub(crate) use transition::{SceneTransition, TransitionQueue};

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and per-frame logic.
///
/// Scenes are owned by the application's scene stack. Only the top scene
/// receives `handle_input`, `update`, and `render` each frame. All
/// interaction with the runtime (I/O, stack mutation, stopping the loop)
/// goes through the [`SceneContext`] passed into every callback.
///
/// # Minimal Implementation
///
/// Every method has a default, so a scene only overrides what it needs:
///
/// ```
/// use proscenium::prelude::*;
/// use std::time::Duration;
///
/// struct Countdown {
///     frames_left: u32,
/// }
///
/// impl Scene for Countdown {
///     fn name(&self) -> &str {
///         "countdown"
///     }
///
///     fn update(&mut self, ctx: &mut SceneContext<'_>, _delta: Duration) {
///         self.frames_left = self.frames_left.saturating_sub(1);
///         if self.frames_left == 0 {
///             ctx.stop();
///         }
///     }
///
///     fn render(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
///         ctx.display(&format!("{} frames left", self.frames_left));
///         Ok(())
///     }
/// }
/// ```
pub trait Scene {
    /// Scene name used in log output.
    fn name(&self) -> &str {
        "scene"
    }

    /// Called when the scene is pushed onto the stack.
    ///
    /// Default implementation does nothing. Override to initialize state.
    fn on_enter(&mut self, _ctx: &mut SceneContext<'_>) {}

    /// Called when the scene is removed from the stack.
    ///
    /// Default implementation does nothing. Override to release state.
    fn on_exit(&mut self, _ctx: &mut SceneContext<'_>) {}

    /// Handles one round of user input.
    ///
    /// Returning `Ok(false)` skips the rest of the frame (`update` and
    /// `render`) without advancing the clock. The default proceeds with
    /// the frame without reading anything.
    fn handle_input(&mut self, _ctx: &mut SceneContext<'_>) -> Result<bool> {
        Ok(true)
    }

    /// Advances scene state by the elapsed wall-clock time.
    fn update(&mut self, _ctx: &mut SceneContext<'_>, _delta: Duration) {}

    /// Draws the scene through the context's output seam.
    fn render(&mut self, _ctx: &mut SceneContext<'_>) -> Result<()> {
        Ok(())
    }
}
