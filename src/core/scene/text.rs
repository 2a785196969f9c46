//=========================================================================
// Text Scene
//=========================================================================
//
// Scene specialization for turn-based, line-oriented content.
//
// A TextScene describes WHAT to show and HOW to react to a command; the
// blanket Scene impl below supplies the input/render plumbing: prompt for
// one token, forward it to process_command, clear-and-display on render.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::context::SceneContext;
use crate::core::error::Result;

use super::Scene;

//=== TextScene Trait =====================================================

/// Line-oriented scene contract for text adventures and menus.
///
/// Implementors provide the display text and the command reaction; the
/// derived [`Scene`] behavior requests one input token per frame using
/// [`prompt`](TextScene::prompt) and always proceeds with the frame.
///
/// # Example
///
/// ```
/// use proscenium::prelude::*;
///
/// struct Lobby {
///     visits: u32,
/// }
///
/// impl TextScene for Lobby {
///     fn name(&self) -> &str {
///         "lobby"
///     }
///
///     fn get_display_text(&self) -> String {
///         format!("You are in the lobby. Visits so far: {}", self.visits)
///     }
///
///     fn process_command(&mut self, ctx: &mut SceneContext<'_>, command: &str) -> Result<()> {
///         match command {
///             "enter" => self.visits += 1,
///             "quit" => ctx.stop(),
///             other => ctx.display(&format!("Unknown command: {}", other)),
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait TextScene {
    /// Scene name used in log output.
    fn name(&self) -> &str {
        "scene"
    }

    /// Prompt written before each input request.
    fn prompt(&self) -> &str {
        "> "
    }

    /// Whether the screen is cleared before each render.
    fn auto_clear(&self) -> bool {
        true
    }

    /// Returns the textual representation of the current scene state.
    fn get_display_text(&self) -> String;

    /// Reacts to one user-entered command.
    fn process_command(&mut self, ctx: &mut SceneContext<'_>, command: &str) -> Result<()>;

    /// Called when the scene is pushed onto the stack.
    fn on_enter(&mut self, _ctx: &mut SceneContext<'_>) {}

    /// Called when the scene is removed from the stack.
    fn on_exit(&mut self, _ctx: &mut SceneContext<'_>) {}

    /// Advances scene state by the elapsed wall-clock time.
    fn update(&mut self, _ctx: &mut SceneContext<'_>, _delta: Duration) {}
}

//=== Derived Scene Behavior ==============================================

impl<T: TextScene> Scene for T {
    fn name(&self) -> &str {
        TextScene::name(self)
    }

    fn on_enter(&mut self, ctx: &mut SceneContext<'_>) {
        TextScene::on_enter(self, ctx);
    }

    fn on_exit(&mut self, ctx: &mut SceneContext<'_>) {
        TextScene::on_exit(self, ctx);
    }

    fn handle_input(&mut self, ctx: &mut SceneContext<'_>) -> Result<bool> {
        let command = ctx.read_input(self.prompt())?;
        self.process_command(ctx, &command)?;
        Ok(true)
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, delta: Duration) {
        TextScene::update(self, ctx, delta);
    }

    fn render(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        if self.auto_clear() {
            ctx.clear();
        }
        ctx.display(&self.get_display_text());
        Ok(())
    }
}
