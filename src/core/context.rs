//=========================================================================
// Scene Context
//=========================================================================
//
// The runtime surface handed to every scene callback.
//
// Scenes never hold a reference to the App that owns them. Instead each
// callback receives a short-lived SceneContext borrowing the three I/O
// seams, the transition queue, and the running flag. Stack mutations are
// queued and applied after the callback returns; stop() takes effect
// immediately so the loop's checkpoints can observe it.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::error::Result;
use crate::core::input::{InputProvider, OutputSink, ScreenClear};
use crate::core::scene::{Scene, SceneTransition, TransitionQueue};

//=== Io ==================================================================

/// Bundle of the three injectable I/O seams owned by the application.
pub(crate) struct Io {
    pub input: Box<dyn InputProvider>,
    pub output: Box<dyn OutputSink>,
    pub clear: Box<dyn ScreenClear>,
}

impl Io {
    /// Writes one line through the output seam.
    pub fn display(&mut self, message: &str) {
        self.output.write_line(message);
    }
}

//=== SceneContext ========================================================

/// Scene-facing handle to the application runtime.
///
/// Borrowed into every [`Scene`] callback for its duration. Provides:
///
/// - **I/O**: [`read_input`](Self::read_input), [`display`](Self::display),
///   [`clear`](Self::clear), routed through the seams configured on the
///   [`AppBuilder`](crate::AppBuilder).
/// - **Stack control**: [`push_scene`](Self::push_scene),
///   [`pop_scene`](Self::pop_scene),
///   [`replace_scene`](Self::replace_scene), queued and applied after the
///   current callback returns.
/// - **Loop control**: [`stop`](Self::stop), immediate; the loop renders
///   the then-current scene once more and unwinds.
pub struct SceneContext<'a> {
    io: &'a mut Io,
    transitions: &'a mut TransitionQueue,
    running: &'a mut bool,
}

impl<'a> SceneContext<'a> {
    pub(crate) fn new(
        io: &'a mut Io,
        transitions: &'a mut TransitionQueue,
        running: &'a mut bool,
    ) -> Self {
        Self {
            io,
            transitions,
            running,
        }
    }

    //--- I/O --------------------------------------------------------------

    /// Reads one input token using the configured provider.
    ///
    /// Blocks until the user submits a line or presses a decoded key.
    ///
    /// # Errors
    ///
    /// [`Error::Interrupted`](crate::Error::Interrupted) on Ctrl-C,
    /// [`Error::EndOfInput`](crate::Error::EndOfInput) when the source is
    /// exhausted, or an I/O error from the underlying device.
    pub fn read_input(&mut self, prompt: &str) -> Result<String> {
        self.io.input.read_token(prompt)
    }

    /// Writes one line through the output seam.
    pub fn display(&mut self, message: &str) {
        self.io.display(message);
    }

    /// Clears the screen through the configured clear strategy.
    pub fn clear(&mut self) {
        self.io.clear.clear();
    }

    //--- Stack Control ----------------------------------------------------

    /// Queues a push of `scene` onto the stack.
    ///
    /// Applied after the current callback returns; the new scene's
    /// `on_enter` fires at that point.
    pub fn push_scene<T: Scene + 'static>(&mut self, scene: T) {
        self.transitions.push(SceneTransition::Push(Box::new(scene)));
    }

    /// Queues removal of the top scene.
    pub fn pop_scene(&mut self) {
        self.transitions.push(SceneTransition::Pop);
    }

    /// Queues replacement of the top scene with `scene`.
    ///
    /// Replace is pop-then-push: the popped scene's `on_exit` runs, and
    /// any transitions it queues are fully applied, before the new scene
    /// is pushed.
    pub fn replace_scene<T: Scene + 'static>(&mut self, scene: T) {
        self.transitions.push(SceneTransition::Replace(Box::new(scene)));
    }

    //--- Loop Control -----------------------------------------------------

    /// Requests loop shutdown.
    ///
    /// Takes effect immediately: the flag is visible to the loop's next
    /// checkpoint, which renders the current scene once more and exits.
    /// Scenes are not popped here; unwinding happens centrally at the end
    /// of `run()`.
    pub fn stop(&mut self) {
        debug!("Stop requested");
        *self.running = false;
    }

    /// Returns whether the loop is still marked running.
    pub fn is_running(&self) -> bool {
        *self.running
    }
}
