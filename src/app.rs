//=========================================================================
// Application Runtime
//
// Main entry point and loop coordinator for the runtime.
//
// Architecture:
// ```text
//     AppBuilder  ──build()──>  App  ──run()──>  [Frame Loop]
//         │                      │
//         ├─ with_target_fps()   ├─ owns SceneStack + TransitionQueue
//         ├─ with_input()        ├─ owns FrameClock + I/O seams
//         ├─ with_output()       └─ blocks until stop / empty stack
//         ├─ with_clear()
//         ├─ with_clock()
//         └─ with_raw_input()
// ```
//
// Frame order: handle_input → update(delta) → render, with queued scene
// transitions applied after every callback so the loop's re-fetch of the
// top scene observes mid-frame replacements.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::clock::{FrameClock, SystemTimeSource, TimeSource};
use crate::core::context::{Io, SceneContext};
use crate::core::error::{Error, Result};
use crate::core::input::{
    AnsiClear, InputProvider, LineInput, OutputSink, RawDecoder, ScreenClear, StdoutSink,
};
use crate::core::scene::{Scene, SceneStack, SceneTransition, TransitionQueue};

//=== AppBuilder ==========================================================

/// Builder for configuring and constructing an [`App`].
///
/// Provides a fluent API for setting the frame rate and injecting the
/// I/O and clock seams before construction.
///
/// # Default Values
///
/// - **Target FPS**: 0 (uncapped; the loop paces itself on blocking input)
/// - **Input**: line-buffered stdin reads
/// - **Output**: stdout, one line per message
/// - **Clear**: ANSI clear-and-home, blank lines when not a terminal
/// - **Clock**: system wall clock
/// - **Raw input**: off
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// use proscenium::prelude::*;
///
/// struct Menu;
///
/// impl TextScene for Menu {
///     fn get_display_text(&self) -> String {
///         "1) play\n2) quit".into()
///     }
///
///     fn process_command(&mut self, ctx: &mut SceneContext<'_>, command: &str) -> Result<()> {
///         if command == "2" {
///             ctx.stop();
///         }
///         Ok(())
///     }
/// }
///
/// fn main() -> Result<()> {
///     let mut app = AppBuilder::new().build();
///     app.push_scene(Menu);
///     app.run()
/// }
/// ```
///
/// Configured for a paced game with raw arrow-key input:
/// ```no_run
/// # use proscenium::prelude::*;
/// let mut app = AppBuilder::new()
///     .with_target_fps(30.0)
///     .with_raw_input(true)
///     .build();
/// ```
pub struct AppBuilder {
    target_fps: f64,
    input: Option<Box<dyn InputProvider>>,
    output: Option<Box<dyn OutputSink>>,
    clear: Option<Box<dyn ScreenClear>>,
    clock: Option<Box<dyn TimeSource>>,
    use_raw_input: bool,
}

impl AppBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            target_fps: 0.0,
            input: None,
            output: None,
            clear: None,
            clock: None,
            use_raw_input: false,
        }
    }

    /// Sets the target frame rate for the loop.
    ///
    /// After each rendered frame the loop sleeps off the remainder of the
    /// frame budget. `0` leaves the rate uncapped, which suits turn-based
    /// scenes that block on input anyway.
    ///
    /// Default: 0 (uncapped)
    ///
    /// # Panics
    ///
    /// Panics if `fps` is negative.
    pub fn with_target_fps(mut self, fps: f64) -> Self {
        assert!(fps >= 0.0, "target FPS must be non-negative, got {}", fps);
        self.target_fps = fps;
        self
    }

    /// Injects a custom input provider.
    ///
    /// An app built with a custom provider ignores raw-input requests:
    /// [`App::enable_raw_input`] returns `false` and the provider stays.
    pub fn with_input<I: InputProvider + 'static>(mut self, input: I) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Injects a custom output sink.
    pub fn with_output<O: OutputSink + 'static>(mut self, output: O) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Injects a custom screen-clear strategy.
    pub fn with_clear<C: ScreenClear + 'static>(mut self, clear: C) -> Self {
        self.clear = Some(Box::new(clear));
        self
    }

    /// Injects a custom time source for the frame clock.
    ///
    /// Tests drive the loop deterministically with
    /// [`ManualTimeSource`](crate::core::clock::ManualTimeSource).
    pub fn with_clock<T: TimeSource + 'static>(mut self, clock: T) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Requests raw terminal input at build time.
    ///
    /// Same semantics as calling [`App::enable_raw_input`] after build:
    /// when the environment cannot support raw mode the app keeps the
    /// line-buffered default and logs the reason.
    pub fn with_raw_input(mut self, use_raw_input: bool) -> Self {
        self.use_raw_input = use_raw_input;
        self
    }

    /// Builds the application instance.
    ///
    /// Consumes the builder and produces a configured [`App`] with an
    /// empty scene stack. Push at least one scene before calling
    /// [`App::run`].
    pub fn build(self) -> App {
        info!(
            "Building app (target FPS: {}, raw input requested: {})",
            self.target_fps, self.use_raw_input
        );

        let custom_input = self.input.is_some();
        let mut app = App {
            io: Io {
                input: self.input.unwrap_or_else(|| Box::new(LineInput)),
                output: self.output.unwrap_or_else(|| Box::new(StdoutSink)),
                clear: self.clear.unwrap_or_else(|| Box::new(AnsiClear)),
            },
            stack: SceneStack::new(),
            transitions: TransitionQueue::new(),
            clock: FrameClock::new(self.clock.unwrap_or_else(|| Box::new(SystemTimeSource))),
            target_fps: self.target_fps,
            running: false,
            custom_input,
            raw_input_enabled: false,
        };

        if self.use_raw_input && !custom_input {
            app.enable_raw_input();
        }

        app
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== App =================================================================

/// Application runtime driving a stack of scenes.
///
/// Create via [`AppBuilder`], push scenes, then call [`run`](App::run).
/// Each loop iteration asks the top scene to handle input, updates it
/// with the elapsed delta, and renders it; scenes mutate the stack or
/// stop the loop through their [`SceneContext`]. On every exit path all
/// remaining scenes are popped LIFO with `on_exit` fired, so no scene
/// leaks an active lifecycle.
pub struct App {
    io: Io,
    stack: SceneStack,
    transitions: TransitionQueue,
    clock: FrameClock,
    target_fps: f64,
    running: bool,
    custom_input: bool,
    raw_input_enabled: bool,
}

impl App {
    //--- Scene Stack ------------------------------------------------------

    /// Pushes a scene onto the stack and fires its `on_enter`.
    pub fn push_scene<T: Scene + 'static>(&mut self, scene: T) {
        self.push_now(Box::new(scene));
        self.drain_transitions();
    }

    /// Pops the top scene, fires its `on_exit`, and returns it.
    ///
    /// Returns `None` when the stack is empty.
    pub fn pop_scene(&mut self) -> Option<Box<dyn Scene>> {
        let scene = self.pop_now();
        self.drain_transitions();
        scene
    }

    /// Replaces the top scene: pop (if any), then push.
    ///
    /// Transitions queued by the popped scene's `on_exit` are fully
    /// applied before the new scene is pushed.
    pub fn replace_scene<T: Scene + 'static>(&mut self, scene: T) {
        self.pop_now();
        self.drain_transitions();
        self.push_now(Box::new(scene));
        self.drain_transitions();
    }

    /// Returns the current (top) scene, if any.
    pub fn current_scene(&self) -> Option<&dyn Scene> {
        self.stack.top()
    }

    /// Returns the number of scenes on the stack.
    pub fn scene_count(&self) -> usize {
        self.stack.len()
    }

    //--- I/O --------------------------------------------------------------

    /// Writes one line through the configured output sink.
    pub fn display(&mut self, message: &str) {
        self.io.display(message);
    }

    //--- Raw Input --------------------------------------------------------

    /// Switches to the raw-terminal input provider if possible.
    ///
    /// Returns `true` on success. Returns `false`, keeping the current
    /// provider, when the app was built with a custom input provider or
    /// when the environment has no interactive terminal; the reason is
    /// logged.
    pub fn enable_raw_input(&mut self) -> bool {
        if self.custom_input {
            return false;
        }

        match RawDecoder::for_terminal() {
            Ok(decoder) => {
                self.io.input = Box::new(decoder);
                self.raw_input_enabled = true;
                info!("Raw terminal input enabled");
                true
            }
            Err(e) => {
                warn!("Raw input unavailable, keeping line input: {}", e);
                self.disable_raw_input();
                false
            }
        }
    }

    /// Restores the line-buffered default provider.
    ///
    /// No-op when the app was built with a custom input provider.
    pub fn disable_raw_input(&mut self) {
        if self.custom_input {
            return;
        }
        self.io.input = Box::new(LineInput);
        self.raw_input_enabled = false;
    }

    /// Returns whether the raw-terminal provider is active.
    pub fn raw_input_enabled(&self) -> bool {
        self.raw_input_enabled
    }

    //--- Execution --------------------------------------------------------

    /// Runs the main loop until a scene stops it or the stack empties.
    ///
    /// # Lifecycle
    ///
    /// 1. Renders the initial top scene once, so something is on screen
    ///    before the first input is requested
    /// 2. Per iteration: `handle_input` → `update(delta)` → `render`,
    ///    draining queued transitions after each callback and re-fetching
    ///    the top scene between phases
    /// 3. A scene stopping the loop gets the then-current scene rendered
    ///    exactly once more before exit
    /// 4. On return (normal stop, emptied stack, interrupt, or error)
    ///    every remaining scene is popped LIFO with `on_exit` fired
    ///
    /// A user interrupt (Ctrl-C during raw input) prints
    /// `Game interrupted by user.` and counts as a normal exit.
    /// End-of-input from the provider is treated as a stop request.
    ///
    /// # Errors
    ///
    /// [`Error::NoScenes`] when called with an empty stack; otherwise any
    /// I/O error surfaced by a scene's input handling or rendering.
    pub fn run(&mut self) -> Result<()> {
        if self.stack.is_empty() {
            return Err(Error::NoScenes);
        }

        info!("Starting application loop (target FPS: {})", self.target_fps);
        self.running = true;
        self.clock.restart();

        let outcome = self.run_loop();
        self.running = false;

        let outcome = match outcome {
            Err(Error::Interrupted) => {
                self.io.display("\nGame interrupted by user.");
                Ok(())
            }
            other => other,
        };

        self.unwind_stack();
        info!("Application loop finished");
        outcome
    }

    //--- Loop Internals ---------------------------------------------------

    fn run_loop(&mut self) -> Result<()> {
        // A scene must be on screen before its first input is requested.
        self.render_current()?;
        self.drain_transitions();

        while self.running && !self.stack.is_empty() {
            let proceed = match self.dispatch_input() {
                Ok(proceed) => proceed,
                Err(Error::EndOfInput) => {
                    debug!("Input exhausted, treating as stop request");
                    self.running = false;
                    true
                }
                Err(e) => return Err(e),
            };
            self.drain_transitions();

            if !self.running {
                self.render_current()?;
                self.drain_transitions();
                break;
            }

            if !proceed {
                // Skip update/render without advancing the clock; the
                // elapsed time folds into the next frame's delta.
                continue;
            }

            let delta = self.clock.tick();
            if !self.dispatch_update(delta) {
                continue;
            }
            self.drain_transitions();

            if !self.running {
                self.render_current()?;
                self.drain_transitions();
                break;
            }

            self.render_current()?;
            self.drain_transitions();

            if self.target_fps > 0.0 {
                self.clock.throttle(self.target_fps);
            }
        }

        Ok(())
    }

    fn dispatch_input(&mut self) -> Result<bool> {
        let Some(scene) = self.stack.top_mut() else {
            return Ok(true);
        };
        let mut ctx = SceneContext::new(&mut self.io, &mut self.transitions, &mut self.running);
        scene.handle_input(&mut ctx)
    }

    /// Returns `false` when no scene was available to update.
    fn dispatch_update(&mut self, delta: Duration) -> bool {
        let Some(scene) = self.stack.top_mut() else {
            return false;
        };
        let mut ctx = SceneContext::new(&mut self.io, &mut self.transitions, &mut self.running);
        scene.update(&mut ctx, delta);
        true
    }

    fn render_current(&mut self) -> Result<()> {
        let Some(scene) = self.stack.top_mut() else {
            return Ok(());
        };
        let mut ctx = SceneContext::new(&mut self.io, &mut self.transitions, &mut self.running);
        scene.render(&mut ctx)
    }

    //--- Transition Processing --------------------------------------------

    fn drain_transitions(&mut self) {
        while !self.transitions.is_empty() {
            for transition in self.transitions.take() {
                debug!("Applying scene transition {:?}", transition);
                self.apply_transition(transition);
            }
        }
    }

    fn apply_transition(&mut self, transition: SceneTransition) {
        match transition {
            SceneTransition::Push(scene) => self.push_now(scene),
            SceneTransition::Pop => {
                self.pop_now();
            }
            SceneTransition::Replace(scene) => {
                self.pop_now();
                self.drain_transitions();
                self.push_now(scene);
            }
        }
    }

    fn push_now(&mut self, scene: Box<dyn Scene>) {
        self.stack.push(scene);
        let Some(scene) = self.stack.top_mut() else {
            return;
        };
        let mut ctx = SceneContext::new(&mut self.io, &mut self.transitions, &mut self.running);
        scene.on_enter(&mut ctx);
    }

    fn pop_now(&mut self) -> Option<Box<dyn Scene>> {
        let mut scene = self.stack.pop()?;
        let mut ctx = SceneContext::new(&mut self.io, &mut self.transitions, &mut self.running);
        scene.on_exit(&mut ctx);
        Some(scene)
    }

    /// Pops every remaining scene LIFO, firing `on_exit` for each.
    fn unwind_stack(&mut self) {
        self.drain_transitions();
        while self.pop_now().is_some() {
            self.drain_transitions();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
