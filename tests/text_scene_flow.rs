//! Text Scene Flow Tests
//!
//! End-to-end coverage of the prompt/command cycle that text scenes run
//! on, using scripted input and recording seams instead of a terminal:
//!
//! 1. Each read is prompted by the scene that is on top at that moment
//! 2. Commands drive scene transitions and the swap is visible in the
//!    very next render
//! 3. `auto_clear` wipes the screen before each render, and opting out
//!    leaves the screen alone
//! 4. A failing command handler aborts the run with its error, with the
//!    stack still unwound
//! 5. Running out of scripted input ends the run cleanly

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use proscenium::prelude::*;

//=== Recording Seams =====================================================

type Lines = Rc<RefCell<Vec<String>>>;

fn lines() -> Lines {
    Rc::new(RefCell::new(Vec::new()))
}

/// Scripted input that records every prompt it was shown.
struct RecordingInput {
    script: ScriptedInput,
    prompts: Lines,
}

impl RecordingInput {
    fn new<I, S>(commands: I, prompts: &Lines) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: ScriptedInput::new(commands),
            prompts: prompts.clone(),
        }
    }
}

impl InputProvider for RecordingInput {
    fn read_token(&mut self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.script.read_token(prompt)
    }
}

struct SharedSink {
    lines: Lines,
}

impl OutputSink for SharedSink {
    fn write_line(&mut self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}

struct CountingClear {
    clears: Rc<Cell<usize>>,
}

impl ScreenClear for CountingClear {
    fn clear(&mut self) {
        self.clears.set(self.clears.get() + 1);
    }
}

//=== Test Scenes =========================================================

struct MenuScene;

impl TextScene for MenuScene {
    fn name(&self) -> &str {
        "menu"
    }

    fn get_display_text(&self) -> String {
        "1) start\n2) quit".into()
    }

    fn process_command(&mut self, ctx: &mut SceneContext<'_>, command: &str) -> Result<()> {
        match command {
            "start" => ctx.replace_scene(GameScene),
            "quit" => ctx.stop(),
            "boom" => {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "handler failed").into())
            }
            _ => {}
        }
        Ok(())
    }
}

struct GameScene;

impl TextScene for GameScene {
    fn name(&self) -> &str {
        "game"
    }

    fn prompt(&self) -> &str {
        "game> "
    }

    fn get_display_text(&self) -> String {
        "score: 0".into()
    }

    fn process_command(&mut self, ctx: &mut SceneContext<'_>, command: &str) -> Result<()> {
        if command == "quit" {
            ctx.stop();
        }
        Ok(())
    }
}

/// Scene that opts out of clearing between renders.
struct LogScene;

impl TextScene for LogScene {
    fn name(&self) -> &str {
        "log"
    }

    fn auto_clear(&self) -> bool {
        false
    }

    fn get_display_text(&self) -> String {
        "entry".into()
    }

    fn process_command(&mut self, ctx: &mut SceneContext<'_>, command: &str) -> Result<()> {
        if command == "quit" {
            ctx.stop();
        }
        Ok(())
    }
}

fn text_app(commands: &[&str], prompts: &Lines, output: &Lines, clears: &Rc<Cell<usize>>) -> App {
    AppBuilder::new()
        .with_input(RecordingInput::new(commands.iter().copied(), prompts))
        .with_output(SharedSink {
            lines: output.clone(),
        })
        .with_clear(CountingClear {
            clears: clears.clone(),
        })
        .build()
}

//=== Tests ===============================================================

#[test]
fn commands_swap_scenes_and_prompts_follow_the_active_scene() {
    let prompts = lines();
    let output = lines();
    let clears = Rc::new(Cell::new(0));
    let mut app = text_app(&["start", "quit"], &prompts, &output, &clears);
    app.push_scene(MenuScene);

    app.run().unwrap();

    // The first read happens under the menu's default prompt, the second
    // under the game's custom one.
    assert_eq!(prompts.borrow().as_slice(), &["> ", "game> "]);

    // Menu rendered once; the swap is visible in the next render, and the
    // stop checkpoint renders the game once more.
    assert_eq!(
        output.borrow().as_slice(),
        &["1) start\n2) quit", "score: 0", "score: 0"]
    );

    // Both scenes auto-clear, one wipe per render.
    assert_eq!(clears.get(), 3);
    assert_eq!(app.scene_count(), 0);
}

#[test]
fn opting_out_of_auto_clear_keeps_the_screen() {
    let prompts = lines();
    let output = lines();
    let clears = Rc::new(Cell::new(0));
    let mut app = text_app(&["quit"], &prompts, &output, &clears);
    app.push_scene(LogScene);

    app.run().unwrap();

    assert_eq!(clears.get(), 0);
    assert_eq!(output.borrow().as_slice(), &["entry", "entry"]);
}

#[test]
fn failing_command_aborts_the_run_and_still_unwinds() {
    let prompts = lines();
    let output = lines();
    let clears = Rc::new(Cell::new(0));
    let mut app = text_app(&["boom"], &prompts, &output, &clears);
    app.push_scene(MenuScene);

    let result = app.run();

    assert!(matches!(result, Err(Error::Io(_))));
    assert_eq!(app.scene_count(), 0);
}

#[test]
fn exhausting_the_script_ends_the_run_cleanly() {
    let prompts = lines();
    let output = lines();
    let clears = Rc::new(Cell::new(0));
    let mut app = text_app(&["start"], &prompts, &output, &clears);
    app.push_scene(MenuScene);

    app.run().unwrap();

    // The menu command swapped to the game; the next read found the
    // script empty, which counts as a stop request, so the game still got
    // its final render.
    assert_eq!(prompts.borrow().as_slice(), &["> ", "game> "]);
    assert_eq!(
        output.borrow().as_slice(),
        &["1) start\n2) quit", "score: 0", "score: 0"]
    );
    assert_eq!(app.scene_count(), 0);
}
