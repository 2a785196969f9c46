//! Scene Stack Invariants
//!
//! Property tests that drive random transition sequences against the
//! application and check it against a plain `Vec` model:
//!
//! 1. **Model conformance**: after any push/pop/replace sequence the
//!    stack depth and top scene match the model exactly
//! 2. **Lifecycle pairing**: every `on_enter` is matched by exactly one
//!    `on_exit`, in LIFO order, whether scenes leave by pop, replace, or
//!    the post-run unwind

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use proptest::prelude::*;
use proscenium::prelude::*;

//=== Model Commands ======================================================

#[derive(Debug, Clone, Copy)]
enum StackCommand {
    Push(u8),
    Pop,
    Replace(u8),
}

fn stack_command() -> impl Strategy<Value = StackCommand> {
    prop_oneof![
        any::<u8>().prop_map(StackCommand::Push),
        Just(StackCommand::Pop),
        any::<u8>().prop_map(StackCommand::Replace),
    ]
}

//=== Instrumented Scenes =================================================

type Registry = Rc<RefCell<Vec<u8>>>;

/// Scene that tracks its own lifecycle in a shared registry of active
/// tags, ordered bottom of the stack first.
struct TaggedScene {
    tag: u8,
    name: String,
    active: Registry,
}

fn tagged(tag: u8, active: &Registry) -> TaggedScene {
    TaggedScene {
        tag,
        name: format!("scene-{}", tag),
        active: active.clone(),
    }
}

impl Scene for TaggedScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_enter(&mut self, _ctx: &mut SceneContext<'_>) {
        self.active.borrow_mut().push(self.tag);
    }

    fn on_exit(&mut self, _ctx: &mut SceneContext<'_>) {
        let mut active = self.active.borrow_mut();
        if let Some(pos) = active.iter().rposition(|tag| *tag == self.tag) {
            active.remove(pos);
        }
    }
}

/// Scene that replays shared commands from inside the run loop, one per
/// frame, and stops once the script runs dry.
struct CommandDriven {
    tag: u8,
    name: String,
    active: Registry,
    script: Rc<RefCell<VecDeque<StackCommand>>>,
}

fn driven(tag: u8, active: &Registry, script: &Rc<RefCell<VecDeque<StackCommand>>>) -> CommandDriven {
    CommandDriven {
        tag,
        name: format!("scene-{}", tag),
        active: active.clone(),
        script: script.clone(),
    }
}

impl Scene for CommandDriven {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_enter(&mut self, _ctx: &mut SceneContext<'_>) {
        self.active.borrow_mut().push(self.tag);
    }

    fn on_exit(&mut self, _ctx: &mut SceneContext<'_>) {
        let mut active = self.active.borrow_mut();
        if let Some(pos) = active.iter().rposition(|tag| *tag == self.tag) {
            active.remove(pos);
        }
    }

    fn handle_input(&mut self, ctx: &mut SceneContext<'_>) -> Result<bool> {
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(StackCommand::Push(tag)) => {
                ctx.push_scene(driven(tag, &self.active, &self.script))
            }
            Some(StackCommand::Pop) => ctx.pop_scene(),
            Some(StackCommand::Replace(tag)) => {
                ctx.replace_scene(driven(tag, &self.active, &self.script))
            }
            None => ctx.stop(),
        }
        Ok(true)
    }
}

//=== Properties ==========================================================

proptest! {
    #[test]
    fn stack_mirrors_model_under_random_transitions(
        commands in prop::collection::vec(stack_command(), 0..40),
    ) {
        let active: Registry = Rc::new(RefCell::new(Vec::new()));
        let mut app = AppBuilder::new().build();
        let mut model: Vec<u8> = Vec::new();

        for command in commands {
            match command {
                StackCommand::Push(tag) => {
                    app.push_scene(tagged(tag, &active));
                    model.push(tag);
                }
                StackCommand::Pop => {
                    let popped = app.pop_scene().map(|s| s.name().to_string());
                    let expected = model.pop().map(|tag| format!("scene-{}", tag));
                    prop_assert_eq!(popped, expected);
                }
                StackCommand::Replace(tag) => {
                    app.replace_scene(tagged(tag, &active));
                    model.pop();
                    model.push(tag);
                }
            }

            prop_assert_eq!(app.scene_count(), model.len());
            prop_assert_eq!(
                app.current_scene().map(|s| s.name().to_string()),
                model.last().map(|tag| format!("scene-{}", tag))
            );
            let active_now = active.borrow();
            prop_assert_eq!(active_now.as_slice(), model.as_slice());
        }

        // Draining the stack pairs off every remaining lifecycle.
        while app.pop_scene().is_some() {}
        prop_assert!(active.borrow().is_empty());
    }

    #[test]
    fn run_unwinds_every_scene_it_entered(
        commands in prop::collection::vec(stack_command(), 0..40),
    ) {
        let active: Registry = Rc::new(RefCell::new(Vec::new()));
        let script = Rc::new(RefCell::new(commands.into_iter().collect::<VecDeque<_>>()));
        let mut app = AppBuilder::new().build();
        app.push_scene(driven(0, &active, &script));

        let result = app.run();

        prop_assert!(result.is_ok());
        prop_assert_eq!(app.scene_count(), 0);
        prop_assert!(active.borrow().is_empty());
    }
}
