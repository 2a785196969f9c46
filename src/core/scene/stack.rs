//=========================================================================
// Scene Stack
//=========================================================================
//
// Ordered collection of live scenes. Last element is the top ("current")
// scene, the only one that receives input, updates, and renders.
//
// The stack itself fires no lifecycle hooks; the runtime pairs every
// push/pop with on_enter/on_exit so the hooks can observe the stack in a
// consistent state.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::Scene;

//=== Scene Stack =========================================================

/// LIFO stack of boxed scenes.
pub(crate) struct SceneStack {
    scenes: Vec<Box<dyn Scene>>,
}

impl SceneStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { scenes: Vec::new() }
    }

    /// Appends a scene, making it the current one.
    pub fn push(&mut self, scene: Box<dyn Scene>) {
        debug!("Pushing scene '{}' onto stack (depth {})", scene.name(), self.scenes.len() + 1);
        self.scenes.push(scene);
    }

    /// Removes and returns the current scene, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<Box<dyn Scene>> {
        let scene = self.scenes.pop();
        if let Some(scene) = &scene {
            debug!("Popped scene '{}' from stack (depth {})", scene.name(), self.scenes.len());
        }
        scene
    }

    /// Returns a mutable reference to the current scene.
    pub fn top_mut(&mut self) -> Option<&mut Box<dyn Scene>> {
        self.scenes.last_mut()
    }

    /// Returns a shared reference to the current scene.
    pub fn top(&self) -> Option<&dyn Scene> {
        self.scenes.last().map(|scene| scene.as_ref())
    }

    /// Returns the number of scenes on the stack.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns true if no scenes are on the stack.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
