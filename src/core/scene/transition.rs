//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue for scene stack mutations requested from inside scene callbacks.
//
// A scene cannot mutate the stack that owns it while its own callback is
// running, so `SceneContext` queues the request here. The runtime drains
// the queue after every callback and at each loop checkpoint, which is
// what makes the loop's re-fetch of the current scene observe the change.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::Scene;

//=== Scene Transition ====================================================

/// A single queued scene stack operation.
///
/// `Push` and `Replace` carry the boxed scene to install; `Pop` removes the
/// current top. Stopping the loop is not a transition: it flips the running
/// flag immediately instead of waiting for a drain.
pub enum SceneTransition {
    /// Adds a new scene to the top of the stack.
    Push(Box<dyn Scene>),

    /// Removes the top scene from the stack.
    Pop,

    /// Pops the top scene (if any), then pushes the new scene.
    Replace(Box<dyn Scene>),
}

impl fmt::Debug for SceneTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(scene) => write!(f, "Push({})", scene.name()),
            Self::Pop => write!(f, "Pop"),
            Self::Replace(scene) => write!(f, "Replace({})", scene.name()),
        }
    }
}

//=== Transition Queue ====================================================

/// FIFO queue of pending scene transitions.
pub struct TransitionQueue {
    queue: Vec<SceneTransition>,
}

impl TransitionQueue {
    /// Creates a new empty transition queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a transition to be applied at the next drain point.
    pub fn push(&mut self, transition: SceneTransition) {
        self.queue.push(transition);
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Takes all transitions from the queue, leaving it empty.
    ///
    /// Uses `mem::take` internally, so draining is a pointer swap. The
    /// runtime applies the taken transitions in queue order; anything a
    /// lifecycle hook queues while they are applied lands in the fresh
    /// queue and is picked up by the next take.
    pub fn take(&mut self) -> Vec<SceneTransition> {
        std::mem::take(&mut self.queue)
    }
}

impl Default for TransitionQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Placeholder(&'static str);

    impl Scene for Placeholder {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn new_queue_is_empty() {
        let queue = TransitionQueue::new();
        assert!(queue.is_empty());
    }

    #[test]
    fn take_preserves_queue_order() {
        let mut queue = TransitionQueue::new();
        queue.push(SceneTransition::Push(Box::new(Placeholder("first"))));
        queue.push(SceneTransition::Pop);
        queue.push(SceneTransition::Replace(Box::new(Placeholder("second"))));
        assert!(!queue.is_empty());

        let taken = queue.take();
        assert!(queue.is_empty());
        assert_eq!(taken.len(), 3);
        assert_eq!(format!("{:?}", taken[0]), "Push(first)");
        assert_eq!(format!("{:?}", taken[1]), "Pop");
        assert_eq!(format!("{:?}", taken[2]), "Replace(second)");
    }

    #[test]
    fn take_on_empty_queue_yields_nothing() {
        let mut queue = TransitionQueue::default();
        assert!(queue.take().is_empty());
    }
}
