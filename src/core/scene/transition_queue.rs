//=========================================================================
// Transition Queue
//=========================================================================
//
// Scene stack operations requested while a frame is running.
//
// Objects queue transitions through their Context. The game loop hands
// the queue to the SceneManager once updates and drawing are done, so
// the stack never changes underneath a running callback.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Scene;

//=== Scene Transition ====================================================

/// A deferred scene stack operation.
#[derive(Debug)]
pub enum SceneTransition {
    /// Pauses the current top and loads the new scene on top of it.
    Push(Scene),

    /// Unloads the top scene and resumes the one below.
    Pop,

    /// Unloads the top scene and loads the new one in its place. The
    /// scene below is never resumed in between.
    Replace(Scene),

    /// Pops every scene.
    Clear,
}

impl SceneTransition {
    /// Short name used in log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Push(_) => "push",
            Self::Pop => "pop",
            Self::Replace(_) => "replace",
            Self::Clear => "clear",
        }
    }
}

//=== Transition Queue ====================================================

/// FIFO of scene transitions for one frame.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<SceneTransition>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a transition for the end of the frame.
    pub fn push(&mut self, transition: SceneTransition) {
        self.queue.push(transition);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneTransition> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = SceneTransition> + '_ {
        self.queue.drain(..)
    }

    /// Takes all transitions, leaving the queue empty.
    pub fn take(&mut self) -> Vec<SceneTransition> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
