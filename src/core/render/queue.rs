//=========================================================================
// Render Queue
//=========================================================================
//
// Min-priority heap of borrowed renderables for a single render pass.
//
// The queue never owns what it holds. Its lifetime parameter ties every
// entry to the registry it was borrowed from, so a queue cannot be read
// after the objects it points to are gone.
//
// Ordering: numerically smallest priority pops first. Equal priorities
// pop in whatever order the heap produces; callers needing a strict
// order must give objects distinct priorities.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cmp::Ordering;
use std::collections::BinaryHeap;

//=== Internal Dependencies ===============================================

use super::Renderable;

//=== Queue Entry =========================================================

struct QueuedRenderable<'a> {
    priority: i32,
    renderable: &'a dyn Renderable,
}

impl PartialEq for QueuedRenderable<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for QueuedRenderable<'_> {}

impl PartialOrd for QueuedRenderable<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedRenderable<'_> {
    // Reversed: BinaryHeap is a max-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
    }
}

//=== RenderQueue =========================================================

/// Priority-ordered, non-owning collection of renderables.
#[derive(Default)]
pub struct RenderQueue<'a> {
    heap: BinaryHeap<QueuedRenderable<'a>>,
}

impl<'a> RenderQueue<'a> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Queues `renderable` at its current priority.
    pub fn push(&mut self, renderable: &'a dyn Renderable) {
        self.heap.push(QueuedRenderable {
            priority: renderable.render_priority(),
            renderable,
        });
    }

    /// Removes and returns the lowest-priority entry.
    pub fn pop(&mut self) -> Option<&'a dyn Renderable> {
        self.heap.pop().map(|entry| entry.renderable)
    }

    /// Priority of the entry `pop` would return next.
    pub fn peek_priority(&self) -> Option<i32> {
        self.heap.peek().map(|entry| entry.priority)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
