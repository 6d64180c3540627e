//=========================================================================
// Renderer
//=========================================================================
//
// Owns the render backend and runs one render pass per frame.
//
// A pass clears the target, collects renderables into its queue, drains
// them lowest priority first and finally presents. `flush` drains early,
// which lets each scene of a layered stack draw as its own layer.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{Color, RenderBackend, RenderQueue, Renderable};

//=== Renderer ============================================================

/// Frame renderer over a boxed backend.
pub struct Renderer {
    backend: Box<dyn RenderBackend>,
    frames: u64,
}

impl Renderer {
    pub fn new(backend: Box<dyn RenderBackend>) -> Self {
        debug!("Constructing Renderer");
        Self { backend, frames: 0 }
    }

    /// Starts a frame: clears the target and returns an empty pass.
    pub fn begin_pass<'q>(&mut self, clear: Color) -> RenderPass<'_, 'q> {
        self.backend.clear(clear);
        self.frames += 1;
        RenderPass {
            backend: self.backend.as_mut(),
            queue: RenderQueue::new(),
        }
    }

    /// Draws `renderables` in priority order as one complete frame.
    pub fn render<'q, I>(&mut self, clear: Color, renderables: I)
    where
        I: IntoIterator<Item = &'q dyn Renderable>,
    {
        let mut pass = self.begin_pass(clear);
        for renderable in renderables {
            pass.draw(renderable);
        }
        pass.finish();
    }

    /// Number of passes started so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }
}

//=== RenderPass ==========================================================

/// One frame in flight.
///
/// `'r` borrows the backend, `'q` borrows the renderables. Dropping a
/// pass without [`RenderPass::finish`] skips presenting the frame.
pub struct RenderPass<'r, 'q> {
    backend: &'r mut dyn RenderBackend,
    queue: RenderQueue<'q>,
}

impl<'r, 'q> RenderPass<'r, 'q> {
    /// Queues `renderable` for this pass.
    pub fn draw(&mut self, renderable: &'q dyn Renderable) {
        self.queue.push(renderable);
    }

    /// Renders everything queued so far, lowest priority first.
    pub fn flush(&mut self) {
        while let Some(renderable) = self.queue.pop() {
            renderable.render(&mut *self.backend);
        }
    }

    /// Flushes the queue and presents the frame.
    pub fn finish(mut self) {
        self.flush();
        self.backend.present();
    }

    /// Number of renderables waiting for the next flush.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
