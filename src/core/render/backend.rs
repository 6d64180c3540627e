//=========================================================================
// Render Backends
//=========================================================================
//
// The native drawing layer the renderer submits to.
//
// Texture decoding, font rasterisation and the actual draw calls live
// behind `RenderBackend`. Two implementations ship with the engine:
// `NullBackend` (headless, discards everything) and `RecordingBackend`
// (keeps every call for inspection).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kurbo::Size;
use log::trace;

//=== Internal Dependencies ===============================================

use super::{Color, DrawCommand, FontId};

//=== RenderBackend Trait =================================================

/// Native renderer contract.
///
/// A frame is `clear`, any number of `submit`s in draw order, then
/// `present`. Implementations move to the logic thread, hence `Send`.
pub trait RenderBackend: Send {
    /// Fills the whole target with `color`.
    fn clear(&mut self, color: Color);

    /// Draws one command on top of everything submitted so far.
    fn submit(&mut self, command: DrawCommand);

    /// Flips the finished frame to the screen.
    fn present(&mut self);

    /// Extent of `content` rendered with `font` at `size` points.
    ///
    /// Backends with real font metrics should override this; the default
    /// assumes a monospace face with glyphs 0.6 em wide.
    fn measure_text(&self, content: &str, _font: FontId, size: u32) -> Size {
        estimate_text_extent(content, size)
    }
}

/// Monospace approximation used until a backend measures the text.
pub(crate) fn estimate_text_extent(content: &str, size: u32) -> Size {
    let size = f64::from(size);
    let widest_line = content.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    let line_count = content.lines().count().max(1);
    Size::new(widest_line as f64 * size * 0.6, line_count as f64 * size)
}

//=== NullBackend =========================================================

/// Discards every call. Used when no backend is configured.
#[derive(Debug, Default)]
pub struct NullBackend {
    frames: u64,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderBackend for NullBackend {
    fn clear(&mut self, _color: Color) {}

    fn submit(&mut self, command: DrawCommand) {
        trace!(target: "render", "Discarding {:?}", command);
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

//=== RecordingBackend ====================================================

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Clear(Color),
    Submit(DrawCommand),
    Present,
}

/// Keeps every call it receives.
///
/// Clones share the same log, so a handle kept outside the renderer
/// can inspect what was drawn after the backend has been boxed.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all calls so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }

    /// Submitted commands only, in draw order.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Submit(command) => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of `present` calls so far.
    pub fn presented_frames(&self) -> usize {
        self.lock()
            .iter()
            .filter(|call| matches!(call, RecordedCall::Present))
            .count()
    }

    /// Colors passed to `clear`, one per frame.
    pub fn clear_colors(&self) -> Vec<Color> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Clear(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn clear_log(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RenderBackend for RecordingBackend {
    fn clear(&mut self, color: Color) {
        self.lock().push(RecordedCall::Clear(color));
    }

    fn submit(&mut self, command: DrawCommand) {
        self.lock().push(RecordedCall::Submit(command));
    }

    fn present(&mut self) {
        self.lock().push(RecordedCall::Present);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
