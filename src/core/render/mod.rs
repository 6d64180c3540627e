//=========================================================================
// Render System
//=========================================================================
//
// Priority-ordered drawing of renderable objects through a pluggable
// backend.
//
// Architecture:
//   Renderer
//     ├─ backend: Box<dyn RenderBackend>
//     └─ begin_pass() → RenderPass
//                         └─ queue: RenderQueue (borrowed renderables)
//
// Flow:
//   Scene::draw() → RenderPass::draw() → RenderQueue::push()
//   RenderPass::finish() → pop lowest priority → Renderable::render()
//                        → RenderBackend::present()
//
//=========================================================================

//=== External Dependencies ===============================================

use kurbo::{Point, Rect};

//=== Module Declarations =================================================

mod backend;
mod queue;
mod renderer;

//=== Public API ==========================================================

pub use backend::{NullBackend, RecordedCall, RecordingBackend, RenderBackend};
pub(crate) use backend::estimate_text_extent;
pub use queue::RenderQueue;
pub use renderer::{RenderPass, Renderer};

//=== Renderable Trait ====================================================

/// Capability of objects that draw themselves.
///
/// Lower priorities draw first and therefore end up underneath higher
/// ones. The priority is read when the object is queued, so changing it
/// takes effect on the next pass.
pub trait Renderable {
    /// Draw-order priority. Defaults to 0 for built-in drawables.
    fn render_priority(&self) -> i32;

    /// Changes the draw-order priority.
    fn set_render_priority(&mut self, priority: i32);

    /// Issues this object's draw commands.
    fn render(&self, backend: &mut dyn RenderBackend);
}

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

//=== Resource Handles ====================================================

/// Backend-owned texture reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Backend-owned font reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

//=== Draw Commands =======================================================

/// Mirroring applied when the backend copies a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Screen-space placement of a textured quad.
///
/// `rotation` is in degrees, clockwise, around `pivot`, which is
/// relative to the top-left corner of `destination`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub destination: Rect,
    pub pivot: Point,
    pub rotation: f64,
    pub flip: Flip,
}

/// A single draw call submitted by a [`Renderable`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Copy `source` of `texture` to `placement`.
    Sprite {
        texture: TextureId,
        source: Rect,
        placement: Placement,
    },

    /// Rasterise `content` with `font` at `size` points.
    Text {
        content: String,
        font: FontId,
        size: u32,
        color: Color,
        placement: Placement,
    },
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_is_black() {
        assert_eq!(Color::default(), Color::BLACK);
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Color::rgb(1, 2, 3).a, 255);
        assert_eq!(Color::TRANSPARENT.a, 0);
    }
}
