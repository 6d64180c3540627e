//=========================================================================
// Sprite
//=========================================================================
//
// A textured, transformable object.
//
// The sprite draws `texture_rect` of its texture. Local bounds are the
// size of that rectangle; world placement comes from the transform.
//
//=========================================================================

//=== External Dependencies ===============================================

use kurbo::{Point, Rect};

//=== Internal Dependencies ===============================================

use super::{Transform, Transformable};
use crate::core::context::Context;
use crate::core::identifier::next_object_identifier;
use crate::core::object::Object;
use crate::core::render::{DrawCommand, RenderBackend, Renderable, TextureId};

//=== Sprite ==============================================================

#[derive(Debug, Clone)]
pub struct Sprite {
    identifier: String,
    texture: TextureId,
    texture_rect: Rect,
    transform: Transform,
    render_priority: i32,
}

impl Sprite {
    /// Creates a sprite with a generated identifier.
    pub fn new(texture: TextureId, texture_rect: Rect) -> Self {
        Self::with_identifier(next_object_identifier(), texture, texture_rect)
    }

    pub fn with_identifier(
        identifier: impl Into<String>,
        texture: TextureId,
        texture_rect: Rect,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            texture,
            texture_rect,
            transform: Transform::default(),
            render_priority: 0,
        }
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Swaps the texture. A given `texture_rect` replaces the drawn
    /// sub-rectangle; `None` keeps the current one.
    pub fn set_texture(&mut self, texture: TextureId, texture_rect: Option<Rect>) {
        self.texture = texture;
        if let Some(rect) = texture_rect {
            self.texture_rect = rect;
        }
    }

    /// Sub-rectangle of the texture that is drawn, in texels.
    pub fn texture_rect(&self) -> Rect {
        self.texture_rect
    }

    pub fn set_texture_rect(&mut self, texture_rect: Rect) {
        self.texture_rect = texture_rect;
    }
}

//--- Trait Implementations -----------------------------------------------

impl Object for Sprite {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn fixed_update(&mut self, _context: &mut Context<'_>) {}

    fn variable_update(&mut self, _context: &mut Context<'_>, _delta_time: f64) {}

    fn as_renderable(&self) -> Option<&dyn Renderable> {
        Some(self)
    }

    fn as_renderable_mut(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }
}

impl Renderable for Sprite {
    fn render_priority(&self) -> i32 {
        self.render_priority
    }

    fn set_render_priority(&mut self, priority: i32) {
        self.render_priority = priority;
    }

    fn render(&self, backend: &mut dyn RenderBackend) {
        backend.submit(DrawCommand::Sprite {
            texture: self.texture,
            source: self.texture_rect,
            placement: self.transform.placement(self.texture_rect.size()),
        });
    }
}

impl Transformable for Sprite {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn local_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.texture_rect.size())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
