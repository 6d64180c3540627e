//=========================================================================
// Text
//=========================================================================
//
// A string drawn with a backend font.
//
// The extent used for bounds starts as a monospace estimate and is
// replaced by real metrics once `measure` has been called against a
// backend.
//
//=========================================================================

//=== External Dependencies ===============================================

use kurbo::{Point, Rect, Size};

//=== Internal Dependencies ===============================================

use super::{Transform, Transformable};
use crate::core::context::Context;
use crate::core::identifier::next_object_identifier;
use crate::core::object::Object;
use crate::core::render::{
    estimate_text_extent, Color, DrawCommand, FontId, RenderBackend, Renderable,
};

//=== Text ================================================================

/// Default point size for new text.
pub const DEFAULT_FONT_SIZE: u32 = 16;

#[derive(Debug, Clone)]
pub struct Text {
    identifier: String,
    content: String,
    font: FontId,
    font_size: u32,
    color: Color,
    extent: Size,
    transform: Transform,
    render_priority: i32,
}

impl Text {
    /// Creates white text at [`DEFAULT_FONT_SIZE`] with a generated identifier.
    pub fn new(font: FontId, content: impl Into<String>) -> Self {
        Self::with_identifier(next_object_identifier(), font, content)
    }

    pub fn with_identifier(
        identifier: impl Into<String>,
        font: FontId,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let extent = estimate_text_extent(&content, DEFAULT_FONT_SIZE);
        Self {
            identifier: identifier.into(),
            content,
            font,
            font_size: DEFAULT_FONT_SIZE,
            color: Color::WHITE,
            extent,
            transform: Transform::default(),
            render_priority: 0,
        }
    }

    //--- Content ----------------------------------------------------------

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.extent = estimate_text_extent(&self.content, self.font_size);
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    pub fn set_font(&mut self, font: FontId) {
        self.font = font;
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size;
        self.extent = estimate_text_extent(&self.content, size);
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    //--- Metrics ----------------------------------------------------------

    /// Current extent in pixels at scale 1.
    pub fn extent(&self) -> Size {
        self.extent
    }

    /// Replaces the estimated extent with the backend's measurement.
    pub fn measure(&mut self, backend: &dyn RenderBackend) {
        self.extent = backend.measure_text(&self.content, self.font, self.font_size);
    }
}

//--- Trait Implementations -----------------------------------------------

impl Object for Text {
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

impl Renderable for Text {
    fn render_priority(&self) -> i32 {
        self.render_priority
    }

    fn set_render_priority(&mut self, priority: i32) {
        self.render_priority = priority;
    }

    fn render(&self, backend: &mut dyn RenderBackend) {
        if self.content.is_empty() {
            return;
        }

        backend.submit(DrawCommand::Text {
            content: self.content.clone(),
            font: self.font,
            size: self.font_size,
            color: self.color,
            placement: self.transform.placement(self.extent),
        });
    }
}

impl Transformable for Text {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn local_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.extent)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::RecordingBackend;

    struct FixedMetrics;

    impl RenderBackend for FixedMetrics {
        fn clear(&mut self, _color: Color) {}
        fn submit(&mut self, _command: DrawCommand) {}
        fn present(&mut self) {}

        fn measure_text(&self, _content: &str, _font: FontId, _size: u32) -> Size {
            Size::new(120.0, 30.0)
        }
    }

    #[test]
    fn defaults_to_size_sixteen() {
        let text = Text::new(FontId(0), "Score");
        assert_eq!(text.font_size(), DEFAULT_FONT_SIZE);
        assert_eq!(text.font_size(), 16);
        assert_eq!(text.render_priority(), 0);
        assert_eq!(text.color(), Color::WHITE);
    }

    #[test]
    fn measure_replaces_estimate() {
        let mut text = Text::with_identifier("Score", FontId(0), "1000");
        text.measure(&FixedMetrics);

        assert_eq!(text.extent(), Size::new(120.0, 30.0));
        assert_eq!(text.local_bounds(), Rect::new(0.0, 0.0, 120.0, 30.0));
    }

    #[test]
    fn changing_size_updates_estimate() {
        let mut text = Text::with_identifier("Score", FontId(0), "ab");
        let before = text.extent();
        text.set_font_size(32);

        assert_eq!(text.extent().height, 32.0);
        assert!(text.extent().width > before.width);
    }

    #[test]
    fn render_submits_text_command() {
        let mut backend = RecordingBackend::new();
        let mut text = Text::with_identifier("Score", FontId(3), "42");
        text.set_color(Color::RED);

        text.render(&mut backend);

        match backend.commands().as_slice() {
            [DrawCommand::Text { content, font, size, color, .. }] => {
                assert_eq!(content, "42");
                assert_eq!(*font, FontId(3));
                assert_eq!(*size, 16);
                assert_eq!(*color, Color::RED);
            }
            other => panic!("Expected one text command, got {:?}", other),
        }
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut backend = RecordingBackend::new();
        let mut text = Text::with_identifier("Score", FontId(0), "x");
        text.set_content("");

        text.render(&mut backend);

        assert!(backend.commands().is_empty());
    }
}
