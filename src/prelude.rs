//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use e2d::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder, EngineConfig};

// Errors
pub use crate::core::error::{EngineError, Result};

// Objects
pub use crate::core::context::Context;
pub use crate::core::object::{AsAny, Object, ObjectHandle, ObjectRegistry};

// Resources
pub use crate::core::resource::{Font, ResourceRegistry, Texture};

// Scene system
pub use crate::core::scene::{Scene, SceneContext, SceneHooks, SceneManager, SceneTransition};

// Rendering
pub use crate::core::graphics::{Sprite, Text, Transform, Transformable};
pub use crate::core::render::{
    Color, DrawCommand, FontId, NullBackend, RecordingBackend, RenderBackend, RenderQueue,
    Renderable, Renderer, TextureId,
};

// Events and timing
pub use crate::core::event::{Event, EventSource, KeyCode, KeyEvent, Modifiers};
pub use crate::core::game_loop::{GameLoop, LoopSettings, TickControl};
pub use crate::core::timer::Timer;
