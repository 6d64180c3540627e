//=========================================================================
// Object System
//=========================================================================
//
// Live, independently updatable entities and the registry that owns
// them.
//
// Architecture:
//   Scene
//     └─ ObjectRegistry
//          ├─ objects: SlotMap<ObjectHandle, Box<dyn Object>>
//          ├─ by_identifier: HashMap<String, ObjectHandle>
//          ├─ by_type: HashMap<TypeId, HashSet<ObjectHandle>>
//          └─ renderables: HashSet<ObjectHandle>
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::context::Context;
use crate::core::event::Event;
use crate::core::render::Renderable;

//=== Module Declarations =================================================

mod registry;

//=== Public API ==========================================================

pub use registry::{ObjectHandle, ObjectRegistry};

//=== AsAny ===============================================================

/// Downcasting support for trait objects.
///
/// Implemented for every `'static` type. When calling through a
/// `Box<dyn Object>`, dereference first (`(*boxed).as_any()`), otherwise
/// the box itself is what gets viewed as `Any`.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

//=== Object Trait ========================================================

/// A named game entity owned by exactly one [`ObjectRegistry`].
///
/// The identifier must stay constant for the object's whole life; the
/// registry indexes it on insertion.
///
/// # Minimal Implementation
///
/// ```rust
/// # use e2d::prelude::*;
/// struct Spinner {
///     identifier: String,
///     angle: f64,
/// }
///
/// impl Object for Spinner {
///     fn identifier(&self) -> &str {
///         &self.identifier
///     }
///
///     fn fixed_update(&mut self, _context: &mut Context<'_>) {}
///
///     fn variable_update(&mut self, _context: &mut Context<'_>, delta_time: f64) {
///         self.angle += 90.0 * delta_time;
///     }
/// }
/// ```
pub trait Object: AsAny + Send {
    /// Unique identifier within the owning registry.
    fn identifier(&self) -> &str;

    /// Called zero or more times per frame at the fixed simulation rate.
    fn fixed_update(&mut self, context: &mut Context<'_>);

    /// Called once per frame with the elapsed frame time in seconds.
    fn variable_update(&mut self, context: &mut Context<'_>, delta_time: f64);

    /// Called for every event the owning scene receives while unpaused.
    fn on_event(&mut self, _context: &mut Context<'_>, _event: &Event) {}

    /// Called when the owning scene loads, or on creation inside an
    /// already loaded scene.
    fn on_load(&mut self) {
        debug!("Loading Object with identifier '{}'", self.identifier());
    }

    /// Called when the owning scene unloads or the object is removed
    /// from a loaded scene.
    fn on_unload(&mut self) {
        debug!("Unloading Object with identifier '{}'", self.identifier());
    }

    /// The drawable view of this object, if it has one.
    ///
    /// Queried once when the object is registered.
    fn as_renderable(&self) -> Option<&dyn Renderable> {
        None
    }

    fn as_renderable_mut(&mut self) -> Option<&mut dyn Renderable> {
        None
    }
}
