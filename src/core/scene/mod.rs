//=========================================================================
// Scene System
//=========================================================================
//
// Scenes own a registry of objects and move through a small state
// machine driven by the SceneManager.
//
// Architecture:
//   SceneManager
//     ├─ scenes: Vec<Scene>        (stack, top = active)
//     └─ unloaded: Vec<Scene>      (popped, awaiting clean())
//
//     └─ resources: ResourceRegistry (lent to every hook)
//
//   Scene
//     ├─ registry: ObjectRegistry
//     ├─ pending_removals / pending_spawns (applied in clean())
//     └─ hooks: Box<dyn SceneHooks>
//
// States:
//   load()/unload() toggle `loaded`, pause()/resume() toggle `paused`.
//   Every transition is idempotent and its hook fires only when the
//   flag actually changes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::{Context, FrameCommands};
use crate::core::error::{EngineError, Result};
use crate::core::event::Event;
use crate::core::identifier::next_scene_identifier;
use crate::core::object::{AsAny, Object, ObjectHandle, ObjectRegistry};
use crate::core::render::RenderPass;
use crate::core::resource::ResourceRegistry;

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::SceneManager;
pub use transition_queue::{SceneTransition, TransitionQueue};

//=== SceneHooks Trait ====================================================

/// User behaviour attached to a [`Scene`].
///
/// Every hook defaults to doing nothing. `()` is the hook-less scene.
///
/// ```rust
/// # use e2d::prelude::*;
/// # use kurbo::Rect;
/// struct Level;
///
/// impl SceneHooks for Level {
///     fn on_load(&mut self, scene: &mut SceneContext<'_>) {
///         let tile = Rect::new(0.0, 0.0, 16.0, 16.0);
///         scene
///             .create_object(Sprite::with_identifier("Player", TextureId(0), tile))
///             .expect("fresh scene has no player yet");
///     }
/// }
///
/// let scene = Scene::with_identifier("Level1").with_hooks(Level);
/// # assert_eq!(scene.identifier(), "Level1");
/// ```
pub trait SceneHooks: AsAny + Send {
    /// Runs before the scene's objects receive `on_load`.
    fn on_load(&mut self, _scene: &mut SceneContext<'_>) {}

    /// Runs before the scene's objects receive `on_unload`.
    fn on_unload(&mut self, _scene: &mut SceneContext<'_>) {}

    /// Runs after the scene has been marked paused.
    fn on_pause(&mut self, _scene: &mut SceneContext<'_>) {}

    /// Runs after the scene has been marked running again.
    fn on_resume(&mut self, _scene: &mut SceneContext<'_>) {}

    /// Whether the scene below stays visible underneath this one.
    ///
    /// Overlays (pause menus, HUDs) are drawn on top of the scene beneath
    /// them. Opaque scenes hide everything lower in the stack.
    fn is_overlay(&self) -> bool {
        false
    }
}

impl SceneHooks for () {}

//=== SceneContext ========================================================

/// View of a scene handed to its hooks.
pub struct SceneContext<'a> {
    identifier: &'a str,
    loaded: bool,
    objects: &'a mut ObjectRegistry,
    resources: &'a ResourceRegistry,
}

impl<'a> SceneContext<'a> {
    pub fn identifier(&self) -> &str {
        self.identifier
    }

    /// Resources shared by every scene on the stack.
    pub fn resources(&self) -> &ResourceRegistry {
        self.resources
    }

    pub fn objects(&self) -> &ObjectRegistry {
        self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectRegistry {
        self.objects
    }

    /// Same contract as [`Scene::create_object`].
    pub fn create_object<T: Object>(&mut self, object: T) -> Result<&mut T> {
        create_object_in(self.objects, self.identifier, self.loaded, object)
    }
}

//=== Scene ===============================================================

/// A stackable collection of objects.
///
/// Created unloaded and running. Only the [`SceneManager`] moves a scene
/// through load/pause/resume/unload.
pub struct Scene {
    identifier: String,
    loaded: bool,
    paused: bool,
    registry: ObjectRegistry,
    pending_removals: Vec<String>,
    pending_spawns: Vec<Box<dyn Object>>,
    hooks: Box<dyn SceneHooks>,
}

impl Scene {
    //--- Construction -----------------------------------------------------

    /// Creates a hook-less scene with a generated `Scene<N>` identifier.
    pub fn new() -> Self {
        Self::with_identifier(next_scene_identifier())
    }

    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        debug!("Constructing Scene with identifier '{}'", identifier);
        Self {
            identifier,
            loaded: false,
            paused: false,
            registry: ObjectRegistry::new(),
            pending_removals: Vec::new(),
            pending_spawns: Vec::new(),
            hooks: Box::new(()),
        }
    }

    /// Attaches user behaviour, replacing any previous hooks.
    pub fn with_hooks<H: SceneHooks>(mut self, hooks: H) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_overlay(&self) -> bool {
        self.hooks.is_overlay()
    }

    /// The attached hooks, if they are of type `H`.
    pub fn hooks<H: SceneHooks>(&self) -> Option<&H> {
        (*self.hooks).as_any().downcast_ref::<H>()
    }

    pub fn hooks_mut<H: SceneHooks>(&mut self) -> Option<&mut H> {
        (*self.hooks).as_any_mut().downcast_mut::<H>()
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn objects_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    //--- Objects ----------------------------------------------------------

    /// Registers `object` and returns a typed reference to it.
    ///
    /// Fails with [`EngineError::DuplicateObject`] if the identifier is
    /// taken, leaving the registry unchanged. Objects created in a loaded
    /// scene receive `on_load` immediately.
    pub fn create_object<T: Object>(&mut self, object: T) -> Result<&mut T> {
        create_object_in(&mut self.registry, &self.identifier, self.loaded, object)
    }

    /// Typed lookup that treats absence as an error.
    pub fn object<T: Object>(&self, identifier: &str) -> Result<&T> {
        let object = self.registry.get_object(identifier).ok_or_else(|| {
            EngineError::ObjectNotFound {
                identifier: identifier.to_owned(),
            }
        })?;

        object
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| EngineError::ObjectTypeMismatch {
                identifier: identifier.to_owned(),
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn object_mut<T: Object>(&mut self, identifier: &str) -> Result<&mut T> {
        if !self.registry.contains(identifier) {
            return Err(EngineError::ObjectNotFound {
                identifier: identifier.to_owned(),
            });
        }

        self.registry
            .get_object_as_mut::<T>(identifier)
            .ok_or_else(|| EngineError::ObjectTypeMismatch {
                identifier: identifier.to_owned(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Removes `identifier` immediately. Loaded scenes call `on_unload`
    /// on the removed object.
    pub fn remove_object(&mut self, identifier: &str) -> bool {
        match self.registry.take_object(identifier) {
            Some(mut object) => {
                if self.loaded {
                    object.on_unload();
                }
                true
            }
            None => false,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    pub(crate) fn load(&mut self, resources: &ResourceRegistry) {
        if self.loaded {
            return;
        }

        info!("Loading Scene with identifier '{}'", self.identifier);
        let mut context = SceneContext {
            identifier: &self.identifier,
            loaded: false,
            objects: &mut self.registry,
            resources,
        };
        self.hooks.on_load(&mut context);
        self.registry.for_each_mut(|object| object.on_load());
        self.loaded = true;
    }

    pub(crate) fn unload(&mut self, resources: &ResourceRegistry) {
        if !self.loaded {
            return;
        }

        info!("Unloading Scene with identifier '{}'", self.identifier);
        let mut context = SceneContext {
            identifier: &self.identifier,
            loaded: true,
            objects: &mut self.registry,
            resources,
        };
        self.hooks.on_unload(&mut context);
        self.registry.for_each_mut(|object| object.on_unload());
        self.loaded = false;
    }

    pub(crate) fn pause(&mut self, resources: &ResourceRegistry) {
        if self.paused {
            return;
        }

        self.paused = true;
        info!("Pausing Scene with identifier '{}'", self.identifier);
        let mut context = SceneContext {
            identifier: &self.identifier,
            loaded: self.loaded,
            objects: &mut self.registry,
            resources,
        };
        self.hooks.on_pause(&mut context);
    }

    pub(crate) fn resume(&mut self, resources: &ResourceRegistry) {
        if !self.paused {
            return;
        }

        self.paused = false;
        info!("Resuming Scene with identifier '{}'", self.identifier);
        let mut context = SceneContext {
            identifier: &self.identifier,
            loaded: self.loaded,
            objects: &mut self.registry,
            resources,
        };
        self.hooks.on_resume(&mut context);
    }

    //--- Frame Dispatch ---------------------------------------------------

    /// Focus changes pause or resume the scene even while paused; no
    /// event reaches the objects of a paused scene.
    pub(crate) fn handle_event(
        &mut self,
        event: &Event,
        resources: &ResourceRegistry,
        commands: &mut FrameCommands,
    ) {
        match event {
            Event::LostFocus => self.pause(resources),
            Event::GainedFocus => self.resume(resources),
            _ => {}
        }

        if self.paused {
            return;
        }

        let mut context = Context::new(
            &self.identifier,
            &mut self.pending_removals,
            &mut self.pending_spawns,
            commands,
        );
        self.registry
            .for_each_mut(|object| object.on_event(&mut context, event));
    }

    /// No-op while paused.
    pub(crate) fn fixed_update(&mut self, commands: &mut FrameCommands) {
        if self.paused {
            return;
        }

        let mut context = Context::new(
            &self.identifier,
            &mut self.pending_removals,
            &mut self.pending_spawns,
            commands,
        );
        self.registry
            .for_each_mut(|object| object.fixed_update(&mut context));
    }

    /// No-op while paused.
    pub(crate) fn variable_update(&mut self, delta_time: f64, commands: &mut FrameCommands) {
        if self.paused {
            return;
        }

        let mut context = Context::new(
            &self.identifier,
            &mut self.pending_removals,
            &mut self.pending_spawns,
            commands,
        );
        self.registry
            .for_each_mut(|object| object.variable_update(&mut context, delta_time));
    }

    /// Queues every renderable object into `pass`. Paused scenes draw.
    pub(crate) fn draw<'q>(&'q self, pass: &mut RenderPass<'_, 'q>) {
        for renderable in self.registry.renderables() {
            pass.draw(renderable);
        }
    }

    /// Applies object removals, then spawns, requested during the frame.
    ///
    /// Returns how many objects were removed or added.
    pub(crate) fn clean(&mut self) -> usize {
        let mut removed = 0;
        for identifier in std::mem::take(&mut self.pending_removals) {
            if self.remove_object(&identifier) {
                removed += 1;
            } else {
                warn!(
                    "Scene '{}' could not remove unknown object '{}'",
                    self.identifier, identifier
                );
            }
        }

        let mut spawned = 0;
        for object in std::mem::take(&mut self.pending_spawns) {
            match insert_object_in(&mut self.registry, &self.identifier, self.loaded, object) {
                Ok(_) => spawned += 1,
                Err(e) => warn!("Dropped spawned object: {}", e),
            }
        }

        if removed + spawned > 0 {
            debug!(
                "Cleaned Scene '{}': {} removed, {} spawned",
                self.identifier, removed, spawned
            );
        }
        removed + spawned
    }

    #[cfg(test)]
    pub(crate) fn pending_removals(&self) -> usize {
        self.pending_removals.len()
    }

    #[cfg(test)]
    pub(crate) fn pending_spawns(&self) -> usize {
        self.pending_spawns.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        debug!("Destructing Scene with identifier '{}'", self.identifier);
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("identifier", &self.identifier)
            .field("loaded", &self.loaded)
            .field("paused", &self.paused)
            .field("objects", &self.registry.len())
            .field("overlay", &self.is_overlay())
            .finish()
    }
}

//=== Helpers =============================================================

fn create_object_in<'r, T: Object>(
    registry: &'r mut ObjectRegistry,
    scene: &str,
    loaded: bool,
    object: T,
) -> Result<&'r mut T> {
    let identifier = object.identifier().to_owned();
    let handle = insert_object_in(registry, scene, loaded, Box::new(object))?;

    registry
        .get_as_mut::<T>(handle)
        .ok_or_else(|| EngineError::ObjectTypeMismatch {
            identifier,
            expected: std::any::type_name::<T>(),
        })
}

/// Registers `object`, loading it if the scene is loaded.
fn insert_object_in(
    registry: &mut ObjectRegistry,
    scene: &str,
    loaded: bool,
    object: Box<dyn Object>,
) -> Result<ObjectHandle> {
    let identifier = object.identifier().to_owned();

    let Some(handle) = registry.insert(object) else {
        return Err(EngineError::DuplicateObject {
            scene: scene.to_owned(),
            identifier,
        });
    };

    if loaded {
        if let Some(object) = registry.get_mut(handle) {
            object.on_load();
        }
    }
    Ok(handle)
}

//=========================================================================
// Unit Tests
//=========================================================================
