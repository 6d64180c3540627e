//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the scene stack and drives scene lifecycles.
//
// The top of the stack is the active scene: the only one that receives
// events and updates. Scenes below it are paused when they are covered
// and resumed when they become the top again. Popped scenes are
// unloaded at once but destroyed only by `clean()`, so the frame that
// popped them can still finish safely.
//
// The manager also owns the resource registry and lends it to every
// scene hook it fires.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneTransition};
use crate::core::context::FrameCommands;
use crate::core::error::{EngineError, Result};
use crate::core::event::Event;
use crate::core::render::{Color, RenderPass, Renderer};
use crate::core::resource::ResourceRegistry;

//=== Scene Manager =======================================================

/// LIFO stack of scenes plus scenes awaiting destruction.
///
/// # Example
///
/// ```rust
/// # use e2d::prelude::*;
/// let mut manager = SceneManager::new();
/// manager.push_scene(Scene::with_identifier("Menu"));
/// manager.push_scene(Scene::with_identifier("Game"));
///
/// assert_eq!(manager.active_scene().unwrap().identifier(), "Game");
/// assert!(manager.scene("Menu").unwrap().is_paused());
///
/// manager.pop_scene().unwrap();
/// assert!(!manager.active_scene().unwrap().is_paused());
/// ```
#[derive(Debug)]
pub struct SceneManager {
    scenes: Vec<Scene>,
    unloaded: Vec<Scene>,
    resources: ResourceRegistry,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        debug!("Constructing SceneManager");
        Self {
            scenes: Vec::new(),
            unloaded: Vec::new(),
            resources: ResourceRegistry::new(),
        }
    }

    //--- Resources --------------------------------------------------------

    /// Resources shared by every scene, reachable from hooks through
    /// [`SceneContext::resources`](super::SceneContext::resources).
    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceRegistry {
        &mut self.resources
    }

    //--- Queries ----------------------------------------------------------

    /// True when no scene is on the stack.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Number of stacked scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Popped scenes not yet destroyed by [`SceneManager::clean`].
    pub fn pending_cleanup(&self) -> usize {
        self.unloaded.len()
    }

    /// The scene on top of the stack.
    pub fn active_scene(&self) -> Result<&Scene> {
        match self.scenes.last() {
            Some(scene) => Ok(scene),
            None => Err(Self::empty("get the active scene")),
        }
    }

    pub fn active_scene_mut(&mut self) -> Result<&mut Scene> {
        match self.scenes.last_mut() {
            Some(scene) => Ok(scene),
            None => Err(Self::empty("get the active scene")),
        }
    }

    /// Stacked scene with `identifier`, searching from the top.
    pub fn scene(&self, identifier: &str) -> Option<&Scene> {
        self.scenes
            .iter()
            .rev()
            .find(|scene| scene.identifier() == identifier)
    }

    pub fn scene_mut(&mut self, identifier: &str) -> Option<&mut Scene> {
        self.scenes
            .iter_mut()
            .rev()
            .find(|scene| scene.identifier() == identifier)
    }

    /// Identifiers from the bottom of the stack to the top.
    pub fn identifiers(&self) -> Vec<&str> {
        self.scenes.iter().map(Scene::identifier).collect()
    }

    /// The scenes drawn each frame, bottom to top.
    ///
    /// Walks down from the top and stops at the first opaque scene, so a
    /// chain of overlays shows everything down to the scene under it.
    pub fn visible_scenes(&self) -> &[Scene] {
        let start = self
            .scenes
            .iter()
            .rposition(|scene| !scene.is_overlay())
            .unwrap_or(0);
        &self.scenes[start..]
    }

    //--- Stack Operations -------------------------------------------------

    /// Pauses the current top, pushes `scene` and loads it.
    pub fn push_scene(&mut self, scene: Scene) -> &mut Scene {
        if let Some(top) = self.scenes.last_mut() {
            top.pause(&self.resources);
        }

        debug!("Pushing Scene '{}' onto the stack", scene.identifier());
        self.scenes.push(scene);

        let index = self.scenes.len() - 1;
        self.scenes[index].load(&self.resources);
        &mut self.scenes[index]
    }

    /// Pauses and unloads the top scene, then resumes the one below.
    ///
    /// The popped scene is kept until the next [`SceneManager::clean`].
    pub fn pop_scene(&mut self) -> Result<()> {
        if self.scenes.is_empty() {
            return Err(Self::empty("pop a scene"));
        }

        self.retire_top(true);
        Ok(())
    }

    /// Swaps the top scene for `scene` without resuming the scene below
    /// in between. Behaves like a push on an empty stack.
    pub fn replace_scene(&mut self, scene: Scene) -> &mut Scene {
        self.retire_top(false);
        self.push_scene(scene)
    }

    /// Pops every scene.
    pub fn clear_scenes(&mut self) {
        debug!("Clearing {} scenes from the stack", self.scenes.len());
        while self.retire_top(true) {}
    }

    /// Destroys popped scenes and applies deferred object removals and
    /// spawns.
    ///
    /// Returns how many scenes were destroyed.
    pub fn clean(&mut self) -> usize {
        for scene in &mut self.scenes {
            scene.clean();
        }

        let cleaned = self.unloaded.len();
        self.unloaded.clear();
        debug!("Cleaned a total of {} unloaded scenes", cleaned);
        cleaned
    }

    /// Applies queued transitions in FIFO order.
    pub fn apply_transitions<I>(&mut self, transitions: I)
    where
        I: IntoIterator<Item = SceneTransition>,
    {
        for transition in transitions {
            match transition {
                SceneTransition::Push(scene) => {
                    self.push_scene(scene);
                }
                SceneTransition::Pop => {
                    if !self.retire_top(true) {
                        warn!("Ignored queued pop on an empty scene stack");
                    }
                }
                SceneTransition::Replace(scene) => {
                    self.replace_scene(scene);
                }
                SceneTransition::Clear => self.clear_scenes(),
            }
        }
    }

    //--- Frame Dispatch ---------------------------------------------------

    pub(crate) fn handle_event(&mut self, event: &Event, commands: &mut FrameCommands) {
        if let Some(scene) = self.scenes.last_mut() {
            scene.handle_event(event, &self.resources, commands);
        }
    }

    pub(crate) fn fixed_update(&mut self, commands: &mut FrameCommands) {
        if let Some(scene) = self.scenes.last_mut() {
            scene.fixed_update(commands);
        }
    }

    pub(crate) fn variable_update(&mut self, delta_time: f64, commands: &mut FrameCommands) {
        if let Some(scene) = self.scenes.last_mut() {
            scene.variable_update(delta_time, commands);
        }
    }

    /// Draws each visible scene as its own layer.
    pub fn draw<'q>(&'q self, pass: &mut RenderPass<'_, 'q>) {
        for scene in self.visible_scenes() {
            scene.draw(pass);
            pass.flush();
        }
    }

    /// Renders one complete frame of the visible scenes.
    pub fn render(&self, renderer: &mut Renderer, background: Color) {
        let mut pass = renderer.begin_pass(background);
        self.draw(&mut pass);
        pass.finish();
    }

    //--- Internal Helpers -------------------------------------------------

    /// Moves the top scene to the cleanup list. Returns false on an
    /// empty stack.
    fn retire_top(&mut self, resume_below: bool) -> bool {
        let Some(mut scene) = self.scenes.pop() else {
            return false;
        };

        debug!("Popping Scene '{}' from the stack", scene.identifier());
        scene.pause(&self.resources);
        scene.unload(&self.resources);
        self.unloaded.push(scene);

        if resume_below {
            if let Some(top) = self.scenes.last_mut() {
                top.resume(&self.resources);
            }
        }
        true
    }

    fn empty(operation: &'static str) -> EngineError {
        error!("Failed to {} since no scenes are loaded", operation);
        EngineError::EmptySceneStack { operation }
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SceneManager {
    fn drop(&mut self) {
        debug!("Destructing SceneManager and cleaning up all scenes");
        while self.retire_top(true) {}
        self.clean();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
