//=========================================================================
// Update Context
//=========================================================================
//
// What objects may ask of the engine while they are being updated.
//
// Objects never hold a reference back to the application. Instead every
// update and event callback receives a `Context`, which records requests
// (quit, scene transitions, object removal and spawning). The game loop applies them
// at the frame boundary, after drawing, so no object is destroyed or
// moved while the scene stack is being iterated.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::object::Object;
use crate::core::scene::{Scene, SceneTransition, TransitionQueue};

//=== FrameCommands =======================================================

/// Requests accumulated during one frame.
#[derive(Debug, Default)]
pub(crate) struct FrameCommands {
    exit_code: Option<i32>,
    transitions: TransitionQueue,
}

impl FrameCommands {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a quit request. The first code requested wins.
    pub(crate) fn quit(&mut self, code: i32) {
        if self.exit_code.is_none() {
            info!("Quit requested with exit code {}", code);
            self.exit_code = Some(code);
        }
    }

    pub(crate) fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub(crate) fn push_transition(&mut self, transition: SceneTransition) {
        self.transitions.push(transition);
    }

    pub(crate) fn take_transitions(&mut self) -> Vec<SceneTransition> {
        self.transitions.take()
    }
}

//=== Context =============================================================

/// Handle passed to [`Object`](crate::core::object::Object) callbacks.
pub struct Context<'a> {
    scene: &'a str,
    removals: &'a mut Vec<String>,
    spawns: &'a mut Vec<Box<dyn Object>>,
    commands: &'a mut FrameCommands,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        scene: &'a str,
        removals: &'a mut Vec<String>,
        spawns: &'a mut Vec<Box<dyn Object>>,
        commands: &'a mut FrameCommands,
    ) -> Self {
        Self {
            scene,
            removals,
            spawns,
            commands,
        }
    }

    /// Identifier of the scene that owns the object being called.
    pub fn scene_identifier(&self) -> &str {
        self.scene
    }

    //--- Application ------------------------------------------------------

    /// Stops the game loop at the end of this frame with `code`.
    pub fn quit(&mut self, code: i32) {
        self.commands.quit(code);
    }

    /// True once anything has requested a quit this frame.
    pub fn is_quitting(&self) -> bool {
        self.commands.exit_code().is_some()
    }

    //--- Scene Stack ------------------------------------------------------

    /// Pushes `scene` on top of the stack at the end of this frame.
    pub fn push_scene(&mut self, scene: Scene) {
        debug!("Queued push of Scene '{}'", scene.identifier());
        self.commands.push_transition(SceneTransition::Push(scene));
    }

    /// Pops the top scene at the end of this frame.
    pub fn pop_scene(&mut self) {
        self.commands.push_transition(SceneTransition::Pop);
    }

    /// Replaces the top scene with `scene` at the end of this frame.
    pub fn replace_scene(&mut self, scene: Scene) {
        debug!("Queued replacement by Scene '{}'", scene.identifier());
        self.commands.push_transition(SceneTransition::Replace(scene));
    }

    /// Pops every scene at the end of this frame.
    pub fn clear_scenes(&mut self) {
        self.commands.push_transition(SceneTransition::Clear);
    }

    //--- Objects ----------------------------------------------------------

    /// Removes the object `identifier` from the owning scene once the
    /// frame is complete. Unknown identifiers are ignored at that point.
    pub fn remove_object(&mut self, identifier: impl Into<String>) {
        self.removals.push(identifier.into());
    }

    /// Adds `object` to the owning scene once the frame is complete.
    ///
    /// Removals requested in the same frame are applied first, so an
    /// object may be replaced by a new one with the same identifier. A
    /// spawn whose identifier is still taken is dropped with a warning.
    pub fn spawn_object(&mut self, object: Box<dyn Object>) {
        debug!(
            "Queued spawn of object '{}' in Scene '{}'",
            object.identifier(),
            self.scene
        );
        self.spawns.push(object);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
