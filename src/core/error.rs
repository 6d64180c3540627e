//=========================================================================
// Engine Errors
//=========================================================================
//
// Precondition violations raised by the scene, object and resource
// subsystems.
//
// Expected misses (looking up an identifier that is not registered,
// adding a duplicate through `ObjectRegistry::add_object`) are reported
// through `Option`/`bool` instead and never reach this type.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== EngineError =========================================================

/// Fatal, caller-visible failures of core engine operations.
///
/// Every operation returning this error leaves the structure it was
/// called on unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An operation needed an active scene but the stack was empty.
    #[error("Scenes are empty: cannot {operation}")]
    EmptySceneStack { operation: &'static str },

    /// `Scene::create_object` was given an identifier already in use.
    #[error("Object with identifier '{identifier}' already exists in scene '{scene}'")]
    DuplicateObject { scene: String, identifier: String },

    /// A typed lookup named an object that is not registered.
    #[error("No object with identifier '{identifier}' is registered")]
    ObjectNotFound { identifier: String },

    /// A typed lookup found the object but it has a different concrete type.
    #[error("Object '{identifier}' is not a {expected}")]
    ObjectTypeMismatch {
        identifier: String,
        expected: &'static str,
    },

    /// A resource lookup named an identifier that is missing or holds
    /// another type.
    #[error("The resource '{identifier}' has not been loaded")]
    ResourceNotLoaded { identifier: String },
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, EngineError>;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_message_names_operation() {
        let error = EngineError::EmptySceneStack { operation: "pop a scene" };
        assert_eq!(error.to_string(), "Scenes are empty: cannot pop a scene");
    }

    #[test]
    fn duplicate_message_names_scene_and_object() {
        let error = EngineError::DuplicateObject {
            scene: "Menu".into(),
            identifier: "Title".into(),
        };
        let message = error.to_string();
        assert!(message.contains("'Title'"));
        assert!(message.contains("'Menu'"));
    }

    #[test]
    fn resource_message_names_identifier() {
        let error = EngineError::ResourceNotLoaded {
            identifier: "player".into(),
        };
        assert_eq!(error.to_string(), "The resource 'player' has not been loaded");
    }

    #[test]
    fn engine_error_is_error_trait() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }
}
