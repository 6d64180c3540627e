//=========================================================================
// Resource Registry
//=========================================================================
//
// Named, typed store for shared assets (textures, fonts, anything the
// application loads once and reads from many scenes).
//
// Architecture:
//   SceneManager
//     └─ ResourceRegistry
//          └─ resources: HashMap<String, Entry>
//               └─ Entry { type_name, value: Box<dyn Any + Send + Sync> }
//
// An identifier names at most one resource regardless of type. Lookups
// with the wrong type behave exactly like lookups of a missing one.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use kurbo::{Rect, Size};
use log::{debug, error, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::{EngineError, Result};
use crate::core::render::{FontId, TextureId};

//=== Built-in Resources ==================================================

/// A texture the render backend has uploaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    id: TextureId,
    size: Size,
}

impl Texture {
    pub fn new(id: TextureId, size: Size) -> Self {
        Self { id, size }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The whole texture, with the top-left corner at `(0, 0)`.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.size)
    }
}

/// A font the render backend can rasterise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font {
    id: FontId,
}

impl Font {
    pub fn new(id: FontId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> FontId {
        self.id
    }
}

//=== Entry ===============================================================

struct Entry {
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

//=== ResourceRegistry ====================================================

/// Identifier-keyed store of resources of any `'static` type.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: HashMap<String, Entry>,
}

impl ResourceRegistry {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Insertion --------------------------------------------------------

    /// Stores `value` under `identifier`.
    ///
    /// Returns `false` and drops `value` if the identifier is already
    /// taken; the stored resource is left untouched.
    pub fn insert<T>(&mut self, identifier: impl Into<String>, value: T) -> bool
    where
        T: Any + Send + Sync,
    {
        let identifier = identifier.into();
        if self.resources.contains_key(&identifier) {
            warn!("Rejected resource with duplicate identifier '{}'", identifier);
            return false;
        }

        debug!(
            "Registered resource '{}' of type {}",
            identifier,
            std::any::type_name::<T>()
        );
        self.resources.insert(
            identifier,
            Entry {
                type_name: std::any::type_name::<T>(),
                value: Box::new(value),
            },
        );
        true
    }

    /// Runs `loader` and stores what it produces.
    ///
    /// The loader is skipped when `identifier` is taken. A failing loader
    /// is logged and leaves the registry unchanged. Returns whether a
    /// resource was stored.
    pub fn load<T, E, F>(&mut self, identifier: impl Into<String>, loader: F) -> bool
    where
        T: Any + Send + Sync,
        E: fmt::Display,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let identifier = identifier.into();
        if self.resources.contains_key(&identifier) {
            warn!("Resource '{}' is already loaded", identifier);
            return false;
        }

        match loader() {
            Ok(value) => self.insert(identifier, value),
            Err(e) => {
                error!("Failed to load resource with identifier '{}': {}", identifier, e);
                false
            }
        }
    }

    //--- Lookup -----------------------------------------------------------

    /// True if `identifier` holds a resource of type `T`.
    pub fn exists<T: Any>(&self, identifier: &str) -> bool {
        self.try_get::<T>(identifier).is_some()
    }

    /// True if `identifier` holds a resource of any type.
    pub fn contains(&self, identifier: &str) -> bool {
        self.resources.contains_key(identifier)
    }

    /// Typed lookup that treats absence as an error.
    ///
    /// Fails with [`EngineError::ResourceNotLoaded`] when `identifier` is
    /// missing or holds something other than `T`.
    pub fn get<T: Any>(&self, identifier: &str) -> Result<&T> {
        self.try_get::<T>(identifier)
            .ok_or_else(|| EngineError::ResourceNotLoaded {
                identifier: identifier.to_owned(),
            })
    }

    pub fn try_get<T: Any>(&self, identifier: &str) -> Option<&T> {
        self.resources
            .get(identifier)
            .and_then(|entry| entry.value.downcast_ref::<T>())
    }

    /// Identifiers of every resource, in no particular order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    //--- Removal ----------------------------------------------------------

    /// Drops the resource `identifier`. Returns whether it existed.
    pub fn remove(&mut self, identifier: &str) -> bool {
        match self.resources.remove(identifier) {
            Some(entry) => {
                debug!("Removed resource '{}' of type {}", identifier, entry.type_name);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.resources.clear();
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.resources
                    .iter()
                    .map(|(identifier, entry)| (identifier, entry.type_name)),
            )
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
