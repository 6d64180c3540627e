//=========================================================================
// Object Registry
//=========================================================================
//
// Exclusive owner of a scene's objects, keyed by identifier.
//
// Objects live in a slot map and are addressed either by identifier or
// by a stable `ObjectHandle`. Two side indices are maintained on every
// insert and removal:
// - concrete type → handles, answering `all_objects_of_type`
// - renderable capability → handles, answering `renderables`
//
// Iteration order is the slot map's and carries no meaning.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use slotmap::{new_key_type, SlotMap};

//=== Internal Dependencies ===============================================

use super::Object;
use crate::core::render::Renderable;

//=== ObjectHandle ========================================================

new_key_type! {
    /// Stable reference to a registered object.
    ///
    /// Handles of removed objects never resolve again, even if the slot
    /// is reused.
    pub struct ObjectHandle;
}

//=== Entry ===============================================================

struct Entry {
    identifier: String,
    type_id: TypeId,
    object: Box<dyn Object>,
}

//=== ObjectRegistry ======================================================

/// Identifier-keyed store of boxed objects with typed queries.
#[derive(Default)]
pub struct ObjectRegistry {
    objects: SlotMap<ObjectHandle, Entry>,
    by_identifier: HashMap<String, ObjectHandle>,
    by_type: HashMap<TypeId, HashSet<ObjectHandle>>,
    renderables: HashSet<ObjectHandle>,
}

impl ObjectRegistry {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Insertion --------------------------------------------------------

    /// Takes ownership of `object`.
    ///
    /// Returns `false` and drops the object if its identifier is already
    /// registered; the existing object is left untouched.
    pub fn add_object(&mut self, object: Box<dyn Object>) -> bool {
        self.insert(object).is_some()
    }

    /// Like [`ObjectRegistry::add_object`], returning the new handle.
    pub fn insert(&mut self, object: Box<dyn Object>) -> Option<ObjectHandle> {
        let identifier = object.identifier().to_owned();
        if self.by_identifier.contains_key(&identifier) {
            warn!("Rejected object with duplicate identifier '{}'", identifier);
            return None;
        }

        let type_id = (*object).as_any().type_id();
        let renderable = object.as_renderable().is_some();

        let handle = self.objects.insert(Entry {
            identifier: identifier.clone(),
            type_id,
            object,
        });

        self.by_identifier.insert(identifier, handle);
        self.by_type.entry(type_id).or_default().insert(handle);
        if renderable {
            self.renderables.insert(handle);
        }

        Some(handle)
    }

    //--- Lookup -----------------------------------------------------------

    pub fn get_object(&self, identifier: &str) -> Option<&dyn Object> {
        self.handle_of(identifier).and_then(|handle| self.get(handle))
    }

    pub fn get_object_mut(&mut self, identifier: &str) -> Option<&mut dyn Object> {
        let handle = self.handle_of(identifier)?;
        self.get_mut(handle)
    }

    /// Typed lookup; `None` when missing or of another type.
    pub fn get_object_as<T: Object>(&self, identifier: &str) -> Option<&T> {
        self.get_object(identifier)
            .and_then(|object| object.as_any().downcast_ref::<T>())
    }

    pub fn get_object_as_mut<T: Object>(&mut self, identifier: &str) -> Option<&mut T> {
        let handle = self.handle_of(identifier)?;
        self.get_as_mut(handle)
    }

    pub fn handle_of(&self, identifier: &str) -> Option<ObjectHandle> {
        self.by_identifier.get(identifier).copied()
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&dyn Object> {
        self.objects.get(handle).map(|entry| &*entry.object)
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut dyn Object> {
        match self.objects.get_mut(handle) {
            Some(entry) => Some(&mut *entry.object),
            None => None,
        }
    }

    pub fn get_as_mut<T: Object>(&mut self, handle: ObjectHandle) -> Option<&mut T> {
        self.objects
            .get_mut(handle)
            .and_then(|entry| (*entry.object).as_any_mut().downcast_mut::<T>())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.by_identifier.contains_key(identifier)
    }

    //--- Removal ----------------------------------------------------------

    /// Destroys the object `identifier`. Returns whether it existed.
    pub fn remove_object(&mut self, identifier: &str) -> bool {
        self.take_object(identifier).is_some()
    }

    /// Unregisters the object `identifier` and hands it back.
    pub fn take_object(&mut self, identifier: &str) -> Option<Box<dyn Object>> {
        let handle = self.by_identifier.remove(identifier)?;
        let entry = self.objects.remove(handle)?;

        if let Some(handles) = self.by_type.get_mut(&entry.type_id) {
            handles.remove(&handle);
            if handles.is_empty() {
                self.by_type.remove(&entry.type_id);
            }
        }
        self.renderables.remove(&handle);

        debug!("Removed object '{}' from registry", entry.identifier);
        Some(entry.object)
    }

    /// Destroys every object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.by_identifier.clear();
        self.by_type.clear();
        self.renderables.clear();
    }

    //--- Queries ----------------------------------------------------------

    /// Snapshot of every object, in no particular order.
    pub fn all_objects(&self) -> Vec<&dyn Object> {
        self.objects.values().map(|entry| &*entry.object).collect()
    }

    /// Every object whose concrete type is exactly `T`.
    pub fn all_objects_of_type<T: Object>(&self) -> Vec<&T> {
        let Some(handles) = self.by_type.get(&TypeId::of::<T>()) else {
            return Vec::new();
        };

        handles
            .iter()
            .filter_map(|handle| self.objects.get(*handle))
            .filter_map(|entry| (*entry.object).as_any().downcast_ref::<T>())
            .collect()
    }

    pub fn all_objects_of_type_mut<T: Object>(&mut self) -> Vec<&mut T> {
        let Some(handles) = self.by_type.get(&TypeId::of::<T>()) else {
            return Vec::new();
        };

        // SlotMap lends one `&mut` per lookup, so the handles filter a
        // single mutable walk of the arena.
        self.objects
            .iter_mut()
            .filter(|(handle, _)| handles.contains(handle))
            .filter_map(|(_, entry)| (*entry.object).as_any_mut().downcast_mut::<T>())
            .collect()
    }

    /// Number of objects whose concrete type is exactly `T`.
    pub fn count_of_type<T: Object>(&self) -> usize {
        self.by_type
            .get(&TypeId::of::<T>())
            .map_or(0, HashSet::len)
    }

    /// Every object exposing a [`Renderable`] view.
    pub fn renderables(&self) -> Vec<&dyn Renderable> {
        self.renderables
            .iter()
            .filter_map(|handle| self.objects.get(*handle))
            .filter_map(|entry| entry.object.as_renderable())
            .collect()
    }

    /// Identifiers of every object, in no particular order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.objects
            .values()
            .map(|entry| entry.identifier.as_str())
            .collect()
    }

    /// Calls `f` once for each object.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn Object),
    {
        for entry in self.objects.values_mut() {
            f(&mut *entry.object);
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::Context;
    use crate::core::render::RenderBackend;

    //--- Fixtures ---------------------------------------------------------

    struct Plain {
        identifier: String,
        ticks: u32,
    }

    impl Plain {
        fn new(identifier: &str) -> Box<Self> {
            Box::new(Self {
                identifier: identifier.into(),
                ticks: 0,
            })
        }
    }

    impl Object for Plain {
        fn identifier(&self) -> &str {
            &self.identifier
        }

        fn fixed_update(&mut self, _context: &mut Context<'_>) {
            self.ticks += 1;
        }

        fn variable_update(&mut self, _context: &mut Context<'_>, _delta_time: f64) {}
    }

    struct Drawn {
        identifier: String,
        priority: i32,
    }

    impl Drawn {
        fn new(identifier: &str) -> Box<Self> {
            Box::new(Self {
                identifier: identifier.into(),
                priority: 0,
            })
        }
    }

    impl Object for Drawn {
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

    impl Renderable for Drawn {
        fn render_priority(&self) -> i32 {
            self.priority
        }

        fn set_render_priority(&mut self, priority: i32) {
            self.priority = priority;
        }

        fn render(&self, _backend: &mut dyn RenderBackend) {}
    }

    //=====================================================================
    // Insertion & Lookup
    //=====================================================================

    #[test]
    fn add_and_retrieve() {
        let mut registry = ObjectRegistry::new();
        assert!(registry.add_object(Plain::new("Player")));

        let object = registry.get_object("Player").expect("Object should be registered");
        assert_eq!(object.identifier(), "Player");
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("Player"));
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let mut registry = ObjectRegistry::new();
        assert!(registry.add_object(Plain::new("Player")));
        assert!(!registry.add_object(Drawn::new("Player")));

        assert_eq!(registry.len(), 1);
        assert!(
            registry.get_object_as::<Plain>("Player").is_some(),
            "Original object must survive a rejected duplicate"
        );
        assert_eq!(registry.count_of_type::<Drawn>(), 0);
        assert!(registry.renderables().is_empty());
    }

    #[test]
    fn missing_identifier_is_none() {
        let registry = ObjectRegistry::new();
        assert!(registry.get_object("Ghost").is_none());
        assert!(registry.handle_of("Ghost").is_none());
    }

    #[test]
    fn typed_lookup_rejects_other_types() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Plain::new("Player"));

        assert!(registry.get_object_as::<Plain>("Player").is_some());
        assert!(registry.get_object_as::<Drawn>("Player").is_none());
    }

    #[test]
    fn typed_mutable_lookup_mutates_in_place() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Plain::new("Player"));

        registry.get_object_as_mut::<Plain>("Player").unwrap().ticks = 9;

        assert_eq!(registry.get_object_as::<Plain>("Player").unwrap().ticks, 9);
    }

    #[test]
    fn handles_resolve_until_removal() {
        let mut registry = ObjectRegistry::new();
        let handle = registry.insert(Plain::new("Player")).unwrap();

        assert_eq!(registry.handle_of("Player"), Some(handle));
        assert_eq!(registry.get(handle).map(|o| o.identifier()), Some("Player"));

        registry.remove_object("Player");
        assert!(registry.get(handle).is_none());

        let reused = registry.insert(Plain::new("Player")).unwrap();
        assert_ne!(handle, reused, "Stale handle must not alias the new object");
    }

    //=====================================================================
    // Removal
    //=====================================================================

    #[test]
    fn remove_reports_existence() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Plain::new("Player"));

        assert!(registry.remove_object("Player"));
        assert!(!registry.remove_object("Player"));
        assert!(registry.get_object("Player").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_updates_side_indices() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Drawn::new("Tree"));
        registry.add_object(Drawn::new("Rock"));

        assert!(registry.remove_object("Tree"));

        assert_eq!(registry.count_of_type::<Drawn>(), 1);
        assert_eq!(registry.renderables().len(), 1);
        assert_eq!(registry.all_objects_of_type::<Drawn>()[0].identifier, "Rock");
    }

    #[test]
    fn take_returns_ownership() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Plain::new("Player"));

        let object = registry.take_object("Player").unwrap();
        assert_eq!(object.identifier(), "Player");
        assert!(!registry.contains("Player"));
    }

    #[test]
    fn clear_empties_everything() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Plain::new("A"));
        registry.add_object(Drawn::new("B"));

        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.renderables().is_empty());
        assert_eq!(registry.count_of_type::<Plain>(), 0);
    }

    //=====================================================================
    // Queries
    //=====================================================================

    #[test]
    fn all_objects_lists_everything() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Plain::new("A"));
        registry.add_object(Plain::new("B"));

        let mut identifiers: Vec<_> = registry
            .all_objects()
            .into_iter()
            .map(|object| object.identifier().to_owned())
            .collect();
        identifiers.sort();

        assert_eq!(identifiers, vec!["A", "B"]);
    }

    #[test]
    fn typed_query_returns_exact_subset() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Drawn::new("Sprite1"));
        registry.add_object(Plain::new("Logic"));
        registry.add_object(Drawn::new("Sprite2"));

        let mut drawn: Vec<_> = registry
            .all_objects_of_type::<Drawn>()
            .into_iter()
            .map(|object| object.identifier.clone())
            .collect();
        drawn.sort();

        assert_eq!(drawn, vec!["Sprite1", "Sprite2"]);
        assert_eq!(registry.all_objects_of_type::<Plain>().len(), 1);
        assert_eq!(registry.count_of_type::<Drawn>(), 2);
    }

    #[test]
    fn typed_query_for_unregistered_type_is_empty() {
        let registry = ObjectRegistry::new();
        assert!(registry.all_objects_of_type::<Plain>().is_empty());
    }

    #[test]
    fn typed_mutable_query_reaches_every_match() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Drawn::new("A"));
        registry.add_object(Drawn::new("B"));
        registry.add_object(Plain::new("C"));

        for drawn in registry.all_objects_of_type_mut::<Drawn>() {
            drawn.priority = 42;
        }

        assert!(registry
            .renderables()
            .iter()
            .all(|renderable| renderable.render_priority() == 42));
    }

    #[test]
    fn typed_mutable_query_follows_the_type_index() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Plain::new("A"));
        registry.add_object(Plain::new("B"));
        registry.add_object(Drawn::new("C"));
        registry.remove_object("A");

        let plains = registry.all_objects_of_type_mut::<Plain>();
        assert_eq!(plains.len(), 1);
        assert_eq!(plains[0].identifier, "B");

        registry.remove_object("B");
        assert!(registry.all_objects_of_type_mut::<Plain>().is_empty());
        assert_eq!(registry.count_of_type::<Plain>(), 0);
    }

    #[test]
    fn renderables_only_include_capable_objects() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Drawn::new("A"));
        registry.add_object(Plain::new("B"));

        assert_eq!(registry.renderables().len(), 1);
    }

    #[test]
    fn for_each_mut_visits_every_object() {
        let mut registry = ObjectRegistry::new();
        registry.add_object(Plain::new("A"));
        registry.add_object(Plain::new("B"));

        let mut visited = 0;
        registry.for_each_mut(|_| visited += 1);

        assert_eq!(visited, 2);
        let mut identifiers = registry.identifiers();
        identifiers.sort_unstable();
        assert_eq!(identifiers, vec!["A", "B"]);
    }
}
