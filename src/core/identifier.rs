//=========================================================================
// Identifier Generation
//=========================================================================
//
// Process-wide default identifiers for objects and scenes.
//
// Each family draws from its own counter, starting at 1, and formats
// the value behind a fixed prefix (`Object1`, `Scene1`, ...). Values are
// never reused within a process, even after the owner is destroyed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

//=== Generators ==========================================================

static OBJECT_IDENTIFIERS: IdentifierGenerator = IdentifierGenerator::new("Object");
static SCENE_IDENTIFIERS: IdentifierGenerator = IdentifierGenerator::new("Scene");

/// Returns a fresh `Object<N>` identifier.
pub fn next_object_identifier() -> String {
    OBJECT_IDENTIFIERS.next_identifier()
}

/// Returns a fresh `Scene<N>` identifier.
pub fn next_scene_identifier() -> String {
    SCENE_IDENTIFIERS.next_identifier()
}

//=== IdentifierGenerator =================================================

/// Monotonic, thread-safe generator of prefixed identifiers.
///
/// Safe to call from any thread; two calls never return the same value.
pub struct IdentifierGenerator {
    prefix: &'static str,
    counter: AtomicU64,
    lock: Mutex<()>,
}

impl IdentifierGenerator {
    /// Creates a generator whose first identifier ends in `1`.
    pub const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            counter: AtomicU64::new(1),
            lock: Mutex::new(()),
        }
    }

    /// Produces the next identifier in the sequence.
    pub fn next_identifier(&self) -> String {
        // Guards no data, poisoning is irrelevant.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let value = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, value)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
