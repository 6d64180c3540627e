//=========================================================================
// Engine Event Types
//
// Platform-independent events delivered to scenes and objects.
//
// The platform layer (Winit) translates window and keyboard activity
// into these types; tests and headless drivers can produce them
// directly through any `EventSource`.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    Event (this module)
//         ↓
//    EventSource::poll_event()
//         ↓
//    GameLoop → SceneManager → active Scene → Objects
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

//=== Internal Dependencies ===============================================

use crate::core::game_loop::TickControl;

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is the same physical key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    SuperLeft,
    SuperRight,

    /// Any key the platform layer does not map.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier keys held while a key event was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Command on macOS, Windows key elsewhere.
    pub system: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        system: false,
    };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.system
    }
}

//=== KeyEvent ============================================================

/// Payload of [`Event::KeyPressed`] and [`Event::KeyReleased`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
    /// True for auto-repeat presses while the key is held.
    pub repeat: bool,
}

impl KeyEvent {
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            repeat: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

//=== Event ===============================================================

/// A window or input event dispatched once per frame to the active scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// The platform reported something this engine has no mapping for.
    Unknown,

    /// The user asked to close the window.
    Closed,

    /// The window's drawable area changed (physical pixels).
    Resized { width: u32, height: u32 },

    /// The window lost keyboard focus. Scenes pause themselves.
    LostFocus,

    /// The window regained keyboard focus. Scenes resume themselves.
    GainedFocus,

    Minimized,
    Maximized,
    Restored,

    KeyPressed(KeyEvent),
    KeyReleased(KeyEvent),

    MouseEntered,
    MouseLeft,

    /// The application should terminate (OS request or programmatic).
    Quit,
}

impl Event {
    /// Whether this event terminates the game loop.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Event::Closed | Event::Quit)
    }
}

//=== EventSource =========================================================

/// Supplies events to the game loop.
///
/// `pump` runs once at the start of every frame; `poll_event` is then
/// called until it returns `None`.
pub trait EventSource {
    /// Gathers pending platform input. Returning [`TickControl::Exit`]
    /// stops the loop, for example because the platform side has gone away.
    fn pump(&mut self) -> TickControl {
        TickControl::Continue
    }

    /// Returns the next queued event, if any.
    fn poll_event(&mut self) -> Option<Event>;
}

/// Scripted events, drained front to back.
impl EventSource for VecDeque<Event> {
    fn poll_event(&mut self) -> Option<Event> {
        self.pop_front()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
