//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the game loop.
//
// The platform thread owns the window and sends batches of engine
// events over a bounded channel. The logic thread drains them through
// an `EventCollector`, which is the game loop's `EventSource`.
//
// Components:
// - `interface`: Message and error definitions (the contract)
// - `event_collector`: Core-side event collection and buffering
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::PlatformError;

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
pub(crate) use interface::PlatformEvent;
