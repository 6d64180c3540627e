//=========================================================================
// Core Systems
//
// Everything that runs on the logic thread: the scene stack, object
// registries, shared resources, render ordering and the update loop
// that drives them.
//
// Notes:
// Nothing here touches the window. Platform events arrive through the
// `platform_bridge` channel and frames leave through a `RenderBackend`.
//
//=========================================================================

pub mod context;
pub mod error;
pub mod event;
pub mod game_loop;
pub mod graphics;
pub mod identifier;
pub mod object;
pub mod render;
pub mod resource;
pub mod scene;
pub mod timer;

pub(crate) mod platform_bridge;

//=== Re-exports ==========================================================

pub use error::{EngineError, Result};
pub use platform_bridge::PlatformError;
