//=========================================================================
// E2D Library Root
//
// This crate defines the public API surface of the E2D engine.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the scene, object and render systems under `core`
// - Keep the windowing layer (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use e2d::prelude::*;
//
// fn main() {
//     let code = EngineBuilder::new()
//         .build()
//         .init(|scenes| {
//             scenes.push_scene(Scene::with_identifier("Main"));
//         })
//         .run();
//     std::process::exit(code);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the logic-thread systems. Applications mostly reach them
// through `prelude`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit integration (window, event loop, input
// translation) and is not part of the public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineConfig};
