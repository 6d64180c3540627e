//=========================================================================
// E2D Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_title()            ├─ load_resources(|resources| ...)
//         ├─ with_tps()              ├─ init(|scenes| ...)
//         │                          └─ spawns logic thread
//         ├─ with_frame_rate()          runs platform
//         └─ with_backend()             blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::event::EventSource;
use crate::core::game_loop::{GameLoop, LoopSettings};
use crate::core::platform_bridge::{EventCollector, PlatformEvent};
use crate::core::render::{Color, NullBackend, RenderBackend, Renderer};
use crate::core::resource::ResourceRegistry;
use crate::core::scene::SceneManager;
use crate::platform::{Platform, WindowSettings};

//=== EngineConfig ========================================================

/// Immutable engine configuration produced by [`EngineBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    title: String,
    window_size: (u32, u32),
    tps: f64,
    frame_rate: Option<f64>,
    max_fixed_steps: u32,
    channel_capacity: usize,
    background: Color,
}

impl EngineConfig {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Logical window size as `(width, height)`.
    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Fixed updates per second.
    pub fn tps(&self) -> f64 {
        self.tps
    }

    /// Frame pacing target; `None` runs unthrottled.
    pub fn frame_rate(&self) -> Option<f64> {
        self.frame_rate
    }

    pub fn max_fixed_steps(&self) -> u32 {
        self.max_fixed_steps
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Game loop timing derived from this configuration.
    pub fn loop_settings(&self) -> LoopSettings {
        LoopSettings {
            fixed_step: Duration::from_secs_f64(1.0 / self.tps),
            max_fixed_steps: self.max_fixed_steps,
            frame_duration: self.frame_rate.map(|rate| Duration::from_secs_f64(1.0 / rate)),
            background: self.background,
        }
    }

    fn window_settings(&self) -> WindowSettings {
        WindowSettings {
            title: self.title.clone(),
            width: self.window_size.0,
            height: self.window_size.1,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "E2D".to_owned(),
            window_size: (800, 600),
            tps: 60.0,
            frame_rate: Some(60.0),
            max_fixed_steps: 5,
            channel_capacity: 128,
            background: Color::BLACK,
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Title**: "E2D", **window**: 800x600
/// - **TPS**: 60.0 (fixed updates per second)
/// - **Frame rate**: 60.0
/// - **Max fixed steps per frame**: 5
/// - **Channel capacity**: 128 messages
/// - **Background**: black
/// - **Backend**: [`NullBackend`]
///
/// # Examples
///
/// ```no_run
/// use e2d::prelude::*;
///
/// let exit_code = EngineBuilder::new()
///     .with_title("Hello")
///     .with_tps(120.0)
///     .build()
///     .init(|scenes| {
///         scenes.push_scene(Scene::with_identifier("Main"));
///     })
///     .run();
/// std::process::exit(exit_code);
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    backend: Option<Box<dyn RenderBackend>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            backend: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.config.window_size = (width, height);
        self
    }

    /// Sets the fixed update rate.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.tps = tps;
        self
    }

    /// Sets the frame pacing target. `None` renders as fast as possible.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if the rate is not positive.
    pub fn with_frame_rate(mut self, frame_rate: Option<f64>) -> Self {
        if let Some(rate) = frame_rate {
            assert!(rate > 0.0, "Frame rate must be positive, got {}", rate);
        }
        self.config.frame_rate = frame_rate;
        self
    }

    /// Caps fixed updates per frame; simulation backlog beyond it is
    /// dropped.
    ///
    /// Default: 5
    ///
    /// # Panics
    ///
    /// Panics if `steps == 0`.
    pub fn with_max_fixed_steps(mut self, steps: u32) -> Self {
        assert!(steps > 0, "Max fixed steps must be positive");
        self.config.max_fixed_steps = steps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.config.background = color;
        self
    }

    /// Replaces the default [`NullBackend`].
    pub fn with_backend<B: RenderBackend + 'static>(mut self, backend: B) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, frame rate: {:?}, channel: {})",
            self.config.tps, self.config.frame_rate, self.config.channel_capacity
        );

        Engine {
            config: self.config,
            scenes: SceneManager::new(),
            backend: self.backend.unwrap_or_else(|| Box::new(NullBackend::new())),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// E2D runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► GameLoop (Logic Thread)
///   │     └─► SceneManager, Renderer
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Event Polling
///
/// Communication: crossbeam channels (PlatformEvent →, exit code ←)
/// ```
pub struct Engine {
    config: EngineConfig,
    scenes: SceneManager,
    backend: Box<dyn RenderBackend>,
}

impl Engine {
    //--- Accessors --------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn resources(&self) -> &ResourceRegistry {
        self.scenes.resources()
    }

    /// Fills the shared resource registry.
    ///
    /// Call this before [`Engine::init`] when the initial scenes read
    /// resources from their `on_load` hooks.
    pub fn load_resources<F>(mut self, load_fn: F) -> Self
    where
        F: FnOnce(&mut ResourceRegistry),
    {
        load_fn(self.scenes.resources_mut());
        info!("Engine resources loaded ({} entries)", self.scenes.resources().len());
        self
    }

    //--- Initialization ---------------------------------------------------

    /// Sets up the initial scene stack before execution.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use e2d::prelude::*;
    /// EngineBuilder::new()
    ///     .build()
    ///     .init(|scenes| {
    ///         scenes.push_scene(Scene::with_identifier("Menu"));
    ///     })
    ///     .run();
    /// ```
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut SceneManager),
    {
        info!("Initializing engine scenes");

        init_fn(&mut self.scenes);

        info!("Engine initialization complete ({} scenes)", self.scenes.len());
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the event and shutdown channels
    /// 2. Spawns the logic thread running the game loop
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: `Closed` reaches the game loop, which stops and
    ///    reports its exit code; the platform exits and the thread is joined
    ///
    /// Returns the game loop's exit code, or -1 if the platform or the
    /// logic thread failed.
    pub fn run(self) -> i32 {
        info!("Starting engine runtime (TPS: {})", self.config.tps);

        //--- 1. Create communication channels ---------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.config.channel_capacity);
        let (shutdown_tx, shutdown_rx) = bounded::<i32>(1);

        info!("Event channel created (capacity: {})", self.config.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let settings = self.config.loop_settings();
        let window = self.config.window_settings();
        let scenes = self.scenes;
        let renderer = Renderer::new(self.backend);

        let spawned = thread::Builder::new()
            .name("e2d-logic".to_owned())
            .spawn(move || {
                let collector = EventCollector::new(rx);
                let mut game_loop = GameLoop::with_scenes(collector, scenes, renderer, settings);
                let exit_code = game_loop.run();
                let _ = shutdown_tx.send(exit_code);
                exit_code
            });

        let core_handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                error!("Failed to spawn logic thread: {}", e);
                return -1;
            }
        };
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(window, tx, shutdown_rx);
        info!("Platform initialized, entering event loop");

        let platform_failed = match platform.run() {
            Ok(()) => false,
            Err(e) => {
                error!("Platform error: {}", e);
                true
            }
        };

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        let exit_code = match core_handle.join() {
            Ok(code) => {
                info!("Core thread terminated cleanly");
                code
            }
            Err(e) => {
                error!("Core thread panicked: {:?}", e);
                -1
            }
        };

        info!("Engine shutdown complete");
        if platform_failed {
            -1
        } else {
            exit_code
        }
    }

    /// Runs the game loop on the calling thread with `events` instead of
    /// a window. Returns the exit code.
    pub fn run_headless<E: EventSource>(self, events: E) -> i32 {
        info!("Starting headless engine runtime (TPS: {})", self.config.tps);

        let renderer = Renderer::new(self.backend);
        let mut game_loop =
            GameLoop::with_scenes(events, self.scenes, renderer, self.config.loop_settings());
        let exit_code = game_loop.run();

        info!("Engine shutdown complete");
        exit_code
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::Event;
    use crate::core::render::{FontId, RecordingBackend};
    use crate::core::resource::Font;
    use crate::core::scene::{Scene, SceneContext, SceneHooks};
    use std::collections::VecDeque;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.config, EngineConfig::default());
        assert_eq!(builder.config.tps, 60.0);
        assert_eq!(builder.config.channel_capacity, 128);
        assert!(builder.backend.is_none());
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.config.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Frame rate must be positive")]
    fn builder_with_frame_rate_panics_on_zero() {
        EngineBuilder::new().with_frame_rate(Some(0.0));
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_window_size_panics_on_zero() {
        EngineBuilder::new().with_window_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Max fixed steps must be positive")]
    fn builder_with_max_fixed_steps_panics_on_zero() {
        EngineBuilder::new().with_max_fixed_steps(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_title("Chained")
            .with_window_size(1280, 720)
            .with_tps(120.0)
            .with_frame_rate(None)
            .with_max_fixed_steps(8)
            .with_channel_capacity(256)
            .with_background_color(Color::BLUE)
            .build();

        let config = engine.config();
        assert_eq!(config.title(), "Chained");
        assert_eq!(config.window_size(), (1280, 720));
        assert_eq!(config.tps(), 120.0);
        assert_eq!(config.frame_rate(), None);
        assert_eq!(config.max_fixed_steps(), 8);
        assert_eq!(config.channel_capacity(), 256);
        assert_eq!(config.background(), Color::BLUE);
    }

    //=====================================================================
    // EngineConfig Tests
    //=====================================================================

    #[test]
    fn loop_settings_follow_rates() {
        let config = EngineBuilder::new()
            .with_tps(50.0)
            .with_frame_rate(Some(25.0))
            .build()
            .config()
            .clone();

        let settings = config.loop_settings();
        assert_eq!(settings.fixed_step, Duration::from_millis(20));
        assert_eq!(settings.frame_duration, Some(Duration::from_millis(40)));
        assert_eq!(settings.max_fixed_steps, 5);
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_populates_scene_stack() {
        let engine = EngineBuilder::new().build().init(|scenes| {
            scenes.push_scene(Scene::with_identifier("Menu"));
        });

        assert_eq!(engine.scenes().identifiers(), vec!["Menu"]);
    }

    #[test]
    fn resources_are_loaded_before_init() {
        struct Title {
            font: Option<FontId>,
        }

        impl SceneHooks for Title {
            fn on_load(&mut self, scene: &mut SceneContext<'_>) {
                self.font = scene.resources().try_get::<Font>("ui").map(Font::id);
            }
        }

        let engine = EngineBuilder::new()
            .build()
            .load_resources(|resources| {
                resources.insert("ui", Font::new(FontId(3)));
            })
            .init(|scenes| {
                scenes.push_scene(Scene::with_identifier("Title").with_hooks(Title { font: None }));
            });

        assert!(engine.resources().exists::<Font>("ui"));
        let title = engine.scenes().active_scene().unwrap();
        assert_eq!(title.hooks::<Title>().unwrap().font, Some(FontId(3)));
    }

    #[test]
    fn headless_run_stops_on_closed() {
        let backend = RecordingBackend::new();
        let engine = EngineBuilder::new()
            .with_frame_rate(None)
            .with_backend(backend.clone())
            .build()
            .init(|scenes| {
                scenes.push_scene(Scene::with_identifier("Main"));
            });

        let events = VecDeque::from(vec![Event::Closed]);

        assert_eq!(engine.run_headless(events), 0);
        assert_eq!(backend.presented_frames(), 1);
        assert_eq!(backend.clear_colors(), vec![Color::BLACK]);
    }
}
