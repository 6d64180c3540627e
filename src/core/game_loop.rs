//=========================================================================
// Game Loop
//=========================================================================
//
// Fixed-step simulation with a variable step and one render pass per
// frame, driving the SceneManager from an EventSource.
//
// Frame:
//   1. pump + poll events  → SceneManager::handle_event
//   2. accumulator         → SceneManager::fixed_update (0..=max steps)
//   3. frame time          → SceneManager::variable_update
//   4. render pass         → visible scenes, priority order, present
//   5. frame boundary      → scene transitions, clean(), quit check
//
// Quit requests and scene transitions made during the frame take effect
// at step 5, so every callback sees a stable stack.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::FrameCommands;
use crate::core::event::EventSource;
use crate::core::render::{Color, Renderer};
use crate::core::resource::ResourceRegistry;
use crate::core::scene::SceneManager;
use crate::core::timer::Timer;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== LoopSettings ========================================================

/// Timing parameters of a [`GameLoop`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    /// Simulated time per fixed update.
    pub fixed_step: Duration,

    /// Upper bound on fixed updates in one frame. Backlog beyond it is
    /// dropped.
    pub max_fixed_steps: u32,

    /// Target wall time per frame in [`GameLoop::run`]. `None` runs
    /// unthrottled.
    pub frame_duration: Option<Duration>,

    /// Clear colour of every frame.
    pub background: Color,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            fixed_step: Duration::from_secs_f64(1.0 / 60.0),
            max_fixed_steps: 5,
            frame_duration: Some(Duration::from_secs_f64(1.0 / 60.0)),
            background: Color::BLACK,
        }
    }
}

//=== GameLoop ============================================================

pub struct GameLoop<E: EventSource> {
    events: E,
    scenes: SceneManager,
    renderer: Renderer,
    commands: FrameCommands,
    settings: LoopSettings,
    accumulator: Duration,
    exit_code: Option<i32>,
    frames: u64,
}

impl<E: EventSource> GameLoop<E> {
    //--- Construction -----------------------------------------------------

    /// Creates a loop over an empty scene stack.
    ///
    /// # Panics
    ///
    /// Panics if `settings.fixed_step` is zero.
    pub fn new(events: E, renderer: Renderer, settings: LoopSettings) -> Self {
        Self::with_scenes(events, SceneManager::new(), renderer, settings)
    }

    pub fn with_scenes(
        events: E,
        scenes: SceneManager,
        renderer: Renderer,
        settings: LoopSettings,
    ) -> Self {
        assert!(!settings.fixed_step.is_zero(), "Fixed step must be positive");
        debug!("Constructing GameLoop with settings {:?}", settings);

        Self {
            events,
            scenes,
            renderer,
            commands: FrameCommands::new(),
            settings,
            accumulator: Duration::ZERO,
            exit_code: None,
            frames: 0,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    pub fn resources(&self) -> &ResourceRegistry {
        self.scenes.resources()
    }

    pub fn resources_mut(&mut self) -> &mut ResourceRegistry {
        self.scenes.resources_mut()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn settings(&self) -> &LoopSettings {
        &self.settings
    }

    /// Exit code once the loop has stopped.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulated time not yet consumed by fixed updates.
    pub fn accumulated(&self) -> Duration {
        self.accumulator
    }

    //--- Running ----------------------------------------------------------

    /// Runs frames until something requests an exit, pacing them to
    /// `frame_duration`. Returns the exit code.
    pub fn run(&mut self) -> i32 {
        info!("Game loop running");
        let mut timer = Timer::started();

        loop {
            let elapsed = timer.restart();
            if self.run_frame(elapsed) == TickControl::Exit {
                break;
            }

            if let Some(target) = self.settings.frame_duration {
                let spent = timer.elapsed();
                if spent < target {
                    thread::sleep(target - spent);
                }
            }
        }

        self.exit_code.unwrap_or(0)
    }

    /// Runs one frame that covers `elapsed` wall time.
    pub fn run_frame(&mut self, elapsed: Duration) -> TickControl {
        //--- Step 1: Events ---------------------------------------------------
        if self.events.pump() == TickControl::Exit {
            self.commands.quit(0);
            return self.stop();
        }

        while let Some(event) = self.events.poll_event() {
            trace!(target: "game_loop", "Dispatching {:?}", event);
            if event.is_shutdown() {
                self.commands.quit(0);
            }
            self.scenes.handle_event(&event, &mut self.commands);
        }

        //--- Step 2: Fixed updates --------------------------------------------
        self.accumulator += elapsed;
        let step = self.settings.fixed_step;
        let mut steps = 0;

        while self.accumulator >= step && steps < self.settings.max_fixed_steps {
            self.scenes.fixed_update(&mut self.commands);
            self.accumulator -= step;
            steps += 1;
        }

        if self.accumulator >= step {
            warn!(
                "Dropping {:?} of simulation backlog after {} fixed steps",
                self.accumulator, steps
            );
            self.accumulator = Duration::ZERO;
        }

        //--- Step 3: Variable update ------------------------------------------
        self.scenes
            .variable_update(elapsed.as_secs_f64(), &mut self.commands);

        //--- Step 4: Render ---------------------------------------------------
        self.scenes
            .render(&mut self.renderer, self.settings.background);

        //--- Step 5: Frame boundary -------------------------------------------
        let transitions = self.commands.take_transitions();
        self.scenes.apply_transitions(transitions);
        self.scenes.clean();
        self.frames += 1;

        if self.commands.exit_code().is_some() {
            return self.stop();
        }

        TickControl::Continue
    }

    fn stop(&mut self) -> TickControl {
        let code = self.commands.exit_code().unwrap_or(0);
        info!("Game loop exiting with code {} after {} frames", code, self.frames);
        self.exit_code = Some(code);
        TickControl::Exit
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
