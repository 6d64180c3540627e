//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's logic thread via
// crossbeam channels.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  GameLoop        │
//  │   ↓                      │    │   ↑              │
//  │  InputProcessor          │    │  EventCollector  │
//  │  WindowStateTracker      │    │   ↑              │
//  │   ↓                      │    │                  │
//  │  InputBuffer             │    └───┬──────────────┘
//  │   ↓                      │        │     ↑
//  │  RedrawRequested         │        │     │
//  │   ↓ (flush)              │        │     │
//  │  Event Channel ──────────┼────────┼─────┘  PlatformEvent
//  │  Shutdown Channel ←──────┼────────┘        exit code
//  └──────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: Batches all events atomically,
//   preserving arrival order
// - **Sticky modifiers**: Modifier state persists across events until
//   explicitly changed (matches platform behavior)
// - **Graceful channel disconnect**: If the logic thread exits, the
//   platform closes its event loop instead of running headless
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::event::Event;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use event_mapper::{map_focus, WindowStateTracker};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowSettings ======================================================

/// Window parameters applied when the window is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window manager and event aggregator.
///
/// Runs on the main thread and sends batched engine events to the logic
/// thread. The logic thread answers with its exit code on the shutdown
/// channel when the game loop stops.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(...)` - initializes subsystems
/// 2. **Execution**: `platform.run()` - runs the event loop
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: window closed or logic thread stopped → loop exits
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    settings: WindowSettings,

    /// Buffers events until frame boundary.
    buffer: InputBuffer,

    /// Channel to send events to the logic thread.
    event_sender: Sender<PlatformEvent>,

    /// Exit code from the logic thread once its loop has stopped.
    shutdown: Receiver<i32>,

    input_processor: InputProcessor,

    window_state: WindowStateTracker,
}

impl Platform {
    /// Poll interval while no redraws arrive (e.g. minimised window).
    const IDLE_WAIT: Duration = Duration::from_millis(16);

    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens lazily in `resumed()`.
    pub fn new(
        settings: WindowSettings,
        event_sender: Sender<PlatformEvent>,
        shutdown: Receiver<i32>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            settings,
            buffer: InputBuffer::new(),
            event_sender,
            shutdown,
            input_processor: InputProcessor::new(),
            window_state: WindowStateTracker::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or the logic thread
    /// stops.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered events to the logic thread. Empty frames are not
    /// sent; a disconnected channel drops the events with a warning.
    fn flush_input_buffer(&mut self) {
        if let Some(events) = self.buffer.drain() {
            let count = events.len();
            trace!(target: "platform::input", "Flushing {} events", count);

            if self.event_sender.send(PlatformEvent::Events(events)).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    count
                );
            }
        }
    }

    /// True once the logic thread has reported its exit or gone away.
    fn shutdown_requested(&self) -> bool {
        match self.shutdown.try_recv() {
            Ok(code) => {
                info!(target: "platform", "Logic thread stopped with exit code {}", code);
                true
            }
            Err(TryRecvError::Disconnected) => {
                debug!(target: "platform", "Shutdown channel disconnected");
                true
            }
            Err(TryRecvError::Empty) => false,
        }
    }

    fn push_event(&mut self, event: Event) {
        trace!(target: "platform::input", "Buffered {:?}", event);
        self.buffer.push(event);
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                event_loop.set_control_flow(ControlFlow::wait_duration(Self::IDLE_WAIT));
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.flush_input_buffer();
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Focused(focused) => {
                self.push_event(map_focus(focused));
            }

            WindowEvent::Resized(size) => {
                let (minimized, maximized) = match &self.window {
                    Some(window) => (window.is_minimized().unwrap_or(false), window.is_maximized()),
                    None => (false, false),
                };
                for event in self
                    .window_state
                    .on_resized(size.width, size.height, minimized, maximized)
                {
                    self.push_event(event);
                }
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(&key_event) {
                    self.push_event(event);
                } else {
                    trace!(target: "platform::input", "Key without physical code ignored");
                }
            }

            WindowEvent::CursorEntered { .. } => self.push_event(Event::MouseEntered),

            WindowEvent::CursorLeft { .. } => self.push_event(Event::MouseLeft),

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered events
                self.flush_input_buffer();

                if self.shutdown_requested() {
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    /// Catches logic-thread shutdown while no redraws are delivered.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shutdown_requested() {
            self.flush_input_buffer();
            event_loop.exit();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{KeyCode, KeyEvent};
    use crossbeam_channel::{bounded, unbounded};

    fn settings() -> WindowSettings {
        WindowSettings {
            title: "Test".into(),
            width: 320,
            height: 240,
        }
    }

    fn platform() -> (Platform, Receiver<PlatformEvent>, Sender<i32>) {
        let (tx, rx) = unbounded();
        let (shutdown_tx, shutdown_rx) = bounded(1);
        (Platform::new(settings(), tx, shutdown_rx), rx, shutdown_tx)
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (platform, _rx, _shutdown) = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (mut platform, rx, _shutdown) = platform();

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events() {
        let (mut platform, rx, _shutdown) = platform();
        platform.push_event(Event::KeyPressed(KeyEvent::new(KeyCode::Space)));
        platform.push_event(Event::LostFocus);

        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Events(events)) => {
                assert_eq!(
                    events,
                    vec![Event::KeyPressed(KeyEvent::new(KeyCode::Space)), Event::LostFocus]
                );
            }
            other => panic!("Expected Events, got {:?}", other),
        }
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (mut platform, rx, _shutdown) = platform();
        platform.push_event(Event::MouseEntered);

        drop(rx);

        // Should not panic, just log warning
        platform.flush_input_buffer();
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (mut platform, rx, _shutdown) = platform();
        platform.push_event(Event::MouseLeft);

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    //=====================================================================
    // Shutdown Tests
    //=====================================================================

    #[test]
    fn running_logic_thread_is_not_shutdown() {
        let (platform, _rx, _shutdown) = platform();
        assert!(!platform.shutdown_requested());
    }

    #[test]
    fn exit_code_requests_shutdown() {
        let (platform, _rx, shutdown) = platform();
        shutdown.send(2).unwrap();
        assert!(platform.shutdown_requested());
    }

    #[test]
    fn dropped_logic_thread_requests_shutdown() {
        let (platform, _rx, shutdown) = platform();
        drop(shutdown);
        assert!(platform.shutdown_requested());
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
