//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → pump() → pending: VecDeque<Event>
//                                    → poll_event() → GameLoop
//
// Bounded polling prevents starvation: a flooded channel cannot keep
// the logic thread from reaching its updates.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::event::{Event, EventSource};
use crate::core::game_loop::TickControl;

//=== EventCollector ======================================================

/// Channel-backed [`EventSource`] for the logic thread.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    pending: VecDeque<Event>,
}

impl EventCollector {
    /// Maximum channel messages drained per frame.
    pub(crate) const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            pending: VecDeque::with_capacity(16),
        }
    }

    /// Events collected but not yet polled.
    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.pending.len()
    }

    fn handle_message(&mut self, message: PlatformEvent) {
        match message {
            PlatformEvent::Events(batch) => self.pending.extend(batch),
            PlatformEvent::WindowClosed => {
                debug!("Platform reported window closed");
                self.pending.push_back(Event::Closed);
            }
        }
    }
}

impl EventSource for EventCollector {
    /// Drains up to [`EventCollector::MAX_EVENTS_PER_FRAME`] messages.
    ///
    /// Exits only once the platform has disconnected and every event it
    /// sent has been polled.
    fn pump(&mut self) -> TickControl {
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(message) => {
                    self.handle_message(message);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    if self.pending.is_empty() {
                        debug!("Platform channel disconnected");
                        return TickControl::Exit;
                    }
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
