//=========================================================================
// Platform Event Mapper
//
// Derives engine window-state events from Winit window reports.
//
// Winit reports sizes and focus, not transitions. The tracker remembers
// the last minimised/maximised state so each change is announced once:
//
//   Resized(0x0)            → Minimized
//   Resized(w x h), was min → Maximized | Restored, Resized
//   Resized(w x h), max Δ   → Maximized | Restored, Resized
//   Resized(w x h)          → Resized
//
//=========================================================================

use crate::core::event::Event;

//=== Focus ===============================================================

pub(crate) fn map_focus(focused: bool) -> Event {
    if focused {
        Event::GainedFocus
    } else {
        Event::LostFocus
    }
}

//=== WindowStateTracker ==================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WindowStateTracker {
    minimized: bool,
    maximized: bool,
}

impl WindowStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- on_resized() ----------------------------------------------------
    //
    // `minimized` and `maximized` are the window's state as queried right
    // after the resize. A zero-sized surface always counts as minimised.
    //
    pub fn on_resized(
        &mut self,
        width: u32,
        height: u32,
        minimized: bool,
        maximized: bool,
    ) -> Vec<Event> {
        let mut events = Vec::with_capacity(2);

        if minimized || width == 0 || height == 0 {
            if !self.minimized {
                self.minimized = true;
                events.push(Event::Minimized);
            }
            return events;
        }

        if self.minimized || maximized != self.maximized {
            events.push(if maximized {
                Event::Maximized
            } else {
                Event::Restored
            });
        }

        self.minimized = false;
        self.maximized = maximized;
        events.push(Event::Resized { width, height });
        events
    }

    #[cfg(test)]
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    #[cfg(test)]
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
