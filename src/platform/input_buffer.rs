//=========================================================================
// Input Buffer
//
// Collects engine events produced by the platform between two redraws.
// Acts as a transient aggregator between Winit callbacks and the
// channel to the logic thread.
//
// Responsibilities:
// - Store incoming platform events per frame, in arrival order
// - Deduplicate repeated consecutive events (e.g., focus flapping)
// - Coalesce consecutive resizes into the latest size
// - Hand the whole frame over via `drain()`
//
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::event::Event;

//=== InputBuffer Struct ==================================================
//
// Represents the transient event store for one frame.
//
pub(crate) struct InputBuffer {
    events: Vec<Event>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for typical frames to minimize reallocations.
    //
    pub fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Handling ---------------------------------------------------
    //
    // Appends an event. A resize directly following another resize
    // replaces it; any other exact repeat of the previous event is dropped.
    //
    pub fn push(&mut self, event: Event) {
        match (self.events.last_mut(), event) {
            (Some(last @ Event::Resized { .. }), Event::Resized { .. }) => *last = event,
            (Some(last), _) if *last == event => {}
            _ => self.events.push(event),
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns all events of this frame and clears the buffer.
    // `None` when nothing was collected, so empty frames are not sent.
    //
    pub fn drain(&mut self) -> Option<Vec<Event>> {
        if self.events.is_empty() {
            return None;
        }
        Some(self.events.drain(..).collect())
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{KeyCode, KeyEvent};

    fn key_down(code: KeyCode) -> Event {
        Event::KeyPressed(KeyEvent::new(code))
    }

    fn resized(width: u32, height: u32) -> Event {
        Event::Resized { width, height }
    }

    #[test]
    fn test_consecutive_deduplication() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyB));
        buffer.push(key_down(KeyCode::KeyA));
        assert_eq!(buffer.len(), 3, "Only consecutive duplicates are ignored");
    }

    #[test]
    fn test_resize_coalescing() {
        let mut buffer = InputBuffer::new();
        buffer.push(resized(800, 600));
        buffer.push(resized(1024, 768));
        buffer.push(resized(1280, 720));

        assert_eq!(buffer.drain(), Some(vec![resized(1280, 720)]));
    }

    #[test]
    fn test_resize_after_other_event_is_kept() {
        let mut buffer = InputBuffer::new();
        buffer.push(resized(800, 600));
        buffer.push(Event::Maximized);
        buffer.push(resized(1920, 1080));

        assert_eq!(
            buffer.drain(),
            Some(vec![resized(800, 600), Event::Maximized, resized(1920, 1080)])
        );
    }

    #[test]
    fn test_drain_clears_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(Event::MouseEntered);

        let events = buffer.drain().unwrap();
        assert_eq!(events.len(), 2);
        assert!(buffer.is_empty());
        assert_eq!(buffer.drain(), None);
    }

    //--- Memory Retention -------------------------------------------------
    //
    // `clear()` keeps the allocation for reuse across frames.
    //
    #[test]
    fn test_clear_does_not_deallocate() {
        let mut buffer = InputBuffer::new();

        for i in 0..256 {
            buffer.push(resized(i, i));
            buffer.push(Event::MouseEntered);
        }

        let capacity_before = buffer.events.capacity();
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.events.capacity(), capacity_before);
    }
}
