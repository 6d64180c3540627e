//=========================================================================
// Timer
//=========================================================================
//
// Pausable stopwatch over `Instant`.
//
// A stopped timer reports zero. A paused timer reports the time that had
// elapsed when it was paused, and resuming continues from there.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== Timer ===============================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    started_at: Option<Instant>,
    paused_elapsed: Option<Duration>,
}

impl Timer {
    /// Creates a stopped timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a timer that is already running.
    pub fn started() -> Self {
        let mut timer = Self::new();
        timer.start();
        timer
    }

    //--- Control ----------------------------------------------------------

    /// (Re)starts from zero, clearing any pause.
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.paused_elapsed = None;
    }

    pub fn stop(&mut self) {
        self.started_at = None;
        self.paused_elapsed = None;
    }

    /// Freezes the elapsed time. No-op unless running.
    pub fn pause(&mut self) {
        if let (Some(started_at), None) = (self.started_at, self.paused_elapsed) {
            self.paused_elapsed = Some(started_at.elapsed());
        }
    }

    /// Continues from the frozen elapsed time. No-op unless paused.
    pub fn resume(&mut self) {
        if let Some(frozen) = self.paused_elapsed.take() {
            let now = Instant::now();
            self.started_at = Some(now.checked_sub(frozen).unwrap_or(now));
        }
    }

    /// Returns the elapsed time and starts again from zero.
    pub fn restart(&mut self) -> Duration {
        let elapsed = self.elapsed();
        self.start();
        elapsed
    }

    //--- Queries ----------------------------------------------------------

    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.paused_elapsed) {
            (_, Some(frozen)) => frozen,
            (Some(started_at), None) => started_at.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed().as_millis()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// True once started, whether paused or not.
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.started_at.is_some() && self.paused_elapsed.is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
