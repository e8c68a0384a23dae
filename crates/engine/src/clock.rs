//! Millisecond clocks for driving the scheduler.

use std::time::{Duration, Instant};

/// Source of tick timestamps in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
    frame: Duration,
}

impl FrameClock {
    pub fn new(frame_ms: u64) -> Self {
        Self {
            origin: Instant::now(),
            frame: Duration::from_millis(frame_ms),
        }
    }

    /// Time left until the frame that started at `frame_start_ms` is over.
    ///
    /// The host uses this as its input poll timeout.
    pub fn until_next_frame(&self, frame_start_ms: u64) -> Duration {
        let spent = Duration::from_millis(self.now_ms().saturating_sub(frame_start_ms));
        self.frame.checked_sub(spent).unwrap_or(Duration::ZERO)
    }
}

impl Clock for FrameClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to. Used by the headless runner and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now_ms: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now_ms: start_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}
