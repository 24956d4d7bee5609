//! Frame timing utilities

use std::collections::VecDeque;
use std::time::Duration;

/// Length of the sliding window used for the frame rate.
pub const FRAME_RATE_WINDOW: Duration = Duration::from_millis(1000);

/// Counts presented frames over a sliding one-second window.
///
/// Timestamps are host presentation times measured from an arbitrary origin
/// (typically the first frame), so the counter never touches a wall clock.
#[derive(Debug, Default, Clone)]
pub struct FrameRateCounter {
    /// Presentation timestamps, oldest first
    times: VecDeque<Duration>,
    frame_count: u64,
}

impl FrameRateCounter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame presented at `now` and return the current frame rate.
    ///
    /// Timestamps at or before `now - 1s` are evicted from the front before
    /// `now` is pushed; the remaining queue length is the frame rate.
    pub fn record(&mut self, now: Duration) -> usize {
        while let Some(&front) = self.times.front() {
            if front + FRAME_RATE_WINDOW <= now {
                self.times.pop_front();
            } else {
                break;
            }
        }
        self.times.push_back(now);
        self.frame_count += 1;
        self.times.len()
    }

    /// Frame rate as of the last recorded frame
    pub fn fps(&self) -> usize {
        self.times.len()
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
