//! Frame pacing
//!
//! The simulation advances exactly once per frame, so the loop only has to
//! sleep out the rest of each frame. Falling behind skips the missed sleep
//! rather than running extra frames.

use std::time::{Duration, Instant};

/// Fixed-rate pacer
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    next: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Self::period_for(fps),
            next: Instant::now(),
            frames: 0,
        }
    }

    pub fn period_for(fps: u32) -> Duration {
        Duration::from_secs(1) / fps.max(1)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Time left in the current frame as of `now`
    pub fn remaining(&self, now: Instant) -> Duration {
        (self.next + self.period).saturating_duration_since(now)
    }

    /// Finish the frame: sleep until the next one is due
    pub fn wait(&mut self) {
        let now = Instant::now();
        let left = self.remaining(now);
        if left.is_zero() {
            // Behind schedule; start over from here
            self.next = now;
        } else {
            std::thread::sleep(left);
            self.next += self.period;
        }
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period() {
        assert_eq!(FrameClock::period_for(60), Duration::from_nanos(16_666_666));
        assert_eq!(FrameClock::period_for(0), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_paces_frames() {
        let mut clock = FrameClock::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            clock.wait();
        }
        assert_eq!(clock.frames(), 4);
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_remaining_saturates() {
        let clock = FrameClock::new(60);
        let late = Instant::now() + Duration::from_secs(1);
        assert_eq!(clock.remaining(late), Duration::ZERO);
    }
}
