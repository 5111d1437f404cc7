//! Countdown Timer
//!
//! Used for cooldowns (the player's weapon). Latches `timed_out` once the
//! length has elapsed and keeps counting so the phase is not lost.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    length: f32,
    elapsed: f32,
    timed_out: bool,
}

impl Timer {
    #[cfg(test)]
    pub fn new(length: f32) -> Self {
        Self {
            length,
            elapsed: 0.0,
            timed_out: false,
        }
    }

    /// A timer that reports timed out before its first step.
    pub fn expired(length: f32) -> Self {
        Self {
            length,
            elapsed: 0.0,
            timed_out: true,
        }
    }

    /// Advance the timer, latching `timed_out` once the length is reached.
    pub fn step(&mut self, delta_time: f32) {
        self.elapsed += delta_time;
        if self.length > 0.0 && self.elapsed >= self.length {
            self.elapsed %= self.length;
            self.timed_out = true;
        }
    }

    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.timed_out = false;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn length(&self) -> f32 {
        self.length
    }
}
