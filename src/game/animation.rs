//! Sprite Sheet Animation
//!
//! An `Animation` is a clock over a horizontal strip of equally sized frames.
//! It never ticks on its own: the simulation steps it once per frame with the
//! shared delta time, and the renderer asks it which frame to show.

/// Frame-cycling clock for one sprite sheet strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Number of frames in the strip (assumed >= 1)
    frame_count: u32,
    /// Seconds for one full pass over all frames
    length: f32,
    /// Phase within the current cycle, always in `[0, length)`
    elapsed: f32,
    /// Set when the last step crossed the end of the cycle
    done: bool,
}

impl Animation {
    pub fn new(frame_count: u32, length: f32) -> Self {
        Self {
            frame_count,
            length,
            elapsed: 0.0,
            done: false,
        }
    }

    /// Advance the clock, wrapping around at the end of the cycle.
    pub fn step(&mut self, delta_time: f32) {
        if self.length <= 0.0 {
            return;
        }
        self.elapsed += delta_time;
        self.done = self.elapsed >= self.length;
        if self.done {
            self.elapsed %= self.length;
        }
    }

    /// 0-based index of the frame for the current phase.
    pub fn current_frame(&self) -> u32 {
        if self.frame_count == 0 || self.length <= 0.0 {
            return 0;
        }
        let frame_time = self.length / self.frame_count as f32;
        (self.elapsed / frame_time) as u32 % self.frame_count
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.done = false;
    }

    /// Did the most recent step complete a full cycle?
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Duration of one full cycle in seconds
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
