//! Timed tweens
//!
//! A [`Tween`] is a frame clock: it knows how far through its duration it is
//! and how that maps through its easing curve, but not what value is being
//! animated. Typed values are layered on top by
//! [`AnimatedTween`](crate::scheduler::AnimatedTween).

use crate::easing::Easing;

/// Duration and curve shared by everything moving in one transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Duration in milliseconds
    pub duration_ms: u32,
    /// Curve applied to linear progress
    pub easing: Easing,
}

impl Timing {
    pub const fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// Linear timing over `duration_ms`
    pub const fn linear(duration_ms: u32) -> Self {
        Self::new(duration_ms, Easing::Linear)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(500, Easing::EaseInOut)
    }
}

/// A duration-based frame clock with an optional start delay
#[derive(Clone, Debug)]
pub struct Tween {
    timing: Timing,
    /// Remaining start delay in milliseconds
    delay_ms: f32,
    /// Time spent running (after the delay) in milliseconds
    elapsed_ms: f32,
    playing: bool,
    finished: bool,
}

impl Tween {
    /// Create a stopped tween
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            delay_ms: 0.0,
            elapsed_ms: 0.0,
            playing: false,
            finished: false,
        }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Start from the beginning with no delay
    pub fn start(&mut self) {
        self.start_after(0.0);
    }

    /// Start from the beginning once `delay_ms` has passed
    pub fn start_after(&mut self, delay_ms: f32) {
        self.delay_ms = delay_ms.max(0.0);
        self.elapsed_ms = 0.0;
        self.playing = true;
        self.finished = false;
    }

    /// Restart the clock with new timing
    ///
    /// Any start delay that has not yet elapsed keeps counting down.
    pub fn restart(&mut self, timing: Timing) {
        let pending_delay = if self.playing { self.delay_ms } else { 0.0 };
        self.timing = timing;
        self.start_after(pending_delay);
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Check if playing (including while waiting out the delay)
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if still waiting for the start delay
    pub fn is_delayed(&self) -> bool {
        self.playing && self.delay_ms > 0.0
    }

    /// Check if the clock ran to the end of its duration
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Linear progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.finished {
            return 1.0;
        }
        if self.timing.duration_ms == 0 {
            return 0.0;
        }
        (self.elapsed_ms / self.timing.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Progress mapped through the easing curve
    pub fn eased_progress(&self) -> f32 {
        self.timing.easing.apply(self.progress())
    }

    /// Advance the clock by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        let mut dt = dt_ms.max(0.0);
        if self.delay_ms > 0.0 {
            let consumed = dt.min(self.delay_ms);
            self.delay_ms -= consumed;
            dt -= consumed;
            if self.delay_ms > 0.0 {
                return;
            }
        }

        self.elapsed_ms += dt;
        if self.elapsed_ms >= self.timing.duration_ms as f32 {
            self.elapsed_ms = self.timing.duration_ms as f32;
            self.playing = false;
            self.finished = true;
        }
    }
}
