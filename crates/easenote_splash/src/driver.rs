//! Animation driver
//!
//! Owns the six animated quantities of the splash transition as one
//! [`AnimatedTween<TransformTarget>`]. One clock, one curve: every field
//! starts, eases and lands together.

use crate::transform::TransformTarget;
use easenote_animation::{presets, AnimatedTween, SchedulerHandle, Timing};
use easenote_core::Vec2;

/// Delay before the first retrigger after mount
///
/// Gives the host one layout pass (and the title its first measurement)
/// before anything moves.
pub const SETTLE_DELAY_MS: f32 = 100.0;

/// Timing for the splash transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplashSettings {
    /// Shared curve and duration of one retrigger
    pub timing: Timing,
    /// Delay gating the first retrigger after mount
    pub settle_delay_ms: f32,
}

impl Default for SplashSettings {
    fn default() -> Self {
        Self {
            timing: presets::splash_collapse(),
            settle_delay_ms: SETTLE_DELAY_MS,
        }
    }
}

/// One animated quantity as seen by the renderer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState<T> {
    pub current: T,
    pub target: T,
    pub in_flight: bool,
}

/// Per-quantity view of the driver at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverSnapshot {
    pub header_offset_y: AnimationState<f32>,
    pub logo_scale: AnimationState<f32>,
    pub logo_offset: AnimationState<Vec2>,
    pub title_scale: AnimationState<f32>,
    pub title_offset_y: AnimationState<f32>,
    pub content_offset_y: AnimationState<f32>,
}

impl DriverSnapshot {
    fn new(current: TransformTarget, target: TransformTarget, in_flight: bool) -> Self {
        fn state<T>(current: T, target: T, in_flight: bool) -> AnimationState<T> {
            AnimationState {
                current,
                target,
                in_flight,
            }
        }

        Self {
            header_offset_y: state(current.header_offset_y, target.header_offset_y, in_flight),
            logo_scale: state(current.logo_scale, target.logo_scale, in_flight),
            logo_offset: state(current.logo_offset, target.logo_offset, in_flight),
            title_scale: state(current.title_scale, target.title_scale, in_flight),
            title_offset_y: state(current.title_offset_y, target.title_offset_y, in_flight),
            content_offset_y: state(current.content_offset_y, target.content_offset_y, in_flight),
        }
    }

    /// Current values of every quantity
    pub fn current(&self) -> TransformTarget {
        TransformTarget {
            header_offset_y: self.header_offset_y.current,
            logo_scale: self.logo_scale.current,
            logo_offset: self.logo_offset.current,
            title_scale: self.title_scale.current,
            title_offset_y: self.title_offset_y.current,
            content_offset_y: self.content_offset_y.current,
        }
    }

    /// True when no quantity is in flight and each sits on its target
    pub fn is_settled(&self) -> bool {
        !self.header_offset_y.in_flight
            && self.header_offset_y.current == self.header_offset_y.target
            && self.logo_scale.current == self.logo_scale.target
            && self.logo_offset.current == self.logo_offset.target
            && self.title_scale.current == self.title_scale.target
            && self.title_offset_y.current == self.title_offset_y.target
            && self.content_offset_y.current == self.content_offset_y.target
    }
}

/// Drives the splash quantities toward the latest target
pub struct SplashDriver {
    values: AnimatedTween<TransformTarget>,
    settings: SplashSettings,
    awaiting_first: bool,
    retriggers: u32,
}

impl SplashDriver {
    /// Create the driver at its mount-time state
    ///
    /// Nothing moves until the first [`retrigger`](Self::retrigger), which
    /// waits out `settings.settle_delay_ms` before starting.
    pub fn mount(handle: SchedulerHandle, initial: TransformTarget, settings: SplashSettings) -> Self {
        Self {
            values: AnimatedTween::new(handle, initial),
            settings,
            awaiting_first: true,
            retriggers: 0,
        }
    }

    /// Move every quantity toward `target`
    ///
    /// Starts from the values currently on screen. If the first retrigger is
    /// still waiting out its settle delay, the delay keeps running and only
    /// the target changes.
    pub fn retrigger(&mut self, target: TransformTarget) {
        if self.awaiting_first {
            self.awaiting_first = false;
            self.values
                .animate_to_after(target, self.settings.timing, self.settings.settle_delay_ms);
        } else {
            self.values.animate_to(target, self.settings.timing);
        }
        self.retriggers += 1;
        tracing::debug!(
            retrigger = self.retriggers,
            header_offset_y = target.header_offset_y,
            title_offset_y = target.title_offset_y,
            "splash retrigger"
        );
    }

    /// Current interpolated values
    pub fn current(&self) -> TransformTarget {
        self.values.get()
    }

    /// The target of the latest retrigger (the mount state before any)
    pub fn target(&self) -> TransformTarget {
        *self.values.target()
    }

    pub fn snapshot(&self) -> DriverSnapshot {
        DriverSnapshot::new(self.current(), self.target(), self.is_in_flight())
    }

    /// Whether any quantity is still moving (or waiting to start)
    pub fn is_in_flight(&self) -> bool {
        self.values.is_animating()
    }

    /// Whether the first retrigger is still inside its settle delay
    pub fn is_settling(&self) -> bool {
        self.values.is_delayed()
    }

    /// Number of retriggers issued since mount
    pub fn retrigger_count(&self) -> u32 {
        self.retriggers
    }

    pub fn settings(&self) -> SplashSettings {
        self.settings
    }
}
