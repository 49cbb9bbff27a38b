//! EaseNote Animation System
//!
//! Timed, eased transitions driven by a cooperative frame scheduler.
//!
//! # Features
//!
//! - **Easing Curves**: linear, CSS-style ease curves and arbitrary cubic beziers
//! - **Tweens**: duration-based frame clocks with an optional start delay
//! - **Scheduler**: one registry of clocks advanced once per frame
//! - **Typed Animations**: `AnimatedTween<T>` for any [`Interpolate`] value,
//!   including composite values whose fields must move in lockstep
//! - **Retargetable**: a new target restarts from the current interpolated value
//! - **Presets**: named timings for the app's transitions

pub mod easing;
pub mod presets;
pub mod scheduler;
pub mod tween;
pub mod values;

pub use easing::Easing;
pub use presets::AnimationPreset;
pub use scheduler::{AnimatedTween, AnimationScheduler, SchedulerHandle, TweenId, TweenSample};
pub use tween::{Timing, Tween};
pub use values::Interpolate;
