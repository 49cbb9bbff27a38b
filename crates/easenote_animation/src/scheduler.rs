//! Animation scheduler
//!
//! Owns every active tween clock and advances them once per frame.
//! Typed animations register themselves implicitly through
//! [`AnimatedTween`], which holds a weak [`SchedulerHandle`] and removes its
//! clock when dropped. Dropping the owner is therefore the only cancellation
//! mechanism: nothing else can reach a registered clock.
//!
//! The scheduler never spawns threads. The host calls [`AnimationScheduler::tick`]
//! (wall clock) or [`AnimationScheduler::advance`] (explicit delta) from its
//! frame callback.

use crate::tween::{Timing, Tween};
use crate::values::Interpolate;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

new_key_type! {
    /// Handle to a registered tween clock
    pub struct TweenId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    tweens: SlotMap<TweenId, Tween>,
    last_frame: Instant,
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    // A panic mid-tick leaves clocks in a consistent state; keep going.
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The animation scheduler that ticks all registered tweens
///
/// Typically held by the application shell and shared with presentations
/// via [`SchedulerHandle`].
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Tick all tweens by the wall-clock time since the previous frame
    ///
    /// Returns true if any tweens are still active (need another tick).
    pub fn tick(&self) -> bool {
        let dt_ms = {
            let mut inner = lock(&self.inner);
            let now = Instant::now();
            let dt = (now - inner.last_frame).as_secs_f32() * 1000.0;
            inner.last_frame = now;
            dt
        };
        self.step(dt_ms)
    }

    /// Tick all tweens by an explicit delta (in milliseconds)
    ///
    /// Deterministic alternative to [`tick`](Self::tick) for hosts with their
    /// own frame clock, and for tests.
    pub fn advance(&self, dt_ms: f32) -> bool {
        lock(&self.inner).last_frame = Instant::now();
        self.step(dt_ms)
    }

    fn step(&self, dt_ms: f32) -> bool {
        let mut inner = lock(&self.inner);

        for (_, tween) in inner.tweens.iter_mut() {
            tween.tick(dt_ms);
        }

        // Finished clocks stay registered until their owner drops, so a
        // finished AnimatedTween can still be sampled and retargeted.
        inner.tweens.iter().any(|(_, t)| t.is_playing())
    }

    /// Check if any tweens are still active
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner).tweens.iter().any(|(_, t)| t.is_playing())
    }

    /// Get the number of registered tweens
    pub fn tween_count(&self) -> usize {
        lock(&self.inner).tweens.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Sampled state of one registered tween
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSample {
    /// Progress mapped through the easing curve
    pub eased: f32,
    pub playing: bool,
    pub delayed: bool,
    pub finished: bool,
}

/// A weak handle to the animation scheduler
///
/// This is passed to components that need to register animations.
/// It won't prevent the scheduler from being dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a tween and return its ID
    pub fn register_tween(&self, tween: Tween) -> Option<TweenId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = lock(&inner);
            // Prevent a huge first dt for clocks registered after an idle period
            guard.last_frame = Instant::now();
            guard.tweens.insert(tween)
        })
    }

    /// Apply a function to a registered tween
    pub fn with_tween_mut<F, R>(&self, id: TweenId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Tween) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).tweens.get_mut(id).map(f))
    }

    /// Sample a registered tween
    pub fn sample(&self, id: TweenId) -> Option<TweenSample> {
        self.inner.upgrade().and_then(|inner| {
            lock(&inner).tweens.get(id).map(|t| TweenSample {
                eased: t.eased_progress(),
                playing: t.is_playing(),
                delayed: t.is_delayed(),
                finished: t.is_finished(),
            })
        })
    }

    /// Remove a tween
    pub fn remove_tween(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).tweens.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// ============================================================================
// Animated Tween
// ============================================================================

/// A typed value animated by a scheduler-owned clock
///
/// Each call to [`animate_to`](Self::animate_to) starts from the value
/// currently on screen, so retargeting mid-flight never jumps. Once the clock
/// finishes, [`get`](Self::get) returns the target itself rather than an
/// interpolated approximation of it.
///
/// # Example
///
/// ```
/// use easenote_animation::{AnimatedTween, AnimationScheduler, Timing};
///
/// let scheduler = AnimationScheduler::new();
/// let mut opacity = AnimatedTween::new(scheduler.handle(), 0.0_f32);
///
/// opacity.animate_to(1.0, Timing::linear(100));
/// scheduler.advance(50.0);
/// assert!((opacity.get() - 0.5).abs() < 1e-6);
///
/// scheduler.advance(50.0);
/// assert_eq!(opacity.get(), 1.0);
/// ```
pub struct AnimatedTween<T: Interpolate> {
    handle: SchedulerHandle,
    tween_id: Option<TweenId>,
    from: T,
    target: T,
}

impl<T: Interpolate> AnimatedTween<T> {
    /// Create an animated value resting at `initial`
    pub fn new(handle: SchedulerHandle, initial: T) -> Self {
        // Don't register until there is something to animate
        Self {
            handle,
            tween_id: None,
            from: initial.clone(),
            target: initial,
        }
    }

    /// Animate from the current value to `target`
    pub fn animate_to(&mut self, target: T, timing: Timing) {
        self.retarget(target, timing, None);
    }

    /// Animate to `target`, starting once `delay_ms` has passed
    ///
    /// If a previous delay is still pending it is replaced by `delay_ms`.
    pub fn animate_to_after(&mut self, target: T, timing: Timing, delay_ms: f32) {
        self.retarget(target, timing, Some(delay_ms));
    }

    fn retarget(&mut self, target: T, timing: Timing, delay_ms: Option<f32>) {
        self.from = self.get();
        self.target = target;

        if let Some(id) = self.tween_id {
            let restarted = self.handle.with_tween_mut(id, |tween| match delay_ms {
                Some(delay) => {
                    *tween = Tween::new(timing);
                    tween.start_after(delay);
                }
                None => tween.restart(timing),
            });
            if restarted.is_some() {
                return;
            }
            self.tween_id = None;
        }

        let mut tween = Tween::new(timing);
        tween.start_after(delay_ms.unwrap_or(0.0));
        match self.handle.register_tween(tween) {
            Some(id) => self.tween_id = Some(id),
            None => {
                // Nothing will ever tick this value again
                tracing::debug!("AnimatedTween: scheduler gone, snapping to target");
                self.from = self.target.clone();
            }
        }
    }

    /// Get the current animated value
    pub fn get(&self) -> T {
        let Some(id) = self.tween_id else {
            return self.from.clone();
        };
        match self.handle.sample(id) {
            Some(sample) if sample.finished => self.target.clone(),
            Some(sample) => self.from.lerp(&self.target, sample.eased),
            None => self.target.clone(),
        }
    }

    /// Check if currently animating (including a pending start delay)
    pub fn is_animating(&self) -> bool {
        self.tween_id
            .and_then(|id| self.handle.sample(id))
            .map(|s| s.playing)
            .unwrap_or(false)
    }

    /// Check if the start delay is still pending
    pub fn is_delayed(&self) -> bool {
        self.tween_id
            .and_then(|id| self.handle.sample(id))
            .map(|s| s.delayed)
            .unwrap_or(false)
    }

    /// Get the current target value
    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<T: Interpolate> Drop for AnimatedTween<T> {
    fn drop(&mut self) {
        if let Some(id) = self.tween_id {
            self.handle.remove_tween(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use easenote_core::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_scheduler_advance() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let mut tween = Tween::new(Timing::linear(100));
        tween.start();
        let id = handle.register_tween(tween).unwrap();

        assert!(scheduler.advance(50.0));
        let sample = handle.sample(id).unwrap();
        assert!((sample.eased - 0.5).abs() < 1e-6);

        assert!(!scheduler.advance(50.0));
        assert!(handle.sample(id).unwrap().finished);
    }

    #[test]
    fn test_animated_tween() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedTween::new(scheduler.handle(), 0.0_f32);

        assert_eq!(value.get(), 0.0);
        assert!(!value.is_animating());
        assert_eq!(scheduler.tween_count(), 0);

        value.animate_to(100.0, Timing::linear(1000));
        assert!(value.is_animating());
        assert_eq!(scheduler.tween_count(), 1);

        scheduler.advance(250.0);
        assert!((value.get() - 25.0).abs() < 1e-4);

        scheduler.advance(1000.0);
        assert!(!value.is_animating());
        assert_eq!(value.get(), 100.0);
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedTween::new(scheduler.handle(), Vec2::ZERO);

        value.animate_to(Vec2::new(100.0, 0.0), Timing::linear(100));
        scheduler.advance(50.0);
        let midpoint = value.get();
        assert!((midpoint.x - 50.0).abs() < 1e-4);

        // Retarget: value must not jump back to the start
        value.animate_to(Vec2::new(0.0, 100.0), Timing::linear(100));
        assert!(value.get().approx_eq(&midpoint, 1e-4));
        assert_eq!(scheduler.tween_count(), 1);

        scheduler.advance(100.0);
        assert_eq!(value.get(), Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_delayed_start_holds_value() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedTween::new(scheduler.handle(), 10.0_f32);

        value.animate_to_after(20.0, Timing::linear(100), 50.0);
        assert!(value.is_delayed());
        assert!(value.is_animating());

        scheduler.advance(40.0);
        assert_eq!(value.get(), 10.0);

        // Retarget during the delay: the remaining delay still applies
        value.animate_to(30.0, Timing::linear(100));
        scheduler.advance(5.0);
        assert!(value.is_delayed());
        assert_eq!(value.get(), 10.0);

        scheduler.advance(105.0);
        assert_eq!(value.get(), 30.0);
    }

    #[test]
    fn test_finished_value_is_exact_target() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedTween::new(scheduler.handle(), 0.1_f32);

        let target = -800.0 + (44.0 + 80.5);
        value.animate_to(target, Timing::new(500, Easing::EaseInOut));
        for _ in 0..40 {
            scheduler.advance(1000.0 / 60.0);
        }
        assert_eq!(value.get().to_bits(), target.to_bits());
    }

    proptest! {
        #[test]
        fn prop_settles_on_exact_target(
            start in -2000.0f32..2000.0,
            target in -2000.0f32..2000.0,
            duration_ms in 0u32..2000,
            delay_ms in 0.0f32..300.0,
            deltas in proptest::collection::vec(0.5f32..50.0, 1..16),
        ) {
            let scheduler = AnimationScheduler::new();
            let mut value = AnimatedTween::new(scheduler.handle(), start);
            value.animate_to_after(target, Timing::new(duration_ms, Easing::EaseInOut), delay_ms);

            let (lo, hi) = if start <= target { (start, target) } else { (target, start) };
            let mut frames = 0;
            while value.is_animating() && frames < 10_000 {
                scheduler.advance(deltas[frames % deltas.len()]);
                let current = value.get();
                prop_assert!(current >= lo - 1e-2 && current <= hi + 1e-2);
                frames += 1;
            }

            prop_assert!(!value.is_animating());
            prop_assert_eq!(value.get().to_bits(), target.to_bits());
            prop_assert_eq!(scheduler.tween_count(), 1);
        }
    }

    #[test]
    fn test_drop_removes_clock() {
        let scheduler = AnimationScheduler::new();
        {
            let mut value = AnimatedTween::new(scheduler.handle(), 0.0_f32);
            value.animate_to(1.0, Timing::linear(100));
            assert_eq!(scheduler.tween_count(), 1);
        }
        assert_eq!(scheduler.tween_count(), 0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        assert!(!handle.is_alive());
        assert!(handle.register_tween(Tween::new(Timing::default())).is_none());

        // Values created against a dead scheduler settle immediately
        let mut value = AnimatedTween::new(handle, 0.0_f32);
        value.animate_to(3.0, Timing::default());
        assert_eq!(value.get(), 3.0);
        assert!(!value.is_animating());
    }
}
