//! Splash coordinator
//!
//! Wires the inputs (geometry, title measurement) through the transform
//! function into the driver, and the driver's live values through the
//! composer to a [`Presenter`]. One coordinator lives for one mount of the
//! docked-header + home presentation.

use crate::composer::{compose, Composition, Presenter};
use crate::driver::{DriverSnapshot, SplashDriver, SplashSettings};
use crate::measurement::{MeasuredContent, ReportOutcome};
use crate::transform::{compute_target, TransformTarget};
use easenote_animation::SchedulerHandle;
use easenote_platform::Geometry;

/// Splash-to-header transition for one mount
pub struct SplashCoordinator<R: Presenter> {
    presenter: R,
    driver: SplashDriver,
    geometry: Geometry,
    measured: MeasuredContent,
    /// A frame must be presented even if nothing is in flight
    dirty: bool,
    frames_presented: u64,
}

impl<R: Presenter> SplashCoordinator<R> {
    /// Mount at the full-screen splash state and schedule the first retrigger
    pub fn mount(
        handle: SchedulerHandle,
        geometry: Geometry,
        settings: SplashSettings,
        presenter: R,
    ) -> Self {
        let measured = MeasuredContent::unknown();
        let mut driver =
            SplashDriver::mount(handle, TransformTarget::initial(&geometry), settings);
        driver.retrigger(compute_target(&geometry, &measured));

        tracing::debug!(
            width = geometry.viewport_width(),
            height = geometry.viewport_height(),
            "splash mounted"
        );

        Self {
            presenter,
            driver,
            geometry,
            measured,
            dirty: true,
            frames_presented: 0,
        }
    }

    /// New viewport / safe-area snapshot
    ///
    /// Returns true if this caused a retrigger.
    pub fn set_geometry(&mut self, geometry: Geometry) -> bool {
        if geometry == self.geometry {
            return false;
        }
        self.geometry = geometry;
        self.recompute()
    }

    /// The rendered title's height, reported after its first layout
    ///
    /// Accepted once per mount. Returns true if this caused a retrigger.
    pub fn report_title_height(&mut self, height: f32) -> bool {
        match self.measured.report(height) {
            ReportOutcome::Accepted => self.recompute(),
            ReportOutcome::AlreadyMeasured | ReportOutcome::Invalid => false,
        }
    }

    /// Re-evaluate the transform with the latest inputs
    fn recompute(&mut self) -> bool {
        let target = compute_target(&self.geometry, &self.measured);
        if target == self.driver.target() {
            return false;
        }
        self.driver.retrigger(target);
        self.dirty = true;
        true
    }

    /// Per-frame callback, after the scheduler has advanced
    ///
    /// Presents a frame while anything is in flight, plus one final frame at
    /// the exact end state. Returns true if a frame was presented.
    pub fn on_frame(&mut self) -> bool {
        let in_flight = self.driver.is_in_flight();
        if !in_flight && !self.dirty {
            return false;
        }

        let composition = self.composition();
        self.presenter.present(&composition);
        self.frames_presented += 1;

        if !in_flight {
            tracing::debug!(frames = self.frames_presented, "splash settled");
        }
        self.dirty = in_flight;
        true
    }

    /// Compose the current values without presenting them
    pub fn composition(&self) -> Composition {
        compose(&self.geometry, &self.driver.current(), &self.measured)
    }

    /// Tear down and hand the presenter back
    ///
    /// Dropping the driver removes its clock, so nothing is presented after
    /// this.
    pub fn unmount(self) -> R {
        tracing::debug!(frames = self.frames_presented, "splash unmounted");
        self.presenter
    }

    pub fn snapshot(&self) -> DriverSnapshot {
        self.driver.snapshot()
    }

    pub fn is_in_flight(&self) -> bool {
        self.driver.is_in_flight()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn measured(&self) -> &MeasuredContent {
        &self.measured
    }

    pub fn retrigger_count(&self) -> u32 {
        self.driver.retrigger_count()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn presenter(&self) -> &R {
        &self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::{Element, LayerKind};
    use crate::transform::DOCKED_HEADER_HEIGHT;
    use easenote_animation::AnimationScheduler;
    use easenote_core::EdgeInsets;
    use proptest::prelude::*;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn phone() -> Geometry {
        Geometry::new(400.0, 800.0, EdgeInsets::new(44.0, 34.0, 0.0, 0.0)).unwrap()
    }

    fn frame(scheduler: &AnimationScheduler, splash: &mut SplashCoordinator<Vec<Composition>>) -> bool {
        scheduler.advance(FRAME_MS);
        splash.on_frame()
    }

    fn run_until_settled(
        scheduler: &AnimationScheduler,
        splash: &mut SplashCoordinator<Vec<Composition>>,
    ) {
        for _ in 0..600 {
            frame(scheduler, splash);
            if !splash.is_in_flight() {
                frame(scheduler, splash);
                return;
            }
        }
        panic!("splash never settled");
    }

    fn mount(scheduler: &AnimationScheduler, g: Geometry) -> SplashCoordinator<Vec<Composition>> {
        SplashCoordinator::mount(scheduler.handle(), g, SplashSettings::default(), Vec::new())
    }

    #[test]
    fn test_fallback_targets_on_mount() {
        let scheduler = AnimationScheduler::new();
        let splash = mount(&scheduler, phone());

        let snapshot = splash.snapshot();
        assert_eq!(snapshot.logo_scale.target, 0.3);
        assert_eq!(snapshot.title_scale.target, 0.8);
        assert_eq!(
            snapshot.header_offset_y.target,
            -800.0 + (44.0 + DOCKED_HEADER_HEIGHT)
        );
        assert_eq!(snapshot.logo_scale.current, 1.0);
        assert!(!splash.measured().is_known());
    }

    #[test]
    fn test_late_measurement_retargets_without_restart() {
        let scheduler = AnimationScheduler::new();
        let mut splash = mount(&scheduler, phone());
        for _ in 0..15 {
            frame(&scheduler, &mut splash);
        }

        let before = splash.snapshot();
        assert!(before.logo_scale.current < 1.0);

        assert!(splash.report_title_height(28.0));
        let after = splash.snapshot();
        assert_ne!(after.title_offset_y.target, before.title_offset_y.target);
        // No jump back to the full-size splash
        assert!((after.logo_scale.current - before.logo_scale.current).abs() < 1e-4);

        // Second report is ignored
        assert!(!splash.report_title_height(40.0));
        assert_eq!(splash.measured().title_height(), Some(28.0));

        run_until_settled(&scheduler, &mut splash);
        let target = compute_target(&phone(), &MeasuredContent::with_title_height(28.0));
        assert_eq!(splash.snapshot().current(), target);
    }

    #[test]
    fn test_rotation_mid_animation_converges_to_fresh_target() {
        let scheduler = AnimationScheduler::new();
        let mut splash = mount(&scheduler, phone());
        for _ in 0..12 {
            frame(&scheduler, &mut splash);
        }

        let rotated = phone().with_viewport(800.0, 400.0).unwrap();
        assert!(splash.set_geometry(rotated));
        run_until_settled(&scheduler, &mut splash);

        let fresh = compute_target(&rotated, &MeasuredContent::unknown());
        assert_eq!(splash.snapshot().current(), fresh);
        assert!(splash.snapshot().is_settled());
    }

    #[test]
    fn test_rotation_during_settle_delay_keeps_delay() {
        let scheduler = AnimationScheduler::new();
        let mut splash = mount(&scheduler, phone());
        scheduler.advance(50.0);

        let rotated = phone().with_viewport(800.0, 400.0).unwrap();
        splash.set_geometry(rotated);
        scheduler.advance(40.0);
        assert_eq!(splash.snapshot().logo_scale.current, 1.0);

        scheduler.advance(20.0);
        assert!(splash.snapshot().logo_scale.current < 1.0);
    }

    #[test]
    fn test_redundant_inputs_do_not_retrigger() {
        let scheduler = AnimationScheduler::new();
        let mut splash = mount(&scheduler, phone());
        assert_eq!(splash.retrigger_count(), 1);

        assert!(!splash.set_geometry(phone()));
        // A bottom-inset change does not move any docked quantity
        let keyboard = phone()
            .with_insets(EdgeInsets::new(44.0, 300.0, 0.0, 0.0))
            .unwrap();
        assert!(!splash.set_geometry(keyboard));
        assert_eq!(splash.retrigger_count(), 1);

        assert!(!splash.report_title_height(f32::NAN));
        // Measured height equal to the fallback: accepted, same target
        assert!(!splash.report_title_height(30.0));
        assert!(splash.measured().is_known());
        assert_eq!(splash.retrigger_count(), 1);
    }

    #[test]
    fn test_presents_while_in_flight_then_stops() {
        let scheduler = AnimationScheduler::new();
        let mut splash = mount(&scheduler, phone());

        run_until_settled(&scheduler, &mut splash);
        let presented = splash.frames_presented();
        assert!(presented > 1);

        // Terminal: no more notifications
        for _ in 0..10 {
            assert!(!frame(&scheduler, &mut splash));
        }
        assert_eq!(splash.frames_presented(), presented);

        let frames = splash.unmount();
        let last = frames.last().unwrap();
        let content = last.layer(LayerKind::Content).unwrap();
        assert_eq!(content.transform.elements[5], 0.0);
        assert!(last.screen_bounds(Element::Logo).is_some());
    }

    #[test]
    fn test_final_frame_is_exact_target() {
        let scheduler = AnimationScheduler::new();
        let mut splash = mount(&scheduler, phone());
        run_until_settled(&scheduler, &mut splash);

        let target = compute_target(&phone(), &MeasuredContent::unknown());
        let expected = compose(&phone(), &target, &MeasuredContent::unknown());
        let frames = splash.unmount();
        assert_eq!(frames.last(), Some(&expected));
    }

    #[test]
    fn test_unmount_releases_clock() {
        let scheduler = AnimationScheduler::new();
        let splash = mount(&scheduler, phone());
        assert_eq!(scheduler.tween_count(), 1);
        let frames = splash.unmount();
        assert!(frames.is_empty());
        assert_eq!(scheduler.tween_count(), 0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_remount_starts_from_defaults() {
        let scheduler = AnimationScheduler::new();
        let mut splash = mount(&scheduler, phone());
        run_until_settled(&scheduler, &mut splash);
        let presenter = splash.unmount();

        let remounted =
            SplashCoordinator::mount(scheduler.handle(), phone(), SplashSettings::default(), presenter);
        assert_eq!(remounted.snapshot().current(), TransformTarget::initial(&phone()));
        assert!(!remounted.measured().is_known());
    }

    fn geometry_strategy() -> impl Strategy<Value = Geometry> {
        (100.0f32..2000.0, 100.0f32..2000.0, 0.0f32..60.0, 0.0f32..60.0).prop_map(
            |(w, h, top, right)| Geometry::new(w, h, EdgeInsets::new(top, 0.0, 0.0, right)).unwrap(),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_converges_to_latest_inputs(
            changes in prop::collection::vec((geometry_strategy(), 0usize..40), 1..5),
            title in prop::option::of(0.0f32..80.0),
        ) {
            let scheduler = AnimationScheduler::new();
            let mut splash = mount(&scheduler, changes[0].0);

            for (geometry, frames) in &changes {
                splash.set_geometry(*geometry);
                for _ in 0..*frames {
                    frame(&scheduler, &mut splash);
                }
            }
            if let Some(height) = title {
                splash.report_title_height(height);
            }
            run_until_settled(&scheduler, &mut splash);

            let latest = changes[changes.len() - 1].0;
            let expected = compute_target(&latest, splash.measured());
            prop_assert_eq!(splash.snapshot().current(), expected);
            prop_assert!(!splash.is_in_flight());
        }
    }
}
