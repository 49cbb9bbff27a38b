//! Sign-in intro transition
//!
//! When the sign-in screen mounts, the full-height brand band shrinks to a
//! hero band, logo and title drift down inside it, and the sign-in form
//! slides up from below the fold while fading in. Runs through the same
//! scheduler as the splash and re-targets on geometry change.

use crate::composer::{logo_bounds, title_bounds, Composition, Element, ElementNode, Layer, LayerKind, Presenter};
use crate::measurement::{MeasuredContent, ReportOutcome};
use crate::transform::{LOGO_SIZE, LOGO_TITLE_GAP};
use easenote_animation::{presets, AnimatedTween, Interpolate, SchedulerHandle, Timing};
use easenote_core::{Affine2D, Point, Rect};
use easenote_platform::Geometry;

/// Hero band stacks below the form
pub const HERO_Z_INDEX: i32 = 0;

/// Sign-in form stacks above the hero band
pub const FORM_Z_INDEX: i32 = 1;

/// Animated quantities of the sign-in intro
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OnboardingTarget {
    /// Height of the brand band at the top of the screen
    pub hero_height: f32,
    /// Logo vertical translation within the band
    pub logo_offset_y: f32,
    /// Title vertical translation within the band
    pub title_offset_y: f32,
    /// Vertical translation of the sign-in form
    pub content_offset_y: f32,
}

impl OnboardingTarget {
    /// Mount-time state: band fills the screen, form below the fold
    pub fn initial(geometry: &Geometry) -> Self {
        let height = geometry.viewport_height();
        Self {
            hero_height: height,
            logo_offset_y: 0.0,
            title_offset_y: 0.0,
            content_offset_y: height,
        }
    }
}

impl Interpolate for OnboardingTarget {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            hero_height: self.hero_height.lerp(&other.hero_height, t),
            logo_offset_y: self.logo_offset_y.lerp(&other.logo_offset_y, t),
            title_offset_y: self.title_offset_y.lerp(&other.title_offset_y, t),
            content_offset_y: self.content_offset_y.lerp(&other.content_offset_y, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.hero_height.approx_eq(&other.hero_height, epsilon)
            && self.logo_offset_y.approx_eq(&other.logo_offset_y, epsilon)
            && self.title_offset_y.approx_eq(&other.title_offset_y, epsilon)
            && self.content_offset_y.approx_eq(&other.content_offset_y, epsilon)
    }
}

/// End state of the intro for `geometry`
///
/// The band keeps half the screen when the viewport is strictly taller than
/// wide, and two thirds otherwise (landscape and square), where the form
/// needs less vertical room.
pub fn onboarding_target(geometry: &Geometry) -> OnboardingTarget {
    let height = geometry.viewport_height();
    let hero_height = if geometry.viewport_width() < height {
        height / 2.0
    } else {
        2.0 * height / 3.0
    };

    OnboardingTarget {
        hero_height,
        logo_offset_y: height / 12.0,
        title_offset_y: height / 12.0,
        content_offset_y: 0.0,
    }
}

/// Compose the sign-in screen for the current values
pub fn compose_onboarding(
    geometry: &Geometry,
    values: &OnboardingTarget,
    opacity: f32,
    measured: &MeasuredContent,
) -> Composition {
    let width = geometry.viewport_width();
    let height = geometry.viewport_height();
    let left = geometry.inset_left();
    let safe_width = (width - left - geometry.inset_right()).max(0.0);
    let title_height = measured.title_height_or_fallback();

    // Logo, gap and title form one column centered in the band
    let hero = Rect::new(left, 0.0, safe_width, values.hero_height.max(0.0));
    let column_top = hero.center().y - (LOGO_SIZE + LOGO_TITLE_GAP + title_height) / 2.0;

    let logo_center = Point::new(hero.center().x, column_top + LOGO_SIZE / 2.0);
    let logo = ElementNode::new(Element::Logo, logo_bounds(logo_center))
        .with_motion(0.0, values.logo_offset_y, 1.0);

    let title_rect = title_bounds(safe_width, column_top + LOGO_SIZE + LOGO_TITLE_GAP, title_height)
        .offset(left, 0.0);
    let title = ElementNode::new(Element::Title, title_rect).with_motion(0.0, values.title_offset_y, 1.0);

    let hero_layer = Layer {
        kind: LayerKind::Header,
        z_index: HERO_Z_INDEX,
        bounds: hero,
        transform: Affine2D::IDENTITY,
        opacity: 1.0,
        nodes: vec![logo, title],
    };

    let form = Rect::new(
        left,
        hero.height(),
        safe_width,
        (height - geometry.inset_bottom() - hero.height()).max(0.0),
    );
    let form_layer = Layer {
        kind: LayerKind::Content,
        z_index: FORM_Z_INDEX,
        bounds: form,
        transform: Affine2D::translation(0.0, values.content_offset_y),
        opacity: opacity.clamp(0.0, 1.0),
        nodes: vec![ElementNode::new(Element::SignInSurface, form)],
    };

    Composition::new(geometry.viewport(), vec![hero_layer, form_layer])
}

/// Sign-in intro for one mount of the sign-in screen
pub struct OnboardingPresentation<R: Presenter> {
    presenter: R,
    values: AnimatedTween<OnboardingTarget>,
    opacity: AnimatedTween<f32>,
    timing: Timing,
    geometry: Geometry,
    measured: MeasuredContent,
    dirty: bool,
    frames_presented: u64,
}

impl<R: Presenter> OnboardingPresentation<R> {
    /// Mount and start the intro immediately
    pub fn mount(handle: SchedulerHandle, geometry: Geometry, timing: Timing, presenter: R) -> Self {
        let mut values = AnimatedTween::new(handle.clone(), OnboardingTarget::initial(&geometry));
        values.animate_to(onboarding_target(&geometry), timing);

        let mut opacity = AnimatedTween::new(handle, 0.0_f32);
        opacity.animate_to(1.0, presets::fade_in());

        tracing::debug!(orientation = ?geometry.orientation(), "sign-in intro mounted");

        Self {
            presenter,
            values,
            opacity,
            timing,
            geometry,
            measured: MeasuredContent::unknown(),
            dirty: true,
            frames_presented: 0,
        }
    }

    /// New viewport / safe-area snapshot
    ///
    /// Returns true if the intro was re-targeted.
    pub fn set_geometry(&mut self, geometry: Geometry) -> bool {
        if geometry == self.geometry {
            return false;
        }
        self.geometry = geometry;
        // Insets only move the layout, not the animated quantities
        self.dirty = true;

        let target = onboarding_target(&geometry);
        if target == *self.values.target() {
            return false;
        }
        self.values.animate_to(target, self.timing);
        true
    }

    /// The rendered title's height; accepted once per mount
    pub fn report_title_height(&mut self, height: f32) -> bool {
        let accepted = self.measured.report(height) == ReportOutcome::Accepted;
        if accepted {
            self.dirty = true;
        }
        accepted
    }

    /// Per-frame callback, after the scheduler has advanced
    ///
    /// Returns true if a frame was presented.
    pub fn on_frame(&mut self) -> bool {
        let in_flight = self.is_in_flight();
        if !in_flight && !self.dirty {
            return false;
        }

        let composition = self.composition();
        self.presenter.present(&composition);
        self.frames_presented += 1;
        self.dirty = in_flight;
        true
    }

    pub fn composition(&self) -> Composition {
        compose_onboarding(&self.geometry, &self.values.get(), self.opacity.get(), &self.measured)
    }

    /// Tear down and hand the presenter back
    pub fn unmount(self) -> R {
        tracing::debug!(frames = self.frames_presented, "sign-in intro unmounted");
        self.presenter
    }

    pub fn is_in_flight(&self) -> bool {
        self.values.is_animating() || self.opacity.is_animating()
    }

    pub fn current(&self) -> OnboardingTarget {
        self.values.get()
    }

    /// Current opacity of the sign-in form
    pub fn opacity(&self) -> f32 {
        self.opacity.get()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn measured(&self) -> &MeasuredContent {
        &self.measured
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn presenter(&self) -> &R {
        &self.presenter
    }
}
