//! Animation presets
//!
//! Named timings for the app's transitions, so every call site that runs the
//! same transition shares one duration and curve.

use crate::easing::Easing;
use crate::tween::Timing;

/// Named transition timings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationPreset {
    /// Full-screen splash collapsing into the docked header
    SplashCollapse,
    /// Sign-in hero band shrinking while the form slides in
    OnboardingIntro,
    /// Slow opacity ramp for content that appears under a transition
    FadeIn,
}

impl AnimationPreset {
    pub fn timing(self) -> Timing {
        match self {
            AnimationPreset::SplashCollapse => Timing::new(500, Easing::EaseInOut),
            AnimationPreset::OnboardingIntro => Timing::new(500, Easing::EaseInOut),
            AnimationPreset::FadeIn => Timing::new(3000, Easing::EaseInOut),
        }
    }
}

/// Timing for the splash collapse
pub fn splash_collapse() -> Timing {
    AnimationPreset::SplashCollapse.timing()
}

/// Timing for the sign-in intro
pub fn onboarding_intro() -> Timing {
    AnimationPreset::OnboardingIntro.timing()
}

/// Timing for a fade-in
pub fn fade_in() -> Timing {
    AnimationPreset::FadeIn.timing()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_is_slow() {
        assert_eq!(fade_in().duration_ms, 3000);
        assert!(fade_in().duration_ms > splash_collapse().duration_ms);
    }

    #[test]
    fn test_splash_uses_default_timing() {
        assert_eq!(splash_collapse(), Timing::default());
        assert_eq!(onboarding_intro(), Timing::default());
    }
}
