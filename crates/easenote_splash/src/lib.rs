//! EaseNote Splash Transition
//!
//! Collapses the full-screen brand splash into a docked header while the
//! home content slides up underneath it, for any viewport, safe area and
//! orientation, and before the title's rendered height is known.
//!
//! # Pipeline
//!
//! ```text
//! Geometry ─┐
//!           ├─> compute_target ─> SplashDriver ─> compose ─> Presenter
//! Measured ─┘        (pure)        (one clock)    (2 layers)
//! ```
//!
//! [`SplashCoordinator`] owns one pass through this pipeline per mount.
//! [`OnboardingPresentation`] runs the sign-in screen's intro the same way.
//!
//! # Example
//!
//! ```rust
//! use easenote_animation::AnimationScheduler;
//! use easenote_platform::{EdgeInsets, Geometry};
//! use easenote_splash::{Composition, SplashCoordinator, SplashSettings};
//!
//! let scheduler = AnimationScheduler::new();
//! let geometry = Geometry::new(400.0, 800.0, EdgeInsets::new(44.0, 34.0, 0.0, 0.0)).unwrap();
//! let mut splash = SplashCoordinator::mount(
//!     scheduler.handle(),
//!     geometry,
//!     SplashSettings::default(),
//!     Vec::<Composition>::new(),
//! );
//!
//! // Host frame loop
//! for _ in 0..60 {
//!     scheduler.advance(1000.0 / 60.0);
//!     splash.on_frame();
//! }
//! assert!(!splash.is_in_flight());
//! assert_eq!(splash.snapshot().logo_scale.current, 0.3);
//! ```

pub mod composer;
pub mod coordinator;
pub mod driver;
pub mod measurement;
pub mod onboarding;
pub mod transform;

pub use composer::{compose, Composition, Element, ElementNode, Layer, LayerKind, Presenter};
pub use coordinator::SplashCoordinator;
pub use driver::{AnimationState, DriverSnapshot, SplashDriver, SplashSettings};
pub use measurement::{MeasuredContent, ReportOutcome};
pub use onboarding::{compose_onboarding, onboarding_target, OnboardingPresentation, OnboardingTarget};
pub use transform::{compute_target, TransformTarget};
