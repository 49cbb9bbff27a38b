//! Application shell
//!
//! Owns the animation scheduler, the auth gate and whichever presentation
//! the gate says is active. The host feeds it platform events; the shell
//! advances the scheduler once per frame, drains the auth-state stream and
//! swaps presentations on gate transitions.

use crate::config::AppConfig;
use crate::error::Result;
use easenote_animation::{presets, AnimationScheduler, Timing};
use easenote_auth::{ActiveScreen, AuthGate, IdentityProvider};
use easenote_platform::{ControlFlow, Event, Geometry, LifecycleEvent, WindowEvent};
use easenote_splash::{OnboardingPresentation, Presenter, SplashCoordinator, SplashSettings};

/// The presentation currently mounted
pub enum Mounted<R: Presenter> {
    /// Host not ready yet; nothing is drawn
    Idle(R),
    SignIn(OnboardingPresentation<R>),
    Home(SplashCoordinator<R>),
}

impl<R: Presenter> Mounted<R> {
    fn unmount(self) -> R {
        match self {
            Mounted::Idle(presenter) => presenter,
            Mounted::SignIn(intro) => intro.unmount(),
            Mounted::Home(splash) => splash.unmount(),
        }
    }

    fn presenter(&self) -> &R {
        match self {
            Mounted::Idle(presenter) => presenter,
            Mounted::SignIn(intro) => intro.presenter(),
            Mounted::Home(splash) => splash.presenter(),
        }
    }

    fn screen(&self) -> Option<ActiveScreen> {
        match self {
            Mounted::Idle(_) => None,
            Mounted::SignIn(_) => Some(ActiveScreen::SignIn),
            Mounted::Home(_) => Some(ActiveScreen::Home),
        }
    }
}

/// Application shell
pub struct Shell<P: IdentityProvider, R: Presenter> {
    scheduler: AnimationScheduler,
    gate: AuthGate<P>,
    splash_settings: SplashSettings,
    intro_timing: Timing,
    geometry: Geometry,
    ready: bool,
    // Only `None` while swapping presentations
    mounted: Option<Mounted<R>>,
}

impl<P: IdentityProvider, R: Presenter> Shell<P, R> {
    /// Create the shell and subscribe the gate to `provider`
    pub fn new(config: &AppConfig, provider: P, geometry: Geometry, presenter: R) -> Result<Self> {
        let gate = AuthGate::new(config.auth.clone(), provider)?;

        Ok(Self {
            scheduler: AnimationScheduler::new(),
            gate,
            splash_settings: config.splash.settings(),
            intro_timing: presets::onboarding_intro(),
            geometry,
            ready: false,
            mounted: Some(Mounted::Idle(presenter)),
        })
    }

    /// Handle one platform event
    ///
    /// Invalid geometry from the host is returned as an error.
    pub fn handle_event(&mut self, event: &Event) -> Result<ControlFlow> {
        match event {
            Event::Lifecycle(LifecycleEvent::Ready) => {
                if !self.ready {
                    self.ready = true;
                    self.gate.poll();
                    tracing::info!("host ready");
                    self.mount(self.gate.active_screen());
                }
            }
            Event::Lifecycle(lifecycle) => {
                tracing::debug!(?lifecycle, "lifecycle");
            }
            Event::Window(WindowEvent::Resized { width, height }) => {
                let geometry = self.geometry.with_viewport(*width, *height)?;
                self.set_geometry(geometry);
            }
            Event::Window(WindowEvent::SafeAreaChanged(insets)) => {
                let geometry = self.geometry.with_insets(*insets)?;
                self.set_geometry(geometry);
            }
            Event::Window(WindowEvent::CloseRequested) => {
                tracing::info!("close requested");
                return Ok(ControlFlow::Exit);
            }
            Event::Frame { dt_ms } => self.frame(*dt_ms),
        }
        Ok(ControlFlow::Continue)
    }

    fn frame(&mut self, dt_ms: f32) {
        self.scheduler.advance(dt_ms);

        if let Some(transition) = self.gate.poll() {
            if self.ready {
                self.mount(transition.to.screen());
            }
        }

        match self.mounted.as_mut() {
            Some(Mounted::SignIn(intro)) => {
                intro.on_frame();
            }
            Some(Mounted::Home(splash)) => {
                splash.on_frame();
            }
            Some(Mounted::Idle(_)) | None => {}
        }
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        match self.mounted.as_mut() {
            Some(Mounted::SignIn(intro)) => {
                intro.set_geometry(geometry);
            }
            Some(Mounted::Home(splash)) => {
                splash.set_geometry(geometry);
            }
            Some(Mounted::Idle(_)) | None => {}
        }
    }

    /// Replace the mounted presentation with a fresh mount of `screen`
    fn mount(&mut self, screen: ActiveScreen) {
        let Some(previous) = self.mounted.take() else {
            return;
        };
        let presenter = previous.unmount();
        let handle = self.scheduler.handle();

        self.mounted = Some(match screen {
            ActiveScreen::SignIn => Mounted::SignIn(OnboardingPresentation::mount(
                handle,
                self.geometry,
                self.intro_timing,
                presenter,
            )),
            ActiveScreen::Home => Mounted::Home(SplashCoordinator::mount(
                handle,
                self.geometry,
                self.splash_settings,
                presenter,
            )),
        });
        tracing::info!(?screen, "mounted");
    }

    /// Forward the rendered title height to the mounted presentation
    ///
    /// Returns true if the measurement was taken.
    pub fn report_title_height(&mut self, height: f32) -> bool {
        match self.mounted.as_mut() {
            Some(Mounted::SignIn(intro)) if !intro.measured().is_known() => {
                intro.report_title_height(height)
            }
            Some(Mounted::Home(splash)) if !splash.measured().is_known() => {
                splash.report_title_height(height);
                splash.measured().is_known()
            }
            _ => false,
        }
    }

    /// Start a sign-in; the result arrives through the auth-state stream
    ///
    /// Returns false if the attempt failed (already logged by the gate).
    pub fn sign_in(&mut self) -> bool {
        self.gate.sign_in().is_ok()
    }

    /// Logout action of the home screen
    ///
    /// Returns true if the sign-in screen was mounted. A failed sign-out is
    /// logged by the gate and leaves the home screen in place.
    pub fn logout(&mut self) -> bool {
        match self.gate.sign_out() {
            Ok(Some(transition)) => {
                if self.ready {
                    self.mount(transition.to.screen());
                }
                true
            }
            Ok(None) | Err(_) => false,
        }
    }

    /// The mounted screen, `None` until the host is ready
    pub fn active_screen(&self) -> Option<ActiveScreen> {
        self.mounted.as_ref().and_then(Mounted::screen)
    }

    pub fn splash(&self) -> Option<&SplashCoordinator<R>> {
        match self.mounted.as_ref() {
            Some(Mounted::Home(splash)) => Some(splash),
            _ => None,
        }
    }

    pub fn onboarding(&self) -> Option<&OnboardingPresentation<R>> {
        match self.mounted.as_ref() {
            Some(Mounted::SignIn(intro)) => Some(intro),
            _ => None,
        }
    }

    pub fn presenter(&self) -> Option<&R> {
        self.mounted.as_ref().map(Mounted::presenter)
    }

    pub fn gate(&self) -> &AuthGate<P> {
        &self.gate
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use easenote_auth::{LocalIdentityProvider, SignInConfig, UserRecord};
    use easenote_core::EdgeInsets;
    use easenote_splash::{Composition, Element, TransformTarget};

    const FRAME: Event = Event::Frame {
        dt_ms: 1000.0 / 60.0,
    };

    fn phone() -> Geometry {
        Geometry::new(400.0, 800.0, EdgeInsets::new(44.0, 34.0, 0.0, 0.0)).unwrap()
    }

    fn config() -> AppConfig {
        AppConfig {
            auth: SignInConfig::new("client.apps.example.com"),
            ..AppConfig::default()
        }
    }

    fn shell(provider: &LocalIdentityProvider) -> Shell<LocalIdentityProvider, Vec<Composition>> {
        Shell::new(&config(), provider.clone(), phone(), Vec::new()).unwrap()
    }

    fn frames(shell: &mut Shell<LocalIdentityProvider, Vec<Composition>>, n: usize) {
        for _ in 0..n {
            shell.handle_event(&FRAME).unwrap();
        }
    }

    #[test]
    fn test_nothing_mounted_before_ready() {
        let provider = LocalIdentityProvider::new();
        let mut shell = shell(&provider);
        frames(&mut shell, 10);
        assert_eq!(shell.active_screen(), None);
        assert!(shell.presenter().unwrap().is_empty());

        shell
            .handle_event(&Event::Lifecycle(LifecycleEvent::Ready))
            .unwrap();
        assert_eq!(shell.active_screen(), Some(ActiveScreen::SignIn));
        frames(&mut shell, 1);
        assert_eq!(shell.presenter().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_client_id_is_an_error() {
        let result = Shell::new(
            &AppConfig::default(),
            LocalIdentityProvider::new(),
            phone(),
            Vec::<Composition>::new(),
        );
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn test_user_event_mounts_home() {
        let provider = LocalIdentityProvider::new();
        let mut shell = shell(&provider);
        shell
            .handle_event(&Event::Lifecycle(LifecycleEvent::Ready))
            .unwrap();

        provider.emit(None);
        frames(&mut shell, 1);
        assert_eq!(shell.active_screen(), Some(ActiveScreen::SignIn));

        provider.emit(Some(UserRecord::new("u-1")));
        frames(&mut shell, 1);
        assert_eq!(shell.active_screen(), Some(ActiveScreen::Home));

        let last = shell.presenter().unwrap().last().unwrap();
        assert!(last.screen_bounds(Element::HomeSurface).is_some());
        assert!(last.screen_bounds(Element::SignInSurface).is_none());
    }

    #[test]
    fn test_logout_remounts_fresh_splash() {
        let provider = LocalIdentityProvider::with_account(UserRecord::new("u-1"));
        let mut shell = shell(&provider);
        shell
            .handle_event(&Event::Lifecycle(LifecycleEvent::Ready))
            .unwrap();
        assert!(shell.sign_in());
        frames(&mut shell, 60);
        assert!(!shell.splash().unwrap().is_in_flight());

        assert!(shell.logout());
        assert_eq!(shell.active_screen(), Some(ActiveScreen::SignIn));
        // The trailing null from the provider changes nothing
        frames(&mut shell, 1);
        assert_eq!(shell.active_screen(), Some(ActiveScreen::SignIn));

        assert!(shell.sign_in());
        frames(&mut shell, 1);
        let splash = shell.splash().unwrap();
        let defaults = TransformTarget::initial(&phone());
        assert_eq!(splash.snapshot().logo_scale.current, defaults.logo_scale);
        assert_eq!(splash.snapshot().content_offset_y.current, defaults.content_offset_y);
    }

    #[test]
    fn test_failed_logout_keeps_home() {
        let provider = LocalIdentityProvider::with_account(UserRecord::new("u-1"));
        let mut shell = shell(&provider);
        shell
            .handle_event(&Event::Lifecycle(LifecycleEvent::Ready))
            .unwrap();
        shell.sign_in();
        frames(&mut shell, 1);

        provider.fail_next_sign_out("network down");
        assert!(!shell.logout());
        assert_eq!(shell.active_screen(), Some(ActiveScreen::Home));
    }

    #[test]
    fn test_resize_reaches_splash() {
        let provider = LocalIdentityProvider::with_account(UserRecord::new("u-1"));
        let mut shell = shell(&provider);
        shell
            .handle_event(&Event::Lifecycle(LifecycleEvent::Ready))
            .unwrap();
        shell.sign_in();
        frames(&mut shell, 10);

        shell
            .handle_event(&Event::Window(WindowEvent::Resized {
                width: 800.0,
                height: 400.0,
            }))
            .unwrap();
        assert_eq!(shell.splash().unwrap().geometry().viewport_width(), 800.0);
        assert_eq!(shell.geometry().inset_top(), 44.0);
        assert_eq!(shell.splash().unwrap().retrigger_count(), 2);
    }

    #[test]
    fn test_invalid_geometry_fails_fast() {
        let provider = LocalIdentityProvider::new();
        let mut shell = shell(&provider);
        let result = shell.handle_event(&Event::Window(WindowEvent::Resized {
            width: 0.0,
            height: 800.0,
        }));
        assert!(matches!(result, Err(AppError::Platform(_))));
        assert_eq!(shell.geometry(), &phone());
    }

    #[test]
    fn test_title_report_forwarded_once() {
        let provider = LocalIdentityProvider::with_account(UserRecord::new("u-1"));
        let mut shell = shell(&provider);
        shell
            .handle_event(&Event::Lifecycle(LifecycleEvent::Ready))
            .unwrap();
        shell.sign_in();
        frames(&mut shell, 1);

        assert!(shell.report_title_height(28.0));
        assert!(!shell.report_title_height(28.0));
        assert_eq!(shell.splash().unwrap().measured().title_height(), Some(28.0));
    }

    #[test]
    fn test_close_requested_exits() {
        let provider = LocalIdentityProvider::new();
        let mut shell = shell(&provider);
        let flow = shell
            .handle_event(&Event::Window(WindowEvent::CloseRequested))
            .unwrap();
        assert_eq!(flow, ControlFlow::Exit);
    }
}
