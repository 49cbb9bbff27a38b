//! EaseNote Application Shell
//!
//! Wires the auth gate, the animation scheduler and the screen presentations
//! together behind a platform event handler.
//!
//! # Example
//!
//! ```rust
//! use easenote_app::{AppConfig, Shell};
//! use easenote_auth::{ActiveScreen, LocalIdentityProvider, SignInConfig, UserRecord};
//! use easenote_platform::{EdgeInsets, Event, Geometry, LifecycleEvent};
//! use easenote_splash::Composition;
//!
//! let config = AppConfig {
//!     auth: SignInConfig::new("client.apps.example.com"),
//!     ..AppConfig::default()
//! };
//! let provider = LocalIdentityProvider::with_account(UserRecord::new("u-1"));
//! let geometry = Geometry::new(400.0, 800.0, EdgeInsets::ZERO).unwrap();
//! let mut shell = Shell::new(&config, provider, geometry, Vec::<Composition>::new()).unwrap();
//!
//! shell.handle_event(&Event::Lifecycle(LifecycleEvent::Ready)).unwrap();
//! assert_eq!(shell.active_screen(), Some(ActiveScreen::SignIn));
//!
//! shell.sign_in();
//! shell.handle_event(&Event::Frame { dt_ms: 16.0 }).unwrap();
//! assert_eq!(shell.active_screen(), Some(ActiveScreen::Home));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod shell;

pub use config::{AppConfig, EasingName, LoggingConfig, SplashConfig};
pub use error::{AppError, Result};
pub use presenter::TracingPresenter;
pub use shell::{Mounted, Shell};
