//! EaseNote Auth Gate
//!
//! Chooses which presentation is mounted based on an external auth-state
//! stream. The identity service itself (credential exchange, tokens,
//! persistence) lives behind the [`IdentityProvider`] trait.
//!
//! # Example
//!
//! ```rust
//! use easenote_auth::{ActiveScreen, AuthGate, LocalIdentityProvider, SignInConfig, UserRecord};
//!
//! let provider = LocalIdentityProvider::with_account(UserRecord::new("u-42"));
//! let mut gate = AuthGate::new(SignInConfig::new("client.apps.example.com"), provider).unwrap();
//! assert_eq!(gate.active_screen(), ActiveScreen::SignIn);
//!
//! gate.sign_in().unwrap();
//! gate.poll();
//! assert_eq!(gate.active_screen(), ActiveScreen::Home);
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod identity;
pub mod provider;

pub use config::SignInConfig;
pub use error::{AuthError, Result};
pub use gate::{ActiveScreen, AuthGate, AuthState, GateTransition};
pub use identity::{Identity, UserRecord};
pub use provider::{AuthSubscription, IdentityProvider, LocalIdentityProvider};
