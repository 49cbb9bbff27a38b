//! Auth-gate controller
//!
//! Decides which presentation is mounted: the sign-in screen while nobody is
//! signed in, the docked header + home screen once the auth-state stream
//! delivers a user. The gate is a two-state machine driven by stream events
//! and by the explicit sign-out action.

use crate::config::SignInConfig;
use crate::error::Result;
use crate::identity::{Identity, UserRecord};
use crate::provider::{AuthSubscription, IdentityProvider};
use easenote_core::{EventId, StateId, StateMachine};

/// Gate state identifiers
pub mod gate_states {
    use easenote_core::StateId;

    /// Nobody signed in (also the state before the first stream event)
    pub const UNAUTHENTICATED: StateId = 0;
    /// A valid identity is present
    pub const AUTHENTICATED: StateId = 1;
}

/// Gate event identifiers
pub mod gate_events {
    use easenote_core::EventId;

    /// Stream delivered a valid identity
    pub const IDENTITY: EventId = 0;
    /// Stream delivered null (or a malformed identity)
    pub const NO_IDENTITY: EventId = 1;
    /// Sign-out action completed
    pub const SIGNED_OUT: EventId = 2;
}

/// Gate state enum for pattern matching
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    /// Convert from StateId
    pub fn from_state_id(id: StateId) -> Option<Self> {
        match id {
            gate_states::UNAUTHENTICATED => Some(AuthState::Unauthenticated),
            gate_states::AUTHENTICATED => Some(AuthState::Authenticated),
            _ => None,
        }
    }

    /// Convert to StateId
    pub fn to_state_id(self) -> StateId {
        match self {
            AuthState::Unauthenticated => gate_states::UNAUTHENTICATED,
            AuthState::Authenticated => gate_states::AUTHENTICATED,
        }
    }

    /// The presentation mounted in this state
    pub fn screen(self) -> ActiveScreen {
        match self {
            AuthState::Unauthenticated => ActiveScreen::SignIn,
            AuthState::Authenticated => ActiveScreen::Home,
        }
    }
}

/// The one presentation that is mounted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveScreen {
    /// Onboarding / sign-in presentation
    SignIn,
    /// Docked header + home presentation
    Home,
}

/// A state change reported by [`AuthGate::poll`] or [`AuthGate::sign_out`]
///
/// `Authenticated -> Authenticated` means a different user signed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateTransition {
    pub from: AuthState,
    pub to: AuthState,
}

/// Create the gate state machine
fn create_gate_fsm() -> StateMachine {
    use gate_events::*;
    use gate_states::*;

    StateMachine::builder(UNAUTHENTICATED)
        .on(UNAUTHENTICATED, IDENTITY, AUTHENTICATED)
        .on(AUTHENTICATED, IDENTITY, AUTHENTICATED)
        .on(AUTHENTICATED, NO_IDENTITY, UNAUTHENTICATED)
        .on(AUTHENTICATED, SIGNED_OUT, UNAUTHENTICATED)
        .build()
}

/// Auth-gate controller
///
/// Subscribes to the provider's auth-state stream once, on construction, and
/// unsubscribes when dropped. The stream is drained from the frame loop with
/// [`poll`](Self::poll), so no async runtime is needed.
pub struct AuthGate<P: IdentityProvider> {
    provider: P,
    subscription: AuthSubscription,
    fsm: StateMachine,
    identity: Option<Identity>,
}

impl<P: IdentityProvider> AuthGate<P> {
    /// Configure the provider and subscribe to its auth-state stream
    pub fn new(config: SignInConfig, mut provider: P) -> Result<Self> {
        config.validate()?;
        provider.configure(&config)?;
        let subscription = provider.subscribe();
        tracing::debug!("auth gate subscribed");

        Ok(Self {
            provider,
            subscription,
            fsm: create_gate_fsm(),
            identity: None,
        })
    }

    pub fn state(&self) -> AuthState {
        AuthState::from_state_id(self.fsm.current_state()).unwrap_or_default()
    }

    pub fn active_screen(&self) -> ActiveScreen {
        self.state().screen()
    }

    /// The signed-in user, if any
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Drain pending auth-state events
    ///
    /// Events are applied in order. Returns the last transition that fired,
    /// or `None` if the gate did not move.
    pub fn poll(&mut self) -> Option<GateTransition> {
        let mut last = None;
        while let Some(event) = self.subscription.try_next() {
            if let Some(transition) = self.apply(event) {
                last = Some(transition);
            }
        }
        last
    }

    fn apply(&mut self, event: Option<UserRecord>) -> Option<GateTransition> {
        let identity = match event {
            Some(record) => match Identity::from_record(record) {
                Ok(identity) => Some(identity),
                Err(err) => {
                    tracing::warn!("ignoring auth event: {}", err);
                    None
                }
            },
            None => None,
        };

        // Repeated delivery of the current user is not a change
        if identity.is_some()
            && identity.as_ref().map(Identity::uid) == self.identity().map(Identity::uid)
        {
            self.identity = identity;
            return None;
        }

        let from = self.state();
        let event = match identity {
            Some(_) => gate_events::IDENTITY,
            None => gate_events::NO_IDENTITY,
        };
        self.fire(from, event, identity)
    }

    fn fire(
        &mut self,
        from: AuthState,
        event: EventId,
        identity: Option<Identity>,
    ) -> Option<GateTransition> {
        if !self.fsm.send(event) {
            return None;
        }
        let to = self.state();
        self.identity = identity;
        match self.identity.as_ref() {
            Some(identity) => {
                tracing::info!(uid = identity.uid(), "auth gate: {:?} -> {:?}", from, to)
            }
            None => tracing::info!("auth gate: {:?} -> {:?}", from, to),
        }
        Some(GateTransition { from, to })
    }

    /// Ask the provider to sign in
    ///
    /// A successful exchange is observed later through [`poll`](Self::poll).
    /// Failures are logged and returned; the gate stays where it is.
    pub fn sign_in(&mut self) -> Result<()> {
        self.provider.sign_in().map_err(|err| {
            tracing::error!("sign-in failed: {}", err);
            err
        })
    }

    /// Sign out through the provider
    ///
    /// On success the local identity is cleared and the gate returns to
    /// `Unauthenticated` immediately. On failure the state is unchanged.
    pub fn sign_out(&mut self) -> Result<Option<GateTransition>> {
        match self.provider.sign_out() {
            Ok(()) => {
                tracing::info!("User logged out");
                let from = self.state();
                Ok(self.fire(from, gate_events::SIGNED_OUT, None))
            }
            Err(err) => {
                tracing::warn!("sign-out failed: {}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use crate::provider::LocalIdentityProvider;

    fn gate_with(provider: &LocalIdentityProvider) -> AuthGate<LocalIdentityProvider> {
        AuthGate::new(SignInConfig::new("client.apps.example.com"), provider.clone()).unwrap()
    }

    #[test]
    fn test_starts_unauthenticated() {
        let provider = LocalIdentityProvider::new();
        let gate = gate_with(&provider);
        assert_eq!(gate.state(), AuthState::Unauthenticated);
        assert_eq!(gate.active_screen(), ActiveScreen::SignIn);
        assert!(gate.identity().is_none());
    }

    #[test]
    fn test_config_injected_into_provider() {
        let provider = LocalIdentityProvider::new();
        let _gate = gate_with(&provider);
        assert_eq!(
            provider.config().map(|c| c.web_client_id),
            Some("client.apps.example.com".to_string())
        );
        assert!(matches!(
            AuthGate::new(SignInConfig::default(), provider.clone()),
            Err(AuthError::Config(_))
        ));
    }

    #[test]
    fn test_null_then_user_authenticates() {
        let provider = LocalIdentityProvider::new();
        let mut gate = gate_with(&provider);

        // Initial null emitted on subscribe
        assert_eq!(gate.poll(), None);
        assert_eq!(gate.state(), AuthState::Unauthenticated);

        provider.emit(Some(UserRecord::new("u-1")));
        let transition = gate.poll().unwrap();
        assert_eq!(transition.from, AuthState::Unauthenticated);
        assert_eq!(transition.to, AuthState::Authenticated);
        assert_eq!(gate.active_screen(), ActiveScreen::Home);
        assert_eq!(gate.identity().map(Identity::uid), Some("u-1"));
    }

    #[test]
    fn test_null_event_signs_out() {
        let provider = LocalIdentityProvider::new();
        let mut gate = gate_with(&provider);
        provider.emit(Some(UserRecord::new("u-1")));
        gate.poll();

        provider.emit(None);
        let transition = gate.poll().unwrap();
        assert_eq!(transition.to, AuthState::Unauthenticated);
        assert!(gate.identity().is_none());
    }

    #[test]
    fn test_malformed_identity_is_unauthenticated() {
        let provider = LocalIdentityProvider::new();
        let mut gate = gate_with(&provider);

        provider.emit(Some(UserRecord::new("")));
        assert_eq!(gate.poll(), None);
        assert_eq!(gate.state(), AuthState::Unauthenticated);

        provider.emit(Some(UserRecord::new("u-1")));
        gate.poll();
        provider.emit(Some(UserRecord::new(" ")));
        assert_eq!(gate.poll().map(|t| t.to), Some(AuthState::Unauthenticated));
    }

    #[test]
    fn test_sign_in_through_stream() {
        let provider = LocalIdentityProvider::with_account(UserRecord::new("u-7"));
        let mut gate = gate_with(&provider);
        gate.poll();

        gate.sign_in().unwrap();
        // Not authenticated until the stream is drained
        assert_eq!(gate.state(), AuthState::Unauthenticated);
        assert!(gate.poll().is_some());
        assert_eq!(gate.state(), AuthState::Authenticated);
    }

    #[test]
    fn test_sign_in_failure_keeps_state() {
        let provider = LocalIdentityProvider::with_account(UserRecord::new("u-7"));
        provider.fail_next_sign_in("play services missing");
        let mut gate = gate_with(&provider);

        assert!(gate.sign_in().is_err());
        assert_eq!(gate.poll(), None);
        assert_eq!(gate.state(), AuthState::Unauthenticated);

        // Retry succeeds
        gate.sign_in().unwrap();
        gate.poll();
        assert_eq!(gate.state(), AuthState::Authenticated);
    }

    #[test]
    fn test_sign_out() {
        let provider = LocalIdentityProvider::with_account(UserRecord::new("u-7"));
        let mut gate = gate_with(&provider);
        gate.sign_in().unwrap();
        gate.poll();

        let transition = gate.sign_out().unwrap().unwrap();
        assert_eq!(transition.to, AuthState::Unauthenticated);
        assert_eq!(gate.active_screen(), ActiveScreen::SignIn);
        assert!(gate.identity().is_none());

        // The provider's trailing null is a no-op
        assert_eq!(gate.poll(), None);
    }

    #[test]
    fn test_sign_out_failure_keeps_state() {
        let provider = LocalIdentityProvider::with_account(UserRecord::new("u-7"));
        let mut gate = gate_with(&provider);
        gate.sign_in().unwrap();
        gate.poll();

        provider.fail_next_sign_out("token revoked");
        assert!(gate.sign_out().is_err());
        assert_eq!(gate.state(), AuthState::Authenticated);
        assert!(gate.identity().is_some());
    }

    #[test]
    fn test_repeated_user_is_not_a_transition() {
        let provider = LocalIdentityProvider::new();
        let mut gate = gate_with(&provider);
        provider.emit(Some(UserRecord::new("u-1")));
        assert!(gate.poll().is_some());

        provider.emit(Some(UserRecord::new("u-1").with_email("ada@college.edu")));
        assert_eq!(gate.poll(), None);
        assert_eq!(gate.identity().and_then(Identity::email), Some("ada@college.edu"));

        provider.emit(Some(UserRecord::new("u-2")));
        let switch = gate.poll().unwrap();
        assert_eq!(switch.from, AuthState::Authenticated);
        assert_eq!(switch.to, AuthState::Authenticated);
    }

    #[test]
    fn test_exactly_one_screen() {
        let provider = LocalIdentityProvider::with_account(UserRecord::new("u-7"));
        let mut gate = gate_with(&provider);
        let events = [
            Some(UserRecord::new("u-1")),
            None,
            Some(UserRecord::new("")),
            Some(UserRecord::new("u-2")),
            Some(UserRecord::new("u-3")),
            None,
        ];
        for event in events {
            provider.emit(event);
            gate.poll();
            let screen = gate.active_screen();
            assert_eq!(screen == ActiveScreen::Home, gate.identity().is_some());
        }
    }

    #[test]
    fn test_drop_unsubscribes() {
        let provider = LocalIdentityProvider::new();
        let gate = gate_with(&provider);
        assert_eq!(provider.subscriber_count(), 1);
        drop(gate);
        assert_eq!(provider.subscriber_count(), 0);
    }
}
