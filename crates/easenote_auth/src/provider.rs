//! Identity provider seam
//!
//! The gate never talks to a sign-in service directly. It configures an
//! [`IdentityProvider`], asks it to sign in or out, and listens to the
//! auth-state stream returned by [`IdentityProvider::subscribe`]. Session
//! results arrive on that stream, never through the return value of
//! [`IdentityProvider::sign_in`].

use crate::config::SignInConfig;
use crate::error::{AuthError, Result};
use crate::identity::UserRecord;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::{self, error::TryRecvError};

/// External identity collaborator
pub trait IdentityProvider {
    /// Apply the sign-in client configuration
    fn configure(&mut self, config: &SignInConfig) -> Result<()>;

    /// Start a credential exchange
    ///
    /// `Ok` means the exchange was started. The resulting user, if any, is
    /// delivered on the auth-state stream.
    fn sign_in(&mut self) -> Result<()>;

    /// End the current session
    fn sign_out(&mut self) -> Result<()>;

    /// Subscribe to auth-state changes
    ///
    /// The current state is emitted immediately, then one event per change.
    fn subscribe(&mut self) -> AuthSubscription;
}

/// Receiving end of the auth-state stream
///
/// Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct AuthSubscription {
    receiver: mpsc::UnboundedReceiver<Option<UserRecord>>,
    disconnected: bool,
}

impl AuthSubscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<Option<UserRecord>>) -> Self {
        Self {
            receiver,
            disconnected: false,
        }
    }

    /// Create a connected sender/subscription pair
    pub fn channel() -> (mpsc::UnboundedSender<Option<UserRecord>>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self::new(receiver))
    }

    /// Take the next pending event without blocking
    ///
    /// The outer `Option` is `None` when nothing is pending.
    pub fn try_next(&mut self) -> Option<Option<UserRecord>> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.disconnected {
                    tracing::debug!("auth-state stream closed by provider");
                    self.disconnected = true;
                }
                None
            }
        }
    }
}

// ============================================================================
// Local provider
// ============================================================================

#[derive(Default)]
struct LocalState {
    config: Option<SignInConfig>,
    current: Option<UserRecord>,
    account: Option<UserRecord>,
    sign_in_failures: VecDeque<String>,
    sign_out_failures: VecDeque<String>,
    subscribers: Vec<mpsc::UnboundedSender<Option<UserRecord>>>,
    sign_in_calls: usize,
}

impl LocalState {
    fn broadcast(&mut self, event: Option<UserRecord>) {
        self.subscribers
            .retain(|sender| sender.send(event.clone()).is_ok());
    }
}

/// In-process identity provider
///
/// Signs in to a preset account and publishes to every live subscription.
/// Clones share state, so a test or the simulation driver can keep a clone
/// to script the service while the gate owns another.
#[derive(Clone, Default)]
pub struct LocalIdentityProvider {
    state: Arc<Mutex<LocalState>>,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that signs in to `account`
    pub fn with_account(account: UserRecord) -> Self {
        let provider = Self::new();
        provider.lock().account = Some(account);
        provider
    }

    fn lock(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next sign-in attempt fail with `reason`
    pub fn fail_next_sign_in(&self, reason: impl Into<String>) {
        self.lock().sign_in_failures.push_back(reason.into());
    }

    /// Make the next sign-out attempt fail with `reason`
    pub fn fail_next_sign_out(&self, reason: impl Into<String>) {
        self.lock().sign_out_failures.push_back(reason.into());
    }

    /// Publish a raw event, as a remote session change would
    pub fn emit(&self, event: Option<UserRecord>) {
        let mut state = self.lock();
        state.current = event.clone();
        state.broadcast(event);
    }

    /// The user the service currently considers signed in
    pub fn current_user(&self) -> Option<UserRecord> {
        self.lock().current.clone()
    }

    /// Configuration applied by the last `configure` call
    pub fn config(&self) -> Option<SignInConfig> {
        self.lock().config.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        let mut state = self.lock();
        state.subscribers.retain(|sender| !sender.is_closed());
        state.subscribers.len()
    }

    pub fn sign_in_calls(&self) -> usize {
        self.lock().sign_in_calls
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn configure(&mut self, config: &SignInConfig) -> Result<()> {
        config.validate()?;
        self.lock().config = Some(config.clone());
        Ok(())
    }

    fn sign_in(&mut self) -> Result<()> {
        let mut state = self.lock();
        state.sign_in_calls += 1;
        if state.config.is_none() {
            return Err(AuthError::Config("sign-in client not configured".to_string()));
        }
        if let Some(reason) = state.sign_in_failures.pop_front() {
            return Err(AuthError::SignIn(reason));
        }
        let Some(account) = state.account.clone() else {
            return Err(AuthError::SignIn("no account available".to_string()));
        };
        state.current = Some(account.clone());
        state.broadcast(Some(account));
        Ok(())
    }

    fn sign_out(&mut self) -> Result<()> {
        let mut state = self.lock();
        if let Some(reason) = state.sign_out_failures.pop_front() {
            return Err(AuthError::SignOut(reason));
        }
        state.current = None;
        state.broadcast(None);
        Ok(())
    }

    fn subscribe(&mut self) -> AuthSubscription {
        let (sender, subscription) = AuthSubscription::channel();
        let mut state = self.lock();
        // A closed receiver cannot exist yet, so this send cannot fail
        let _ = sender.send(state.current.clone());
        state.subscribers.push(sender);
        subscription
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(provider: &mut LocalIdentityProvider) {
        provider
            .configure(&SignInConfig::new("client.apps.example.com"))
            .unwrap();
    }

    #[test]
    fn test_subscribe_emits_current_state() {
        let mut provider = LocalIdentityProvider::new();
        let mut sub = provider.subscribe();
        assert_eq!(sub.try_next(), Some(None));
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn test_sign_in_publishes_account() {
        let mut provider = LocalIdentityProvider::with_account(UserRecord::new("u-1"));
        configured(&mut provider);
        let mut sub = provider.subscribe();
        sub.try_next();

        provider.sign_in().unwrap();
        assert_eq!(sub.try_next(), Some(Some(UserRecord::new("u-1"))));

        provider.sign_out().unwrap();
        assert_eq!(sub.try_next(), Some(None));
    }

    #[test]
    fn test_sign_in_requires_configuration() {
        let mut provider = LocalIdentityProvider::with_account(UserRecord::new("u-1"));
        assert!(matches!(provider.sign_in(), Err(AuthError::Config(_))));
    }

    #[test]
    fn test_scripted_failures() {
        let mut provider = LocalIdentityProvider::with_account(UserRecord::new("u-1"));
        configured(&mut provider);
        provider.fail_next_sign_in("network down");
        assert!(matches!(provider.sign_in(), Err(AuthError::SignIn(_))));
        assert!(provider.sign_in().is_ok());

        provider.fail_next_sign_out("revoked");
        assert!(matches!(provider.sign_out(), Err(AuthError::SignOut(_))));
        assert!(provider.current_user().is_some());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let mut provider = LocalIdentityProvider::new();
        let sub = provider.subscribe();
        assert_eq!(provider.subscriber_count(), 1);
        drop(sub);
        assert_eq!(provider.subscriber_count(), 0);
    }

    #[test]
    fn test_disconnected_stream() {
        let (sender, mut sub) = AuthSubscription::channel();
        sender.send(Some(UserRecord::new("u-1"))).unwrap();
        drop(sender);
        assert!(sub.try_next().is_some());
        assert_eq!(sub.try_next(), None);
        // Stays closed; later polls keep returning nothing
        assert_eq!(sub.try_next(), None);
    }
}
