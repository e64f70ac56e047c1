//! Owned authentication session with explicit subscriptions.
//!
//! A [`SessionState`] is created by whoever owns the application lifecycle
//! and handed to the components that need it. Components call
//! [`SessionState::subscribe`] to follow sign-in and sign-out; dropping the
//! returned [`SessionSubscription`] unsubscribes.

use tokio::sync::watch;

use super::auth::AuthenticatedUser;

/// A change observed by a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(AuthenticatedUser),
    SignedOut,
}

/// Current signed-in user, if any.
#[derive(Debug)]
pub struct SessionState {
    sender: watch::Sender<Option<AuthenticatedUser>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Start signed out.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Record `user` as signed in and notify subscribers.
    pub fn sign_in(&self, user: AuthenticatedUser) {
        self.sender.send_replace(Some(user));
    }

    /// Clear the session, returning the user that was signed in.
    pub fn sign_out(&self) -> Option<AuthenticatedUser> {
        self.sender.send_replace(None)
    }

    /// Snapshot of the signed-in user.
    #[must_use]
    pub fn current(&self) -> Option<AuthenticatedUser> {
        self.sender.borrow().clone()
    }

    /// Follow future session changes.
    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Handle returned by [`SessionState::subscribe`].
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: watch::Receiver<Option<AuthenticatedUser>>,
}

impl SessionSubscription {
    /// Wait for the next change.
    ///
    /// Several changes made between two calls collapse into the latest one.
    /// Returns `None` once the owning [`SessionState`] has been dropped.
    pub async fn next(&mut self) -> Option<SessionEvent> {
        self.receiver.changed().await.ok()?;
        let event = match self.receiver.borrow_and_update().clone() {
            Some(user) => SessionEvent::SignedIn(user),
            None => SessionEvent::SignedOut,
        };
        Some(event)
    }

    /// Snapshot of the signed-in user as this subscription last saw it.
    #[must_use]
    pub fn current(&self) -> Option<AuthenticatedUser> {
        self.receiver.borrow().clone()
    }
}
