//! Authentication provider seam.
//!
//! The provider owns accounts and session persistence. Medialist only needs
//! account creation, sign-in/sign-out and a stream of "current user changed"
//! notifications, which is what [`AuthProvider`] exposes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

/// Minimum password length accepted by the provider.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Identity of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider-assigned unique id
    pub uid: String,
    /// Account email
    pub email: String,
}

/// Errors reported by an authentication provider.
///
/// Display strings are shown to users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// An account with this email already exists
    #[error("The email address is already in use by another account.")]
    EmailAlreadyInUse,

    /// Password shorter than the provider accepts
    #[error("Password should be at least {min_len} characters")]
    WeakPassword { min_len: usize },

    /// Unknown email or wrong password
    #[error("The email or password is incorrect.")]
    InvalidCredentials,

    /// Provider could not be reached
    #[error("Authentication provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },
}

/// Trait for authentication backends.
#[async_trait]
pub trait AuthProvider: Send + Sync + std::fmt::Debug {
    /// Creates an account and signs it in.
    ///
    /// # Errors
    /// - `AuthError::EmailAlreadyInUse` - An account with this email exists
    /// - `AuthError::WeakPassword` - Password rejected by the provider
    /// - `AuthError::ProviderUnavailable` - Provider could not be reached
    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    /// Signs an existing account in.
    ///
    /// # Errors
    /// - `AuthError::InvalidCredentials` - Unknown email or wrong password
    /// - `AuthError::ProviderUnavailable` - Provider could not be reached
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    /// Signs the current user out.
    ///
    /// # Errors
    /// - `AuthError::ProviderUnavailable` - Provider could not be reached
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribes to current-user changes.
    ///
    /// The first [`AuthSubscription::next`] yields the state at subscription time.
    fn on_state_change(&self) -> AuthSubscription;

    /// Provider for another client of the same backend.
    ///
    /// The scope shares accounts with `self` but tracks its own signed-in
    /// user, like a second browser talking to the same hosted provider.
    fn client_scope(&self) -> Arc<dyn AuthProvider>;
}

/// Stream of current-user notifications from a provider.
///
/// Dropping the subscription releases it.
#[derive(Debug)]
pub struct AuthSubscription {
    receiver: watch::Receiver<Option<AuthUser>>,
    delivered_initial: bool,
}

impl AuthSubscription {
    /// Wraps a provider-side watch receiver.
    pub fn new(receiver: watch::Receiver<Option<AuthUser>>) -> Self {
        Self {
            receiver,
            delivered_initial: false,
        }
    }

    /// Waits for the next notification.
    ///
    /// Returns `None` once the provider has gone away. Intermediate values
    /// may be coalesced; the latest one is always delivered.
    pub async fn next(&mut self) -> Option<Option<AuthUser>> {
        if self.delivered_initial {
            self.receiver.changed().await.ok()?;
        } else {
            self.delivered_initial = true;
        }
        Some(self.receiver.borrow_and_update().clone())
    }
}

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
}

/// In-process authentication provider.
///
/// Keeps accounts in memory and behaves like a hosted provider: creating an
/// account signs it in, duplicate emails and short passwords are rejected.
/// Scopes from [`AuthProvider::client_scope`] share the account table.
#[derive(Debug)]
pub struct InMemoryAuthProvider {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    state: watch::Sender<Option<AuthUser>>,
}

impl InMemoryAuthProvider {
    /// Creates a provider with no accounts and nobody signed in.
    pub fn new() -> Self {
        Self::with_accounts(Arc::new(RwLock::new(HashMap::new())))
    }

    fn with_accounts(accounts: Arc<RwLock<HashMap<String, Account>>>) -> Self {
        let (state, _) = watch::channel(None);
        Self { accounts, state }
    }

    /// Currently signed-in user, if any.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.borrow().clone()
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.read().len()
    }

    fn publish(&self, user: Option<AuthUser>) {
        // send_replace never fails, even with no subscribers
        self.state.send_replace(user);
    }
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min_len: MIN_PASSWORD_LEN,
            });
        }

        let key = normalize_email(email);
        let user = {
            let mut accounts = self.accounts.write();
            if accounts.contains_key(&key) {
                tracing::debug!(email = %key, "Rejected duplicate account");
                return Err(AuthError::EmailAlreadyInUse);
            }
            let uid = uuid::Uuid::new_v4().simple().to_string();
            accounts.insert(
                key.clone(),
                Account {
                    uid: uid.clone(),
                    password: password.to_string(),
                },
            );
            AuthUser { uid, email: key }
        };

        tracing::info!(uid = %user.uid, "Account created");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let key = normalize_email(email);
        let user = {
            let accounts = self.accounts.read();
            match accounts.get(&key) {
                Some(account) if account.password == password => AuthUser {
                    uid: account.uid.clone(),
                    email: key,
                },
                _ => return Err(AuthError::InvalidCredentials),
            }
        };

        tracing::info!(uid = %user.uid, "Signed in");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        tracing::info!("Signed out");
        self.publish(None);
        Ok(())
    }

    fn on_state_change(&self) -> AuthSubscription {
        AuthSubscription::new(self.state.subscribe())
    }

    fn client_scope(&self) -> Arc<dyn AuthProvider> {
        Arc::new(Self::with_accounts(self.accounts.clone()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_account_signs_in() {
        let provider = InMemoryAuthProvider::new();
        let user = provider
            .create_account("Viewer@Example.com", "hunter22")
            .await
            .unwrap();

        assert_eq!(user.email, "viewer@example.com");
        assert_eq!(provider.current_user(), Some(user));
        assert_eq!(provider.account_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let provider = InMemoryAuthProvider::new();
        provider.create_account("a@b.co", "secret1").await.unwrap();

        let result = provider.create_account("A@B.co ", "secret2").await;
        assert_eq!(result, Err(AuthError::EmailAlreadyInUse));
        assert_eq!(provider.account_count(), 1);
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let provider = InMemoryAuthProvider::new();
        let result = provider.create_account("a@b.co", "12345").await;
        assert_eq!(result, Err(AuthError::WeakPassword { min_len: 6 }));
    }

    #[tokio::test]
    async fn test_sign_in_checks_password() {
        let provider = InMemoryAuthProvider::new();
        provider.create_account("a@b.co", "secret1").await.unwrap();
        provider.sign_out().await.unwrap();

        assert_eq!(
            provider.sign_in("a@b.co", "wrong!!").await,
            Err(AuthError::InvalidCredentials)
        );
        assert!(provider.current_user().is_none());

        let user = provider.sign_in("a@b.co", "secret1").await.unwrap();
        assert_eq!(provider.current_user(), Some(user));
    }

    #[tokio::test]
    async fn test_client_scopes_share_accounts_not_sign_in() {
        let provider = InMemoryAuthProvider::new();
        let first = provider.client_scope();
        let second = provider.client_scope();

        first.create_account("a@b.co", "secret1").await.unwrap();
        assert_eq!(provider.account_count(), 1);

        let mut second_state = second.on_state_change();
        assert_eq!(second_state.next().await, Some(None));
        assert_eq!(
            second.create_account("a@b.co", "secret1").await,
            Err(AuthError::EmailAlreadyInUse)
        );

        let user = second.sign_in("a@b.co", "secret1").await.unwrap();
        assert_eq!(second_state.next().await, Some(Some(user)));
        assert!(provider.current_user().is_none());
    }

    #[tokio::test]
    async fn test_subscription_yields_initial_then_changes() {
        let provider = InMemoryAuthProvider::new();
        let mut subscription = provider.on_state_change();

        assert_eq!(subscription.next().await, Some(None));

        let user = provider.create_account("a@b.co", "secret1").await.unwrap();
        assert_eq!(subscription.next().await, Some(Some(user)));

        provider.sign_out().await.unwrap();
        assert_eq!(subscription.next().await, Some(None));
    }

    #[tokio::test]
    async fn test_subscription_ends_with_provider() {
        let provider = InMemoryAuthProvider::new();
        let mut subscription = provider.on_state_change();
        assert_eq!(subscription.next().await, Some(None));

        drop(provider);
        assert_eq!(subscription.next().await, None);
    }
}
