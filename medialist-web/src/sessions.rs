//! Per-browser sessions
//!
//! Every browser that signs in or registers gets its own auth scope, session
//! store and bridge, found again through the session cookie. Requests
//! without a known cookie are anonymous.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, header};
use medialist_core::{AuthProvider, AuthUser, SessionBridge, SessionHandle, spawn_session_store};
use parking_lot::RwLock;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "medialist_session";

/// How long a form handler waits for the session to reflect a sign-in or sign-out.
const SESSION_SETTLE_TIMEOUT: Duration = Duration::from_secs(1);

/// Auth state belonging to one browser.
#[derive(Debug)]
pub struct ClientSession {
    id: String,
    /// This browser's view of the auth provider
    pub auth: Arc<dyn AuthProvider>,
    session: SessionHandle,
    _bridge: SessionBridge,
}

impl ClientSession {
    /// Opens a fresh, signed-out session on a new scope of `provider`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn open(provider: &dyn AuthProvider) -> Self {
        let auth = provider.client_scope();
        let session = spawn_session_store();
        let bridge = SessionBridge::mount(auth.clone(), session.clone());

        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            auth,
            session,
            _bridge: bridge,
        }
    }

    /// Value stored in the session cookie.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// User signed in on this browser, if any.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.session.current_user()
    }

    /// Waits briefly until the session store shows `expected`.
    ///
    /// Auth changes reach the store asynchronously through the bridge. Form
    /// handlers call this before redirecting so the next page sees them.
    pub async fn await_user(&self, expected: Option<&AuthUser>) {
        let mut changes = self.session.subscribe();
        let settled = tokio::time::timeout(
            SESSION_SETTLE_TIMEOUT,
            changes.wait_for(|user| user.as_ref() == expected),
        )
        .await
        .is_ok_and(|changed| changed.is_ok());

        if !settled {
            tracing::warn!(session = %self.id, "Session did not settle before redirect");
        }
    }

    /// `Set-Cookie` value that stores this session in the browser.
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id)
    }
}

/// `Set-Cookie` value that removes the session cookie.
pub const EXPIRED_COOKIE: &str = "medialist_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";

/// Reads the session id from the request's `Cookie` headers.
pub fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, id)| id)
        .filter(|id| !id.is_empty())
}

/// Open sessions by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    clients: RwLock<HashMap<String, Arc<ClientSession>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for the request's cookie, if the id is known.
    pub fn lookup(&self, headers: &HeaderMap) -> Option<Arc<ClientSession>> {
        let id = session_id(headers)?;
        self.clients.read().get(id).cloned()
    }

    /// Keeps `client` until it is removed.
    pub fn insert(&self, client: Arc<ClientSession>) {
        tracing::debug!(session = %client.id(), "Session opened");
        self.clients.write().insert(client.id().to_string(), client);
    }

    /// Forgets the session for the request's cookie and returns it.
    pub fn remove(&self, headers: &HeaderMap) -> Option<Arc<ClientSession>> {
        let id = session_id(headers)?;
        let client = self.clients.write().remove(id);
        if client.is_some() {
            tracing::debug!(session = %id, "Session closed");
        }
        client
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.clients.read().len()
    }

    /// Whether no session is open.
    pub fn is_empty(&self) -> bool {
        self.clients.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use medialist_core::InMemoryAuthProvider;

    use super::*;

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_id_from_cookie_header() {
        let headers = cookie_headers("theme=dark; medialist_session=abc123; other=1");
        assert_eq!(session_id(&headers), Some("abc123"));

        assert_eq!(session_id(&cookie_headers("medialist_session=")), None);
        assert_eq!(session_id(&cookie_headers("medialist_sessionx=abc")), None);
        assert_eq!(session_id(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let provider = InMemoryAuthProvider::new();
        let registry = SessionRegistry::new();
        let first = Arc::new(ClientSession::open(&provider));
        let second = Arc::new(ClientSession::open(&provider));
        registry.insert(first.clone());
        registry.insert(second.clone());

        let user = first.auth.create_account("a@b.co", "secret1").await.unwrap();
        first.await_user(Some(&user)).await;

        assert_eq!(first.current_user(), Some(user));
        assert!(second.current_user().is_none());
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_and_remove_by_cookie() {
        let provider = InMemoryAuthProvider::new();
        let registry = SessionRegistry::new();
        let client = Arc::new(ClientSession::open(&provider));
        registry.insert(client.clone());

        let cookie = client.cookie();
        assert!(cookie.starts_with("medialist_session="));
        let headers = cookie_headers(cookie.split(';').next().unwrap());

        assert!(registry.lookup(&headers).is_some());
        assert!(registry.remove(&headers).is_some());
        assert!(registry.lookup(&headers).is_none());
        assert!(registry.is_empty());
    }
}
