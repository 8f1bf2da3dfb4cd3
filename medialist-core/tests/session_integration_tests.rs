//! Integration tests for the session bridge.
//!
//! These tests drive a real in-memory auth provider and observe the shared
//! session store through the public SessionHandle API.

use std::sync::Arc;
use std::time::Duration;

use medialist_core::{
    AuthProvider, AuthUser, InMemoryAuthProvider, SessionBridge, SessionHandle,
    spawn_session_store,
};
use tokio::time::timeout;

/// Test fixture wiring a provider, a store and a mounted bridge.
struct SessionFixture {
    provider: Arc<InMemoryAuthProvider>,
    session: SessionHandle,
    bridge: SessionBridge,
}

impl SessionFixture {
    fn new() -> Self {
        let provider = Arc::new(InMemoryAuthProvider::new());
        let session = spawn_session_store();
        let bridge = SessionBridge::mount(provider.clone(), session.clone());
        Self {
            provider,
            session,
            bridge,
        }
    }

    /// Waits until the store publishes `expected`.
    async fn wait_for(&self, expected: Option<AuthUser>) {
        let mut changes = self.session.subscribe();
        let result = timeout(Duration::from_secs(1), async {
            loop {
                if *changes.borrow_and_update() == expected {
                    return;
                }
                if changes.changed().await.is_err() {
                    return;
                }
            }
        })
        .await;
        assert!(result.is_ok(), "session never reached {expected:?}");
        assert_eq!(self.session.current_user(), expected);
    }
}

#[tokio::test]
async fn test_sign_up_publishes_user() {
    let fixture = SessionFixture::new();

    let user = fixture
        .provider
        .create_account("viewer@example.com", "secret1")
        .await
        .unwrap();

    fixture.wait_for(Some(user.clone())).await;
    assert_eq!(user.email, "viewer@example.com");
    assert!(fixture.bridge.is_active());
}

#[tokio::test]
async fn test_sign_out_clears_user() {
    let fixture = SessionFixture::new();

    let user = fixture
        .provider
        .create_account("viewer@example.com", "secret1")
        .await
        .unwrap();
    fixture.wait_for(Some(user)).await;

    fixture.provider.sign_out().await.unwrap();
    fixture.wait_for(None).await;
}

#[tokio::test]
async fn test_user_signed_in_before_mount_is_published() {
    let provider = Arc::new(InMemoryAuthProvider::new());
    let user = provider
        .create_account("early@example.com", "secret1")
        .await
        .unwrap();

    let session = spawn_session_store();
    let _bridge = SessionBridge::mount(provider.clone(), session.clone());

    let mut changes = session.subscribe();
    timeout(Duration::from_secs(1), changes.wait_for(|u| u.is_some()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.current_user(), Some(user));
}

#[tokio::test]
async fn test_unmounted_bridge_stops_dispatching() {
    let SessionFixture {
        provider,
        session,
        bridge,
    } = SessionFixture::new();

    drop(bridge);
    tokio::task::yield_now().await;

    provider
        .create_account("late@example.com", "secret1")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(session.current_user().is_none());
}
