//! Session store and the bridge that feeds it from the auth provider.
//!
//! The current user lives in a single-writer store: every write is a
//! [`SessionAction`] sent to the store task, which applies actions one at a
//! time and republishes the result on a watch channel. Any number of readers
//! can hold a [`SessionHandle`].

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::auth::{AuthProvider, AuthUser};

/// Errors from the session store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Store task has stopped
    #[error("Session store has shut down")]
    StoreShutdown,
}

/// State transitions accepted by the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// A provider confirmed a signed-in user.
    Login(AuthUser),
    /// The provider reports nobody is signed in.
    Logout,
}

enum SessionCommand {
    Dispatch {
        action: SessionAction,
        responder: oneshot::Sender<()>,
    },
}

/// Spawns the session store task and returns a handle to it.
///
/// The store starts with nobody signed in and stops once every handle is dropped.
pub fn spawn_session_store() -> SessionHandle {
    let (sender, receiver) = mpsc::channel(32);
    let (state_tx, state_rx) = watch::channel(None);

    tokio::spawn(run_store_loop(receiver, state_tx));

    SessionHandle {
        sender,
        state: state_rx,
    }
}

async fn run_store_loop(
    mut receiver: mpsc::Receiver<SessionCommand>,
    state: watch::Sender<Option<AuthUser>>,
) {
    tracing::debug!("Session store started");

    while let Some(command) = receiver.recv().await {
        match command {
            SessionCommand::Dispatch { action, responder } => {
                state.send_modify(|current| reduce(current, action));
                let _ = responder.send(());
            }
        }
    }

    tracing::debug!("Session store stopped");
}

fn reduce(current: &mut Option<AuthUser>, action: SessionAction) {
    match action {
        SessionAction::Login(user) => {
            tracing::info!(uid = %user.uid, "Session user set");
            *current = Some(user);
        }
        SessionAction::Logout => {
            if current.take().is_some() {
                tracing::info!("Session user cleared");
            }
        }
    }
}

/// Handle for reading and updating the shared current user.
///
/// Cheap to clone; every clone talks to the same store task.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
    state: watch::Receiver<Option<AuthUser>>,
}

impl SessionHandle {
    /// Applies an action and waits until the store has published the result.
    ///
    /// # Errors
    /// - `SessionError::StoreShutdown` - The store task is no longer running
    pub async fn dispatch(&self, action: SessionAction) -> Result<(), SessionError> {
        let (responder, rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Dispatch { action, responder })
            .await
            .map_err(|_| SessionError::StoreShutdown)?;

        rx.await.map_err(|_| SessionError::StoreShutdown)
    }

    /// Currently signed-in user, if any.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published change.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.state.clone()
    }
}

/// Republishes auth provider notifications into the session store.
///
/// Subscribes exactly once, when mounted. Dropping the bridge stops the
/// listener and releases the provider subscription.
#[derive(Debug)]
pub struct SessionBridge {
    task: JoinHandle<()>,
}

impl SessionBridge {
    /// Subscribes to `provider` and starts forwarding notifications to `session`.
    pub fn mount(provider: Arc<dyn AuthProvider>, session: SessionHandle) -> Self {
        let mut subscription = provider.on_state_change();

        let task = tokio::spawn(async move {
            while let Some(user) = subscription.next().await {
                let action = match user {
                    Some(user) => SessionAction::Login(user),
                    None => SessionAction::Logout,
                };
                if session.dispatch(action).await.is_err() {
                    tracing::warn!("Session store gone, stopping auth bridge");
                    break;
                }
            }
            tracing::debug!("Auth bridge stopped");
        });

        Self { task }
    }

    /// Whether the listener task is still running.
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for SessionBridge {
    fn drop(&mut self) {
        self.task.abort();
    }
}
